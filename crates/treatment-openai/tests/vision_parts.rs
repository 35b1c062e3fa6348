use treatment_openai::vision::{data_url, supported_content_type};

#[test]
fn data_url_carries_content_type_and_base64_payload() {
    let url = data_url("image/png", b"abc");
    assert_eq!(url, "data:image/png;base64,YWJj");
}

#[test]
fn data_url_of_empty_bytes_is_just_the_prefix() {
    assert_eq!(data_url("application/pdf", b""), "data:application/pdf;base64,");
}

#[test]
fn accepts_the_documented_upload_types() {
    for ct in [
        "image/png",
        "image/jpeg",
        "image/webp",
        "image/gif",
        "application/pdf",
    ] {
        assert!(supported_content_type(ct), "{ct} should be supported");
    }
}

#[test]
fn rejects_everything_else() {
    for ct in ["text/plain", "image/tiff", "application/zip", ""] {
        assert!(!supported_content_type(ct), "{ct} should be rejected");
    }
}
