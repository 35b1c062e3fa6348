use treatment_merlin::fallback::{parse_candidates, should_fall_back};

#[test]
fn server_errors_and_rate_limits_fall_back() {
    assert!(should_fall_back(500));
    assert!(should_fall_back(503));
    assert!(should_fall_back(429));
}

#[test]
fn client_errors_do_not_fall_back() {
    assert!(!should_fall_back(400));
    assert!(!should_fall_back(401));
    assert!(!should_fall_back(404));
    assert!(!should_fall_back(422));
}

#[test]
fn parses_a_plain_json_array() {
    let reply = r#"[{"condition": "Migraine", "likelihood": 0.7, "rationale": "Recurrent unilateral headache."}]"#;

    let candidates = parse_candidates(reply).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].condition, "Migraine");
    assert!((candidates[0].likelihood - 0.7).abs() < f64::EPSILON);
}

#[test]
fn strips_a_markdown_code_fence() {
    let reply = "```json\n[{\"condition\": \"Tension headache\", \"likelihood\": 0.4, \"rationale\": \"Bilateral, band-like.\"}]\n```";

    let candidates = parse_candidates(reply).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].condition, "Tension headache");
}

#[test]
fn fence_without_info_string_still_parses() {
    let reply = "```\n[]\n```";

    assert!(parse_candidates(reply).unwrap().is_empty());
}

#[test]
fn prose_reply_is_a_parse_error() {
    assert!(parse_candidates("I think this is probably a migraine.").is_err());
}
