use treatment_db::vector::vector_literal;

#[test]
fn empty_slice_renders_empty_brackets() {
    assert_eq!(vector_literal(&[]), "[]");
}

#[test]
fn single_value_has_no_trailing_comma() {
    assert_eq!(vector_literal(&[0.5]), "[0.5]");
}

#[test]
fn multiple_values_are_comma_separated() {
    assert_eq!(vector_literal(&[1.0, -2.5, 0.25]), "[1,-2.5,0.25]");
}

#[test]
fn round_trips_through_float_parsing() {
    let input = vec![0.123_456_79_f32, -0.987_654_3, 42.0];
    let literal = vector_literal(&input);
    let inner = literal.trim_start_matches('[').trim_end_matches(']');

    let parsed: Vec<f32> = inner.split(',').map(|s| s.parse().unwrap()).collect();
    assert_eq!(parsed, input);
}
