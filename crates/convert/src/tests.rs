use super::*;

#[test]
fn golden_record_flattens_to_single_line() {
    let source = br#"{"log":"hello\n","stream":"stdout","time":"2024-01-01T00:00:00Z"}"#;
    let mut out = Vec::new();
    json_to_text(&mut out, &source[..]).expect("well-formed record");
    assert_eq!(out, b"2024-01-01T00:00:00Z stdout hello\n");
}

#[test]
fn message_without_newline_gets_exactly_one() {
    let source = br#"{"log":"no terminator","stream":"stderr","time":"t"}"#;
    let mut out = Vec::new();
    json_to_text(&mut out, &source[..]).expect("well-formed record");
    assert_eq!(out, b"t stderr no terminator\n");
}

#[test]
fn message_with_newline_is_not_doubled() {
    let source = b"{\"log\":\"kept\\n\",\"stream\":\"stdout\",\"time\":\"t\"}\n";
    let mut out = Vec::new();
    json_to_text(&mut out, &source[..]).expect("well-formed record");
    assert_eq!(out, b"t stdout kept\n");
}

#[test]
fn output_ordering_mirrors_input_ordering() {
    let source = concat!(
        r#"{"log":"first\n","stream":"stdout","time":"t1"}"#,
        "\n",
        r#"{"log":"second\n","stream":"stderr","time":"t2"}"#,
        "\n",
    );
    let mut out = Vec::new();
    json_to_text(&mut out, source.as_bytes()).expect("well-formed records");
    assert_eq!(out, b"t1 stdout first\nt2 stderr second\n");
}

#[test]
fn malformed_line_aborts_keeping_converted_prefix() {
    let source = concat!(
        r#"{"log":"ok\n","stream":"stdout","time":"t1"}"#,
        "\n",
        "not json at all\n",
        r#"{"log":"never reached\n","stream":"stdout","time":"t3"}"#,
        "\n",
    );
    let mut out = Vec::new();
    let error = json_to_text(&mut out, source.as_bytes()).expect_err("must fail fast");
    assert!(matches!(error, ConvertError::Record { .. }));
    assert_eq!(out, b"t1 stdout ok\n");
}

#[test]
fn empty_json_line_is_malformed() {
    let source = b"{\"log\":\"ok\\n\",\"stream\":\"stdout\",\"time\":\"t\"}\n\n";
    let mut out = Vec::new();
    assert!(json_to_text(&mut out, &source[..]).is_err());
    assert_eq!(out, b"t stdout ok\n");
}

#[test]
fn missing_fields_decode_as_empty_strings() {
    let source = b"{\"log\":\"only log\\n\"}\n";
    let mut out = Vec::new();
    json_to_text(&mut out, &source[..]).expect("tolerant decode");
    assert_eq!(out, b"  only log\n");
}

#[test]
fn empty_source_produces_empty_destination() {
    let mut out = Vec::new();
    json_to_text(&mut out, &b""[..]).expect("nothing to convert");
    assert!(out.is_empty());
}

#[test]
fn crlf_terminated_records_decode() {
    let source = b"{\"log\":\"dos\\n\",\"stream\":\"stdout\",\"time\":\"t\"}\r\n";
    let mut out = Vec::new();
    json_to_text(&mut out, &source[..]).expect("line terminator stripped");
    assert_eq!(out, b"t stdout dos\n");
}

#[test]
fn passthrough_round_trips_arbitrary_bytes() {
    let payload: Vec<u8> = (0u8..=255).cycle().take(4096).collect();
    let mut out = Vec::new();
    let copied = passthrough(&mut out, &mut &payload[..]).expect("copy succeeds");
    assert_eq!(copied, payload.len() as u64);
    assert_eq!(out, payload);
}

#[test]
fn record_error_truncates_long_lines_for_display() {
    let line = vec![b'x'; 1024];
    let error = LogRecord::from_line(&line).expect_err("not a record");
    let text = error.to_string();
    assert!(text.contains("..."));
    assert!(text.len() < 1024);
}
