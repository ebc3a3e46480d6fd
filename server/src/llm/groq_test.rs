use super::*;

#[test]
fn parse_text_response() {
    let json = serde_json::json!({
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "{\"names\":[\"Acme\"]}" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.text, "{\"names\":[\"Acme\"]}");
    assert_eq!(resp.model, "llama-3.3-70b-versatile");
    assert_eq!(resp.finish_reason, "stop");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn parse_missing_choices_errors() {
    let json = serde_json::json!({ "model": "m", "choices": [] }).to_string();
    let err = parse_chat_completions_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_null_content_yields_empty_text() {
    let json = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": null }, "finish_reason": "length" }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert!(resp.text.is_empty());
    assert_eq!(resp.finish_reason, "length");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn parse_invalid_json_errors() {
    assert!(matches!(parse_chat_completions_response("not json"), Err(LlmError::ApiParse(_))));
}

#[test]
fn build_messages_prepends_system() {
    let history = vec![Message::user("a bakery")];
    let msgs = build_messages("name things", &history);
    assert_eq!(
        msgs,
        vec![CcMessage { role: "system", content: "name things" }, CcMessage { role: "user", content: "a bakery" }]
    );
}

#[test]
fn build_messages_skips_blank_system() {
    let history = vec![Message::user("a bakery")];
    let msgs = build_messages("  ", &history);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].role, "user");
}

#[test]
fn api_error_message_reads_openai_error_object() {
    let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
    assert_eq!(api_error_message(body), "Invalid API Key");
}

#[test]
fn api_error_message_reads_plain_error_string() {
    assert_eq!(api_error_message(r#"{"error":"rate limited"}"#), "rate limited");
}

#[test]
fn api_error_message_falls_back_to_body() {
    assert_eq!(api_error_message("  Bad Gateway \n"), "Bad Gateway");
}
