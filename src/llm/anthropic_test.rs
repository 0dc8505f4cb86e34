use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-20250514",
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Revenue grew 12% quarter over quarter." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.first_text(), Some("Revenue grew 12% quarter over quarter."));
    assert_eq!(resp.model, "claude-sonnet-4-20250514");
    assert_eq!(resp.stop_reason.as_deref(), Some("end_turn"));
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_keeps_only_text_blocks() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "text", "text": "Here is my answer" },
        { "type": "some_future_type", "data": {} }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content, vec![ContentBlock::Text { text: "Here is my answer".into() }]);
}

#[test]
fn parse_thinking_only_response_is_empty() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." }
    ]));
    let resp = parse_response(&json).unwrap();
    assert!(resp.content.is_empty());
    assert_eq!(resp.first_text(), None);
}

#[test]
fn parse_null_stop_reason() {
    let json = serde_json::json!({
        "content": [],
        "model": "m",
        "stop_reason": null,
        "usage": { "input_tokens": 1, "output_tokens": 0 }
    })
    .to_string();
    assert!(parse_response(&json).unwrap().stop_reason.is_none());
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn request_omits_empty_system() {
    let messages = [Message::user("hi")];
    let body = MessagesRequest { model: "m", max_tokens: 16, system: "", messages: &messages };
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("system").is_none());
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["max_tokens"], 16);
}

#[test]
fn provider_error_envelope_is_summarized() {
    let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
    assert_eq!(provider_message(body), "overloaded_error: Overloaded");
}

#[test]
fn non_envelope_error_body_is_kept() {
    assert_eq!(provider_message("  upstream timeout\n"), "upstream timeout");
}

#[test]
fn client_rejects_key_with_newline() {
    let timeouts = LlmTimeouts { request_secs: 1, connect_secs: 1 };
    assert!(matches!(AnthropicClient::new("bad\nkey".into(), timeouts), Err(LlmError::HttpClientBuild(_))));
}
