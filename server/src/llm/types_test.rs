use super::*;

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::ConfigParse("x".into()).error_code(), "E_CONFIG_PARSE");
    assert_eq!(LlmError::MissingApiKey { var: "GROQ_API_KEY".into() }.error_code(), "E_MISSING_API_KEY");
    assert_eq!(LlmError::ApiRequest("x".into()).error_code(), "E_API_REQUEST");
    assert_eq!(
        LlmError::ApiResponse { status: 429, message: "slow down".into() }.error_code(),
        "E_API_RESPONSE"
    );
    assert_eq!(LlmError::ApiParse("x".into()).error_code(), "E_API_PARSE");
    assert_eq!(LlmError::HttpClientBuild("x".into()).error_code(), "E_HTTP_CLIENT_BUILD");
}

#[test]
fn api_response_display_includes_status_and_message() {
    let err = LlmError::ApiResponse { status: 401, message: "Invalid API Key".into() };
    assert_eq!(err.to_string(), "API response error: status 401: Invalid API Key");
}

#[test]
fn missing_api_key_display_names_variable() {
    let err = LlmError::MissingApiKey { var: "GROQ_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var GROQ_API_KEY not set");
}

#[test]
fn user_message_has_user_role() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "hello");
}
