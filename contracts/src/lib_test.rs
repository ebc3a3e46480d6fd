use super::*;
use serde_json::json;

#[test]
fn function_path_joins_prefix_and_name() {
    assert_eq!(function_path(GROQ_NAME_GENERATOR), "/functions/v1/groq-name-generator");
    assert_eq!(function_path(AUTO_CONFIRM_SIGNUP), "/functions/v1/auto-confirm-signup");
}

// =============================================================================
// NameGeneratorParams
// =============================================================================

#[test]
fn params_deserialize_camel_case_and_keep_extra_fields() {
    let params: NameGeneratorParams = serde_json::from_value(json!({
        "generatorType": "business",
        "systemPrompt": "You name companies.",
        "userPrompt": "A bakery in Lisbon",
        "count": 5,
        "tone": "playful"
    }))
    .unwrap();

    assert_eq!(params.generator_type, "business");
    assert_eq!(params.system_prompt, "You name companies.");
    assert_eq!(params.user_prompt, "A bakery in Lisbon");
    assert_eq!(params.extra.get("count"), Some(&json!(5)));
    assert_eq!(params.extra.get("tone"), Some(&json!("playful")));
}

#[test]
fn params_serialize_flattens_extra_fields_back_out() {
    let params = NameGeneratorParams::new("pet", "sys", "a grumpy cat").with_extra("style", json!("short"));
    let value = serde_json::to_value(&params).unwrap();
    assert_eq!(
        value,
        json!({
            "generatorType": "pet",
            "systemPrompt": "sys",
            "userPrompt": "a grumpy cat",
            "style": "short"
        })
    );
}

#[test]
fn params_validate_accepts_complete_params() {
    let params = NameGeneratorParams::new("business", "sys", "user");
    assert_eq!(params.validate(), Ok(()));
}

#[test]
fn params_validate_reports_missing_field_by_wire_name() {
    let params: NameGeneratorParams = serde_json::from_value(json!({
        "generatorType": "business",
        "userPrompt": "user"
    }))
    .unwrap();
    assert_eq!(params.validate(), Err(ParamsError::MissingField("systemPrompt")));
}

#[test]
fn params_validate_rejects_whitespace_only_values() {
    let params = NameGeneratorParams::new("business", "sys", "   ");
    assert_eq!(params.validate(), Err(ParamsError::MissingField("userPrompt")));

    let params = NameGeneratorParams::new("", "sys", "user");
    let err = params.validate().unwrap_err();
    assert_eq!(err.to_string(), "missing required field: generatorType");
}

// =============================================================================
// HandlerResponse
// =============================================================================

#[test]
fn handler_response_omits_absent_fields() {
    let ok = serde_json::to_value(HandlerResponse::message("done")).unwrap();
    assert_eq!(ok, json!({ "message": "done" }));

    let err = serde_json::to_value(HandlerResponse::error("boom")).unwrap();
    assert_eq!(err, json!({ "error": "boom" }));
}

#[test]
fn handler_response_tolerates_missing_fields_on_decode() {
    let resp: HandlerResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(resp, HandlerResponse::default());
}

#[test]
fn generated_names_wire_shape() {
    let names = GeneratedNames { names: vec!["Acme".into(), "Globex".into()] };
    assert_eq!(serde_json::to_value(&names).unwrap(), json!({ "names": ["Acme", "Globex"] }));
}
