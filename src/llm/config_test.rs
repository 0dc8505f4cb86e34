use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_read_anthropic_key() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "secret")])).unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_LLM_MODEL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn key_env_indirection() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[
        ("LLM_API_KEY_ENV", "TEST_KEY"),
        ("TEST_KEY", "sk-test"),
        ("ANTHROPIC_API_KEY", "ignored"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_key, "sk-test");
}

#[test]
fn overrides_model_and_timeouts() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[
        ("ANTHROPIC_API_KEY", "secret"),
        ("LLM_MODEL", "claude-haiku"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", " 7 "),
    ]))
    .unwrap();
    assert_eq!(cfg.model, "claude-haiku");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn bad_timeout_falls_back() {
    let cfg = LlmConfig::from_lookup(lookup_from(&[
        ("ANTHROPIC_API_KEY", "secret"),
        ("LLM_REQUEST_TIMEOUT_SECS", "soon"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_LLM_REQUEST_TIMEOUT_SECS);
}

#[test]
fn missing_key_names_variable() {
    let err = LlmConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "ANTHROPIC_API_KEY"));

    let err = LlmConfig::from_lookup(lookup_from(&[("LLM_API_KEY_ENV", "OTHER")])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { ref var } if var == "OTHER"));
}

#[test]
fn blank_key_is_missing() {
    let err = LlmConfig::from_lookup(lookup_from(&[("ANTHROPIC_API_KEY", "   ")])).unwrap_err();
    assert!(matches!(err, LlmError::MissingApiKey { .. }));
}
