use std::env;

use serial_test::serial;

use solace::config::{Config, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, LLM_API_KEY_VAR};
use solace::llm::LlmProvider;

const VARS: [&str; 10] = [
    "SOLACE_HOST",
    "SOLACE_PORT",
    "LLM_MODEL",
    "LLM_BASE_URL",
    "LLM_API_KEY",
    "LLM_TIMEOUT",
    "BREATHING_TICK_MILLIS",
    "BREATHING_HOLD_SCALE",
    "MOOD_FRAME_MILLIS",
    "LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = Config::from_env();
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8787);
    assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
    assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.breathing.tick_millis, 1000);
    assert_eq!(config.breathing.hold_scale, 1.25);
    assert_eq!(config.mood.frame_millis, 16);
}

#[test]
#[serial]
fn test_every_section_reads_its_variables() {
    clear_env();
    env::set_var("SOLACE_HOST", "127.0.0.1");
    env::set_var("SOLACE_PORT", "9000");
    env::set_var("LLM_API_KEY", "sk-test");
    env::set_var("BREATHING_TICK_MILLIS", "250");
    env::set_var("BREATHING_HOLD_SCALE", "1.4");
    env::set_var("MOOD_FRAME_MILLIS", "33");

    let config = Config::from_env();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.llm.api_key_env.as_deref(), Some(LLM_API_KEY_VAR));
    assert_eq!(config.breathing.tick_millis, 250);
    assert_eq!(config.breathing.hold_scale, 1.4);
    assert_eq!(config.mood.frame_millis, 33);

    clear_env();
}

#[test]
#[serial]
fn test_malformed_numbers_fall_back_to_defaults() {
    clear_env();
    env::set_var("SOLACE_PORT", "eighty");
    env::set_var("LLM_TIMEOUT", "-3");
    env::set_var("MOOD_FRAME_MILLIS", "fast");

    let config = Config::from_env();
    assert_eq!(config.server.port, 8787);
    assert_eq!(config.llm.timeout_secs, 60);
    assert_eq!(config.mood.frame_millis, 16);

    clear_env();
}

#[test]
#[serial]
fn test_api_key_is_read_at_request_time() {
    clear_env();
    let provider = LlmProvider::new(&Config::from_env().llm).expect("provider");
    assert!(!provider.is_configured());

    env::set_var("LLM_API_KEY", "sk-rotated");
    assert_eq!(provider.api_key().as_deref(), Some("sk-rotated"));

    env::set_var("LLM_API_KEY", "sk-next");
    assert_eq!(provider.api_key().as_deref(), Some("sk-next"));

    env::remove_var("LLM_API_KEY");
    assert!(!provider.is_configured());

    clear_env();
}

#[test]
#[serial]
fn test_invalid_periods_and_scales_fall_back() {
    clear_env();
    env::set_var("BREATHING_TICK_MILLIS", "0");
    env::set_var("BREATHING_HOLD_SCALE", "NaN");
    env::set_var("MOOD_FRAME_MILLIS", "0");

    let config = Config::from_env();
    assert_eq!(config.breathing.tick_millis, 1000);
    assert_eq!(config.breathing.hold_scale, 1.25);
    assert_eq!(config.mood.frame_millis, 16);

    clear_env();
}
