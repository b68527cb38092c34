#![allow(dead_code)]

use serde_json::json;

use solace::api::AppState;
use solace::config::{BreathingConfig, Config, LlmConfig, MoodConfig, ServerConfig};

pub const TEST_MODEL: &str = "google/gemini-2.5-flash";

pub fn llm_config(base_url: &str, api_key: Option<&str>) -> LlmConfig {
    LlmConfig {
        model: TEST_MODEL.to_string(),
        base_url: base_url.to_string(),
        api_key: api_key.map(str::to_string),
        api_key_env: None,
        timeout_secs: 5,
    }
}

pub fn app_state(base_url: &str, api_key: Option<&str>) -> AppState {
    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        llm: llm_config(base_url, api_key),
        breathing: BreathingConfig::default(),
        mood: MoodConfig::default(),
    };
    AppState::new(config).expect("app state")
}

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": TEST_MODEL,
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}
