use std::env;

pub const DEFAULT_LLM_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_LLM_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
/// Variable the support proxy reads its bearer credential from on every request.
pub const LLM_API_KEY_VAR: &str = "LLM_API_KEY";

const DEFAULT_TICK_MILLIS: u64 = 1000;
const DEFAULT_HOLD_SCALE: f32 = 1.25;
const DEFAULT_FRAME_MILLIS: u64 = 16;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    parse_env_checked(var, default, |_| true)
}

/// Like [`parse_env_or`], but values rejected by `accept` also fall back.
fn parse_env_checked<T: std::str::FromStr>(var: &str, default: T, accept: impl Fn(&T) -> bool) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) if accept(&parsed) => parsed,
            Ok(_) => {
                tracing::warn!("Out-of-range value '{}' for {}. Using default.", val, var);
                default
            }
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Empty strings count as unset so `LLM_API_KEY=` in a `.env` file behaves
/// like a missing key.
pub(crate) fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub breathing: BreathingConfig,
    pub mood: MoodConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upstream chat-completion gateway used by the support proxy
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    /// Fixed credential. Takes effect only when `api_key_env` is unset or empty.
    pub api_key: Option<String>,
    /// Environment variable re-read on every support request.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct BreathingConfig {
    /// Always positive; a zero period is replaced by the default on load.
    pub tick_millis: u64,
    /// Scale rendered during hold phases. Inhale and exhale always span 1.0..1.5.
    pub hold_scale: f32,
}

#[derive(Debug, Clone)]
pub struct MoodConfig {
    pub frame_millis: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            api_key: None,
            api_key_env: None,
            timeout_secs: 60,
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            tick_millis: DEFAULT_TICK_MILLIS,
            hold_scale: DEFAULT_HOLD_SCALE,
        }
    }
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            frame_millis: DEFAULT_FRAME_MILLIS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let server = ServerConfig::default();
        let llm = LlmConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("SOLACE_HOST").unwrap_or(server.host),
                port: parse_env_or("SOLACE_PORT", server.port),
            },
            llm: LlmConfig {
                model: env_non_empty("LLM_MODEL").unwrap_or(llm.model),
                base_url: env_non_empty("LLM_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(llm.base_url),
                api_key: None,
                api_key_env: Some(LLM_API_KEY_VAR.to_string()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", llm.timeout_secs),
            },
            breathing: BreathingConfig {
                tick_millis: parse_env_checked("BREATHING_TICK_MILLIS", DEFAULT_TICK_MILLIS, |ms| {
                    *ms > 0
                }),
                hold_scale: parse_env_checked("BREATHING_HOLD_SCALE", DEFAULT_HOLD_SCALE, |scale| {
                    scale.is_finite() && *scale > 0.0
                }),
            },
            mood: MoodConfig {
                frame_millis: parse_env_checked("MOOD_FRAME_MILLIS", DEFAULT_FRAME_MILLIS, |ms| {
                    *ms > 0
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_llm_env() {
        env::remove_var("LLM_MODEL");
        env::remove_var("LLM_BASE_URL");
        env::remove_var("LLM_API_KEY");
        env::remove_var("LLM_TIMEOUT");
    }

    #[test]
    #[serial]
    fn test_llm_config_defaults() {
        clear_llm_env();

        let config = Config::from_env();
        assert_eq!(config.llm.model, DEFAULT_LLM_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_LLM_BASE_URL);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.api_key_env.as_deref(), Some(LLM_API_KEY_VAR));
        assert_eq!(config.llm.timeout_secs, 60);
    }

    #[test]
    #[serial]
    fn test_llm_config_from_env() {
        clear_llm_env();
        env::set_var("LLM_MODEL", "openai/gpt-4o-mini");
        env::set_var("LLM_BASE_URL", "http://localhost:9999/v1/");
        env::set_var("LLM_API_KEY", "secret");
        env::set_var("LLM_TIMEOUT", "5");

        let config = Config::from_env();
        assert_eq!(config.llm.model, "openai/gpt-4o-mini");
        assert_eq!(config.llm.base_url, "http://localhost:9999/v1");
        // Resolved per request by the provider, never captured here.
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.llm.timeout_secs, 5);

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_blank_api_key_counts_as_missing() {
        clear_llm_env();
        env::set_var("LLM_API_KEY", "   ");

        assert!(env_non_empty(LLM_API_KEY_VAR).is_none());

        clear_llm_env();
    }

    #[test]
    #[serial]
    fn test_breathing_defaults() {
        env::remove_var("BREATHING_TICK_MILLIS");
        env::remove_var("BREATHING_HOLD_SCALE");
        let config = Config::from_env();
        assert_eq!(config.breathing.tick_millis, 1000);
        assert_eq!(config.breathing.hold_scale, 1.25);
    }

    #[test]
    #[serial]
    fn test_zero_periods_fall_back_to_defaults() {
        env::set_var("BREATHING_TICK_MILLIS", "0");
        env::set_var("MOOD_FRAME_MILLIS", "0");

        let config = Config::from_env();
        assert_eq!(config.breathing.tick_millis, DEFAULT_TICK_MILLIS);
        assert_eq!(config.mood.frame_millis, DEFAULT_FRAME_MILLIS);

        env::remove_var("BREATHING_TICK_MILLIS");
        env::remove_var("MOOD_FRAME_MILLIS");
    }

    #[test]
    #[serial]
    fn test_non_finite_hold_scale_falls_back() {
        for value in ["NaN", "inf", "-inf", "0", "-1.2"] {
            env::set_var("BREATHING_HOLD_SCALE", value);
            let config = Config::from_env();
            assert_eq!(config.breathing.hold_scale, DEFAULT_HOLD_SCALE, "{value}");
        }
        env::remove_var("BREATHING_HOLD_SCALE");
    }

    #[test]
    fn test_default_does_not_read_environment() {
        let config = Config::default();
        assert_eq!(config.server.port, 8787);
        assert!(config.llm.api_key_env.is_none());
    }

    #[test]
    #[serial]
    fn test_parse_env_or_invalid_falls_back() {
        env::set_var("__TEST_SOLACE_PORT", "not-a-port");
        let result: u16 = parse_env_or("__TEST_SOLACE_PORT", 8787);
        assert_eq!(result, 8787);
        env::remove_var("__TEST_SOLACE_PORT");
    }
}
