//! Configuration, built from environment variables.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Mail transport configuration (IMAP inbound, SMTP outbound, addresses).
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub imap_host: String,
    pub imap_port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    /// Where exercise and feedback emails are sent.
    pub target_email: String,
}

impl MailConfig {
    /// Build config from environment variables.
    ///
    /// `EMAIL_USER`, `EMAIL_PASSWORD` and `TARGET_EMAIL` are required;
    /// hosts and ports default to Gmail's IMAP/submission endpoints.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            imap_host: env_or("IMAP_HOST", "imap.gmail.com"),
            imap_port: port_env("IMAP_PORT", 993)?,
            smtp_host: env_or("SMTP_HOST", "smtp.gmail.com"),
            smtp_port: port_env("SMTP_PORT", 587)?,
            username: require_env("EMAIL_USER")?,
            password: require_env("EMAIL_PASSWORD")?,
            target_email: require_env("TARGET_EMAIL")?,
        })
    }
}

/// Evaluator configuration.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl EvaluatorConfig {
    /// Build config from environment variables. `OPENAI_API_KEY` is required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: SecretString::from(require_env("OPENAI_API_KEY")?),
            model: env_or("LLM_MODEL", "gpt-4o-mini"),
        })
    }
}

/// Path of the persisted exercise record, overridable via `STATE_FILE`.
pub fn state_file_path() -> PathBuf {
    std::env::var("STATE_FILE")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("state.json"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn port_env(key: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            v.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("not a valid port: {v}"),
                })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        // SAFETY: test-unique variable name; no other thread touches it.
        unsafe { std::env::remove_var("VT_TEST_ENV_OR") };
        assert_eq!(env_or("VT_TEST_ENV_OR", "fallback"), "fallback");
    }

    #[test]
    fn env_or_trims_value() {
        // SAFETY: test-unique variable name; no other thread touches it.
        unsafe { std::env::set_var("VT_TEST_ENV_TRIM", "  imap.example.com  ") };
        assert_eq!(env_or("VT_TEST_ENV_TRIM", "x"), "imap.example.com");
        unsafe { std::env::remove_var("VT_TEST_ENV_TRIM") };
    }

    #[test]
    fn require_env_rejects_blank() {
        // SAFETY: test-unique variable name; no other thread touches it.
        unsafe { std::env::set_var("VT_TEST_ENV_BLANK", "   ") };
        assert!(matches!(
            require_env("VT_TEST_ENV_BLANK"),
            Err(ConfigError::MissingEnvVar(_))
        ));
        unsafe { std::env::remove_var("VT_TEST_ENV_BLANK") };
    }

    #[test]
    fn port_env_rejects_garbage() {
        // SAFETY: test-unique variable name; no other thread touches it.
        unsafe { std::env::set_var("VT_TEST_ENV_PORT", "not-a-port") };
        assert!(matches!(
            port_env("VT_TEST_ENV_PORT", 993),
            Err(ConfigError::InvalidValue { .. })
        ));
        unsafe { std::env::remove_var("VT_TEST_ENV_PORT") };
    }
}
