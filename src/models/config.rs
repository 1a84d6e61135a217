//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration files.
#[cfg(feature = "server")]
const ENV_PREFIX: &str = "APP";

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Signing secret for cookies and auth tokens; at least 64 bytes.
    pub secret: String,
    pub auth_service_url: String,
    /// Local cache file of the relance configuration.
    pub relance_cache_path: String,
    /// Emails that receive the admin role when their profile is first created.
    /// From the environment: `APP_ADMIN_EMAILS=a@example.com,b@example.com`.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Layers `config/default`, the optional `config/{app_env}` and `APP_*`
    /// environment variables, later sources winning.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(app_env, None)
    }

    /// Same as [`ServerConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    fn load_with_env(
        app_env: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("admin_emails")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> config::Map<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn defaults_load_without_overrides() {
        let config = ServerConfig::load_with_env("test", Some(env(&[]))).expect("config loads");
        assert_eq!(config.port, 8080);
        assert!(config.admin_emails.is_empty());
    }

    #[test]
    fn admin_emails_split_from_environment() {
        let config = ServerConfig::load_with_env(
            "test",
            Some(env(&[
                ("APP_ADMIN_EMAILS", "boss@example.com,lead@example.com"),
                ("APP_PORT", "9090"),
            ])),
        )
        .expect("config loads");

        assert_eq!(
            config.admin_emails,
            vec!["boss@example.com".to_string(), "lead@example.com".to_string()]
        );
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn single_admin_email_is_still_a_list() {
        let config = ServerConfig::load_with_env(
            "test",
            Some(env(&[("APP_ADMIN_EMAILS", "boss@example.com")])),
        )
        .expect("config loads");

        assert_eq!(config.admin_emails, vec!["boss@example.com".to_string()]);
    }
}
