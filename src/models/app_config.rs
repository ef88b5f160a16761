use crate::error::ConfigError;
use oauth2::{ClientId, ClientSecret, CsrfToken, RedirectUrl, TokenUrl};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 63477;
pub const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub redirect_uri: RedirectUrl,
    pub token_url: TokenUrl,
    pub port: u16,
    pub timeout: Duration,
    /// When set, callbacks whose `state` differs are rejected before any
    /// outbound call is made.
    pub expected_state: Option<CsrfToken>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values are
    /// treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let client_id = var("OAUTH_CLIENT_ID").ok_or(ConfigError::Missing("OAUTH_CLIENT_ID"))?;
        let client_secret =
            var("OAUTH_CLIENT_SECRET").ok_or(ConfigError::Missing("OAUTH_CLIENT_SECRET"))?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| invalid("PORT", e))?,
            None => DEFAULT_PORT,
        };

        let redirect_uri = var("OAUTH_REDIRECT_URI")
            .unwrap_or_else(|| format!("http://{}:{}/", Ipv4Addr::LOCALHOST, port));
        let redirect_uri =
            RedirectUrl::new(redirect_uri).map_err(|e| invalid("OAUTH_REDIRECT_URI", e))?;

        let token_url = var("OAUTH_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let token_url = TokenUrl::new(token_url).map_err(|e| invalid("OAUTH_TOKEN_URL", e))?;

        let timeout_secs = match var("OAUTH_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("OAUTH_TIMEOUT_SECS", e))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(invalid("OAUTH_TIMEOUT_SECS", "must be greater than zero"));
        }

        let expected_state = var("OAUTH_EXPECTED_STATE").map(CsrfToken::new);

        Ok(Self {
            client_id: ClientId::new(client_id),
            client_secret: ClientSecret::new(client_secret),
            redirect_uri,
            token_url,
            port,
            timeout: Duration::from_secs(timeout_secs),
            expected_state,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}

fn invalid(name: &'static str, detail: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        detail: detail.to_string(),
    }
}

/// Shared by every request. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("OAUTH_CLIENT_ID", "client-123"),
        ("OAUTH_CLIENT_SECRET", "shh"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();

        assert_eq!(config.client_id.as_str(), "client-123");
        assert_eq!(config.client_secret.secret(), "shh");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.redirect_uri.url().as_str(), "http://127.0.0.1:63477/");
        assert_eq!(config.token_url.url().as_str(), DEFAULT_TOKEN_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.expected_state.is_none());
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:63477");
    }

    #[test]
    fn test_redirect_follows_custom_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "8080"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.redirect_uri.url().as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("OAUTH_REDIRECT_URI", "http://localhost:9000/callback"),
            ("OAUTH_TOKEN_URL", "http://127.0.0.1:4000/token"),
            ("OAUTH_TIMEOUT_SECS", "3"),
            ("OAUTH_EXPECTED_STATE", "xyz"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(
            config.redirect_uri.url().as_str(),
            "http://localhost:9000/callback"
        );
        assert_eq!(config.token_url.url().as_str(), "http://127.0.0.1:4000/token");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.expected_state.unwrap().secret(), "xyz");
    }

    #[test]
    fn test_missing_client_id() {
        let err = AppConfig::from_lookup(lookup_from(&[("OAUTH_CLIENT_SECRET", "shh")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_CLIENT_ID")));
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("OAUTH_CLIENT_ID", "client-123"),
            ("OAUTH_CLIENT_SECRET", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OAUTH_CLIENT_SECRET")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (name, value) in [
            ("PORT", "not-a-port"),
            ("PORT", "70000"),
            ("OAUTH_TIMEOUT_SECS", "0"),
            ("OAUTH_TIMEOUT_SECS", "-1"),
            ("OAUTH_REDIRECT_URI", "not a url"),
            ("OAUTH_TOKEN_URL", "::"),
        ] {
            let mut pairs = REQUIRED.to_vec();
            pairs.push((name, value));
            let err = AppConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            match err {
                ConfigError::Invalid { name: got, .. } => assert_eq!(got, name),
                other => panic!("expected {} to be invalid, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_secret_not_in_debug_output() {
        let config = AppConfig::from_lookup(lookup_from(&REQUIRED)).unwrap();
        assert!(!format!("{:?}", config).contains("shh"));
    }
}
