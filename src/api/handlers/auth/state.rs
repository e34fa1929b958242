//! Auth configuration and shared state.

use secrecy::SecretString;

const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct AuthConfig {
    session_secret: SecretString,
    session_ttl_seconds: i64,
    frontend_base_url: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new(session_secret: SecretString, frontend_base_url: String) -> Self {
        Self {
            session_secret,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            frontend_base_url,
        }
    }

    #[must_use]
    pub fn with_session_ttl_seconds(mut self, seconds: i64) -> Self {
        self.session_ttl_seconds = seconds;
        self
    }

    pub(crate) fn session_secret(&self) -> &SecretString {
        &self.session_secret
    }

    pub(crate) fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }

    pub(crate) fn frontend_base_url(&self) -> &str {
        &self.frontend_base_url
    }

    // Only mark cookies secure when the frontend is served over HTTPS.
    pub(super) fn session_cookie_secure(&self) -> bool {
        self.frontend_base_url.starts_with("https://")
    }
}

pub struct AuthState {
    config: AuthConfig,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(frontend: &str) -> AuthConfig {
        AuthConfig::new(
            SecretString::from("test-secret".to_string()),
            frontend.to_string(),
        )
    }

    #[test]
    fn defaults_to_one_week_sessions() {
        let config = config("http://localhost:5173");
        assert_eq!(config.session_ttl_seconds(), 604_800);
    }

    #[test]
    fn ttl_override_applies() {
        let config = config("http://localhost:5173").with_session_ttl_seconds(3600);
        assert_eq!(config.session_ttl_seconds(), 3600);
    }

    #[test]
    fn cookie_secure_follows_frontend_scheme() {
        assert!(!config("http://localhost:5173").session_cookie_secure());
        assert!(config("https://resep.dev").session_cookie_secure());
    }
}
