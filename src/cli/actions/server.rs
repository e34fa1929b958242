use crate::api;
use crate::api::handlers::auth::AuthConfig;
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub session_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub frontend_base_url: String,
}

/// Execute the server action.
///
/// # Errors
/// Returns an error if the database connection or the server itself fails to
/// start.
pub async fn execute(args: Args) -> Result<()> {
    let auth_config = AuthConfig::new(args.session_secret, args.frontend_base_url)
        .with_session_ttl_seconds(args.session_ttl_seconds);

    api::new(args.port, args.dsn, auth_config).await
}
