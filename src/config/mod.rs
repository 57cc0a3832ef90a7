use std::env;

/// Which variant of the app a process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Every story route requires a valid bearer token.
    Required,
    /// No auth gate; stories carry no owner.
    Open,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_days: i64,
    pub auth: AuthMode,
}

impl AppConfig {
    /// Read configuration from the environment, falling back to defaults.
    /// `.env` loading happens in `main` before this is called.
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:stories.db".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(5000);
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        let jwt_expiry_days = env::var("JWT_EXPIRY_DAYS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(7);
        let auth = parse_auth_mode(env::var("AUTH_DISABLED").ok().as_deref());

        Self { database_url, port, jwt_secret, jwt_expiry_days, auth }
    }
}

fn parse_auth_mode(disabled: Option<&str>) -> AuthMode {
    match disabled {
        Some("1") | Some("true") | Some("yes") => AuthMode::Open,
        _ => AuthMode::Required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_is_required_unless_explicitly_disabled() {
        assert_eq!(parse_auth_mode(None), AuthMode::Required);
        assert_eq!(parse_auth_mode(Some("false")), AuthMode::Required);
        assert_eq!(parse_auth_mode(Some("0")), AuthMode::Required);
        assert_eq!(parse_auth_mode(Some("true")), AuthMode::Open);
        assert_eq!(parse_auth_mode(Some("1")), AuthMode::Open);
    }
}
