//! Server settings read from the environment at startup.

use std::time::Duration;

use applicant_ingest_core::env_parse_with_default;

const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3001";
const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 15 * 60 * 1000;
const DEFAULT_API_RATE_LIMIT: u32 = 100;
const DEFAULT_UPLOAD_RATE_LIMIT: u32 = 10;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Hides internal error detail from 500 responses.
    pub production: bool,
    /// Origins allowed by CORS. Requests without an `Origin` are unaffected.
    pub allowed_origins: Vec<String>,
    pub rate_limit_window: Duration,
    /// Requests per window per client IP across `/api/*`.
    pub api_rate_limit: u32,
    /// Uploads per window per client IP.
    pub upload_rate_limit: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            production: false,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_owned()],
            rate_limit_window: Duration::from_millis(DEFAULT_RATE_LIMIT_WINDOW_MS),
            api_rate_limit: DEFAULT_API_RATE_LIMIT,
            upload_rate_limit: DEFAULT_UPLOAD_RATE_LIMIT,
        }
    }
}

impl ServerSettings {
    pub fn from_env() -> Self {
        let production = std::env::var("APP_ENV")
            .is_ok_and(|v| v.trim().eq_ignore_ascii_case("production"));
        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .ok()
            .map(|v| parse_origins(&v))
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_ALLOWED_ORIGIN.to_owned()]);
        Self {
            production,
            allowed_origins,
            rate_limit_window: Duration::from_millis(
                env_parse_with_default("RATE_LIMIT_WINDOW_MS", DEFAULT_RATE_LIMIT_WINDOW_MS).max(1),
            ),
            api_rate_limit: env_parse_with_default("RATE_LIMIT_MAX_REQUESTS", DEFAULT_API_RATE_LIMIT),
            upload_rate_limit: env_parse_with_default("UPLOAD_RATE_LIMIT_MAX", DEFAULT_UPLOAD_RATE_LIMIT),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(ToOwned::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" https://a.example , ,https://b.example"),
            vec!["https://a.example".to_owned(), "https://b.example".to_owned()]
        );
    }
}
