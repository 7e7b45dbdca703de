/*
 * Responsibility
 * - 環境変数や設定の読み込み (JWT secret, DATABASE_URL, REDIS_URL, CORS 許可など)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - DATABASE_URL / REDIS_URL が無い場合は in-memory backend で起動
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<HeaderValue>,

    // None → in-memory backends
    pub database_url: Option<String>,
    pub redis_url: Option<String>,

    pub jwt_secret_key: String,
    pub jwt_algorithm: Algorithm,
    pub auth_issuer: Option<String>,
    pub auth_audience: Option<String>,
    pub access_token_leeway_seconds: u64,
    pub token_revocation_ttl_seconds: u64,

    pub request_body_limit_bytes: usize,
    pub request_timeout_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("database", &self.database_url.is_some())
            .field("redis", &self.redis_url.is_some())
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("auth_issuer", &self.auth_issuer)
            .field("auth_audience", &self.auth_audience)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // 空文字は未設定扱い
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = match var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = var("APP_ENV")
            .map(|v| AppEnv::parse(&v))
            .unwrap_or(AppEnv::Development);

        // header に載せられない origin は起動時に弾く
        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                HeaderValue::from_str(s).map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGINS"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let database_url = var("DATABASE_URL");
        let redis_url = var("REDIS_URL");

        let jwt_secret_key = var("JWT_SECRET_KEY").ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let jwt_algorithm = match var("JWT_ALGORITHM") {
            Some(raw) => parse_hmac_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let auth_issuer = var("AUTH_ISSUER");
        let auth_audience = var("AUTH_AUDIENCE");

        let access_token_leeway_seconds =
            parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", var("ACCESS_TOKEN_LEEWAY_SECONDS"), 60)?;

        let token_revocation_ttl_seconds = parse_or(
            "TOKEN_REVOCATION_TTL_SECONDS",
            var("TOKEN_REVOCATION_TTL_SECONDS"),
            86_400,
        )?;

        let request_body_limit_bytes = parse_or(
            "REQUEST_BODY_LIMIT_BYTES",
            var("REQUEST_BODY_LIMIT_BYTES"),
            1024 * 1024,
        )?;

        let request_timeout_seconds =
            parse_or("REQUEST_TIMEOUT_SECONDS", var("REQUEST_TIMEOUT_SECONDS"), 30)?;

        if token_revocation_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("TOKEN_REVOCATION_TTL_SECONDS"));
        }
        if request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            redis_url,
            jwt_secret_key,
            jwt_algorithm,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            token_revocation_ttl_seconds,
            request_body_limit_bytes,
            request_timeout_seconds,
        })
    }
}

#[cfg(test)]
impl Config {
    /// Development config with in-memory backends and the given HMAC secret.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            database_url: None,
            redis_url: None,
            jwt_secret_key: secret.to_string(),
            jwt_algorithm: Algorithm::HS256,
            auth_issuer: None,
            auth_audience: None,
            access_token_leeway_seconds: 0,
            token_revocation_ttl_seconds: 3600,
            request_body_limit_bytes: 64 * 1024,
            request_timeout_seconds: 5,
        }
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(v) => v.parse::<T>().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

// 共有シークレットで検証するので HMAC 系のみ許可
fn parse_hmac_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match Algorithm::from_str(&raw.to_ascii_uppercase()) {
        Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
        _ => Err(ConfigError::Invalid("JWT_ALGORITHM")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[("JWT_SECRET_KEY", "s3cret")]).unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.jwt_algorithm, Algorithm::HS256);
        assert_eq!(config.access_token_leeway_seconds, 60);
        assert_eq!(config.token_revocation_ttl_seconds, 86_400);
        assert_eq!(config.request_body_limit_bytes, 1024 * 1024);
        assert_eq!(config.request_timeout_seconds, 30);
        assert!(config.database_url.is_none());
        assert!(config.redis_url.is_none());
        assert!(config.auth_issuer.is_none());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(load(&[]).err(), Some(ConfigError::Missing("JWT_SECRET_KEY")));
        assert_eq!(
            load(&[("JWT_SECRET_KEY", "  ")]).err(),
            Some(ConfigError::Missing("JWT_SECRET_KEY"))
        );
    }

    #[test]
    fn only_hmac_algorithms_are_accepted() {
        let config = load(&[("JWT_SECRET_KEY", "k"), ("JWT_ALGORITHM", "hs512")]).unwrap();
        assert_eq!(config.jwt_algorithm, Algorithm::HS512);

        for bad in ["RS256", "ES256", "none"] {
            assert_eq!(
                load(&[("JWT_SECRET_KEY", "k"), ("JWT_ALGORITHM", bad)]).err(),
                Some(ConfigError::Invalid("JWT_ALGORITHM")),
                "{bad}"
            );
        }
    }

    #[test]
    fn malformed_numbers_fail_startup() {
        assert_eq!(
            load(&[("JWT_SECRET_KEY", "k"), ("PORT", "http")]).err(),
            Some(ConfigError::Invalid("PORT"))
        );
        assert_eq!(
            load(&[("JWT_SECRET_KEY", "k"), ("REQUEST_TIMEOUT_SECONDS", "0")]).err(),
            Some(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        );
    }

    #[test]
    fn unusable_origin_fails_startup() {
        assert_eq!(
            load(&[
                ("JWT_SECRET_KEY", "k"),
                ("CORS_ALLOWED_ORIGINS", "https://ok.example,https://bad\u{7f}.example"),
            ])
            .err(),
            Some(ConfigError::Invalid("CORS_ALLOWED_ORIGINS"))
        );
    }

    #[test]
    fn production_reads_origin_allowlist() {
        let config = load(&[
            ("JWT_SECRET_KEY", "k"),
            ("APP_ENV", "prod"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
            ("DATABASE_URL", "postgres://localhost/calc"),
        ])
        .unwrap();

        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/calc")
        );
    }
}
