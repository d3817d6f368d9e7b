use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Immutable application configuration
///
/// Read once from the environment at process start and passed explicitly to
/// every collaborator that needs a part of it.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub jwt: JwtSettings,
    pub smtp: SmtpSettings,
    pub telegram: Option<TelegramSettings>,
}

#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_minutes: i64,
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
}

impl AppSettings {
    /// Load settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when JWT_SECRET is absent or a variable fails
    /// to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://service_center.db?mode=rwc".to_string());

        let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let algorithm = match env::var("JWT_ALGORITHM") {
            Ok(value) => Algorithm::from_str(&value).map_err(|_| ConfigError::InvalidVar {
                name: "JWT_ALGORITHM",
                value,
            })?,
            Err(_) => Algorithm::HS256,
        };

        let expire_minutes = parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?;

        let smtp = SmtpSettings {
            server: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: parse_var("SMTP_PORT", 587)?,
            username: env::var("SMTP_USER").unwrap_or_default(),
            password: env::var("SMTP_PASSWORD").unwrap_or_default(),
        };

        let telegram = env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .map(|bot_token| TelegramSettings { bot_token });

        Ok(Self {
            database_url,
            jwt: JwtSettings {
                secret,
                algorithm,
                expire_minutes,
            },
            smtp,
            telegram,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}
