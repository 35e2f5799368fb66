use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub session_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub mail: Option<MailSettings>,
}

/// Credentials for the outbound mail service. Only present when all three
/// variables are set.
#[derive(Clone)]
pub struct MailSettings {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self {
            database_url: try_load("DATABASE_URL", "sqlite://parksys.db?mode=rwc")?,
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "3000")?,
            db_max_connections: try_load("DB_MAX_CONNECTIONS", "5")?,
            session_ttl_hours: try_load("SESSION_TTL_HOURS", "24")?,
            bcrypt_cost: try_load("BCRYPT_COST", "12")?,
            mail: load_mail(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot work: sessions that expire on
    /// creation, bcrypt costs the hasher refuses, an empty pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_ttl_hours <= 0 {
            return Err(ConfigError::out_of_range(
                "SESSION_TTL_HOURS",
                "must be at least 1 hour",
            ));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::out_of_range(
                "BCRYPT_COST",
                "must be between 4 and 31",
            ));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::out_of_range(
                "DB_MAX_CONNECTIONS",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_max_connections: 1,
            session_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            mail: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub reason: String,
}

impl ConfigError {
    fn out_of_range(key: &str, reason: &str) -> Self {
        warn!("Invalid {key} value: {reason}");
        Self {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

fn load_mail() -> Option<MailSettings> {
    match (var("MAIL_HOST"), var("MAIL_USER"), var("MAIL_PASSWORD")) {
        (Some(host), Some(user), Some(password)) => Some(MailSettings {
            host,
            user,
            password,
        }),
        (None, None, None) => None,
        _ => {
            warn!("Mail settings incomplete, set MAIL_HOST, MAIL_USER and MAIL_PASSWORD");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_names_the_key() {
        env::set_var("PARKSYS_TEST_PORT", "not-a-port");
        let err = try_load::<u16>("PARKSYS_TEST_PORT", "3000").unwrap_err();
        assert_eq!(err.key, "PARKSYS_TEST_PORT");
        env::remove_var("PARKSYS_TEST_PORT");
    }

    #[test]
    fn missing_key_falls_back_to_default() {
        let value: i64 = try_load("PARKSYS_TEST_UNSET_TTL", "24").unwrap();
        assert_eq!(value, 24);
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn non_positive_session_ttl_is_rejected() {
        for ttl in [0, -5] {
            let config = Config {
                session_ttl_hours: ttl,
                ..Config::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.key, "SESSION_TTL_HOURS");
        }
    }

    #[test]
    fn bcrypt_cost_outside_hasher_range_is_rejected() {
        for cost in [0, 3, 32] {
            let config = Config {
                bcrypt_cost: cost,
                ..Config::default()
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.key, "BCRYPT_COST");
        }
        let lowest = Config {
            bcrypt_cost: 4,
            ..Config::default()
        };
        assert!(lowest.validate().is_ok());
    }

    #[test]
    fn empty_pool_is_rejected() {
        let config = Config {
            db_max_connections: 0,
            ..Config::default()
        };
        assert_eq!(config.validate().unwrap_err().key, "DB_MAX_CONNECTIONS");
    }

    #[test]
    fn mail_password_is_redacted_in_debug() {
        let mail = MailSettings {
            host: "smtp.example.org".into(),
            user: "parks".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{mail:?}");
        assert!(!printed.contains("hunter2"));
    }
}
