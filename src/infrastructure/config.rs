use std::env;

use crate::domain::circulation::DEFAULT_FINE_RATE_PER_DAY;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_port: u16,
    /// Full connection URL; takes precedence over the `db_*` fields
    pub database_url: Option<String>,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Offset from UTC, in minutes, that defines the library's calendar day
    pub utc_offset_minutes: i32,
    pub fine_rate_per_day: i64,
    /// Staff member recorded on a loan when the request names none
    pub default_staff_id: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_host: "localhost".to_string(),
            db_user: "root".to_string(),
            db_password: String::new(),
            db_name: "library_system".to_string(),
            db_port: 3306,
            database_url: None,
            port: 3000,
            cors_allowed_origins: Vec::new(),
            utc_offset_minutes: 0,
            fine_rate_per_day: DEFAULT_FINE_RATE_PER_DAY,
            default_staff_id: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            db_host: env::var("DB_HOST").unwrap_or(defaults.db_host),
            db_user: env::var("DB_USER").unwrap_or(defaults.db_user),
            db_password: env::var("DB_PASSWORD").unwrap_or(defaults.db_password),
            db_name: env::var("DB_NAME").unwrap_or(defaults.db_name),
            db_port: parsed("DB_PORT").unwrap_or(defaults.db_port),
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            port: parsed("PORT").unwrap_or(defaults.port),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            utc_offset_minutes: parsed("LIBRARY_UTC_OFFSET_MINUTES")
                .unwrap_or(defaults.utc_offset_minutes),
            fine_rate_per_day: parsed("FINE_RATE_PER_DAY").unwrap_or(defaults.fine_rate_per_day),
            default_staff_id: parsed("DEFAULT_STAFF_ID").unwrap_or(defaults.default_staff_id),
        }
    }

    /// Connection URL for the store
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            ),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
