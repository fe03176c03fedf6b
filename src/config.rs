use std::env;
use std::path::PathBuf;

use crate::services::aggregation::DEFAULT_TREND_WINDOW_DAYS;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub migrations_path: PathBuf,
    /// Number of spending days returned by the trend series when the request
    /// does not ask for a specific window.
    pub trend_window_days: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            database_path: PathBuf::from("data/fintrack.db"),
            migrations_path: PathBuf::from("migrations"),
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("FINTRACK_HOST").unwrap_or(defaults.host),
            port: lookup("FINTRACK_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_path: lookup("FINTRACK_DATABASE_URL")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or(defaults.database_path),
            migrations_path: lookup("FINTRACK_MIGRATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.migrations_path),
            trend_window_days: lookup("FINTRACK_TREND_DAYS")
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.trend_window_days),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
