use rocket::figment::Figment;
use serde::Deserialize;

use std::path::PathBuf;

use crate::internal_error::InternalResult;

/// Application settings, read from the same figment Rocket uses
/// (`Rocket.toml` and `ROCKET_*` environment variables).
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub event_capacity: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: PathBuf::from("hackboard.db"),
            event_capacity: 64,
            static_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_figment(figment: &Figment) -> InternalResult<AppConfig> {
        let mut config: AppConfig = figment.extract()?;

        if config.event_capacity == 0 {
            tracing::warn!("event_capacity must be positive, using 1");
            config.event_capacity = 1;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_figment(&Figment::new()).unwrap();

        assert_eq!(config.database_path, PathBuf::from("hackboard.db"));
        assert_eq!(config.event_capacity, 64);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn values_are_read_from_figment() {
        let figment = Figment::new()
            .merge(("database_path", ":memory:"))
            .merge(("event_capacity", 0));
        let config = AppConfig::from_figment(&figment).unwrap();

        assert_eq!(config.database_path, PathBuf::from(":memory:"));
        assert_eq!(config.event_capacity, 1);
    }
}
