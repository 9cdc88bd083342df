// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{AnalyticsParams, Config, DataSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from("config.toml")
}

/// Same as [`load_config`], but with an explicit file name (used by tests
/// and the `--config` CLI flag).
pub fn load_config_from(name: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(name))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::info!(
        file = name,
        smoothing_window = config.analytics.smoothing_window,
        "configuration loaded and validated"
    );
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.analytics.smoothing_window == 0 {
        return Err(ConfigError::ValidationError(
            "smoothing_window must be at least 1".to_string(),
        ));
    }
    if config.analytics.trading_days_per_year == 0 {
        return Err(ConfigError::ValidationError(
            "trading_days_per_year must be at least 1".to_string(),
        ));
    }
    let confidence = config.analytics.var_confidence;
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "var_confidence must lie strictly between 0 and 1, got {confidence}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{AnalyticsParams, DataSettings};

    fn default_config() -> Config {
        Config {
            data: DataSettings::default(),
            analytics: AnalyticsParams::default(),
        }
    }

    #[test]
    fn loads_and_validates_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[data]\n\
             price_table_path = \"data/prices.csv\"\n\
             [analytics]\n\
             smoothing_window = 7\n\
             trading_days_per_year = 252\n\
             var_confidence = 0.95\n",
        )
        .unwrap();

        let config = load_config_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.data.price_table_path, "data/prices.csv");
        assert_eq!(config.analytics.smoothing_window, 7);
    }

    #[test]
    fn defaults_pass_validation() {
        assert!(validate(&default_config()).is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = default_config();
        config.analytics.smoothing_window = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn out_of_range_confidence_is_rejected() {
        let mut config = default_config();
        config.analytics.var_confidence = 1.0;
        assert!(validate(&config).is_err());
        config.analytics.var_confidence = 0.0;
        assert!(validate(&config).is_err());
    }
}
