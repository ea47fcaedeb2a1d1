#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::config::{Config, TimingConfig, loader};
    use crate::game::{AUTO_DESCENT_MS, BLINK_MS, TICK_MS};

    #[test]
    fn test_default_timing_matches_constants() {
        let config = Config::default();
        assert_eq!(config.timing.auto_descent_ms, AUTO_DESCENT_MS);
        assert_eq!(config.timing.tick_ms, TICK_MS);
        assert_eq!(config.timing.blink_ms, BLINK_MS);
        assert!(config.timing.auto_descent_ms > config.timing.tick_ms);
    }

    #[test]
    fn test_validation_rejects_zero_tick() {
        let config = Config {
            timing: TimingConfig {
                auto_descent_ms: 500,
                tick_ms: 0,
                blink_ms: 100,
            },
        }
        .validated();
        assert_eq!(config.timing.tick_ms, TICK_MS);
    }

    #[test]
    fn test_validation_restores_descent_tick_separation() {
        let config = Config {
            timing: TimingConfig {
                auto_descent_ms: 50,
                tick_ms: 100,
                blink_ms: 100,
            },
        }
        .validated();
        assert!(config.timing.auto_descent_ms > config.timing.tick_ms);
    }

    #[test]
    fn test_validation_keeps_sane_values() {
        let timing = TimingConfig {
            auto_descent_ms: 800,
            tick_ms: 50,
            blink_ms: 200,
        };
        let config = Config {
            timing: timing.clone(),
        }
        .validated();
        assert_eq!(config.timing, timing);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config {
            timing: TimingConfig {
                auto_descent_ms: 900,
                tick_ms: 90,
                blink_ms: 120,
            },
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_loader_creates_default_file_and_reads_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        // Safety: this is the only test touching GRIDFALL_CONFIG
        unsafe {
            std::env::set_var("GRIDFALL_CONFIG", &path);
        }

        // First load creates the default file
        let config = loader::load_config_from_file().unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        // An edited file is picked up on the next load
        std::fs::write(
            &path,
            "[timing]\nauto_descent_ms = 750\ntick_ms = 75\nblink_ms = 250\n",
        )
        .unwrap();
        let config = loader::load_config_from_file().unwrap();
        assert_eq!(config.timing.auto_descent_ms, 750);
        assert_eq!(config.timing.tick_ms, 75);
        assert_eq!(config.timing.blink_ms, 250);

        unsafe {
            std::env::remove_var("GRIDFALL_CONFIG");
        }
    }
}
