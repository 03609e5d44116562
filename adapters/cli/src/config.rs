use std::{fs, path::Path};

use anyhow::{Context, Result};
use wanderlands_core::SessionConfig;

/// Reads the session configuration from a TOML file, or the defaults without one.
pub(crate) fn load(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse configuration in {}", path.display()))
}

fn parse(text: &str) -> Result<SessionConfig> {
    let config: SessionConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load(None).expect("defaults load");
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config = parse(
            "enemy_count = 12\n\
             [world]\n\
             world_width = 3\n\
             world_height = 2\n",
        )
        .expect("valid configuration");

        assert_eq!(config.enemy_count, 12);
        assert_eq!(config.world.world_width, 3);
        assert_eq!(config.world.world_height, 2);
        assert_eq!(config.world.tile_size, 30);
        assert_eq!(config.tick_interval_ms, 300);
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        let error = parse("[world]\ntiles_across = 0\n").expect_err("empty board");
        assert!(error.to_string().contains("board"), "{error}");
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let error = load(Some(Path::new("/nonexistent/wanderlands.toml"))).expect_err("missing");
        assert!(error.to_string().contains("/nonexistent/wanderlands.toml"));
    }
}
