use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MasterConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    let config = parse_config(&content)?;

    info!("Configuration loaded successfully");
    Ok(config)
}

/// Substitute environment variables and parse a YAML document
pub fn parse_config(content: &str) -> Result<MasterConfig> {
    let substituted = substitution::substitute_env_vars(content)?;
    debug!("Environment variable substitution completed");

    let config: MasterConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> MasterConfig {
    MasterConfig {
        ratings: RatingsConfig {
            team_ratings: "data/team_ratings.json".to_string(),
            player_ratings: "data/player_ratings.json".to_string(),
            default_team: default_team_rating(),
        },
        simulation: SimulationSettings::default(),
        model: ModelConfig::default(),
        markets: MarketDefaults::default(),
        logging: LoggingConfig::default(),
    }
}

#[instrument]
pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &MasterConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoopsedge.yaml");

        let mut config = generate_default_config();
        config.simulation.seed = Some(7);
        config.markets.odds = -115;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.simulation.seed, Some(7));
        assert_eq!(loaded.markets.odds, -115);
        assert_eq!(loaded.ratings.team_ratings, config.ratings.team_ratings);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_config("/definitely/not/here.yaml").is_err());
    }

    #[test]
    fn test_parse_substitutes_env_vars() {
        std::env::set_var("HOOPSEDGE_TEST_DATA_DIR", "/srv/ratings");
        let yaml = r#"
ratings:
  team_ratings: "${HOOPSEDGE_TEST_DATA_DIR}/teams.json"
  player_ratings: "$HOOPSEDGE_TEST_DATA_DIR/players.json"
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.ratings.team_ratings, "/srv/ratings/teams.json");
        assert_eq!(config.ratings.player_ratings, "/srv/ratings/players.json");
    }

    #[test]
    fn test_parse_rejects_bad_yaml() {
        assert!(parse_config("ratings: [unterminated").is_err());
    }
}
