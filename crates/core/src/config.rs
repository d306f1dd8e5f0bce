use serde::{Deserialize, Serialize};

/// Placement policy selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlacementAlgorithm {
    Greedy,
    LoadBalance,
    MinMin,
    RoundRobin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub algorithm: PlacementAlgorithm,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            algorithm: PlacementAlgorithm::Greedy,
        }
    }
}

/// Load configuration from a TOML file.
/// Falls back to defaults if the file is missing or malformed.
pub fn load_config(path: &str) -> SchedulerConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {}, using defaults", path, e);
                SchedulerConfig::default()
            }
        },
        Err(_) => {
            tracing::debug!("Config file {} not found, using defaults", path);
            SchedulerConfig::default()
        }
    }
}

/// Save configuration to a TOML file.
/// Creates parent directories if they don't exist.
pub fn save_config(config: &SchedulerConfig, path: &str) -> anyhow::Result<()> {
    let path = std::path::Path::new(path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    tracing::info!("Config saved to {:?}", path);
    Ok(())
}
