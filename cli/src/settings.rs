use anyhow::Context;
use pairmatch_core::{EngineSettings, Theme, ThemeCatalog};
use serde::Deserialize;
use std::path::Path;

/// Host configuration file, every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub difficulty: String,
    pub theme: String,
    pub seed: Option<u64>,
    pub engine: EngineSettings,
    pub themes: Vec<Theme>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            difficulty: "easy".to_string(),
            theme: "animals".to_string(),
            seed: None,
            engine: EngineSettings::default(),
            themes: Vec::new(),
        }
    }
}

impl HostConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Could not parse config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Built-in themes followed by the ones declared in the file.
    pub fn catalog(&self) -> anyhow::Result<ThemeCatalog> {
        let mut catalog = ThemeCatalog::builtin();
        for theme in &self.themes {
            catalog
                .register(theme.clone())
                .with_context(|| format!("Could not register theme {:?}", theme.name()))?;
        }
        Ok(catalog)
    }
}
