use crate::error::PipelineError;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, PipelineError>;

pub const DEFAULT_CONFIG_FILE_NAME: &str = "graphql-typegen.toml";

/// The contents of a `graphql-typegen.toml` file.
///
/// Each `[plugins.<id>]` table is handed, unparsed, to the plugin registered
/// under `<id>`. Tables keep their file order, which is also the order
/// plugins are configured and run in.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Relative paths in plugin tables are resolved against this directory.
    #[serde(skip)]
    pub base_dir: PathBuf,

    #[serde(default)]
    pub plugins: IndexMap<String, toml::Value>,
}
impl GeneratorConfig {
    pub async fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let content = tokio::fs::read_to_string(config_path).await
            .map_err(|err| PipelineError::ConfigError {
                path: config_path.to_path_buf(),
                message: err.to_string(),
            })?;
        let base_dir = config_path.parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse_str(config_path, &content, base_dir)
    }

    pub fn parse_str(
        config_path: impl AsRef<Path>,
        content: &str,
        base_dir: PathBuf,
    ) -> Result<Self> {
        let mut config: Self = toml::from_str(content)
            .map_err(|err| PipelineError::ConfigError {
                path: config_path.as_ref().to_path_buf(),
                message: err.message().to_string(),
            })?;
        config.base_dir = base_dir;
        log::debug!(
            "Loaded configuration for plugins: {}.",
            config.plugins.keys()
                .map(|id| format!("`{id}`"))
                .collect::<Vec<_>>()
                .join(", "),
        );
        Ok(config)
    }
}
