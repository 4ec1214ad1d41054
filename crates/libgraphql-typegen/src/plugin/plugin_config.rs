use crate::error::PipelineError;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::path::PathBuf;

/// One plugin's configuration table, along with the directory its relative
/// paths are resolved against.
#[derive(Clone, Copy, Debug)]
pub struct PluginConfig<'a> {
    pub base_dir: &'a Path,
    pub plugin_id: &'a str,
    pub value: &'a toml::Value,
}
impl<'a> PluginConfig<'a> {
    pub fn new(plugin_id: &'a str, base_dir: &'a Path, value: &'a toml::Value) -> Self {
        Self { base_dir, plugin_id, value }
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, PipelineError> {
        self.value.clone()
            .try_into()
            .map_err(|err: toml::de::Error| self.invalid(err.message()))
    }

    pub fn invalid(&self, message: impl Into<String>) -> PipelineError {
        PipelineError::InvalidPluginConfig {
            plugin_id: self.plugin_id.to_string(),
            message: message.into(),
        }
    }

    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
