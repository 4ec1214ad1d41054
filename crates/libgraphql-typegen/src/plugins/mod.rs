//! The built-in plugins.

mod context_plugin;
mod resolver_plugin;
mod schema_plugin;
mod typescript_plugin;

use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::typescript::OutputPaths;
use std::path::Path;

pub use context_plugin::ContextPlugin;
pub use resolver_plugin::ResolverPlugin;
pub use schema_plugin::ExtensionOfUndefinedTypeRule;
pub use schema_plugin::SchemaPlugin;
pub use typescript_plugin::TypeScriptPlugin;

fn output_paths(ctx: &GeneratorContext, plugin_id: &str) -> Result<OutputPaths, PipelineError> {
    OutputPaths::from_settings(ctx.settings())
        .ok_or_else(|| PipelineError::MissingPluginDependency {
            plugin_id: plugin_id.to_string(),
            required_plugin_id:
                if ctx.settings().schema_input_path.is_none() {
                    SchemaPlugin::ID.to_string()
                } else {
                    TypeScriptPlugin::ID.to_string()
                },
        })
}

async fn create_dir_all(path: &Path) -> Result<(), PipelineError> {
    tokio::fs::create_dir_all(path).await
        .map_err(|err| PipelineError::fs(path, err))
}

/// Writes `content` to `path`, creating missing parent directories.
async fn write_file(path: &Path, content: &str) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty() {
        create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
        .map_err(|err| PipelineError::fs(path, err))?;
    log::trace!("Wrote {path:?}.");
    Ok(())
}

#[cfg(test)]
mod tests;
