pub mod ast;
pub mod collector;
mod config;
pub mod context;
pub mod error;
mod file_reader;
pub mod loc;
pub mod plugin;
pub mod plugins;
pub mod resolver_merge;
pub mod schema;
pub mod typescript;

#[cfg(test)]
mod test_utils;

pub use config::DEFAULT_CONFIG_FILE_NAME;
pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use error::PipelineError;
pub use file_reader::ReadContentError;
pub use plugin::GenerationSummary;
pub use plugin::Pipeline;
pub use plugin::PluginRegistry;

/// Runs every plugin named in `config` through the full pipeline.
///
/// With `dry_run` set, the run stops after declarations have been emitted
/// and checked, and nothing under the output directories is written.
pub async fn generate(
    config: &GeneratorConfig,
    dry_run: bool,
) -> Result<GenerationSummary, PipelineError> {
    let mut pipeline = Pipeline::from_config(config, &PluginRegistry::builtin())?
        .dry_run(dry_run);
    pipeline.run().await
}
