use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::error::ResolverModuleError;
use crate::file_reader;
use crate::plugin::PhaseReport;
use crate::plugin::Plugin;
use crate::plugin::PluginCapabilities;
use crate::plugin::PluginConfig;
use crate::plugins::TypeScriptPlugin;
use crate::plugins::create_dir_all;
use crate::plugins::output_paths;
use crate::resolver_merge::ResolverModuleUpdate;
use crate::resolver_merge::collect_resolver_updates;
use crate::resolver_merge::merge_resolver_module;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResolverPluginConfig {
    output_path: PathBuf,
    import_prefix: Option<String>,
}

/// Creates and incrementally updates the hand-written resolver modules.
#[derive(Debug, Default)]
pub struct ResolverPlugin {
    output_path: Option<PathBuf>,
}
impl ResolverPlugin {
    pub const ID: &'static str = "resolver";

    /// Merges one module, returning whether its content changed.
    async fn update_module(update: &ResolverModuleUpdate) -> Result<bool, ResolverModuleError> {
        let module_path = &update.module_path;
        let existing = file_reader::read_optional_content(module_path).await?;
        let merged = merge_resolver_module(existing.as_deref(), update)
            .map_err(|err| ResolverModuleError::Merge {
                module_path: module_path.to_path_buf(),
                err,
            })?;
        if existing.as_deref() == Some(merged.as_str()) {
            log::trace!("{module_path:?} is up to date.");
            return Ok(false);
        }

        let write_err = |err| ResolverModuleError::Write {
            module_path: module_path.to_path_buf(),
            err,
        };
        if let Some(parent) = module_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }
        tokio::fs::write(module_path, merged).await.map_err(write_err)?;
        Ok(true)
    }
}

#[async_trait]
impl Plugin for ResolverPlugin {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::CONFIGURE
            | PluginCapabilities::FILESYSTEM_INITIAL
            | PluginCapabilities::FILESYSTEM_COLLECTED
            | PluginCapabilities::TYPESCRIPT_TRANSFORM
    }

    fn requires(&self) -> &'static [&'static str] {
        &[TypeScriptPlugin::ID]
    }

    fn configure(
        &mut self,
        ctx: &mut GeneratorContext,
        config: &PluginConfig<'_>,
    ) -> Result<(), PipelineError> {
        let ResolverPluginConfig { output_path, import_prefix } = config.deserialize()?;
        let output_path = config.resolve_path(output_path);
        let settings = ctx.settings_mut();
        settings.resolvers_output_path = Some(output_path.to_path_buf());
        settings.resolvers_import_prefix = import_prefix;
        self.output_path = Some(output_path);
        Ok(())
    }

    async fn filesystem_initial(&self, ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        if let Some(output_path) = &self.output_path
            && !ctx.settings().dry_run {
            create_dir_all(output_path).await?;
        }
        Ok(PhaseReport::default())
    }

    /// Surfaces module placement conflicts before the second checkpoint so
    /// that no module is touched when any of them is invalid.
    async fn filesystem_collected(&self, ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        let paths = output_paths(ctx, Self::ID)?;
        let (_, errors) = collect_resolver_updates(ctx, &paths);
        Ok(PhaseReport::with_errors(errors))
    }

    async fn typescript_transform(&self, ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        let paths = output_paths(ctx, Self::ID)?;
        // Placement conflicts were already reported in filesystem.collected.
        let (updates, _) = collect_resolver_updates(ctx, &paths);
        let mut report = PhaseReport::default();

        for update in &updates {
            match Self::update_module(update).await {
                Ok(true) => {
                    log::debug!(
                        "Updated {:?} ({} resolvers).",
                        update.module_path,
                        update.resolvers.len(),
                    );
                    report.merged_resolver_modules.push(update.module_path.to_path_buf());
                },
                Ok(false) => (),
                Err(err) => {
                    log::debug!("Failed to update {:?}: {err}", update.module_path);
                    report.resolver_module_errors.push(err);
                },
            }
        }
        log::info!(
            "Updated {} of {} resolver modules.",
            report.merged_resolver_modules.len(),
            updates.len(),
        );
        Ok(report)
    }
}
