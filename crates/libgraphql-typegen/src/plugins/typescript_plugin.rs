use crate::collector::DefinitionVisitor;
use crate::collector::DirectiveCollector;
use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::plugin::PhaseReport;
use crate::plugin::Plugin;
use crate::plugin::PluginCapabilities;
use crate::plugin::PluginConfig;
use crate::plugins::SchemaPlugin;
use crate::plugins::create_dir_all;
use crate::plugins::output_paths;
use crate::plugins::write_file;
use crate::typescript::DeclarationEmitter;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeScriptPluginConfig {
    output_path: PathBuf,
    import_prefix: Option<String>,
}

/// Classifies fields and writes one declaration module per schema file, the
/// shared `index.ts` module and the merged schema snapshot.
#[derive(Debug, Default)]
pub struct TypeScriptPlugin {
    output_path: Option<PathBuf>,
}
impl TypeScriptPlugin {
    pub const ID: &'static str = "typescript";
}

#[async_trait]
impl Plugin for TypeScriptPlugin {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::CONFIGURE
            | PluginCapabilities::FILESYSTEM_INITIAL
            | PluginCapabilities::GRAPHQL_COLLECT
            | PluginCapabilities::FILESYSTEM_COLLECTED
            | PluginCapabilities::FILESYSTEM_FINALIZED
    }

    fn requires(&self) -> &'static [&'static str] {
        &[SchemaPlugin::ID]
    }

    fn configure(
        &mut self,
        ctx: &mut GeneratorContext,
        config: &PluginConfig<'_>,
    ) -> Result<(), PipelineError> {
        let TypeScriptPluginConfig { output_path, import_prefix } = config.deserialize()?;
        let output_path = config.resolve_path(output_path);
        let settings = ctx.settings_mut();
        settings.types_output_path = Some(output_path.to_path_buf());
        settings.types_import_prefix = import_prefix;
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

    fn graphql_collect(&self) -> Option<Box<dyn DefinitionVisitor>> {
        Some(Box::new(DirectiveCollector::new()))
    }

    async fn filesystem_collected(&self, ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        let paths = output_paths(ctx, Self::ID)?;
        let emitter = DeclarationEmitter::new(ctx, &paths);
        let (modules, errors) = emitter.emit();
        if !errors.is_empty() {
            return Ok(PhaseReport::with_errors(errors));
        }
        if ctx.settings().dry_run {
            log::info!("Dry run: {} declaration modules not written.", modules.len() + 1);
            return Ok(PhaseReport::default());
        }

        let outputs: Vec<(PathBuf, String)> = std::iter::once(emitter.emit_shared_module())
            .chain(modules)
            .map(|module| {
                let content = module.render();
                (module.output_path, content)
            })
            .collect();
        futures::future::try_join_all(
            outputs.iter().map(|(path, content)| write_file(path, content)),
        ).await?;
        log::info!("Wrote {} declaration modules.", outputs.len());

        Ok(PhaseReport {
            written_files: outputs.into_iter().map(|(path, _)| path).collect(),
            ..Default::default()
        })
    }

    async fn filesystem_finalized(&self, ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        let Some(document) = ctx.document() else {
            return Ok(PhaseReport::default());
        };
        let paths = output_paths(ctx, Self::ID)?;
        let snapshot_path = paths.schema_snapshot_path();
        write_file(&snapshot_path, &document.to_merged_sdl()).await?;
        Ok(PhaseReport {
            written_files: vec![snapshot_path],
            ..Default::default()
        })
    }
}
