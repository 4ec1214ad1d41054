use crate::collector::DefinitionVisitor;
use crate::collector::ValidationRule;
use crate::collector::walk_document;
use crate::config::GeneratorConfig;
use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::error::ResolverModuleError;
use crate::plugin::PhaseReport;
use crate::plugin::Plugin;
use crate::plugin::PluginCapabilities;
use crate::plugin::PluginConfig;
use crate::plugin::PluginRegistry;
use futures::future::BoxFuture;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, PipelineError>;

/// Files touched by a successful run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationSummary {
    pub merged_resolver_modules: Vec<PathBuf>,
    pub written_files: Vec<PathBuf>,
}

/// A plugin together with its configuration table and the capabilities it
/// declared when it was loaded.
pub struct LoadedPlugin {
    pub capabilities: PluginCapabilities,
    pub config: toml::Value,
    pub plugin: Box<dyn Plugin>,
}
impl LoadedPlugin {
    pub fn new(plugin: Box<dyn Plugin>, config: toml::Value) -> Result<Self> {
        let capabilities = plugin.capabilities();
        if capabilities.is_empty() {
            return Err(PipelineError::PluginWithoutCapabilities {
                plugin_id: plugin.id().to_string(),
            });
        }
        Ok(Self { capabilities, config, plugin })
    }

    pub fn id(&self) -> &'static str {
        self.plugin.id()
    }
}
impl std::fmt::Debug for LoadedPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedPlugin")
            .field("id", &self.id())
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FilesystemPhase {
    Collected,
    Finalized,
    Initial,
}
impl FilesystemPhase {
    fn capability(self) -> PluginCapabilities {
        match self {
            Self::Collected => PluginCapabilities::FILESYSTEM_COLLECTED,
            Self::Finalized => PluginCapabilities::FILESYSTEM_FINALIZED,
            Self::Initial => PluginCapabilities::FILESYSTEM_INITIAL,
        }
    }

    fn run<'a>(
        self,
        plugin: &'a dyn Plugin,
        ctx: &'a GeneratorContext,
    ) -> BoxFuture<'a, Result<PhaseReport>> {
        match self {
            Self::Collected => plugin.filesystem_collected(ctx),
            Self::Finalized => plugin.filesystem_finalized(ctx),
            Self::Initial => plugin.filesystem_initial(ctx),
        }
    }
}
impl std::fmt::Display for FilesystemPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Collected => "filesystem.collected",
            Self::Finalized => "filesystem.finalized",
            Self::Initial => "filesystem.initial",
        })
    }
}

/// Runs the configured plugins through every generation phase, in order.
///
/// Within the filesystem phases plugins run concurrently; their
/// [PhaseReport]s are applied to the context in plugin order afterwards.
/// Collected errors are checked after collection and validation, and again
/// after the `filesystem.collected` phase, so resolver modules are never
/// touched for a schema that failed to resolve.
#[derive(Debug)]
pub struct Pipeline {
    base_dir: PathBuf,
    ctx: GeneratorContext,
    plugins: Vec<LoadedPlugin>,
    resolver_module_errors: Vec<ResolverModuleError>,
    summary: GenerationSummary,
}
impl Pipeline {
    pub fn from_config(config: &GeneratorConfig, registry: &PluginRegistry) -> Result<Self> {
        let plugins = config.plugins.iter()
            .map(|(plugin_id, value)| {
                log::debug!("Loading plugin `{plugin_id}`.");
                LoadedPlugin::new(registry.instantiate(plugin_id)?, value.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(config.base_dir.to_path_buf(), plugins)
    }

    pub fn new(base_dir: PathBuf, plugins: Vec<LoadedPlugin>) -> Result<Self> {
        for loaded in &plugins {
            for required_plugin_id in loaded.plugin.requires() {
                if !plugins.iter().any(|other| other.id() == *required_plugin_id) {
                    return Err(PipelineError::MissingPluginDependency {
                        plugin_id: loaded.id().to_string(),
                        required_plugin_id: required_plugin_id.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            base_dir,
            ctx: GeneratorContext::new(),
            plugins,
            resolver_module_errors: vec![],
            summary: GenerationSummary::default(),
        })
    }

    /// Stops after the second error checkpoint without writing declaration
    /// or resolver modules.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.ctx.settings_mut().dry_run = dry_run;
        self
    }

    pub fn context(&self) -> &GeneratorContext {
        &self.ctx
    }

    pub fn plugins(&self) -> &[LoadedPlugin] {
        &self.plugins
    }

    pub async fn run(&mut self) -> Result<GenerationSummary> {
        self.configure()?;
        self.run_filesystem_phase(FilesystemPhase::Initial).await?;
        self.collect_and_validate()?;
        self.checkpoint("collection")?;

        self.run_filesystem_phase(FilesystemPhase::Collected).await?;
        self.checkpoint("declaration emission")?;

        if self.ctx.settings().dry_run {
            log::info!("Dry run: skipping resolver modules and the schema snapshot.");
            return Ok(self.summary.clone());
        }

        self.typescript_transform().await?;
        self.run_filesystem_phase(FilesystemPhase::Finalized).await?;

        if !self.resolver_module_errors.is_empty() {
            return Err(PipelineError::ResolverModuleErrors {
                errors: std::mem::take(&mut self.resolver_module_errors),
            });
        }
        Ok(self.summary.clone())
    }

    fn configure(&mut self) -> Result<()> {
        for loaded in self.plugins.iter_mut() {
            if !loaded.capabilities.contains(PluginCapabilities::CONFIGURE) {
                continue;
            }
            let plugin_id = loaded.plugin.id();
            log::debug!("Configuring plugin `{plugin_id}`.");
            let config = PluginConfig::new(plugin_id, &self.base_dir, &loaded.config);
            loaded.plugin.configure(&mut self.ctx, &config)?;
        }
        Ok(())
    }

    async fn run_filesystem_phase(&mut self, phase: FilesystemPhase) -> Result<()> {
        log::debug!("Running the {phase} phase.");
        let ctx = &self.ctx;
        let reports = futures::future::try_join_all(
            self.plugins.iter()
                .filter(|loaded| loaded.capabilities.contains(phase.capability()))
                .map(|loaded| phase.run(loaded.plugin.as_ref(), ctx)),
        ).await?;

        for report in reports {
            self.apply_report(report);
        }
        Ok(())
    }

    fn collect_and_validate(&mut self) -> Result<()> {
        let document = self.ctx.shared_document()
            .ok_or(PipelineError::MissingSchemaDocument)?;

        let mut visitors: Vec<Box<dyn DefinitionVisitor>> = self.plugins.iter()
            .filter(|loaded| loaded.capabilities.contains(PluginCapabilities::GRAPHQL_COLLECT))
            .filter_map(|loaded| loaded.plugin.graphql_collect())
            .collect();
        let validators: Vec<Box<dyn ValidationRule>> = self.plugins.iter()
            .filter(|loaded| loaded.capabilities.contains(PluginCapabilities::GRAPHQL_VALIDATE))
            .flat_map(|loaded| loaded.plugin.graphql_validators())
            .collect();

        walk_document(&mut self.ctx, &document, &mut visitors);
        for rule in &validators {
            let errors = rule.validate(&self.ctx, &document);
            log::debug!("Validation rule `{}` reported {} errors.", rule.name(), errors.len());
            self.ctx.extend_errors(errors);
        }
        self.ctx.validate();
        Ok(())
    }

    async fn typescript_transform(&mut self) -> Result<()> {
        for idx in 0..self.plugins.len() {
            let loaded = &self.plugins[idx];
            if !loaded.capabilities.contains(PluginCapabilities::TYPESCRIPT_TRANSFORM) {
                continue;
            }
            log::debug!("Running the typescript.transform phase of `{}`.", loaded.id());
            let report = loaded.plugin.typescript_transform(&self.ctx).await?;
            self.apply_report(report);
        }
        Ok(())
    }

    fn checkpoint(&self, stage: &str) -> Result<()> {
        if !self.ctx.has_errors() {
            return Ok(());
        }
        log::debug!(
            "Aborting after {stage} with {} errors.",
            self.ctx.errors().len(),
        );
        Err(PipelineError::GenerationErrors {
            errors: self.ctx.errors().to_vec(),
        })
    }

    fn apply_report(&mut self, report: PhaseReport) {
        let PhaseReport {
            documents,
            errors,
            merged_resolver_modules,
            resolver_module_errors,
            written_files,
        } = report;
        for document in documents {
            self.ctx.add_document(document);
        }
        self.ctx.extend_errors(errors);
        self.resolver_module_errors.extend(resolver_module_errors);
        self.summary.merged_resolver_modules.extend(merged_resolver_modules);
        self.summary.written_files.extend(written_files);
    }
}
