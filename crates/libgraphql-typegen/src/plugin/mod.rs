//! The generation pipeline and the contract plugins implement to take part
//! in it.

mod phase_report;
mod pipeline;
mod plugin_config;
mod registry;

use crate::collector::DefinitionVisitor;
use crate::collector::ValidationRule;
use crate::context::GeneratorContext;
use crate::error::PipelineError;
use async_trait::async_trait;

pub use phase_report::PhaseReport;
pub use pipeline::GenerationSummary;
pub use pipeline::LoadedPlugin;
pub use pipeline::Pipeline;
pub use plugin_config::PluginConfig;
pub use registry::PluginFactory;
pub use registry::PluginRegistry;

type Result<T> = std::result::Result<T, PipelineError>;

bitflags::bitflags! {
    /// The pipeline phases a plugin takes part in.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PluginCapabilities: u16 {
        const CONFIGURE = 1 << 0;
        const FILESYSTEM_INITIAL = 1 << 1;
        const GRAPHQL_COLLECT = 1 << 2;
        const GRAPHQL_VALIDATE = 1 << 3;
        const FILESYSTEM_COLLECTED = 1 << 4;
        const TYPESCRIPT_TRANSFORM = 1 << 5;
        const FILESYSTEM_FINALIZED = 1 << 6;
    }
}

/// A unit of generation behavior.
///
/// The pipeline only calls the phase methods named by
/// [Plugin::capabilities]; the defaults do nothing. Filesystem and transform
/// phases see the context read-only and hand their results back as a
/// [PhaseReport], which the pipeline applies in plugin order once every
/// plugin in the phase has finished.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn id(&self) -> &'static str;

    fn capabilities(&self) -> PluginCapabilities;

    /// Ids of plugins that must also be configured for this one to work.
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    fn configure(
        &mut self,
        _ctx: &mut GeneratorContext,
        _config: &PluginConfig<'_>,
    ) -> Result<()> {
        Ok(())
    }

    async fn filesystem_initial(&self, _ctx: &GeneratorContext) -> Result<PhaseReport> {
        Ok(PhaseReport::default())
    }

    fn graphql_collect(&self) -> Option<Box<dyn DefinitionVisitor>> {
        None
    }

    fn graphql_validators(&self) -> Vec<Box<dyn ValidationRule>> {
        vec![]
    }

    async fn filesystem_collected(&self, _ctx: &GeneratorContext) -> Result<PhaseReport> {
        Ok(PhaseReport::default())
    }

    async fn typescript_transform(&self, _ctx: &GeneratorContext) -> Result<PhaseReport> {
        Ok(PhaseReport::default())
    }

    async fn filesystem_finalized(&self, _ctx: &GeneratorContext) -> Result<PhaseReport> {
        Ok(PhaseReport::default())
    }
}
