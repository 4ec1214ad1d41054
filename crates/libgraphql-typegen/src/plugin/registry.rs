use crate::error::PipelineError;
use crate::plugin::Plugin;
use crate::plugins::ContextPlugin;
use crate::plugins::ResolverPlugin;
use crate::plugins::SchemaPlugin;
use crate::plugins::TypeScriptPlugin;
use indexmap::IndexMap;

pub type PluginFactory = fn() -> Box<dyn Plugin>;

/// Maps plugin ids, as written in configuration, to their implementations.
#[derive(Clone, Debug)]
pub struct PluginRegistry {
    factories: IndexMap<&'static str, PluginFactory>,
}
impl PluginRegistry {
    pub fn empty() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// A registry holding the `schema`, `typescript`, `resolver` and
    /// `context` plugins.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(SchemaPlugin::ID, || Box::new(SchemaPlugin::default()));
        registry.register(TypeScriptPlugin::ID, || Box::new(TypeScriptPlugin::default()));
        registry.register(ResolverPlugin::ID, || Box::new(ResolverPlugin::default()));
        registry.register(ContextPlugin::ID, || Box::new(ContextPlugin::default()));
        registry
    }

    /// Registers (or replaces) the implementation behind `plugin_id`.
    pub fn register(&mut self, plugin_id: &'static str, factory: PluginFactory) {
        self.factories.insert(plugin_id, factory);
    }

    pub fn contains(&self, plugin_id: &str) -> bool {
        self.factories.contains_key(plugin_id)
    }

    pub fn instantiate(&self, plugin_id: &str) -> Result<Box<dyn Plugin>, PipelineError> {
        self.factories.get(plugin_id)
            .map(|factory| factory())
            .ok_or_else(|| PipelineError::UnknownPlugin {
                plugin_id: plugin_id.to_string(),
            })
    }
}
impl Default for PluginRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
