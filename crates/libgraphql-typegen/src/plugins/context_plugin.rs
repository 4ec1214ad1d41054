use crate::context::ContextImport;
use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::plugin::Plugin;
use crate::plugin::PluginCapabilities;
use crate::plugin::PluginConfig;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContextPluginConfig {
    import: Option<String>,
    import_name: Option<String>,
    import_path: Option<String>,
}

/// Binds the `Context` type of generated resolvers to an application type.
///
/// Configured either with the `import = "path#name"` shorthand or with
/// separate `import_path` and `import_name` keys.
#[derive(Debug, Default)]
pub struct ContextPlugin;
impl ContextPlugin {
    pub const ID: &'static str = "context";
}

#[async_trait]
impl Plugin for ContextPlugin {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::CONFIGURE
    }

    fn configure(
        &mut self,
        ctx: &mut GeneratorContext,
        config: &PluginConfig<'_>,
    ) -> Result<(), PipelineError> {
        let ContextPluginConfig { import, import_name, import_path } = config.deserialize()?;
        let context_import = match (import, import_path) {
            (Some(import), None) if import_name.is_none() => ContextImport::parse(&import),
            (None, Some(import_path)) => ContextImport::parse(&format!(
                "{import_path}#{}",
                import_name.as_deref().unwrap_or(ContextImport::DEFAULT_IMPORT_NAME),
            )),
            _ => None,
        };
        let context_import = context_import.ok_or_else(|| config.invalid(
            "expected either `import = \"importPath#importName\"` or \
            `import_path` (with an optional `import_name`)",
        ))?;

        log::debug!(
            "Using `{}` from `{}` as the resolver context.",
            context_import.import_name,
            context_import.import_path,
        );
        ctx.settings_mut().context_import = Some(context_import);
        Ok(())
    }
}
