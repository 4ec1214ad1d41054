use crate::collector::ValidationRule;
use crate::context::GeneratorContext;
use crate::context::TypeExtensionDef;
use crate::error::GenerationError;
use crate::error::PipelineError;
use crate::plugin::PhaseReport;
use crate::plugin::Plugin;
use crate::plugin::PluginCapabilities;
use crate::plugin::PluginConfig;
use crate::schema::SchemaDocument;
use crate::schema::SchemaLoader;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaPluginConfig {
    input_path: PathBuf,
    file_extensions: Option<Vec<String>>,
}

/// Loads the schema files under `input_path` into the context.
#[derive(Debug, Default)]
pub struct SchemaPlugin {
    input_path: Option<PathBuf>,
    loader: SchemaLoader,
}
impl SchemaPlugin {
    pub const ID: &'static str = "schema";
}

#[async_trait]
impl Plugin for SchemaPlugin {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn capabilities(&self) -> PluginCapabilities {
        PluginCapabilities::CONFIGURE
            | PluginCapabilities::FILESYSTEM_INITIAL
            | PluginCapabilities::GRAPHQL_VALIDATE
    }

    fn configure(
        &mut self,
        ctx: &mut GeneratorContext,
        config: &PluginConfig<'_>,
    ) -> Result<(), PipelineError> {
        let SchemaPluginConfig { input_path, file_extensions } = config.deserialize()?;
        if let Some(file_extensions) = file_extensions {
            if file_extensions.is_empty() {
                return Err(config.invalid("`file_extensions` must not be empty"));
            }
            self.loader = SchemaLoader::with_file_extensions(&file_extensions);
        }

        let input_path = config.resolve_path(input_path);
        ctx.settings_mut().schema_input_path = Some(input_path.to_path_buf());
        self.input_path = Some(input_path);
        Ok(())
    }

    async fn filesystem_initial(&self, _ctx: &GeneratorContext) -> Result<PhaseReport, PipelineError> {
        let input_path = self.input_path.as_ref()
            .ok_or(PipelineError::MissingSchemaDocument)?;
        log::info!("Loading schema from {input_path:?}.");
        let document = self.loader.load(input_path).await?;
        Ok(PhaseReport::with_document(document))
    }

    fn graphql_validators(&self) -> Vec<Box<dyn ValidationRule>> {
        vec![Box::new(ExtensionOfUndefinedTypeRule)]
    }
}

/// Reports `extend` declarations whose base type is never declared (as the
/// same kind of type) in any schema file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionOfUndefinedTypeRule;
impl ValidationRule for ExtensionOfUndefinedTypeRule {
    fn name(&self) -> &'static str {
        "ExtensionOfUndefinedType"
    }

    fn validate(
        &self,
        ctx: &GeneratorContext,
        _document: &SchemaDocument,
    ) -> Vec<GenerationError> {
        let mut errors = vec![];
        for (type_name, extensions) in ctx.type_extensions() {
            for extension in extensions {
                let is_declared = match &extension.def {
                    TypeExtensionDef::InputObject(_) =>
                        ctx.input_object_types().contains_key(type_name),
                    TypeExtensionDef::Interface(_) =>
                        ctx.interface_types().contains_key(type_name),
                    TypeExtensionDef::Object(_) =>
                        ctx.object_types().contains_key(type_name),
                };
                if !is_declared {
                    errors.push(GenerationError::ExtensionOfUndefinedType {
                        type_name: type_name.to_string(),
                        location: extension.location(),
                    });
                }
            }
        }
        errors
    }
}
