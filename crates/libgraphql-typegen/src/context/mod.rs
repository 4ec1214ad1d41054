mod collected;
mod generator_context;
mod settings;

pub use collected::CollectedField;
pub use collected::FieldDef;
pub use collected::FieldId;
pub use collected::FieldMetadata;
pub use collected::OperationKind;
pub use collected::ResolverField;
pub use collected::ResolversDirective;
pub use collected::Sourced;
pub use collected::TypeDeclaration;
pub use collected::TypeExtensionDef;
pub use generator_context::GeneratorContext;
pub use generator_context::TypeLookup;
pub use settings::ContextImport;
pub use settings::GeneratorSettings;
