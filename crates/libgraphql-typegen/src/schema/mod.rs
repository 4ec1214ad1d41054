mod schema_document;
mod schema_loader;

pub use schema_document::SchemaDocument;
pub use schema_document::SourcedDefinition;
pub use schema_loader::SchemaLoader;
pub use schema_loader::DEFAULT_SCHEMA_FILE_EXTENSIONS;

/// Directives consumed by the generator. They are stripped from the merged
/// schema snapshot.
pub const RESOLVE_DIRECTIVE: &str = "resolve";
pub const RESOLVERS_DIRECTIVE: &str = "resolvers";

#[cfg(test)]
mod tests;
