use std::path::PathBuf;

/// Paths and import prefixes recorded by plugins during `configure`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeneratorSettings {
    pub context_import: Option<ContextImport>,
    pub dry_run: bool,
    pub resolvers_import_prefix: Option<String>,
    pub resolvers_output_path: Option<PathBuf>,
    pub schema_input_path: Option<PathBuf>,
    pub types_import_prefix: Option<String>,
    pub types_output_path: Option<PathBuf>,
}

/// An externally declared request-context type, written as
/// `importPath#importName`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextImport {
    pub import_name: String,
    pub import_path: String,
}
impl ContextImport {
    pub const DEFAULT_IMPORT_NAME: &'static str = "default";

    /// Parses `path#name`. A missing `#name` selects the default export.
    pub fn parse(shorthand: &str) -> Option<Self> {
        let (import_path, import_name) = match shorthand.split_once('#') {
            Some((path, name)) => (path.trim(), name.trim()),
            None => (shorthand.trim(), Self::DEFAULT_IMPORT_NAME),
        };
        if import_path.is_empty() || import_name.is_empty() {
            return None;
        }
        Some(Self {
            import_name: import_name.to_string(),
            import_path: import_path.to_string(),
        })
    }
}
