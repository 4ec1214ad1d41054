use crate::error::GenerationError;
use crate::error::ResolverModuleError;
use crate::schema::SchemaDocument;
use std::path::PathBuf;

/// What a plugin produced during one phase.
#[derive(Debug, Default)]
pub struct PhaseReport {
    pub documents: Vec<SchemaDocument>,
    pub errors: Vec<GenerationError>,
    pub merged_resolver_modules: Vec<PathBuf>,
    pub resolver_module_errors: Vec<ResolverModuleError>,
    pub written_files: Vec<PathBuf>,
}
impl PhaseReport {
    pub fn with_document(document: SchemaDocument) -> Self {
        Self {
            documents: vec![document],
            ..Default::default()
        }
    }

    pub fn with_errors(errors: Vec<GenerationError>) -> Self {
        Self {
            errors,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
            && self.errors.is_empty()
            && self.merged_resolver_modules.is_empty()
            && self.resolver_module_errors.is_empty()
            && self.written_files.is_empty()
    }
}
