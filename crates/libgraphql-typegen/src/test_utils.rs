use crate::collector::DefinitionVisitor;
use crate::collector::DirectiveCollector;
use crate::collector::walk_document;
use crate::context::GeneratorContext;
use crate::error::GenerationError;
use crate::schema::SchemaDocument;
use crate::typescript::OutputPaths;
use std::path::PathBuf;

/// Parses `(file path, content)` pairs into one document, in order.
pub(crate) fn parse_files(files: &[(&str, &str)]) -> Result<SchemaDocument, GenerationError> {
    let documents = files.iter()
        .map(|(file_path, content)| SchemaDocument::parse_str(file_path, content))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SchemaDocument::concat(documents))
}

/// A context holding `files`, after the directive collector has run over
/// them. Validation is left to the caller.
pub(crate) fn collect(files: &[(&str, &str)]) -> Result<GeneratorContext, GenerationError> {
    let document = parse_files(files)?;
    let mut ctx = GeneratorContext::new();
    ctx.add_document(document);
    let document = ctx.shared_document().unwrap_or_default();
    let mut visitors: Vec<Box<dyn DefinitionVisitor>> = vec![Box::new(DirectiveCollector::new())];
    walk_document(&mut ctx, &document, &mut visitors);
    Ok(ctx)
}

/// Schema files live under `schema/`; types are written to `out/types`
/// (imported as `app/types`) and resolvers to `out/resolvers` (imported as
/// `app/resolvers`).
pub(crate) fn output_paths() -> OutputPaths {
    OutputPaths {
        resolvers_import_prefix: Some("app/resolvers".to_string()),
        resolvers_output_path: Some(PathBuf::from("out/resolvers")),
        schema_root: PathBuf::from("schema"),
        types_import_prefix: "app/types".to_string(),
        types_output_path: PathBuf::from("out/types"),
    }
}
