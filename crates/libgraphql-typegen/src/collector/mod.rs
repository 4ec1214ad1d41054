mod directive_collector;

use crate::context::GeneratorContext;
use crate::error::GenerationError;
use crate::schema::SchemaDocument;
use crate::schema::SourcedDefinition;

pub use directive_collector::DirectiveCollector;

/// Observes every top-level definition of the merged document.
pub trait DefinitionVisitor: Send {
    fn visit_definition(
        &mut self,
        ctx: &mut GeneratorContext,
        definition_index: usize,
        def: &SourcedDefinition,
    );

    /// Called once after the last definition has been visited.
    fn finish(&mut self, _ctx: &mut GeneratorContext) {}
}

/// A schema-level check run after collection.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn validate(
        &self,
        ctx: &GeneratorContext,
        document: &SchemaDocument,
    ) -> Vec<GenerationError>;
}

/// Walks `document` once, handing each definition to every visitor in turn
/// before moving on to the next definition.
pub fn walk_document(
    ctx: &mut GeneratorContext,
    document: &SchemaDocument,
    visitors: &mut [Box<dyn DefinitionVisitor>],
) {
    for (definition_index, def) in document.definitions().iter().enumerate() {
        for visitor in visitors.iter_mut() {
            visitor.visit_definition(ctx, definition_index, def);
        }
    }
    for visitor in visitors.iter_mut() {
        visitor.finish(ctx);
    }
}

#[cfg(test)]
mod tests;
