use crate::context::GeneratorContext;
use crate::error::GenerationError;
use crate::typescript::OutputPaths;
use crate::typescript::declaring_type_name;
use crate::typescript::resolvers_interface_identifier;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// One resolver a module must implement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverStub {
    pub parent_type_name: String,
    pub resolver_name: String,
}

/// Everything needed to bring one resolver module up to date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverModuleUpdate {
    /// Module that exports [ResolverModuleUpdate::resolvers_type_identifier].
    pub import_path: String,
    pub module_path: PathBuf,
    pub resolvers: Vec<ResolverStub>,
    pub resolvers_type_identifier: String,
}

/// Groups every resolver field by the resolver module that implements it.
///
/// A module can only be typed by one aggregate interface, so modules that
/// would receive fields from more than one declaring type are reported as
/// [GenerationError::ConflictingResolverModule] and left out.
pub fn collect_resolver_updates(
    ctx: &GeneratorContext,
    paths: &OutputPaths,
) -> (Vec<ResolverModuleUpdate>, Vec<GenerationError>) {
    let mut updates: IndexMap<PathBuf, (ResolverModuleUpdate, BTreeSet<String>)> =
        IndexMap::new();

    for resolver_field in ctx.resolver_fields().values().flatten() {
        let field = &resolver_field.field;
        let resolvers_directive = ctx.field_metadata(&field.id)
            .and_then(|metadata| metadata.resolvers_directive.as_ref());
        let Some(module_path) = paths.resolver_module_path(
            &field.file_path,
            &field.parent_type_name,
            resolvers_directive,
        ) else {
            continue;
        };

        let resolvers_type_identifier = resolvers_interface_identifier(
            &declaring_type_name(&field.file_path, &field.parent_type_name),
        );
        let (update, identifiers) = updates.entry(module_path.clone())
            .or_insert_with(|| (ResolverModuleUpdate {
                import_path: paths.types_import_path(&field.file_path),
                module_path,
                resolvers: vec![],
                resolvers_type_identifier: resolvers_type_identifier.clone(),
            }, BTreeSet::new()));
        identifiers.insert(resolvers_type_identifier);
        update.resolvers.push(ResolverStub {
            parent_type_name: field.parent_type_name.to_string(),
            resolver_name: resolver_field.resolver_name.to_string(),
        });
    }

    let mut errors = vec![];
    let updates = updates.into_values()
        .filter_map(|(update, identifiers)| {
            if identifiers.len() > 1 {
                errors.push(GenerationError::ConflictingResolverModule {
                    module_path: update.module_path,
                    type_identifiers: identifiers.into_iter().collect(),
                });
                return None;
            }
            Some(update)
        })
        .collect();
    (updates, errors)
}
