use crate::ast;
use crate::collector::DefinitionVisitor;
use crate::context::CollectedField;
use crate::context::FieldDef;
use crate::context::FieldId;
use crate::context::FieldMetadata;
use crate::context::GeneratorContext;
use crate::context::OperationKind;
use crate::context::ResolverField;
use crate::context::ResolversDirective;
use crate::context::TypeExtensionDef;
use crate::error::DirectiveArgumentIssue;
use crate::error::GenerationError;
use crate::loc;
use crate::schema::RESOLVERS_DIRECTIVE;
use crate::schema::RESOLVE_DIRECTIVE;
use crate::schema::SourcedDefinition;
use std::path::Path;

const RESOLVER_NAME_ARG: &str = "resolverName";
const IMPORT_PATH_ARG: &str = "importPath";

/// Populates the [GeneratorContext] definition maps and splits every field
/// into either a plain field or a `@resolve` resolver field.
#[derive(Debug, Default)]
pub struct DirectiveCollector;
impl DirectiveCollector {
    pub fn new() -> Self {
        Self
    }

    fn collect_schema_definition(
        ctx: &mut GeneratorContext,
        file_path: &Path,
        schema_def: &ast::schema::SchemaDefinition,
    ) {
        ctx.mark_schema_definition();
        let roots = [
            (OperationKind::Query, &schema_def.query),
            (OperationKind::Mutation, &schema_def.mutation),
            (OperationKind::Subscription, &schema_def.subscription),
        ];
        for (operation, type_name) in roots {
            if let Some(type_name) = type_name {
                ctx.set_operation_root(
                    operation,
                    type_name.to_string(),
                    loc::FilePosition::from_pos(file_path, schema_def.position),
                );
            }
        }
    }

    fn collect_output_fields(
        ctx: &mut GeneratorContext,
        file_path: &Path,
        definition_index: usize,
        parent_type_name: &str,
        fields: &[ast::schema::Field],
        resolvers_directive: Option<ResolversDirective>,
    ) {
        for (field_index, field) in fields.iter().enumerate() {
            let id = FieldId {
                definition_index,
                field_index,
            };
            let operation_kind = ctx.operation_kind_of(parent_type_name);
            ctx.set_field_metadata(id, FieldMetadata {
                operation_kind,
                parent_type_name: parent_type_name.to_string(),
                resolvers_directive: resolvers_directive.clone(),
            });

            let collected = CollectedField {
                id,
                def: FieldDef::Output(field.clone()),
                file_path: file_path.to_path_buf(),
                parent_type_name: parent_type_name.to_string(),
            };

            let resolve_directive = field.directives.iter()
                .find(|directive| directive.name == RESOLVE_DIRECTIVE);
            let Some(resolve_directive) = resolve_directive else {
                ctx.add_plain_field(collected);
                continue;
            };

            match parse_resolve_directive(file_path, resolve_directive) {
                Ok(resolver_name) => {
                    let resolver_name = resolver_name
                        .unwrap_or_else(|| field.name.to_string());
                    ctx.add_resolver_field(ResolverField {
                        field: collected,
                        resolver_name,
                    });
                },
                Err(err) => {
                    log::debug!(
                        "Dropping `{parent_type_name}.{}` from resolver \
                        classification: {err}",
                        field.name,
                    );
                    ctx.add_error(err);
                },
            }
        }
    }

    fn collect_input_fields(
        ctx: &mut GeneratorContext,
        file_path: &Path,
        definition_index: usize,
        parent_type_name: &str,
        fields: &[ast::schema::InputValue],
    ) {
        for (field_index, field) in fields.iter().enumerate() {
            ctx.add_plain_field(CollectedField {
                id: FieldId {
                    definition_index,
                    field_index,
                },
                def: FieldDef::Input(field.clone()),
                file_path: file_path.to_path_buf(),
                parent_type_name: parent_type_name.to_string(),
            });
        }
    }

    fn collect_resolvers_directive(
        ctx: &mut GeneratorContext,
        file_path: &Path,
        directives: &[ast::schema::Directive],
    ) -> Option<ResolversDirective> {
        let directive = directives.iter()
            .find(|directive| directive.name == RESOLVERS_DIRECTIVE)?;
        match parse_resolvers_directive(file_path, directive) {
            Ok(resolvers_directive) => Some(resolvers_directive),
            Err(err) => {
                ctx.add_error(err);
                None
            },
        }
    }
}
impl DefinitionVisitor for DirectiveCollector {
    fn visit_definition(
        &mut self,
        ctx: &mut GeneratorContext,
        definition_index: usize,
        def: &SourcedDefinition,
    ) {
        use ast::schema::Definition;
        use ast::schema::TypeDefinition;
        use ast::schema::TypeExtension;

        let file_path = def.file_path.as_path();
        match &def.def {
            Definition::SchemaDefinition(schema_def) =>
                Self::collect_schema_definition(ctx, file_path, schema_def),

            Definition::TypeDefinition(TypeDefinition::Object(obj)) => {
                let resolvers_directive =
                    Self::collect_resolvers_directive(ctx, file_path, &obj.directives);
                Self::collect_output_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &obj.name,
                    &obj.fields,
                    resolvers_directive,
                );
                ctx.register_object_type(file_path.to_path_buf(), obj.clone());
            },

            Definition::TypeDefinition(TypeDefinition::Interface(iface)) => {
                Self::collect_output_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &iface.name,
                    &iface.fields,
                    None,
                );
                ctx.register_interface_type(file_path.to_path_buf(), iface.clone());
            },

            Definition::TypeDefinition(TypeDefinition::InputObject(input)) => {
                Self::collect_input_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &input.name,
                    &input.fields,
                );
                ctx.register_input_object_type(file_path.to_path_buf(), input.clone());
            },

            Definition::TypeExtension(TypeExtension::Object(ext)) => {
                let resolvers_directive =
                    Self::collect_resolvers_directive(ctx, file_path, &ext.directives);
                Self::collect_output_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &ext.name,
                    &ext.fields,
                    resolvers_directive,
                );
                ctx.register_type_extension(
                    file_path.to_path_buf(),
                    TypeExtensionDef::Object(ext.clone()),
                );
            },

            Definition::TypeExtension(TypeExtension::Interface(ext)) => {
                Self::collect_output_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &ext.name,
                    &ext.fields,
                    None,
                );
                ctx.register_type_extension(
                    file_path.to_path_buf(),
                    TypeExtensionDef::Interface(ext.clone()),
                );
            },

            Definition::TypeExtension(TypeExtension::InputObject(ext)) => {
                Self::collect_input_fields(
                    ctx,
                    file_path,
                    definition_index,
                    &ext.name,
                    &ext.fields,
                );
                ctx.register_type_extension(
                    file_path.to_path_buf(),
                    TypeExtensionDef::InputObject(ext.clone()),
                );
            },

            _ => (),
        }
    }

    fn finish(&mut self, ctx: &mut GeneratorContext) {
        ctx.resolve_operation_kinds();
        log::debug!(
            "Collected {} plain fields and {} resolver fields.",
            ctx.plain_fields().values().map(Vec::len).sum::<usize>(),
            ctx.resolver_fields().values().map(Vec::len).sum::<usize>(),
        );
    }
}

/// Returns the explicit `resolverName`, if one was given.
fn parse_resolve_directive(
    file_path: &Path,
    directive: &ast::schema::Directive,
) -> Result<Option<String>, GenerationError> {
    let mut resolver_name = None;
    for (arg_name, value) in &directive.arguments {
        if arg_name != RESOLVER_NAME_ARG {
            return Err(directive_argument_error(
                file_path,
                directive,
                DirectiveArgumentIssue::UnknownArgument {
                    argument_name: arg_name.to_string(),
                    expected: RESOLVER_NAME_ARG.to_string(),
                },
            ));
        }
        match value {
            ast::schema::Value::String(name) => resolver_name = Some(name.to_string()),
            ast::schema::Value::Null => (),
            _ => return Err(directive_argument_error(
                file_path,
                directive,
                DirectiveArgumentIssue::NonStringValue {
                    argument_name: RESOLVER_NAME_ARG.to_string(),
                },
            )),
        }
    }
    Ok(resolver_name)
}

fn parse_resolvers_directive(
    file_path: &Path,
    directive: &ast::schema::Directive,
) -> Result<ResolversDirective, GenerationError> {
    let mut import_path = None;
    for (arg_name, value) in &directive.arguments {
        if arg_name != IMPORT_PATH_ARG {
            return Err(directive_argument_error(
                file_path,
                directive,
                DirectiveArgumentIssue::UnknownArgument {
                    argument_name: arg_name.to_string(),
                    expected: IMPORT_PATH_ARG.to_string(),
                },
            ));
        }
        match value {
            ast::schema::Value::String(path) => import_path = Some(path.to_string()),
            _ => return Err(directive_argument_error(
                file_path,
                directive,
                DirectiveArgumentIssue::NonStringValue {
                    argument_name: IMPORT_PATH_ARG.to_string(),
                },
            )),
        }
    }

    match import_path {
        Some(import_path) => Ok(ResolversDirective {
            import_path,
            location: loc::FilePosition::from_pos(file_path, directive.position),
        }),
        None => Err(directive_argument_error(
            file_path,
            directive,
            DirectiveArgumentIssue::MissingArgument {
                argument_name: IMPORT_PATH_ARG.to_string(),
            },
        )),
    }
}

fn directive_argument_error(
    file_path: &Path,
    directive: &ast::schema::Directive,
    reason: DirectiveArgumentIssue,
) -> GenerationError {
    GenerationError::DirectiveArgument {
        directive_name: directive.name.to_string(),
        location: loc::FilePosition::from_pos(file_path, directive.position),
        reason,
    }
}
