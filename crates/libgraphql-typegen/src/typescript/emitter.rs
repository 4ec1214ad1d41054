use crate::ast;
use crate::context::CollectedField;
use crate::context::GeneratorContext;
use crate::context::ResolverField;
use crate::context::Sourced;
use crate::context::TypeDeclaration;
use crate::context::TypeExtensionDef;
use crate::error::GenerationError;
use crate::loc;
use crate::typescript::ImportDeclaration;
use crate::typescript::ImportSpecifier;
use crate::typescript::OutputPaths;
use crate::typescript::PropertySignature;
use crate::typescript::TsDeclaration;
use crate::typescript::TsModule;
use crate::typescript::TsType;
use crate::typescript::TypeMapper;
use crate::typescript::naming;
use crate::typescript::print_module;
use indexmap::IndexMap;
use std::path::Path;
use std::path::PathBuf;

/// A module ready to be printed and written.
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedModule {
    pub import_path: String,
    pub module: TsModule,
    pub output_path: PathBuf,
    pub source_file: Option<PathBuf>,
}
impl EmittedModule {
    pub fn render(&self) -> String {
        print_module(&self.module)
    }
}

enum TypeDeclRef<'a> {
    InputObject(&'a Sourced<ast::schema::InputObjectType>),
    Interface(&'a Sourced<ast::schema::InterfaceType>),
    Object(&'a Sourced<ast::schema::ObjectType>),
}
impl TypeDeclRef<'_> {
    fn position(&self) -> ast::Pos {
        match self {
            Self::InputObject(decl) => decl.def.position(),
            Self::Interface(decl) => decl.def.position(),
            Self::Object(decl) => decl.def.position(),
        }
    }
}

/// Builds the declaration modules for a fully collected [GeneratorContext].
#[derive(Debug)]
pub struct DeclarationEmitter<'a> {
    ctx: &'a GeneratorContext,
    paths: &'a OutputPaths,
}
impl<'a> DeclarationEmitter<'a> {
    pub fn new(ctx: &'a GeneratorContext, paths: &'a OutputPaths) -> Self {
        Self { ctx, paths }
    }

    /// Emits one module per source file that declares an object, interface
    /// or input type, or that declares a resolver field. Modules follow the
    /// document's file order.
    pub fn emit(&self) -> (Vec<EmittedModule>, Vec<GenerationError>) {
        let mut modules = vec![];
        let mut errors = vec![];
        let Some(document) = self.ctx.document() else {
            return (modules, errors);
        };

        for source_file in document.source_files() {
            if let Some((module, module_errors)) = self.emit_source_file(source_file) {
                log::trace!(
                    "Emitted {} declarations for {source_file:?}.",
                    module.module.declarations.len(),
                );
                modules.push(module);
                errors.extend(module_errors);
            }
        }
        (modules, errors)
    }

    /// The module every generated file imports `Resolver` and `Maybe` from.
    pub fn emit_shared_module(&self) -> EmittedModule {
        let mut imports = vec![ImportDeclaration {
            default_import: None,
            named: vec![ImportSpecifier::named("GraphQLResolveInfo")],
            source: "graphql".to_string(),
        }];

        let mut declarations = vec![TsDeclaration::TypeAlias {
            doc: None,
            name: "Maybe".to_string(),
            ty: TsType::Union(vec![
                TsType::reference("T"),
                TsType::Null,
                TsType::Undefined,
            ]),
            type_params: vec!["T".to_string()],
        }];

        match &self.ctx.settings().context_import {
            Some(context_import) => imports.push(match context_import.import_name.as_str() {
                "default" => ImportDeclaration {
                    default_import: Some("Context".to_string()),
                    named: vec![],
                    source: context_import.import_path.to_string(),
                },
                "Context" => ImportDeclaration {
                    default_import: None,
                    named: vec![ImportSpecifier::named("Context")],
                    source: context_import.import_path.to_string(),
                },
                import_name => ImportDeclaration {
                    default_import: None,
                    named: vec![ImportSpecifier {
                        alias: Some("Context".to_string()),
                        name: import_name.to_string(),
                    }],
                    source: context_import.import_path.to_string(),
                },
            }),
            None => declarations.push(TsDeclaration::TypeAlias {
                doc: None,
                name: "Context".to_string(),
                ty: TsType::Undefined,
                type_params: vec![],
            }),
        }

        declarations.push(TsDeclaration::TypeAlias {
            doc: Some(concat!(
                "Signature of a field resolver: receives the request context, ",
                "the parent object and the field arguments.",
            ).to_string()),
            name: "Resolver".to_string(),
            ty: TsType::Function {
                params: vec![
                    ("context".to_string(), TsType::reference("Context")),
                    ("parent".to_string(), TsType::reference("TParent")),
                    ("args".to_string(), TsType::reference("TArgs")),
                    ("info".to_string(), TsType::reference("GraphQLResolveInfo")),
                ],
                return_type: Box::new(TsType::reference("TResult")),
            },
            type_params: vec![
                "TParent".to_string(),
                "TArgs".to_string(),
                "TResult".to_string(),
            ],
        });

        EmittedModule {
            import_path: self.paths.shared_import_path(),
            module: TsModule {
                declarations,
                imports,
            },
            output_path: self.paths.shared_module_path(),
            source_file: None,
        }
    }

    fn emit_source_file(
        &self,
        source_file: &Path,
    ) -> Option<(EmittedModule, Vec<GenerationError>)> {
        let type_decls = self.type_declarations_in(source_file);
        let resolver_groups = self.resolver_fields_in(source_file);
        if type_decls.is_empty() && resolver_groups.is_empty() {
            return None;
        }

        let mut mapper = TypeMapper::new(self.ctx, self.paths);
        let mut declarations = vec![];
        for type_decl in type_decls {
            declarations.push(self.type_declaration(&mut mapper, type_decl));
        }
        for (declaring_type_name, resolver_fields) in resolver_groups {
            let mut aggregate_members = vec![];
            for resolver_field in resolver_fields {
                let (args_decl, alias_decl) = self.resolver_declarations(&mut mapper, resolver_field);
                aggregate_members.push(PropertySignature {
                    doc: None,
                    name: resolver_field.resolver_name.to_string(),
                    ty: TsType::reference(alias_decl.name()),
                });
                declarations.push(args_decl);
                declarations.push(alias_decl);
            }
            declarations.push(TsDeclaration::Interface {
                doc: None,
                extends: vec![],
                members: aggregate_members,
                name: naming::resolvers_interface_identifier(&declaring_type_name),
            });
        }

        let import_path = self.paths.types_import_path(source_file);
        let (dependencies, errors) = mapper.finish(&import_path);
        Some((EmittedModule {
            import_path,
            module: TsModule {
                declarations,
                imports: dependencies.into_import_declarations(),
            },
            output_path: self.paths.types_module_path(source_file),
            source_file: Some(source_file.to_path_buf()),
        }, errors))
    }

    fn type_declarations_in(&self, source_file: &Path) -> Vec<TypeDeclRef<'a>> {
        let mut decls: Vec<TypeDeclRef<'a>> = vec![];
        decls.extend(
            self.ctx.object_types().values()
                .flatten()
                .filter(|decl| decl.file_path == source_file)
                .map(TypeDeclRef::Object),
        );
        decls.extend(
            self.ctx.interface_types().values()
                .flatten()
                .filter(|decl| decl.file_path == source_file)
                .map(TypeDeclRef::Interface),
        );
        decls.extend(
            self.ctx.input_object_types().values()
                .flatten()
                .filter(|decl| decl.file_path == source_file)
                .map(TypeDeclRef::InputObject),
        );
        decls.sort_by_key(|decl| decl.position());
        decls
    }

    /// Resolver fields physically declared in `source_file`, grouped by
    /// declaring type name in order of first appearance.
    fn resolver_fields_in(
        &self,
        source_file: &Path,
    ) -> IndexMap<String, Vec<&'a ResolverField>> {
        let mut fields: Vec<&'a ResolverField> = self.ctx.resolver_fields().values()
            .flatten()
            .filter(|resolver_field| resolver_field.field.file_path == source_file)
            .collect();
        fields.sort_by_key(|resolver_field| resolver_field.field.def.position());

        let mut groups: IndexMap<String, Vec<&'a ResolverField>> = IndexMap::new();
        for resolver_field in fields {
            let declaring_type_name = naming::declaring_type_name(
                source_file,
                &resolver_field.field.parent_type_name,
            );
            groups.entry(declaring_type_name).or_default().push(resolver_field);
        }
        groups
    }

    fn type_declaration(
        &self,
        mapper: &mut TypeMapper<'a>,
        type_decl: TypeDeclRef<'a>,
    ) -> TsDeclaration {
        let (name, description, location, interfaces) = match type_decl {
            TypeDeclRef::InputObject(decl) => (
                decl.def.name.as_str(),
                decl.def.description.as_deref(),
                decl.location(),
                vec![],
            ),
            TypeDeclRef::Interface(decl) => (
                decl.def.name.as_str(),
                decl.def.description.as_deref(),
                decl.location(),
                self.inherited_interfaces(&decl.def.name, &decl.def.implements_interfaces),
            ),
            TypeDeclRef::Object(decl) => (
                decl.def.name.as_str(),
                decl.def.description.as_deref(),
                decl.location(),
                self.inherited_interfaces(&decl.def.name, &decl.def.implements_interfaces),
            ),
        };

        let extends = interfaces.iter()
            .filter_map(|iface| {
                mapper.map_named_type(iface, &location)
                    .reference_name()
                    .map(str::to_string)
            })
            .collect();

        let members = self.ctx.plain_fields().get(name)
            .map(|fields| {
                fields.iter()
                    .map(|field| property_signature(mapper, field))
                    .collect()
            })
            .unwrap_or_default();

        TsDeclaration::Interface {
            doc: description.map(str::to_string),
            extends,
            members,
            name: name.to_string(),
        }
    }

    /// Interfaces implemented by the type's declaration and by any of its
    /// extensions, without repeats.
    fn inherited_interfaces(&self, type_name: &str, declared: &[String]) -> Vec<String> {
        let mut interfaces: Vec<String> = declared.to_vec();
        let extensions = self.ctx.type_extensions().get(type_name);
        for ext in extensions.into_iter().flatten() {
            let ext_interfaces = match &ext.def {
                TypeExtensionDef::Interface(ext) => &ext.implements_interfaces,
                TypeExtensionDef::Object(ext) => &ext.implements_interfaces,
                TypeExtensionDef::InputObject(_) => continue,
            };
            for iface in ext_interfaces {
                if !interfaces.contains(iface) {
                    interfaces.push(iface.to_string());
                }
            }
        }
        interfaces
    }

    /// The argument bundle and the resolver alias for one resolver field.
    fn resolver_declarations(
        &self,
        mapper: &mut TypeMapper<'a>,
        resolver_field: &ResolverField,
    ) -> (TsDeclaration, TsDeclaration) {
        let field = &resolver_field.field;
        let location = field.location();
        let operation_kind = self.ctx.field_metadata(&field.id)
            .map(|metadata| metadata.operation_kind)
            .unwrap_or_else(|| self.ctx.operation_kind_of(&field.parent_type_name));
        let type_identifier = naming::resolver_type_identifier(
            &field.file_path,
            &field.parent_type_name,
            field.name(),
            operation_kind,
        );
        let args_identifier = naming::resolver_args_identifier(&type_identifier);

        let arguments = field.def.arguments();
        let args_decl =
            if arguments.is_empty() {
                TsDeclaration::TypeAlias {
                    doc: None,
                    name: args_identifier.to_string(),
                    ty: TsType::Undefined,
                    type_params: vec![],
                }
            } else {
                TsDeclaration::Interface {
                    doc: None,
                    extends: vec![],
                    members: arguments.iter()
                        .map(|arg| PropertySignature {
                            doc: arg.description.clone(),
                            name: arg.name.to_string(),
                            ty: mapper.map_type(
                                &arg.value_type,
                                &loc::FilePosition::from_pos(&field.file_path, arg.position),
                            ),
                        })
                        .collect(),
                    name: args_identifier.to_string(),
                }
            };

        let parent_type = mapper.map_named_type(&field.parent_type_name, &location);
        let result_type = mapper.map_type(field.def.field_type(), &location);
        mapper.require_shared("Resolver");
        let alias_decl = TsDeclaration::TypeAlias {
            doc: field.def.description().map(str::to_string),
            name: type_identifier,
            ty: TsType::generic("Resolver", vec![
                parent_type,
                TsType::reference(args_identifier),
                result_type,
            ]),
            type_params: vec![],
        };

        (args_decl, alias_decl)
    }
}

fn property_signature(mapper: &mut TypeMapper<'_>, field: &CollectedField) -> PropertySignature {
    PropertySignature {
        doc: field.def.description().map(str::to_string),
        name: field.name().to_string(),
        ty: mapper.map_type(field.def.field_type(), &field.location()),
    }
}
