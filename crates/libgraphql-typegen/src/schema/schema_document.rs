use crate::ast;
use crate::error::GenerationError;
use crate::schema::RESOLVERS_DIRECTIVE;
use crate::schema::RESOLVE_DIRECTIVE;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

/// A top-level schema definition along with the file it was written in.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcedDefinition {
    pub file_path: PathBuf,
    pub def: ast::schema::Definition,
}

/// The merged schema: every definition of every loaded file, concatenated in
/// discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaDocument {
    definitions: Vec<SourcedDefinition>,
    source_files: Vec<PathBuf>,
}
impl SchemaDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `content` as a single schema file.
    ///
    /// Whitespace-only content produces an empty document rather than a parse
    /// error.
    pub fn parse_str(
        file_path: impl AsRef<Path>,
        content: &str,
    ) -> Result<Self, GenerationError> {
        let file_path = file_path.as_ref();
        let mut document = Self::new();
        if content.trim().is_empty() {
            log::debug!("Skipping empty schema file {file_path:?}.");
            return Ok(document);
        }

        let ast_doc =
            graphql_parser::schema::parse_schema::<String>(content)
                .map_err(|err| GenerationError::ParseError {
                    file: file_path.to_path_buf(),
                    err: err.to_string(),
                })?.into_static();

        document.append(file_path.to_path_buf(), ast_doc);
        Ok(document)
    }

    pub fn append(&mut self, file_path: PathBuf, ast_doc: ast::schema::Document) {
        if ast_doc.definitions.is_empty() {
            return;
        }
        if !self.source_files.contains(&file_path) {
            self.source_files.push(file_path.clone());
        }
        self.definitions.extend(ast_doc.definitions.into_iter().map(|def| {
            SourcedDefinition {
                file_path: file_path.clone(),
                def,
            }
        }));
    }

    /// Concatenates documents in iteration order.
    pub fn concat(documents: impl IntoIterator<Item = SchemaDocument>) -> Self {
        let mut merged = Self::new();
        for document in documents {
            for file_path in document.source_files {
                if !merged.source_files.contains(&file_path) {
                    merged.source_files.push(file_path);
                }
            }
            merged.definitions.extend(document.definitions);
        }
        merged
    }

    pub fn definitions(&self) -> &[SourcedDefinition] {
        &self.definitions
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    /// Prints the merged schema back to GraphQL.
    ///
    /// Object, interface and input-object extensions are folded into their
    /// base declarations when one exists, and the generator's own directives
    /// are dropped.
    pub fn to_merged_sdl(&self) -> String {
        use ast::schema::Definition;
        use ast::schema::TypeDefinition;
        use ast::schema::TypeExtension;

        let mut definitions: Vec<ast::schema::Definition> = vec![];
        let mut base_type_indices: HashMap<String, usize> = HashMap::new();
        let mut extensions: Vec<ast::schema::TypeExtension> = vec![];

        for sourced_def in &self.definitions {
            match &sourced_def.def {
                Definition::DirectiveDefinition(directive_def)
                    if is_generator_directive(&directive_def.name) => (),

                Definition::TypeDefinition(type_def) => {
                    let mut type_def = type_def.clone();
                    let name = match &mut type_def {
                        TypeDefinition::Object(obj) => {
                            strip_object_fields(&mut obj.directives, &mut obj.fields);
                            Some(obj.name.clone())
                        },
                        TypeDefinition::Interface(iface) => {
                            strip_object_fields(&mut iface.directives, &mut iface.fields);
                            Some(iface.name.clone())
                        },
                        TypeDefinition::InputObject(input) => {
                            strip_directives(&mut input.directives);
                            for field in input.fields.iter_mut() {
                                strip_directives(&mut field.directives);
                            }
                            Some(input.name.clone())
                        },
                        _ => None,
                    };
                    if let Some(name) = name {
                        base_type_indices.entry(name).or_insert(definitions.len());
                    }
                    definitions.push(Definition::TypeDefinition(type_def));
                },

                Definition::TypeExtension(type_ext) =>
                    extensions.push(type_ext.clone()),

                other => definitions.push(other.clone()),
            }
        }

        for mut type_ext in extensions {
            let base_def = extension_name(&type_ext)
                .and_then(|name| base_type_indices.get(name).copied())
                .and_then(|idx| definitions.get_mut(idx));

            let folded = match (&mut type_ext, base_def) {
                (
                    TypeExtension::Object(ext),
                    Some(Definition::TypeDefinition(TypeDefinition::Object(base))),
                ) => {
                    strip_object_fields(&mut ext.directives, &mut ext.fields);
                    merge_interfaces(&mut base.implements_interfaces, &ext.implements_interfaces);
                    base.directives.append(&mut ext.directives);
                    base.fields.append(&mut ext.fields);
                    true
                },

                (
                    TypeExtension::Interface(ext),
                    Some(Definition::TypeDefinition(TypeDefinition::Interface(base))),
                ) => {
                    strip_object_fields(&mut ext.directives, &mut ext.fields);
                    merge_interfaces(&mut base.implements_interfaces, &ext.implements_interfaces);
                    base.directives.append(&mut ext.directives);
                    base.fields.append(&mut ext.fields);
                    true
                },

                (
                    TypeExtension::InputObject(ext),
                    Some(Definition::TypeDefinition(TypeDefinition::InputObject(base))),
                ) => {
                    strip_directives(&mut ext.directives);
                    for field in ext.fields.iter_mut() {
                        strip_directives(&mut field.directives);
                    }
                    base.directives.append(&mut ext.directives);
                    base.fields.append(&mut ext.fields);
                    true
                },

                _ => false,
            };

            if !folded {
                match &mut type_ext {
                    TypeExtension::Object(ext) =>
                        strip_object_fields(&mut ext.directives, &mut ext.fields),
                    TypeExtension::Interface(ext) =>
                        strip_object_fields(&mut ext.directives, &mut ext.fields),
                    TypeExtension::InputObject(ext) => {
                        strip_directives(&mut ext.directives);
                        for field in ext.fields.iter_mut() {
                            strip_directives(&mut field.directives);
                        }
                    },
                    _ => (),
                }
                definitions.push(Definition::TypeExtension(type_ext));
            }
        }

        ast::schema::Document { definitions }.to_string()
    }
}

fn extension_name(type_ext: &ast::schema::TypeExtension) -> Option<&str> {
    use ast::schema::TypeExtension;
    match type_ext {
        TypeExtension::Object(ext) => Some(ext.name.as_str()),
        TypeExtension::Interface(ext) => Some(ext.name.as_str()),
        TypeExtension::InputObject(ext) => Some(ext.name.as_str()),
        _ => None,
    }
}

fn is_generator_directive(name: &str) -> bool {
    name == RESOLVE_DIRECTIVE || name == RESOLVERS_DIRECTIVE
}

fn merge_interfaces(base: &mut Vec<String>, additional: &[String]) {
    for iface in additional {
        if !base.contains(iface) {
            base.push(iface.clone());
        }
    }
}

fn strip_directives(directives: &mut Vec<ast::schema::Directive>) {
    directives.retain(|directive| !is_generator_directive(&directive.name));
}

fn strip_object_fields(
    directives: &mut Vec<ast::schema::Directive>,
    fields: &mut [ast::schema::Field],
) {
    strip_directives(directives);
    for field in fields.iter_mut() {
        strip_directives(&mut field.directives);
    }
}
