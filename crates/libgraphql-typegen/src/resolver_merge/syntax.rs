use crate::resolver_merge::ResolverMergeError;
use std::ops::Range;
use tree_sitter::Node;
use tree_sitter::Parser;

type Result<T> = std::result::Result<T, ResolverMergeError>;

const RESOLVERS_BINDING: &str = "resolvers";

/// The parts of an existing resolver module that merging cares about, as
/// byte ranges into the original source.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExistingModule {
    pub has_statements: bool,
    pub imports: Vec<ImportStatement>,
    pub resolvers: Option<ResolversDeclaration>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportStatement {
    /// End of a default import binding such as `Foo` in `import Foo from`.
    pub default_import_end: Option<usize>,
    pub named_imports: Option<NamedImports>,
    pub source: String,
    pub span: Range<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedImports {
    /// The locally bound names.
    pub local_names: Vec<String>,
    pub last_specifier_end: Option<usize>,
    pub span: Range<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolversDeclaration {
    /// Leading whitespace of the line the declaration starts on.
    pub indent: String,
    pub name_end: usize,
    pub object: ObjectLiteral,
    /// Span and text of the declared type, without the leading `:`.
    pub type_annotation: Option<(Range<usize>, String)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<ObjectProperty>,
    /// Indentation used by the first property, when it starts its own line.
    pub property_indent: Option<String>,
    pub span: Range<usize>,
    /// Comments after the last property.
    pub trailing_comments: Option<Range<usize>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectProperty {
    /// Property name; spread elements have an empty name.
    pub name: String,
    /// Covers the property and any comments directly preceding it.
    pub span: Range<usize>,
    /// Comments following the property on the row it ends on.
    pub line_comment: Option<Range<usize>>,
}

impl ExistingModule {
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|err| ResolverMergeError::Language(err.to_string()))?;
        let tree = parser.parse(source, None)
            .ok_or(ResolverMergeError::NoSyntaxTree)?;
        let root = tree.root_node();
        if root.has_error() {
            let error_node = first_error(root).unwrap_or(root);
            let position = error_node.start_position();
            return Err(ResolverMergeError::SyntaxError {
                line: position.row + 1,
                col: position.column + 1,
            });
        }

        let bytes = source.as_bytes();
        let mut module = Self::default();
        let mut cursor = root.walk();
        for statement in root.named_children(&mut cursor) {
            if statement.kind() == "comment" {
                continue;
            }
            module.has_statements = true;

            match statement.kind() {
                "import_statement" => {
                    if let Some(import) = parse_import(statement, bytes) {
                        module.imports.push(import);
                    }
                },
                "export_statement" => {
                    let declaration = statement.child_by_field_name("declaration");
                    if let Some(declaration) = declaration
                        && module.resolvers.is_none() {
                        module.resolvers = parse_resolvers_declaration(
                            declaration,
                            statement.start_byte(),
                            source,
                        )?;
                    }
                },
                "lexical_declaration" | "variable_declaration" => {
                    if module.resolvers.is_none() {
                        module.resolvers = parse_resolvers_declaration(
                            statement,
                            statement.start_byte(),
                            source,
                        )?;
                    }
                },
                _ => (),
            }
        }

        Ok(module)
    }

    pub fn import_from(&self, source: &str) -> Option<&ImportStatement> {
        self.imports.iter().find(|import| import.source == source)
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter()
        .filter(|child| child.has_error() || child.is_missing())
        .find_map(first_error)
}

fn node_text<'s>(node: Node<'_>, bytes: &'s [u8]) -> &'s str {
    node.utf8_text(bytes).unwrap_or_default()
}

fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some('\'' | '"' | '`'), Some(_)) => chars.as_str().to_string(),
        _ => text.to_string(),
    }
}

fn parse_import(statement: Node<'_>, bytes: &[u8]) -> Option<ImportStatement> {
    let source = unquote(node_text(statement.child_by_field_name("source")?, bytes));
    let mut import = ImportStatement {
        default_import_end: None,
        named_imports: None,
        source,
        span: statement.start_byte()..statement.end_byte(),
    };

    let mut cursor = statement.walk();
    let import_clause = statement.named_children(&mut cursor)
        .find(|child| child.kind() == "import_clause");
    let Some(import_clause) = import_clause else {
        return Some(import);
    };

    let mut clause_cursor = import_clause.walk();
    for clause_part in import_clause.named_children(&mut clause_cursor) {
        match clause_part.kind() {
            "identifier" => import.default_import_end = Some(clause_part.end_byte()),
            "named_imports" => {
                let mut local_names = vec![];
                let mut last_specifier_end = None;
                let mut specifier_cursor = clause_part.walk();
                for specifier in clause_part.named_children(&mut specifier_cursor) {
                    if specifier.kind() != "import_specifier" {
                        continue;
                    }
                    let local_name = specifier.child_by_field_name("alias")
                        .or_else(|| specifier.child_by_field_name("name"))
                        .map(|node| unquote(node_text(node, bytes)));
                    if let Some(local_name) = local_name {
                        local_names.push(local_name);
                    }
                    last_specifier_end = Some(specifier.end_byte());
                }
                import.named_imports = Some(NamedImports {
                    local_names,
                    last_specifier_end,
                    span: clause_part.start_byte()..clause_part.end_byte(),
                });
            },
            _ => (),
        }
    }
    Some(import)
}

fn parse_resolvers_declaration(
    declaration: Node<'_>,
    statement_start: usize,
    source: &str,
) -> Result<Option<ResolversDeclaration>> {
    if !matches!(declaration.kind(), "lexical_declaration" | "variable_declaration") {
        return Ok(None);
    }
    let bytes = source.as_bytes();

    let mut cursor = declaration.walk();
    let declarator = declaration.named_children(&mut cursor)
        .filter(|child| child.kind() == "variable_declarator")
        .find(|declarator| {
            declarator.child_by_field_name("name")
                .is_some_and(|name| node_text(name, bytes) == RESOLVERS_BINDING)
        });
    let Some(declarator) = declarator else {
        return Ok(None);
    };
    let Some(name) = declarator.child_by_field_name("name") else {
        return Ok(None);
    };

    let line = declarator.start_position().row + 1;
    let object = match declarator.child_by_field_name("value") {
        Some(value) if value.kind() == "object" => parse_object(value, source),
        _ => return Err(ResolverMergeError::ResolversNotAnObject { line }),
    };

    let type_annotation = declarator.child_by_field_name("type")
        .and_then(|annotation| {
            let mut annotation_cursor = annotation.walk();
            let ty = annotation.named_children(&mut annotation_cursor).next();
            ty
        })
        .map(|ty| (ty.start_byte()..ty.end_byte(), node_text(ty, bytes).to_string()));

    Ok(Some(ResolversDeclaration {
        indent: line_indent(source, statement_start).unwrap_or_default(),
        name_end: name.end_byte(),
        object,
        type_annotation,
    }))
}

fn parse_object(object: Node<'_>, source: &str) -> ObjectLiteral {
    let bytes = source.as_bytes();
    let mut properties: Vec<ObjectProperty> = vec![];
    let mut pending_comments: Option<usize> = None;
    let mut trailing_comments: Option<Range<usize>> = None;
    let mut last_property_row: Option<usize> = None;

    let mut cursor = object.walk();
    for child in object.named_children(&mut cursor) {
        let name = match child.kind() {
            "comment" => {
                if pending_comments.is_none()
                    && last_property_row == Some(child.start_position().row)
                    && let Some(property) = properties.last_mut()
                {
                    let start = property.line_comment.as_ref()
                        .map_or(child.start_byte(), |comment| comment.start);
                    property.line_comment = Some(start..child.end_byte());
                    continue;
                }
                let start = *pending_comments.get_or_insert(child.start_byte());
                trailing_comments = Some(start..child.end_byte());
                continue;
            },
            "pair" => child.child_by_field_name("key")
                .map(|key| property_key_name(key, bytes))
                .unwrap_or_default(),
            "method_definition" => child.child_by_field_name("name")
                .map(|key| property_key_name(key, bytes))
                .unwrap_or_default(),
            "shorthand_property_identifier" => node_text(child, bytes).to_string(),
            _ => String::new(),
        };

        let start = pending_comments.take().unwrap_or(child.start_byte());
        trailing_comments = None;
        last_property_row = Some(child.end_position().row);
        properties.push(ObjectProperty {
            line_comment: None,
            name,
            span: start..child.end_byte(),
        });
    }

    let property_indent = properties.first()
        .and_then(|property| line_indent(source, property.span.start));

    ObjectLiteral {
        properties,
        property_indent,
        span: object.start_byte()..object.end_byte(),
        trailing_comments,
    }
}

fn property_key_name(key: Node<'_>, bytes: &[u8]) -> String {
    let text = node_text(key, bytes);
    match key.kind() {
        "string" => unquote(text),
        _ => text.to_string(),
    }
}

/// The whitespace preceding `offset` on its line, provided nothing else
/// precedes it there.
fn line_indent(source: &str, offset: usize) -> Option<String> {
    let line_start = source[..offset].rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let prefix = &source[line_start..offset];
    prefix.chars()
        .all(|c| c == ' ' || c == '\t')
        .then(|| prefix.to_string())
}
