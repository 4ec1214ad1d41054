use crate::ast;
use crate::loc;
use std::path::PathBuf;

/// A schema node together with the file that declared it.
#[derive(Clone, Debug, PartialEq)]
pub struct Sourced<T> {
    pub file_path: PathBuf,
    pub def: T,
}
impl<T: TypeDeclaration> Sourced<T> {
    pub fn location(&self) -> loc::FilePosition {
        loc::FilePosition::from_pos(&self.file_path, self.def.position())
    }
}

pub trait TypeDeclaration {
    fn name(&self) -> &str;
    fn position(&self) -> ast::Pos;
}
impl TypeDeclaration for ast::schema::ObjectType {
    fn name(&self) -> &str { &self.name }
    fn position(&self) -> ast::Pos { self.position }
}
impl TypeDeclaration for ast::schema::InterfaceType {
    fn name(&self) -> &str { &self.name }
    fn position(&self) -> ast::Pos { self.position }
}
impl TypeDeclaration for ast::schema::InputObjectType {
    fn name(&self) -> &str { &self.name }
    fn position(&self) -> ast::Pos { self.position }
}
impl TypeDeclaration for TypeExtensionDef {
    fn name(&self) -> &str {
        match self {
            Self::InputObject(ext) => &ext.name,
            Self::Interface(ext) => &ext.name,
            Self::Object(ext) => &ext.name,
        }
    }

    fn position(&self) -> ast::Pos {
        match self {
            Self::InputObject(ext) => ext.position,
            Self::Interface(ext) => ext.position,
            Self::Object(ext) => ext.position,
        }
    }
}

/// The kinds of `extend` declarations that contribute fields.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtensionDef {
    InputObject(ast::schema::InputObjectTypeExtension),
    Interface(ast::schema::InterfaceTypeExtension),
    Object(ast::schema::ObjectTypeExtension),
}

/// Identifies a field by the index of its top-level definition in the merged
/// [SchemaDocument](crate::schema::SchemaDocument) and its index within that
/// definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub definition_index: usize,
    pub field_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldDef {
    Input(ast::schema::InputValue),
    Output(ast::schema::Field),
}
impl FieldDef {
    pub fn arguments(&self) -> &[ast::schema::InputValue] {
        match self {
            Self::Input(_) => &[],
            Self::Output(field) => &field.arguments,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Input(value) => value.description.as_deref(),
            Self::Output(field) => field.description.as_deref(),
        }
    }

    pub fn field_type(&self) -> &ast::schema::Type {
        match self {
            Self::Input(value) => &value.value_type,
            Self::Output(field) => &field.field_type,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Input(value) => &value.name,
            Self::Output(field) => &field.name,
        }
    }

    pub fn position(&self) -> ast::Pos {
        match self {
            Self::Input(value) => value.position,
            Self::Output(field) => field.position,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollectedField {
    pub id: FieldId,
    pub def: FieldDef,
    pub file_path: PathBuf,
    pub parent_type_name: String,
}
impl CollectedField {
    pub fn location(&self) -> loc::FilePosition {
        loc::FilePosition::from_pos(&self.file_path, self.def.position())
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }
}

/// A field marked with `@resolve`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolverField {
    pub field: CollectedField,
    pub resolver_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Query,
        OperationKind::Mutation,
        OperationKind::Subscription,
    ];

    /// The conventional root type name used when no `schema` definition
    /// exists.
    pub fn default_root_type_name(&self) -> &'static str {
        match self {
            Self::Mutation => "Mutation",
            Self::Query => "Query",
            Self::Subscription => "Subscription",
        }
    }
}
impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        })
    }
}

/// Payload of a valid type-level `@resolvers(importPath: "...")`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolversDirective {
    pub import_path: String,
    pub location: loc::FilePosition,
}

/// Classification recorded for each field of an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMetadata {
    pub operation_kind: OperationKind,
    pub parent_type_name: String,
    pub resolvers_directive: Option<ResolversDirective>,
}
