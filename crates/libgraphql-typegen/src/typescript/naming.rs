use crate::context::OperationKind;
use std::path::Path;

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The schema file's name without its extension, as an identifier
/// fragment: `Viewer.graphql` -> `Viewer`, `user-profile.gql` ->
/// `UserProfile`.
pub(crate) fn file_base_name(file_path: &Path) -> String {
    let stem = file_path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    if stem.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return stem;
    }
    stem.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect()
}

/// The name under which a resolver field's declarations are grouped.
///
/// Fields declared in a file named after their parent type use the parent
/// type name. Otherwise the file's base name is prepended, so that several
/// files extending the same type produce distinct names.
pub fn declaring_type_name(declaring_file: &Path, parent_type_name: &str) -> String {
    let base_name = file_base_name(declaring_file);
    if base_name == parent_type_name {
        parent_type_name.to_string()
    } else {
        format!("{base_name}{parent_type_name}")
    }
}

pub fn resolver_type_identifier(
    declaring_file: &Path,
    parent_type_name: &str,
    field_name: &str,
    operation_kind: OperationKind,
) -> String {
    let field_name = upper_first(field_name);
    match operation_kind {
        OperationKind::Mutation => format!("{field_name}Mutation"),
        OperationKind::Subscription => format!("{field_name}Subscription"),
        OperationKind::Query => format!(
            "{}{field_name}Resolver",
            declaring_type_name(declaring_file, parent_type_name),
        ),
    }
}

pub fn resolver_args_identifier(resolver_type_identifier: &str) -> String {
    format!("{resolver_type_identifier}Args")
}

pub fn resolvers_interface_identifier(declaring_type_name: &str) -> String {
    format!("{declaring_type_name}Resolvers")
}
