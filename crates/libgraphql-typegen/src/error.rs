use crate::context::OperationKind;
use crate::file_reader::ReadContentError;
use crate::loc;
use crate::resolver_merge::ResolverMergeError;
use std::path::PathBuf;
use thiserror::Error;

/// Schema and type-level problems. These accumulate on the
/// [GeneratorContext](crate::context::GeneratorContext) so that a single run
/// can report all of them together.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error(
        "Resolver module {} would need to implement more than one aggregate \
        resolvers type: {}",
        module_path.display(),
        type_identifiers.join(", "),
    )]
    ConflictingResolverModule {
        module_path: PathBuf,
        type_identifiers: Vec<String>,
    },

    #[error("Invalid @{directive_name} directive at {location}: {reason}")]
    DirectiveArgument {
        directive_name: String,
        location: loc::FilePosition,
        reason: DirectiveArgumentIssue,
    },

    #[error(
        "Fields on Object types must only be declared once, multiple \
        declarations of field {field_name} on type {type_name} was found ({})",
        loc::format_locations(locations),
    )]
    DuplicateFieldDeclaration {
        type_name: String,
        field_name: String,
        locations: Vec<loc::FilePosition>,
    },

    #[error(
        "Resolver names must be unique within a type, multiple fields of type \
        {type_name} resolve as {resolver_name} ({})",
        loc::format_locations(locations),
    )]
    DuplicateResolverName {
        type_name: String,
        resolver_name: String,
        locations: Vec<loc::FilePosition>,
    },

    #[error(
        "The {operation} root operation type was declared more than once \
        ({location1}, {location2})"
    )]
    DuplicateOperationTypeDefinition {
        operation: OperationKind,
        location1: loc::FilePosition,
        location2: loc::FilePosition,
    },

    #[error(
        "Types must only be declared once, multiple declarations of type \
        {type_name} was found ({}). If you need to extend existing types use \
        the following syntax instead: extend type {type_name} {{...}}",
        loc::format_locations(locations),
    )]
    DuplicateTypeDeclaration {
        type_name: String,
        locations: Vec<loc::FilePosition>,
    },

    #[error(
        "Multiple declaration of type: {type_name} was found ({}), referenced \
        at {location}",
        loc::format_locations(declarations),
    )]
    AmbiguousType {
        type_name: String,
        location: loc::FilePosition,
        declarations: Vec<loc::FilePosition>,
    },

    #[error(
        "Attempted to extend type {type_name} at {location}, but no such type \
        is declared"
    )]
    ExtensionOfUndefinedType {
        type_name: String,
        location: loc::FilePosition,
    },

    #[error("Failed to parse {}: {err}", file.display())]
    ParseError {
        file: PathBuf,
        err: String,
    },

    #[error(
        "Could not find any type declaration of: {type_name} (referenced at \
        {location})"
    )]
    UnresolvedType {
        type_name: String,
        location: loc::FilePosition,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectiveArgumentIssue {
    #[error("Missing required {argument_name} argument")]
    MissingArgument {
        argument_name: String,
    },

    #[error("{argument_name} argument must be a string value")]
    NonStringValue {
        argument_name: String,
    },

    #[error("Unknown argument: {argument_name}, did you mean {expected}?")]
    UnknownArgument {
        argument_name: String,
        expected: String,
    },
}

/// Failures that abort a generation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load configuration from {}: {message}", path.display())]
    ConfigError {
        path: PathBuf,
        message: String,
    },

    #[error("Filesystem operation failed on {}: {err}", path.display())]
    FileSystem {
        path: PathBuf,
        err: std::io::Error,
    },

    #[error(
        "Encountered the following errors while generating types:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    GenerationErrors {
        errors: Vec<GenerationError>,
    },

    #[error("Invalid configuration for the `{plugin_id}` plugin: {message}")]
    InvalidPluginConfig {
        plugin_id: String,
        message: String,
    },

    #[error(
        "The `{plugin_id}` plugin requires the `{required_plugin_id}` plugin \
        to be configured"
    )]
    MissingPluginDependency {
        plugin_id: String,
        required_plugin_id: String,
    },

    #[error(
        "Schema input path {} must be either a relative/absolute path to a \
        single GraphQL schema file or to a directory containing one or more \
        GraphQL schema files to be merged",
        path.display(),
    )]
    InvalidSchemaInputPath {
        path: PathBuf,
    },

    #[error("No configured plugin loaded a schema document")]
    MissingSchemaDocument,

    #[error("The `{plugin_id}` plugin does not implement any pipeline phase")]
    PluginWithoutCapabilities {
        plugin_id: String,
    },

    #[error(transparent)]
    ReadContent(#[from] ReadContentError),

    #[error(
        "Failed to update the following resolver modules:\n\n{}",
        errors.iter()
            .map(|s| format!("  * {s}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    ResolverModuleErrors {
        errors: Vec<ResolverModuleError>,
    },

    #[error("A background task failed: {0}")]
    TaskFailed(String),

    #[error("No plugin is registered under the id `{plugin_id}`")]
    UnknownPlugin {
        plugin_id: String,
    },
}
impl PipelineError {
    pub(crate) fn fs(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            err,
        }
    }
}

/// A failure scoped to one resolver module. Other modules still get merged.
#[derive(Debug, Error)]
pub enum ResolverModuleError {
    #[error("Failed to merge {}: {err}", module_path.display())]
    Merge {
        module_path: PathBuf,
        err: ResolverMergeError,
    },

    #[error(transparent)]
    Read(#[from] ReadContentError),

    #[error("Failed to write {}: {err}", module_path.display())]
    Write {
        module_path: PathBuf,
        err: std::io::Error,
    },
}
