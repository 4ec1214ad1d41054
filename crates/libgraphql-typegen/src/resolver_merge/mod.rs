//! Incremental updates of hand-written resolver modules.
//!
//! A resolver module is parsed, compared against the resolvers the schema
//! requires, and only the missing pieces are spliced into the original text.

mod merge;
mod resolver_update;
mod syntax;

use thiserror::Error;

pub use merge::MergePlan;
pub use merge::merge_resolver_module;
pub use resolver_update::ResolverModuleUpdate;
pub use resolver_update::ResolverStub;
pub use resolver_update::collect_resolver_updates;
pub use syntax::ExistingModule;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ResolverMergeError {
    #[error("Failed to load the TypeScript grammar: {0}")]
    Language(String),

    #[error("The TypeScript parser did not produce a syntax tree")]
    NoSyntaxTree,

    #[error(
        "The `resolvers` declaration on line {line} must be initialized with \
        an object literal"
    )]
    ResolversNotAnObject {
        line: usize,
    },

    #[error("Syntax error on line {line}, column {col}")]
    SyntaxError {
        line: usize,
        col: usize,
    },
}

#[cfg(test)]
mod tests;
