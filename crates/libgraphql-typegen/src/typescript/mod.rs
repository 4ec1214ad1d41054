//! TypeScript declaration generation.
//!
//! Schema types become a [TsModule] per source file; [print_module] turns a
//! module into source text.

mod declaration;
mod emitter;
mod naming;
mod output_paths;
mod printer;
mod type_mapper;

pub use declaration::ImportDeclaration;
pub use declaration::ImportSpecifier;
pub use declaration::PropertySignature;
pub use declaration::TsDeclaration;
pub use declaration::TsModule;
pub use declaration::TsType;
pub use emitter::DeclarationEmitter;
pub use emitter::EmittedModule;
pub use naming::declaring_type_name;
pub use naming::lower_first;
pub use naming::resolver_args_identifier;
pub use naming::resolver_type_identifier;
pub use naming::resolvers_interface_identifier;
pub use naming::upper_first;
pub use output_paths::OutputPaths;
pub use output_paths::join_import_path;
pub use printer::print_module;
pub(crate) use printer::property_key;
pub(crate) use printer::quote_string;
pub use type_mapper::DependencyMap;
pub use type_mapper::TypeMapper;

pub const AUTO_GEN_HEADER: [&str; 2] = [
    "THIS FILE IS AUTO-GENERATED.",
    "ANY MODIFICATION WILL BE DISCARDED UPON NEXT COMPILATION.",
];

#[cfg(test)]
mod tests;
