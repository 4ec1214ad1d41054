use crate::ast;
use crate::context::GeneratorContext;
use crate::context::TypeLookup;
use crate::error::GenerationError;
use crate::loc;
use crate::typescript::ImportDeclaration;
use crate::typescript::ImportSpecifier;
use crate::typescript::OutputPaths;
use crate::typescript::TsType;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Names each generated module needs to import, keyed by import path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyMap {
    imports: BTreeMap<String, BTreeSet<String>>,
}
impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, import_path: impl Into<String>, name: impl Into<String>) {
        self.imports.entry(import_path.into())
            .or_default()
            .insert(name.into());
    }

    pub fn get(&self, import_path: &str) -> Option<&BTreeSet<String>> {
        self.imports.get(import_path)
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.imports.iter()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn remove(&mut self, import_path: &str) -> Option<BTreeSet<String>> {
        self.imports.remove(import_path)
    }

    pub fn into_import_declarations(self) -> Vec<ImportDeclaration> {
        self.imports.into_iter()
            .map(|(source, names)| ImportDeclaration {
                default_import: None,
                named: names.into_iter().map(ImportSpecifier::named).collect(),
                source,
            })
            .collect()
    }
}

fn builtin_scalar(type_name: &str) -> Option<TsType> {
    match type_name {
        "Boolean" => Some(TsType::Boolean),
        "ID" | "String" => Some(TsType::String),
        "Float" | "Int" => Some(TsType::Number),
        _ => None,
    }
}

/// Converts schema type references into TypeScript types for one output
/// module, recording the imports that module will need.
///
/// Unresolvable references are recorded as errors and mapped to `any` so
/// that the rest of the module can still be produced.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    ctx: &'a GeneratorContext,
    dependencies: DependencyMap,
    errors: Vec<GenerationError>,
    paths: &'a OutputPaths,
}
impl<'a> TypeMapper<'a> {
    pub fn new(ctx: &'a GeneratorContext, paths: &'a OutputPaths) -> Self {
        Self {
            ctx,
            dependencies: DependencyMap::new(),
            errors: vec![],
            paths,
        }
    }

    /// Maps a type reference. References are optional unless wrapped as
    /// non-null, in which case exactly one `Maybe<...>` is dropped.
    pub fn map_type(
        &mut self,
        type_ref: &ast::schema::Type,
        location: &loc::FilePosition,
    ) -> TsType {
        match type_ref {
            ast::schema::Type::NonNullType(inner) => self.map_non_null_type(inner, location),
            nullable => {
                let inner = self.map_non_null_type(nullable, location);
                self.require_shared("Maybe");
                TsType::maybe(inner)
            },
        }
    }

    fn map_non_null_type(
        &mut self,
        type_ref: &ast::schema::Type,
        location: &loc::FilePosition,
    ) -> TsType {
        match type_ref {
            ast::schema::Type::NamedType(name) => self.map_named_type(name, location),
            ast::schema::Type::ListType(element) =>
                TsType::array(self.map_type(element, location)),
            ast::schema::Type::NonNullType(inner) => self.map_non_null_type(inner, location),
        }
    }

    /// Maps a bare type name, importing it from the module generated for the
    /// file that declares it.
    pub fn map_named_type(&mut self, type_name: &str, location: &loc::FilePosition) -> TsType {
        if let Some(scalar) = builtin_scalar(type_name) {
            return scalar;
        }

        match self.ctx.lookup_type(type_name) {
            TypeLookup::Found { file_path } => {
                self.dependencies.add(self.paths.types_import_path(file_path), type_name);
                TsType::reference(type_name)
            },

            TypeLookup::Ambiguous(declarations) => {
                self.errors.push(GenerationError::AmbiguousType {
                    type_name: type_name.to_string(),
                    location: location.clone(),
                    declarations,
                });
                TsType::Any
            },

            TypeLookup::NotFound => {
                self.errors.push(GenerationError::UnresolvedType {
                    type_name: type_name.to_string(),
                    location: location.clone(),
                });
                TsType::Any
            },
        }
    }

    /// Records a dependency on a name exported by the shared module.
    pub fn require_shared(&mut self, name: &str) {
        self.dependencies.add(self.paths.shared_import_path(), name);
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn errors(&self) -> &[GenerationError] {
        &self.errors
    }

    /// Consumes the mapper, dropping any dependency on `own_import_path`.
    pub fn finish(mut self, own_import_path: &str) -> (DependencyMap, Vec<GenerationError>) {
        self.dependencies.remove(own_import_path);
        (self.dependencies, self.errors)
    }
}
