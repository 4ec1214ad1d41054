use crate::ast;
use crate::context::CollectedField;
use crate::context::FieldId;
use crate::context::FieldMetadata;
use crate::context::GeneratorSettings;
use crate::context::OperationKind;
use crate::context::ResolverField;
use crate::context::Sourced;
use crate::context::TypeExtensionDef;
use crate::error::GenerationError;
use crate::loc;
use crate::schema::SchemaDocument;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

type TypeDefsMap<T> = IndexMap<String, Vec<Sourced<T>>>;

/// Outcome of looking a type name up across the object, interface and
/// input-object maps.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeLookup<'a> {
    Ambiguous(Vec<loc::FilePosition>),
    Found {
        file_path: &'a Path,
    },
    NotFound,
}

/// The state of a single generation run.
///
/// Created once at the start of a run and threaded by reference through
/// every pipeline phase. Definition maps only grow while the schema is being
/// collected; errors are only ever appended.
#[derive(Debug, Default)]
pub struct GeneratorContext {
    document: Option<Arc<SchemaDocument>>,
    errors: Vec<GenerationError>,
    field_metadata: HashMap<FieldId, FieldMetadata>,
    has_schema_definition: bool,
    input_object_types: TypeDefsMap<ast::schema::InputObjectType>,
    interface_types: TypeDefsMap<ast::schema::InterfaceType>,
    object_types: TypeDefsMap<ast::schema::ObjectType>,
    operation_roots: HashMap<OperationKind, (String, loc::FilePosition)>,
    plain_fields: IndexMap<String, Vec<CollectedField>>,
    resolver_fields: IndexMap<String, Vec<ResolverField>>,
    settings: GeneratorSettings,
    type_extensions: TypeDefsMap<TypeExtensionDef>,
}
impl GeneratorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: GeneratorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut GeneratorSettings {
        &mut self.settings
    }

    pub fn document(&self) -> Option<&SchemaDocument> {
        self.document.as_deref()
    }

    /// A handle to the merged document that can be held while the context
    /// is mutated.
    pub fn shared_document(&self) -> Option<Arc<SchemaDocument>> {
        self.document.clone()
    }

    /// Installs the merged document. When more than one plugin loads
    /// documents, later ones are appended to earlier ones.
    pub fn add_document(&mut self, document: SchemaDocument) {
        let document = match self.document.take() {
            Some(existing) => SchemaDocument::concat([
                Arc::unwrap_or_clone(existing),
                document,
            ]),
            None => document,
        };
        self.document = Some(Arc::new(document));
    }

    pub fn add_error(&mut self, error: GenerationError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[GenerationError] {
        &self.errors
    }

    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = GenerationError>) {
        self.errors.extend(errors);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn input_object_types(&self) -> &TypeDefsMap<ast::schema::InputObjectType> {
        &self.input_object_types
    }

    pub fn interface_types(&self) -> &TypeDefsMap<ast::schema::InterfaceType> {
        &self.interface_types
    }

    pub fn object_types(&self) -> &TypeDefsMap<ast::schema::ObjectType> {
        &self.object_types
    }

    pub fn type_extensions(&self) -> &TypeDefsMap<TypeExtensionDef> {
        &self.type_extensions
    }

    pub fn plain_fields(&self) -> &IndexMap<String, Vec<CollectedField>> {
        &self.plain_fields
    }

    pub fn resolver_fields(&self) -> &IndexMap<String, Vec<ResolverField>> {
        &self.resolver_fields
    }

    pub fn field_metadata(&self, field_id: &FieldId) -> Option<&FieldMetadata> {
        self.field_metadata.get(field_id)
    }

    pub fn register_input_object_type(
        &mut self,
        file_path: PathBuf,
        def: ast::schema::InputObjectType,
    ) {
        self.input_object_types.entry(def.name.clone())
            .or_default()
            .push(Sourced { file_path, def });
    }

    pub fn register_interface_type(
        &mut self,
        file_path: PathBuf,
        def: ast::schema::InterfaceType,
    ) {
        self.interface_types.entry(def.name.clone())
            .or_default()
            .push(Sourced { file_path, def });
    }

    pub fn register_object_type(
        &mut self,
        file_path: PathBuf,
        def: ast::schema::ObjectType,
    ) {
        self.object_types.entry(def.name.clone())
            .or_default()
            .push(Sourced { file_path, def });
    }

    pub fn register_type_extension(
        &mut self,
        file_path: PathBuf,
        def: TypeExtensionDef,
    ) {
        use crate::context::TypeDeclaration;
        self.type_extensions.entry(def.name().to_string())
            .or_default()
            .push(Sourced { file_path, def });
    }

    pub fn add_plain_field(&mut self, field: CollectedField) {
        self.plain_fields.entry(field.parent_type_name.clone())
            .or_default()
            .push(field);
    }

    pub fn add_resolver_field(&mut self, field: ResolverField) {
        self.resolver_fields.entry(field.field.parent_type_name.clone())
            .or_default()
            .push(field);
    }

    pub fn set_field_metadata(&mut self, field_id: FieldId, metadata: FieldMetadata) {
        self.field_metadata.insert(field_id, metadata);
    }

    /// Records that the document contains a `schema { ... }` block, which
    /// disables the conventional `Query`/`Mutation`/`Subscription` roots.
    pub fn mark_schema_definition(&mut self) {
        self.has_schema_definition = true;
    }

    /// Binds an operation root. Each root may only be bound once per run.
    pub fn set_operation_root(
        &mut self,
        operation: OperationKind,
        type_name: String,
        location: loc::FilePosition,
    ) {
        if let Some((_, existing_location)) = self.operation_roots.get(&operation) {
            self.errors.push(GenerationError::DuplicateOperationTypeDefinition {
                operation,
                location1: existing_location.clone(),
                location2: location,
            });
            return;
        }
        self.operation_roots.insert(operation, (type_name, location));
    }

    /// The name of the type serving as the given operation root, if any.
    pub fn operation_root(&self, operation: OperationKind) -> Option<&str> {
        if let Some((type_name, _)) = self.operation_roots.get(&operation) {
            return Some(type_name.as_str());
        }
        if self.has_schema_definition {
            return None;
        }
        let default_name = operation.default_root_type_name();
        let is_declared =
            self.object_types.contains_key(default_name)
            || self.type_extensions.get(default_name).is_some_and(|exts| {
                exts.iter().any(|ext| matches!(ext.def, TypeExtensionDef::Object(_)))
            });
        is_declared.then_some(default_name)
    }

    /// Classifies a parent type. Anything that isn't the mutation or
    /// subscription root is classified as a query.
    pub fn operation_kind_of(&self, parent_type_name: &str) -> OperationKind {
        if self.operation_root(OperationKind::Mutation) == Some(parent_type_name) {
            OperationKind::Mutation
        } else if self.operation_root(OperationKind::Subscription) == Some(parent_type_name) {
            OperationKind::Subscription
        } else {
            OperationKind::Query
        }
    }

    /// Re-derives every field's operation kind from the final operation
    /// roots. Roots may be declared after the types they name, so this runs
    /// once collection is complete.
    pub fn resolve_operation_kinds(&mut self) {
        let kinds: Vec<(FieldId, OperationKind)> =
            self.field_metadata.iter()
                .map(|(id, metadata)| {
                    (*id, self.operation_kind_of(&metadata.parent_type_name))
                })
                .collect();
        for (id, kind) in kinds {
            if let Some(metadata) = self.field_metadata.get_mut(&id) {
                metadata.operation_kind = kind;
            }
        }
    }

    pub fn lookup_type(&self, type_name: &str) -> TypeLookup<'_> {
        let mut found: Vec<(&Path, loc::FilePosition)> = vec![];
        if let Some(defs) = self.object_types.get(type_name) {
            found.extend(defs.iter().map(|d| (d.file_path.as_path(), d.location())));
        }
        if let Some(defs) = self.interface_types.get(type_name) {
            found.extend(defs.iter().map(|d| (d.file_path.as_path(), d.location())));
        }
        if let Some(defs) = self.input_object_types.get(type_name) {
            found.extend(defs.iter().map(|d| (d.file_path.as_path(), d.location())));
        }

        match found.len() {
            0 => TypeLookup::NotFound,
            1 => TypeLookup::Found {
                file_path: found[0].0,
            },
            _ => TypeLookup::Ambiguous(
                found.into_iter().map(|(_, location)| location).collect(),
            ),
        }
    }

    /// Checks for duplicate type declarations, then for duplicate fields.
    /// Problems are appended to [GeneratorContext::errors]; deciding whether
    /// they are fatal is left to the caller.
    pub fn validate(&mut self) {
        let duplicate_types = self.find_duplicate_type_declarations();
        self.errors.extend(duplicate_types);

        let duplicate_fields = self.find_duplicate_field_declarations();
        self.errors.extend(duplicate_fields);

        let duplicate_resolver_names = self.find_duplicate_resolver_names();
        self.errors.extend(duplicate_resolver_names);
    }

    fn find_duplicate_type_declarations(&self) -> Vec<GenerationError> {
        let mut declarations: IndexMap<&str, Vec<loc::FilePosition>> = IndexMap::new();
        for (type_name, defs) in &self.object_types {
            declarations.entry(type_name.as_str())
                .or_default()
                .extend(defs.iter().map(|def| def.location()));
        }
        for (type_name, defs) in &self.interface_types {
            declarations.entry(type_name.as_str())
                .or_default()
                .extend(defs.iter().map(|def| def.location()));
        }
        for (type_name, defs) in &self.input_object_types {
            declarations.entry(type_name.as_str())
                .or_default()
                .extend(defs.iter().map(|def| def.location()));
        }

        declarations.into_iter()
            .filter(|(_, locations)| locations.len() > 1)
            .map(|(type_name, mut locations)| {
                sort_locations(&mut locations);
                GenerationError::DuplicateTypeDeclaration {
                    type_name: type_name.to_string(),
                    locations,
                }
            })
            .collect()
    }

    fn find_duplicate_field_declarations(&self) -> Vec<GenerationError> {
        let mut declarations: IndexMap<&str, IndexMap<&str, Vec<loc::FilePosition>>> =
            IndexMap::new();
        for (type_name, fields) in &self.plain_fields {
            let type_fields = declarations.entry(type_name.as_str()).or_default();
            for field in fields {
                type_fields.entry(field.name()).or_default().push(field.location());
            }
        }
        for (type_name, fields) in &self.resolver_fields {
            let type_fields = declarations.entry(type_name.as_str()).or_default();
            for resolver_field in fields {
                type_fields.entry(resolver_field.field.name())
                    .or_default()
                    .push(resolver_field.field.location());
            }
        }

        let mut errors = vec![];
        for (type_name, fields) in declarations {
            for (field_name, mut locations) in fields {
                if locations.len() > 1 {
                    sort_locations(&mut locations);
                    errors.push(GenerationError::DuplicateFieldDeclaration {
                        type_name: type_name.to_string(),
                        field_name: field_name.to_string(),
                        locations,
                    });
                }
            }
        }
        errors
    }

    /// Resolver names become keys of the aggregate resolvers interface, so
    /// two distinct fields of one type may not share one. A field repeated
    /// under its own name is already a duplicate field declaration.
    fn find_duplicate_resolver_names(&self) -> Vec<GenerationError> {
        let mut errors = vec![];
        for (type_name, fields) in &self.resolver_fields {
            let mut by_resolver_name: IndexMap<&str, Vec<&CollectedField>> = IndexMap::new();
            for resolver_field in fields {
                by_resolver_name.entry(resolver_field.resolver_name.as_str())
                    .or_default()
                    .push(&resolver_field.field);
            }
            for (resolver_name, fields) in by_resolver_name {
                let first_name = fields[0].name();
                if fields.iter().all(|field| field.name() == first_name) {
                    continue;
                }
                let mut locations: Vec<loc::FilePosition> =
                    fields.iter().map(|field| field.location()).collect();
                sort_locations(&mut locations);
                errors.push(GenerationError::DuplicateResolverName {
                    type_name: type_name.clone(),
                    resolver_name: resolver_name.to_string(),
                    locations,
                });
            }
        }
        errors
    }
}

fn sort_locations(locations: &mut [loc::FilePosition]) {
    locations.sort_by(|a, b| {
        (&a.file, a.line, a.col).cmp(&(&b.file, b.line, b.col))
    });
}
