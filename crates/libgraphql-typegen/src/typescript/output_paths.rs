use crate::context::GeneratorSettings;
use crate::context::ResolversDirective;
use crate::typescript::naming;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

const SHARED_MODULE_NAME: &str = "index";
const SCHEMA_SNAPSHOT_FILE_NAME: &str = "schema.graphql";

/// Where generated files are written and how they import each other.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputPaths {
    pub resolvers_import_prefix: Option<String>,
    pub resolvers_output_path: Option<PathBuf>,
    pub schema_root: PathBuf,
    pub types_import_prefix: String,
    pub types_output_path: PathBuf,
}
impl OutputPaths {
    /// Returns `None` unless the schema input and the TypeScript output have
    /// both been configured.
    pub fn from_settings(settings: &GeneratorSettings) -> Option<Self> {
        let schema_input_path = settings.schema_input_path.as_ref()?;
        let types_output_path = settings.types_output_path.clone()?;
        let schema_root =
            if schema_input_path.is_file() {
                schema_input_path.parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            } else {
                schema_input_path.to_path_buf()
            };

        Some(Self {
            resolvers_import_prefix: settings.resolvers_import_prefix.clone(),
            resolvers_output_path: settings.resolvers_output_path.clone(),
            schema_root,
            types_import_prefix: settings.types_import_prefix.clone()
                .unwrap_or_else(|| "./".to_string()),
            types_output_path,
        })
    }

    /// `source_file` relative to the schema root. Files outside the root
    /// are placed by file name alone.
    pub fn relative_source_path(&self, source_file: &Path) -> PathBuf {
        match source_file.strip_prefix(&self.schema_root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => source_file.file_name()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    pub fn types_module_path(&self, source_file: &Path) -> PathBuf {
        let mut path = self.types_output_path
            .join(self.relative_source_path(source_file))
            .into_os_string();
        path.push(".ts");
        PathBuf::from(path)
    }

    pub fn types_import_path(&self, source_file: &Path) -> String {
        join_import_path(
            &self.types_import_prefix,
            &self.relative_source_path(source_file),
        )
    }

    pub fn shared_module_path(&self) -> PathBuf {
        self.types_output_path.join(format!("{SHARED_MODULE_NAME}.ts"))
    }

    pub fn shared_import_path(&self) -> String {
        join_import_path(&self.types_import_prefix, Path::new(SHARED_MODULE_NAME))
    }

    pub fn schema_snapshot_path(&self) -> PathBuf {
        self.types_output_path.join(SCHEMA_SNAPSHOT_FILE_NAME)
    }

    /// The resolver module implementing `parent_type_name`'s resolver fields
    /// declared in `declaring_file`.
    ///
    /// A `@resolvers(importPath: ...)` directive places the module at that
    /// path under the resolvers output directory. Otherwise the module
    /// mirrors the schema file layout: `<dir>/<Type>.ts` when the file is
    /// named after the type, `<dir>/<FileBase>/<Type>.ts` when it isn't.
    pub fn resolver_module_path(
        &self,
        declaring_file: &Path,
        parent_type_name: &str,
        resolvers_directive: Option<&ResolversDirective>,
    ) -> Option<PathBuf> {
        let resolvers_output_path = self.resolvers_output_path.as_ref()?;

        if let Some(directive) = resolvers_directive {
            let import_path = self.resolvers_import_prefix.as_deref()
                .and_then(|prefix| {
                    directive.import_path.strip_prefix(prefix.trim_end_matches('/'))
                        .filter(|rest| rest.starts_with('/'))
                })
                .unwrap_or(&directive.import_path)
                .trim_start_matches("./")
                .trim_start_matches('/');
            let import_path = import_path.strip_suffix(".ts").unwrap_or(import_path);
            return Some(resolvers_output_path.join(format!("{import_path}.ts")));
        }

        let relative_dir = self.relative_source_path(declaring_file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let base_name = naming::file_base_name(declaring_file);
        let module_dir =
            if base_name == parent_type_name {
                resolvers_output_path.join(relative_dir)
            } else {
                resolvers_output_path.join(relative_dir).join(base_name)
            };
        Some(module_dir.join(format!("{parent_type_name}.ts")))
    }
}

/// Joins a module import prefix and a relative path with forward slashes.
pub fn join_import_path(prefix: &str, relative: &Path) -> String {
    let relative = relative.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    if prefix.is_empty() {
        relative
    } else if prefix.ends_with('/') {
        format!("{prefix}{relative}")
    } else {
        format!("{prefix}/{relative}")
    }
}
