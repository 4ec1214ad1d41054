use crate::error::GenerationError;
use crate::error::PipelineError;
use crate::file_reader;
use crate::schema::SchemaDocument;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

type Result<T> = std::result::Result<T, PipelineError>;

pub const DEFAULT_SCHEMA_FILE_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// Finds, reads and parses schema files into one [SchemaDocument].
#[derive(Clone, Debug)]
pub struct SchemaLoader {
    file_extensions: Vec<String>,
}
impl SchemaLoader {
    pub fn new() -> Self {
        Self::with_file_extensions(DEFAULT_SCHEMA_FILE_EXTENSIONS)
    }

    pub fn with_file_extensions<S: AsRef<str>>(exts: &[S]) -> Self {
        Self {
            file_extensions: exts.iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Lists the schema files at or under `input_path`.
    ///
    /// A path to a single file is always returned as-is, even when its
    /// extension is not one of the recognized schema extensions. Directory
    /// entries are visited in file-name order.
    pub fn discover(&self, input_path: &Path) -> Result<Vec<PathBuf>> {
        if input_path.is_file() {
            return Ok(vec![input_path.to_path_buf()]);
        }
        if !input_path.is_dir() {
            return Err(PipelineError::InvalidSchemaInputPath {
                path: input_path.to_path_buf(),
            });
        }

        let mut file_paths = vec![];
        let walker = WalkDir::new(input_path)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|err| {
                let path = err.path()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| input_path.to_path_buf());
                PipelineError::fs(path, err.into())
            })?;

            let path = entry.path();
            if !entry.file_type().is_file() {
                log::trace!("Skipping non-file: {path:#?}.");
                continue;
            }
            if self.has_schema_extension(path) {
                log::trace!("Found schema file at {path:#?}.");
                file_paths.push(path.to_path_buf());
            }
        }

        Ok(file_paths)
    }

    /// Loads every schema file at or under `input_path`.
    ///
    /// Files are read concurrently and parsed on a blocking worker; the
    /// resulting document keeps discovery order regardless of which read
    /// finishes first. All parse failures are reported together.
    pub async fn load(&self, input_path: &Path) -> Result<SchemaDocument> {
        let discover_loader = self.clone();
        let discover_path = input_path.to_path_buf();
        let file_paths =
            tokio::task::spawn_blocking(move || discover_loader.discover(&discover_path))
                .await
                .map_err(|err| PipelineError::TaskFailed(err.to_string()))??;

        log::debug!(
            "Found {} schema files under {input_path:?}.",
            file_paths.len(),
        );

        let contents = futures::future::try_join_all(
            file_paths.iter().map(|path| file_reader::read_content(path)),
        ).await?;

        let sources: Vec<(PathBuf, String)> =
            file_paths.into_iter().zip(contents).collect();
        tokio::task::spawn_blocking(move || Self::parse_all(sources))
            .await
            .map_err(|err| PipelineError::TaskFailed(err.to_string()))?
    }

    fn has_schema_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.file_extensions.iter().any(|e| *e == ext))
    }

    fn parse_all(sources: Vec<(PathBuf, String)>) -> Result<SchemaDocument> {
        let mut documents = vec![];
        let mut errors: Vec<GenerationError> = vec![];
        for (file_path, content) in sources {
            match SchemaDocument::parse_str(&file_path, &content) {
                Ok(document) => documents.push(document),
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(PipelineError::GenerationErrors { errors });
        }
        Ok(SchemaDocument::concat(documents))
    }
}
impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}
