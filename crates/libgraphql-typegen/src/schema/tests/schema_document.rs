use crate::ast;
use crate::error::GenerationError;
use crate::schema::SchemaDocument;
use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, GenerationError>;

mod parse_str {
    use super::*;

    #[test]
    fn records_source_file_on_each_definition() -> Result<()> {
        let document = SchemaDocument::parse_str("schema/Viewer.graphql", concat!(
            "type Viewer { id: ID! }\n",
            "input ViewerFilter { name: String }\n",
        ))?;

        assert_eq!(document.definitions().len(), 2);
        assert!(document.definitions().iter().all(|def| {
            def.file_path == Path::new("schema/Viewer.graphql")
        }));
        assert_eq!(document.source_files(), &[PathBuf::from("schema/Viewer.graphql")]);

        Ok(())
    }

    #[test]
    fn whitespace_only_content_is_an_empty_document() -> Result<()> {
        let document = SchemaDocument::parse_str("Empty.graphql", "  \n\t\n")?;

        assert!(document.is_empty());
        assert!(document.source_files().is_empty());

        Ok(())
    }

    #[test]
    fn malformed_content_is_a_parse_error() {
        let result = SchemaDocument::parse_str("Broken.graphql", "type Broken {");

        assert!(matches!(
            result,
            Err(GenerationError::ParseError { file, .. })
                if file == Path::new("Broken.graphql"),
        ));
    }
}

mod concat {
    use super::*;

    #[test]
    fn preserves_document_order() -> Result<()> {
        let first = SchemaDocument::parse_str("b.graphql", "type B { id: ID }")?;
        let second = SchemaDocument::parse_str("a.graphql", "type A { id: ID }")?;

        let merged = SchemaDocument::concat([first, second]);

        assert_eq!(merged.source_files(), &[
            PathBuf::from("b.graphql"),
            PathBuf::from("a.graphql"),
        ]);
        let names: Vec<&str> = merged.definitions().iter()
            .filter_map(|def| match &def.def {
                ast::schema::Definition::TypeDefinition(
                    ast::schema::TypeDefinition::Object(obj),
                ) => Some(obj.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["B", "A"]);

        Ok(())
    }
}

mod to_merged_sdl {
    use super::*;

    #[test]
    fn folds_extensions_into_base_types() -> Result<()> {
        let document = SchemaDocument::concat([
            SchemaDocument::parse_str("Query.graphql", "type Query { a: Int }")?,
            SchemaDocument::parse_str("Other.graphql", "extend type Query { b: String }")?,
        ]);

        let sdl = document.to_merged_sdl();

        assert!(!sdl.contains("extend"), "unexpected extension in:\n{sdl}");
        let reparsed = graphql_parser::schema::parse_schema::<String>(&sdl)
            .map_err(|err| GenerationError::ParseError {
                file: PathBuf::from("schema.graphql"),
                err: err.to_string(),
            })?;
        let query = reparsed.definitions.iter()
            .find_map(|def| match def {
                graphql_parser::schema::Definition::TypeDefinition(
                    graphql_parser::schema::TypeDefinition::Object(obj),
                ) if obj.name == "Query" => Some(obj),
                _ => None,
            });
        let field_names: Vec<&str> = query.iter()
            .flat_map(|obj| obj.fields.iter().map(|field| field.name.as_str()))
            .collect();
        assert_eq!(field_names, vec!["a", "b"]);

        Ok(())
    }

    #[test]
    fn strips_generator_directives() -> Result<()> {
        let document = SchemaDocument::parse_str("Query.graphql", concat!(
            "directive @resolve(resolverName: String) on FIELD_DEFINITION\n",
            "type Query @resolvers(importPath: \"app/Query\") {\n",
            "  viewer: String @resolve\n",
            "  legacy: String @deprecated\n",
            "}\n",
        ))?;

        let sdl = document.to_merged_sdl();

        assert!(!sdl.contains("@resolve"), "unexpected directive in:\n{sdl}");
        assert!(!sdl.contains("importPath"), "unexpected directive in:\n{sdl}");
        assert!(sdl.contains("@deprecated"));

        Ok(())
    }

    #[test]
    fn keeps_extensions_without_a_base_type() -> Result<()> {
        let document = SchemaDocument::parse_str(
            "Query.graphql",
            "extend type Query { viewer: String @resolve }",
        )?;

        let sdl = document.to_merged_sdl();

        assert!(sdl.contains("extend type Query"));
        assert!(!sdl.contains("@resolve"));

        Ok(())
    }
}
