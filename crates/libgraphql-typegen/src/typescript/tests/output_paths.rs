use crate::context::GeneratorSettings;
use crate::context::ResolversDirective;
use crate::loc::FilePosition;
use crate::test_utils;
use crate::typescript::OutputPaths;
use crate::typescript::join_import_path;
use std::path::Path;
use std::path::PathBuf;

fn resolvers_directive(import_path: &str) -> ResolversDirective {
    ResolversDirective {
        import_path: import_path.to_string(),
        location: FilePosition {
            col: 1,
            file: PathBuf::from("schema/Viewer.graphql"),
            line: 1,
        },
    }
}

mod declaration_modules {
    use super::*;

    #[test]
    fn mirror_schema_layout() {
        let paths = test_utils::output_paths();
        let source = Path::new("schema/social/Viewer.graphql");

        assert_eq!(
            paths.types_module_path(source),
            PathBuf::from("out/types/social/Viewer.graphql.ts"),
        );
        assert_eq!(paths.types_import_path(source), "app/types/social/Viewer.graphql");
    }

    #[test]
    fn shared_module_and_snapshot_live_in_output_root() {
        let paths = test_utils::output_paths();

        assert_eq!(paths.shared_module_path(), PathBuf::from("out/types/index.ts"));
        assert_eq!(paths.shared_import_path(), "app/types/index");
        assert_eq!(paths.schema_snapshot_path(), PathBuf::from("out/types/schema.graphql"));
    }

    #[test]
    fn require_schema_and_types_settings() {
        assert_eq!(OutputPaths::from_settings(&GeneratorSettings::default()), None);

        let settings = GeneratorSettings {
            schema_input_path: Some(PathBuf::from("does-not-exist")),
            types_output_path: Some(PathBuf::from("out/types")),
            ..Default::default()
        };
        let paths = OutputPaths::from_settings(&settings);
        assert_eq!(paths.map(|paths| paths.types_import_prefix), Some("./".to_string()));
    }
}

mod resolver_modules {
    use super::*;

    #[test]
    fn file_named_after_type() {
        let paths = test_utils::output_paths();

        assert_eq!(
            paths.resolver_module_path(Path::new("schema/social/Viewer.graphql"), "Viewer", None),
            Some(PathBuf::from("out/resolvers/social/Viewer.ts")),
        );
    }

    #[test]
    fn file_extending_another_type() {
        let paths = test_utils::output_paths();

        assert_eq!(
            paths.resolver_module_path(Path::new("schema/Profile.graphql"), "Query", None),
            Some(PathBuf::from("out/resolvers/Profile/Query.ts")),
        );
    }

    #[test]
    fn resolvers_directive_strips_import_prefix() {
        let paths = test_utils::output_paths();
        let source = Path::new("schema/Viewer.graphql");

        assert_eq!(
            paths.resolver_module_path(
                source,
                "Viewer",
                Some(&resolvers_directive("app/resolvers/viewer/index")),
            ),
            Some(PathBuf::from("out/resolvers/viewer/index.ts")),
        );
        assert_eq!(
            paths.resolver_module_path(
                source,
                "Viewer",
                Some(&resolvers_directive("app/resolvers-legacy/viewer")),
            ),
            Some(PathBuf::from("out/resolvers/app/resolvers-legacy/viewer.ts")),
        );
    }

    #[test]
    fn unconfigured_resolver_output() {
        let paths = OutputPaths {
            resolvers_output_path: None,
            ..test_utils::output_paths()
        };

        assert_eq!(
            paths.resolver_module_path(Path::new("schema/Viewer.graphql"), "Viewer", None),
            None,
        );
    }
}

#[test]
fn import_paths_use_forward_slashes() {
    let relative: PathBuf = ["nested", "Viewer.graphql"].iter().collect();

    assert_eq!(join_import_path("app/types", &relative), "app/types/nested/Viewer.graphql");
    assert_eq!(join_import_path("./", &relative), "./nested/Viewer.graphql");
    assert_eq!(join_import_path("", &relative), "nested/Viewer.graphql");
}
