use crate::resolver_merge::ResolverMergeError;
use crate::resolver_merge::ResolverModuleUpdate;
use crate::resolver_merge::ResolverStub;
use crate::resolver_merge::merge_resolver_module;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, ResolverMergeError>;

fn query_update(resolver_names: &[&str]) -> ResolverModuleUpdate {
    ResolverModuleUpdate {
        import_path: "app/types/Query.graphql".to_string(),
        module_path: PathBuf::from("out/resolvers/Query.ts"),
        resolvers: resolver_names.iter()
            .map(|resolver_name| ResolverStub {
                parent_type_name: "Query".to_string(),
                resolver_name: resolver_name.to_string(),
            })
            .collect(),
        resolvers_type_identifier: "QueryResolvers".to_string(),
    }
}

const VIEWER_STUB: &str = concat!(
    "    viewer: (_context, _query, _args) => {\n",
    "        throw new Error('Not implemented yet!');\n",
    "    },\n",
);

mod fresh_modules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gets_import_and_stubs() -> Result<()> {
        let merged = merge_resolver_module(None, &query_update(&["viewer", "account"]))?;

        assert_eq!(merged, concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    account: (_context, _query, _args) => {\n",
            "        throw new Error('Not implemented yet!');\n",
            "    },\n",
            "    viewer: (_context, _query, _args) => {\n",
            "        throw new Error('Not implemented yet!');\n",
            "    },\n",
            "};\n",
        ));

        Ok(())
    }

    #[test]
    fn blank_file_is_treated_as_missing() -> Result<()> {
        let update = query_update(&["viewer"]);

        assert_eq!(
            merge_resolver_module(Some("  \n\n"), &update)?,
            merge_resolver_module(None, &update)?,
        );

        Ok(())
    }

    #[test]
    fn duplicate_resolver_names_produce_one_stub() -> Result<()> {
        let merged = merge_resolver_module(None, &query_update(&["viewer", "viewer"]))?;

        assert_eq!(merged.matches("viewer:").count(), 1);

        Ok(())
    }

    #[test]
    fn colliding_parent_names_fall_back_to_parent() -> Result<()> {
        let update = ResolverModuleUpdate {
            resolvers: vec![ResolverStub {
                parent_type_name: "Context".to_string(),
                resolver_name: "user".to_string(),
            }],
            ..query_update(&[])
        };

        let merged = merge_resolver_module(None, &update)?;

        assert!(merged.contains("    user: (_context, _parent, _args) => {\n"));

        Ok(())
    }
}

mod existing_modules {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merging_twice_is_a_no_op() -> Result<()> {
        let update = query_update(&["viewer", "account"]);
        let first = merge_resolver_module(None, &update)?;

        let second = merge_resolver_module(Some(&first), &update)?;

        assert_eq!(second, first);

        Ok(())
    }

    #[test]
    fn new_stub_is_inserted_in_order_and_bodies_are_kept() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "import { loadViewer } from '../loaders';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    viewer: async (context) => {\n",
            "        return loadViewer(context);\n",
            "    },\n",
            "};\n",
            "\n",
            "export default resolvers;\n",
        );

        let merged = merge_resolver_module(Some(existing), &query_update(&["viewer", "account"]))?;

        assert_eq!(merged, concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "import { loadViewer } from '../loaders';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    account: (_context, _query, _args) => {\n",
            "        throw new Error('Not implemented yet!');\n",
            "    },\n",
            "    viewer: async (context) => {\n",
            "        return loadViewer(context);\n",
            "    },\n",
            "};\n",
            "\n",
            "export default resolvers;\n",
        ));

        Ok(())
    }

    #[test]
    fn out_of_order_properties_are_sorted() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    viewer: () => null,\n",
            "    account: () => null,\n",
            "};\n",
        );

        let merged = merge_resolver_module(Some(existing), &query_update(&["account", "viewer"]))?;

        assert_eq!(merged, concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    account: () => null,\n",
            "    viewer: () => null,\n",
            "};\n",
        ));

        Ok(())
    }

    #[test]
    fn comments_travel_with_their_property() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    // The signed-in user.\n",
            "    viewer: () => null,\n",
            "    // more to come\n",
            "};\n",
        );

        let merged = merge_resolver_module(Some(existing), &query_update(&["viewer", "account"]))?;

        assert_eq!(merged, concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    account: (_context, _query, _args) => {\n",
            "        throw new Error('Not implemented yet!');\n",
            "    },\n",
            "    // The signed-in user.\n",
            "    viewer: () => null,\n",
            "    // more to come\n",
            "};\n",
        ));

        Ok(())
    }

    #[test]
    fn same_line_comment_stays_with_preceding_property() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    viewer: () => null, // cached per request\n",
            "    account: () => null,\n",
            "};\n",
        );
        let update = query_update(&["account", "viewer"]);

        let merged = merge_resolver_module(Some(existing), &update)?;

        assert_eq!(merged, concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    account: () => null,\n",
            "    viewer: () => null, // cached per request\n",
            "};\n",
        ));
        assert_eq!(merge_resolver_module(Some(&merged), &update)?, merged);

        Ok(())
    }

    #[test]
    fn quoted_keys_count_as_present() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
            "    'viewer': () => null,\n",
            "};\n",
        );

        assert_eq!(merge_resolver_module(Some(existing), &query_update(&["viewer"]))?, existing);

        Ok(())
    }

    #[test]
    fn unexported_binding_is_completed() -> Result<()> {
        let existing = concat!(
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "const resolvers: QueryResolvers = {};\n",
            "\n",
            "export default resolvers;\n",
        );

        let merged = merge_resolver_module(Some(existing), &query_update(&["viewer"]))?;

        assert_eq!(merged, format!(concat!(
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n",
            "\n",
            "const resolvers: QueryResolvers = {{\n",
            "{}",
            "}};\n",
            "\n",
            "export default resolvers;\n",
        ), VIEWER_STUB));

        Ok(())
    }

    #[test]
    fn missing_binding_is_appended() -> Result<()> {
        let existing = "export const helper = 1;\n";

        let merged = merge_resolver_module(Some(existing), &query_update(&["viewer"]))?;

        assert_eq!(merged, format!(concat!(
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n",
            "\n",
            "export const helper = 1;\n",
            "\n",
            "export const resolvers: QueryResolvers = {{\n",
            "{}",
            "}};\n",
        ), VIEWER_STUB));

        Ok(())
    }
}

mod types_and_imports {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete_object(declaration: &str) -> String {
        format!("{declaration} = {{\n    viewer: () => null,\n}};\n")
    }

    #[test]
    fn missing_annotation_is_added() -> Result<()> {
        let existing = format!(
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n\n{}",
            complete_object("export const resolvers"),
        );

        let merged = merge_resolver_module(Some(&existing), &query_update(&["viewer"]))?;

        assert_eq!(merged, format!(
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n\n{}",
            complete_object("export const resolvers: QueryResolvers"),
        ));

        Ok(())
    }

    #[test]
    fn stale_annotation_is_replaced() -> Result<()> {
        let existing = format!(
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n\n{}",
            complete_object("export const resolvers: OldQueryResolvers"),
        );

        let merged = merge_resolver_module(Some(&existing), &query_update(&["viewer"]))?;

        assert!(merged.contains("export const resolvers: QueryResolvers = {\n"));
        assert!(!merged.contains("OldQueryResolvers"));

        Ok(())
    }

    #[test]
    fn joins_existing_named_import() -> Result<()> {
        let existing = format!(
            "import {{ Query }} from 'app/types/Query.graphql';\n\n{}",
            complete_object("export const resolvers: QueryResolvers"),
        );

        let merged = merge_resolver_module(Some(&existing), &query_update(&["viewer"]))?;

        assert!(merged.starts_with(
            "import { Query, QueryResolvers } from 'app/types/Query.graphql';\n\n",
        ));

        Ok(())
    }

    #[test]
    fn joins_existing_default_import() -> Result<()> {
        let existing = format!(
            "import Query from 'app/types/Query.graphql';\n\n{}",
            complete_object("export const resolvers: QueryResolvers"),
        );

        let merged = merge_resolver_module(Some(&existing), &query_update(&["viewer"]))?;

        assert!(merged.starts_with(
            "import Query, { QueryResolvers } from 'app/types/Query.graphql';\n\n",
        ));

        Ok(())
    }

    #[test]
    fn adds_statement_after_other_imports() -> Result<()> {
        let existing = format!(
            "import {{ load }} from '../loaders';\n\n{}",
            complete_object("export const resolvers: QueryResolvers"),
        );

        let merged = merge_resolver_module(Some(&existing), &query_update(&["viewer"]))?;

        assert!(merged.starts_with(concat!(
            "import { load } from '../loaders';\n",
            "import { QueryResolvers } from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {\n",
        )));

        Ok(())
    }

    #[test]
    fn import_precedes_binding_appended_at_the_same_offset() -> Result<()> {
        let existing = "import { db } from './db';";

        let merged = merge_resolver_module(Some(existing), &query_update(&["viewer"]))?;

        assert_eq!(merged, format!(concat!(
            "import {{ db }} from './db';\n",
            "import {{ QueryResolvers }} from 'app/types/Query.graphql';\n",
            "\n",
            "export const resolvers: QueryResolvers = {{\n",
            "{}",
            "}};\n",
        ), VIEWER_STUB));

        Ok(())
    }
}

mod errors {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn syntax_errors_are_reported() {
        let existing = concat!(
            "export const resolvers = {\n",
            "    viewer: (\n",
        );

        let result = merge_resolver_module(Some(existing), &query_update(&["viewer"]));

        assert!(matches!(result, Err(ResolverMergeError::SyntaxError { .. })));
    }

    #[test]
    fn resolvers_must_be_an_object_literal() {
        let existing = concat!(
            "import { makeResolvers } from '../make';\n",
            "\n",
            "export const resolvers = makeResolvers();\n",
        );

        let result = merge_resolver_module(Some(existing), &query_update(&["viewer"]));

        assert_eq!(result, Err(ResolverMergeError::ResolversNotAnObject { line: 3 }));
    }
}
