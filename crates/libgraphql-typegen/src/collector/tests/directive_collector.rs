use crate::error::DirectiveArgumentIssue;
use crate::error::GenerationError;
use crate::test_utils;

type Result<T> = std::result::Result<T, GenerationError>;

fn field_names<'a>(fields: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    fields.into_iter().collect()
}

mod classification {
    use super::*;

    #[test]
    fn splits_plain_and_resolver_fields() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Viewer.graphql", concat!(
                "type Viewer {\n",
                "  id: ID!\n",
                "  name: String\n",
                "  friends(first: Int): [Viewer!]! @resolve\n",
                "}\n",
            )),
        ])?;

        assert_eq!(
            field_names(ctx.plain_fields()["Viewer"].iter().map(|field| field.name())),
            vec!["id", "name"],
        );
        assert_eq!(
            field_names(ctx.resolver_fields()["Viewer"].iter().map(|field| field.field.name())),
            vec!["friends"],
        );
        assert_eq!(ctx.errors(), &[]);

        Ok(())
    }

    #[test]
    fn resolver_name_defaults_to_field_name() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Query.graphql", concat!(
                "type Query {\n",
                "  viewer: String @resolve\n",
                "  me: String @resolve(resolverName: \"currentUser\")\n",
                "}\n",
            )),
        ])?;

        let resolver_names: Vec<&str> = ctx.resolver_fields()["Query"].iter()
            .map(|field| field.resolver_name.as_str())
            .collect();
        assert_eq!(resolver_names, vec!["viewer", "currentUser"]);

        Ok(())
    }

    #[test]
    fn extension_fields_belong_to_the_extended_type() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Query.graphql", "type Query { a: Int }"),
            ("schema/Profile.graphql", "extend type Query { profile: String @resolve }"),
        ])?;

        let profile = &ctx.resolver_fields()["Query"][0].field;
        assert_eq!(profile.parent_type_name, "Query");
        assert_eq!(profile.file_path, std::path::Path::new("schema/Profile.graphql"));
        assert_eq!(ctx.type_extensions()["Query"].len(), 1);

        Ok(())
    }

    #[test]
    fn input_fields_are_always_plain() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Filters.graphql", concat!(
                "input ViewerFilter { name: String }\n",
                "extend input ViewerFilter { limit: Int }\n",
            )),
        ])?;

        assert_eq!(
            field_names(ctx.plain_fields()["ViewerFilter"].iter().map(|field| field.name())),
            vec!["name", "limit"],
        );
        assert!(ctx.resolver_fields().is_empty());

        Ok(())
    }
}

mod directive_arguments {
    use super::*;

    #[test]
    fn non_string_resolver_name_drops_the_field() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Query.graphql", "type Query { viewer: String @resolve(resolverName: 1) }"),
        ])?;

        assert!(matches!(
            ctx.errors(),
            [GenerationError::DirectiveArgument {
                directive_name,
                reason: DirectiveArgumentIssue::NonStringValue { .. },
                ..
            }] if directive_name == "resolve",
        ));
        assert!(ctx.resolver_fields().is_empty());
        assert!(ctx.plain_fields().is_empty());

        Ok(())
    }

    #[test]
    fn unknown_resolve_argument_suggests_resolver_name() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Query.graphql", "type Query { viewer: String @resolve(name: \"v\") }"),
        ])?;

        let [GenerationError::DirectiveArgument { reason, .. }] = ctx.errors() else {
            panic!("expected one directive error, got {:?}", ctx.errors());
        };
        assert_eq!(reason.to_string(), "Unknown argument: name, did you mean resolverName?");

        Ok(())
    }

    #[test]
    fn non_string_import_path_falls_back_to_default_placement() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Viewer.graphql", concat!(
                "type Viewer @resolvers(importPath: 123) {\n",
                "  friends: [Viewer] @resolve\n",
                "}\n",
            )),
        ])?;

        assert_eq!(ctx.errors().len(), 1);
        assert!(matches!(
            &ctx.errors()[0],
            GenerationError::DirectiveArgument {
                reason: DirectiveArgumentIssue::NonStringValue { argument_name },
                ..
            } if argument_name == "importPath",
        ));

        let friends = &ctx.resolver_fields()["Viewer"][0].field;
        let metadata = ctx.field_metadata(&friends.id);
        assert!(metadata.is_some_and(|metadata| metadata.resolvers_directive.is_none()));

        Ok(())
    }

    #[test]
    fn missing_import_path_is_reported() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Viewer.graphql", "type Viewer @resolvers { friends: [Viewer] @resolve }"),
        ])?;

        assert!(matches!(
            ctx.errors(),
            [GenerationError::DirectiveArgument {
                reason: DirectiveArgumentIssue::MissingArgument { .. },
                ..
            }],
        ));

        Ok(())
    }

    #[test]
    fn import_path_is_recorded_per_field() -> Result<()> {
        let ctx = test_utils::collect(&[
            ("schema/Viewer.graphql", concat!(
                "type Viewer @resolvers(importPath: \"app/resolvers/viewer\") {\n",
                "  friends: [Viewer] @resolve\n",
                "}\n",
                "extend type Viewer {\n",
                "  photos: [String] @resolve\n",
                "}\n",
            )),
        ])?;

        let import_paths: Vec<Option<&str>> = ctx.resolver_fields()["Viewer"].iter()
            .map(|field| {
                ctx.field_metadata(&field.field.id)
                    .and_then(|metadata| metadata.resolvers_directive.as_ref())
                    .map(|directive| directive.import_path.as_str())
            })
            .collect();
        assert_eq!(import_paths, vec![Some("app/resolvers/viewer"), None]);

        Ok(())
    }
}
