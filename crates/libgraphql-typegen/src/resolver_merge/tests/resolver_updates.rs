use crate::error::GenerationError;
use crate::resolver_merge::ResolverModuleUpdate;
use crate::resolver_merge::ResolverStub;
use crate::resolver_merge::collect_resolver_updates;
use crate::test_utils;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, GenerationError>;

fn stub(parent_type_name: &str, resolver_name: &str) -> ResolverStub {
    ResolverStub {
        parent_type_name: parent_type_name.to_string(),
        resolver_name: resolver_name.to_string(),
    }
}

#[test]
fn one_update_per_module_in_collection_order() -> Result<()> {
    let ctx = test_utils::collect(&[
        ("schema/Query.graphql", "type Query {\n  viewer: Viewer @resolve\n}\n"),
        ("schema/Viewer.graphql", concat!(
            "type Viewer {\n",
            "  id: ID!\n",
            "  friends: [Viewer!]! @resolve\n",
            "  avatar: String @resolve(resolverName: \"avatarUrl\")\n",
            "}\n",
        )),
        ("schema/Profile.graphql", "extend type Query {\n  profile: String @resolve\n}\n"),
    ])?;

    let (updates, errors) = collect_resolver_updates(&ctx, &test_utils::output_paths());

    assert_eq!(errors, vec![]);
    assert_eq!(updates, vec![
        ResolverModuleUpdate {
            import_path: "app/types/Query.graphql".to_string(),
            module_path: PathBuf::from("out/resolvers/Query.ts"),
            resolvers: vec![stub("Query", "viewer")],
            resolvers_type_identifier: "QueryResolvers".to_string(),
        },
        ResolverModuleUpdate {
            import_path: "app/types/Profile.graphql".to_string(),
            module_path: PathBuf::from("out/resolvers/Profile/Query.ts"),
            resolvers: vec![stub("Query", "profile")],
            resolvers_type_identifier: "ProfileQueryResolvers".to_string(),
        },
        ResolverModuleUpdate {
            import_path: "app/types/Viewer.graphql".to_string(),
            module_path: PathBuf::from("out/resolvers/Viewer.ts"),
            resolvers: vec![stub("Viewer", "friends"), stub("Viewer", "avatarUrl")],
            resolvers_type_identifier: "ViewerResolvers".to_string(),
        },
    ]);

    Ok(())
}

#[test]
fn shared_module_for_two_declaring_types_conflicts() -> Result<()> {
    let ctx = test_utils::collect(&[
        ("schema/Query.graphql", concat!(
            "type Query @resolvers(importPath: \"app/resolvers/root\") {\n",
            "  viewer: String @resolve\n",
            "}\n",
        )),
        ("schema/Profile.graphql", concat!(
            "extend type Query @resolvers(importPath: \"app/resolvers/root\") {\n",
            "  profile: String @resolve\n",
            "}\n",
        )),
    ])?;

    let (updates, errors) = collect_resolver_updates(&ctx, &test_utils::output_paths());

    assert_eq!(updates, vec![]);
    assert_eq!(errors, vec![GenerationError::ConflictingResolverModule {
        module_path: PathBuf::from("out/resolvers/root.ts"),
        type_identifiers: vec![
            "ProfileQueryResolvers".to_string(),
            "QueryResolvers".to_string(),
        ],
    }]);

    Ok(())
}

#[test]
fn nothing_without_resolver_output() -> Result<()> {
    let ctx = test_utils::collect(&[
        ("schema/Query.graphql", "type Query {\n  viewer: String @resolve\n}\n"),
    ])?;
    let paths = crate::typescript::OutputPaths {
        resolvers_output_path: None,
        ..test_utils::output_paths()
    };

    let (updates, errors) = collect_resolver_updates(&ctx, &paths);

    assert!(updates.is_empty());
    assert!(errors.is_empty());

    Ok(())
}
