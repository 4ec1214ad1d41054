use crate::context::ContextImport;
use crate::context::GeneratorContext;
use crate::error::PipelineError;
use crate::plugin::Plugin;
use crate::plugin::PluginConfig;
use crate::plugins::ContextPlugin;
use std::path::Path;

fn configure(content: &str) -> Result<Option<ContextImport>, PipelineError> {
    let value = toml::Value::Table(toml::from_str(content).unwrap());
    let mut ctx = GeneratorContext::new();
    ContextPlugin.configure(&mut ctx, &PluginConfig::new(ContextPlugin::ID, Path::new("."), &value))?;
    Ok(ctx.settings().context_import.clone())
}

fn context_import(import_path: &str, import_name: &str) -> Option<ContextImport> {
    Some(ContextImport {
        import_name: import_name.to_string(),
        import_path: import_path.to_string(),
    })
}

#[test]
fn import_shorthand() -> Result<(), PipelineError> {
    assert_eq!(
        configure("import = \"app/context#RequestContext\"")?,
        context_import("app/context", "RequestContext"),
    );
    assert_eq!(configure("import = \"app/context\"")?, context_import("app/context", "default"));

    Ok(())
}

#[test]
fn separate_path_and_name() -> Result<(), PipelineError> {
    assert_eq!(
        configure("import_path = \"app/context\"\nimport_name = \"Context\"")?,
        context_import("app/context", "Context"),
    );
    assert_eq!(
        configure("import_path = \"app/context\"")?,
        context_import("app/context", "default"),
    );

    Ok(())
}

#[test]
fn ambiguous_or_empty_configuration_is_rejected() {
    let invalid = [
        "",
        "import_name = \"Context\"",
        "import = \"app/context\"\nimport_path = \"app/context\"",
        "import = \"app/context\"\nimport_name = \"Context\"",
        "import = \"#Context\"",
        "import_path = \"app/context\"\nimport_name = \"\"",
    ];

    for content in invalid {
        assert!(
            matches!(
                configure(content),
                Err(PipelineError::InvalidPluginConfig { ref plugin_id, .. }) if plugin_id == "context"
            ),
            "{content:?}",
        );
    }
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(
        configure("import = \"app/context\"\nexport = \"Context\""),
        Err(PipelineError::InvalidPluginConfig { .. })
    ));
}
