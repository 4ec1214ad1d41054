use crate::typescript::ImportDeclaration;
use crate::typescript::ImportSpecifier;
use crate::typescript::PropertySignature;
use crate::typescript::TsDeclaration;
use crate::typescript::TsModule;
use crate::typescript::TsType;
use crate::typescript::print_module;
use crate::typescript::property_key;
use crate::typescript::quote_string;

const HEADER: &str = concat!(
    "// THIS FILE IS AUTO-GENERATED.\n",
    "// ANY MODIFICATION WILL BE DISCARDED UPON NEXT COMPILATION.\n",
);

#[test]
fn empty_module_is_just_the_header() {
    assert_eq!(print_module(&TsModule::default()), HEADER);
}

#[test]
fn default_and_named_imports() {
    let module = TsModule {
        declarations: vec![],
        imports: vec![ImportDeclaration {
            default_import: Some("Context".to_string()),
            named: vec![
                ImportSpecifier::named("Maybe"),
                ImportSpecifier {
                    alias: Some("R".to_string()),
                    name: "Resolver".to_string(),
                },
            ],
            source: "app/types/index".to_string(),
        }],
    };

    assert_eq!(
        print_module(&module),
        format!("{HEADER}\nimport Context, {{ Maybe, Resolver as R }} from 'app/types/index';\n"),
    );
}

#[test]
fn non_identifier_keys_are_quoted() {
    let module = TsModule {
        declarations: vec![TsDeclaration::Interface {
            doc: None,
            extends: vec![],
            members: vec![
                PropertySignature {
                    doc: None,
                    name: "$ok_1".to_string(),
                    ty: TsType::Number,
                },
                PropertySignature {
                    doc: None,
                    name: "not-ok".to_string(),
                    ty: TsType::Null,
                },
            ],
            name: "Keys".to_string(),
        }],
        imports: vec![],
    };

    assert_eq!(print_module(&module), format!(
        "{HEADER}\nexport interface Keys {{\n    $ok_1: number;\n    'not-ok': null;\n}}\n",
    ));
}

#[test]
fn doc_comments_cannot_close_early() {
    let module = TsModule {
        declarations: vec![TsDeclaration::TypeAlias {
            doc: Some("first */ line\n\nthird".to_string()),
            name: "Id".to_string(),
            ty: TsType::String,
            type_params: vec![],
        }],
        imports: vec![],
    };

    assert_eq!(print_module(&module), format!(
        "{HEADER}\n/**\n * first *\\/ line\n *\n * third\n */\nexport type Id = string;\n",
    ));
}

#[test]
fn compound_array_elements_are_parenthesized() {
    let union = TsType::Union(vec![TsType::String, TsType::Null]);
    let function = TsType::Function {
        params: vec![],
        return_type: Box::new(TsType::Undefined),
    };

    assert_eq!(TsType::array(union).to_string(), "(string | null)[]");
    assert_eq!(TsType::array(function).to_string(), "(() => undefined)[]");
    assert_eq!(TsType::array(TsType::maybe(TsType::Any)).to_string(), "Maybe<any>[]");
}

#[test]
fn keys_and_strings() {
    assert_eq!(property_key("viewer"), "viewer");
    assert_eq!(property_key("9lives"), "'9lives'");
    assert_eq!(property_key(""), "''");
    assert_eq!(quote_string("it's"), "'it\\'s'");
    assert_eq!(quote_string("a\\b"), "'a\\\\b'");
}
