use crate::typescript::AUTO_GEN_HEADER;
use crate::typescript::ImportDeclaration;
use crate::typescript::PropertySignature;
use crate::typescript::TsDeclaration;
use crate::typescript::TsModule;

const INDENT: &str = "    ";

/// Renders `module` as TypeScript source, starting with the
/// auto-generated-file header. Output depends only on the module, so
/// unchanged input always prints identically.
pub fn print_module(module: &TsModule) -> String {
    let mut out = String::new();
    for line in AUTO_GEN_HEADER {
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }

    if !module.imports.is_empty() {
        out.push('\n');
        for import in &module.imports {
            print_import(&mut out, import);
        }
    }

    for decl in &module.declarations {
        out.push('\n');
        print_declaration(&mut out, decl);
    }

    out
}

fn print_import(out: &mut String, import: &ImportDeclaration) {
    let mut clauses = vec![];
    if let Some(default_import) = &import.default_import {
        clauses.push(default_import.to_string());
    }
    if !import.named.is_empty() {
        let named = import.named.iter()
            .map(|specifier| match &specifier.alias {
                Some(alias) => format!("{} as {alias}", specifier.name),
                None => specifier.name.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        clauses.push(format!("{{ {named} }}"));
    }
    out.push_str(&format!(
        "import {} from {};\n",
        clauses.join(", "),
        quote_string(&import.source),
    ));
}

fn print_declaration(out: &mut String, decl: &TsDeclaration) {
    match decl {
        TsDeclaration::Interface { doc, extends, members, name } => {
            print_doc(out, "", doc.as_deref());
            out.push_str("export interface ");
            out.push_str(name);
            if !extends.is_empty() {
                out.push_str(" extends ");
                out.push_str(&extends.join(", "));
            }
            if members.is_empty() {
                out.push_str(" {}\n");
                return;
            }
            out.push_str(" {\n");
            for member in members {
                print_property(out, member);
            }
            out.push_str("}\n");
        },

        TsDeclaration::TypeAlias { doc, name, ty, type_params } => {
            print_doc(out, "", doc.as_deref());
            out.push_str("export type ");
            out.push_str(name);
            if !type_params.is_empty() {
                out.push('<');
                out.push_str(&type_params.join(", "));
                out.push('>');
            }
            out.push_str(&format!(" = {ty};\n"));
        },
    }
}

fn print_property(out: &mut String, property: &PropertySignature) {
    print_doc(out, INDENT, property.doc.as_deref());
    out.push_str(&format!(
        "{INDENT}{}: {};\n",
        property_key(&property.name),
        property.ty,
    ));
}

fn print_doc(out: &mut String, indent: &str, doc: Option<&str>) {
    let Some(doc) = doc.map(str::trim).filter(|doc| !doc.is_empty()) else {
        return;
    };
    out.push_str(indent);
    out.push_str("/**\n");
    for line in doc.lines() {
        let line = line.trim_end().replace("*/", "*\\/");
        out.push_str(indent);
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {line}\n"));
        }
    }
    out.push_str(indent);
    out.push_str(" */\n");
}

/// An object or interface key, quoted unless it is a valid identifier.
pub(crate) fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars.next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_string()
    } else {
        quote_string(name)
    }
}

pub(crate) fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
