use crate::resolver_merge::ExistingModule;
use crate::resolver_merge::ResolverMergeError;
use crate::resolver_merge::ResolverModuleUpdate;
use crate::resolver_merge::ResolverStub;
use crate::resolver_merge::syntax::ObjectLiteral;
use crate::resolver_merge::syntax::ResolversDeclaration;
use crate::typescript::lower_first;
use crate::typescript::property_key;
use crate::typescript::quote_string;
use std::collections::BTreeSet;
use std::ops::Range;

const INDENT_UNIT: &str = "    ";

/// The difference between an existing resolver module and the resolvers it
/// is required to implement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergePlan {
    /// The aggregate resolvers type is not imported from the types module.
    pub missing_import: bool,
    /// Required resolvers with no property in the `resolvers` object.
    pub missing_stubs: Vec<ResolverStub>,
    /// The object's properties are not in lexicographic order.
    pub resort: bool,
    /// The `resolvers` binding is annotated with some other type (or none).
    pub retype: bool,
    /// No `resolvers` binding exists at all.
    pub synthesize: bool,
}

impl MergePlan {
    pub fn compute(existing: &ExistingModule, update: &ResolverModuleUpdate) -> Self {
        let missing_import = existing.import_from(&update.import_path)
            .and_then(|import| import.named_imports.as_ref())
            .is_none_or(|named| {
                !named.local_names.contains(&update.resolvers_type_identifier)
            });

        let Some(resolvers) = &existing.resolvers else {
            return Self {
                missing_import,
                missing_stubs: unique_stubs(&update.resolvers, &BTreeSet::new()),
                resort: false,
                retype: false,
                synthesize: true,
            };
        };

        let existing_names: BTreeSet<&str> = resolvers.object.properties.iter()
            .map(|property| property.name.as_str())
            .collect();
        let retype = resolvers.type_annotation.as_ref()
            .is_none_or(|(_, ty)| ty.trim() != update.resolvers_type_identifier);
        let resort = resolvers.object.properties
            .windows(2)
            .any(|pair| pair[0].name > pair[1].name);

        Self {
            missing_import,
            missing_stubs: unique_stubs(&update.resolvers, &existing_names),
            resort,
            retype,
            synthesize: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.missing_import
            && self.missing_stubs.is_empty()
            && !self.resort
            && !self.retype
            && !self.synthesize
    }
}

fn unique_stubs(stubs: &[ResolverStub], existing_names: &BTreeSet<&str>) -> Vec<ResolverStub> {
    let mut seen = BTreeSet::new();
    stubs.iter()
        .filter(|stub| !existing_names.contains(stub.resolver_name.as_str()))
        .filter(|stub| seen.insert(stub.resolver_name.as_str()))
        .cloned()
        .collect()
}

/// Brings the resolver module `existing` (`None` when the file does not exist
/// yet) up to date with `update`.
///
/// Only the `resolvers` declaration and the import of its type are touched;
/// everything else in the module is reproduced byte-for-byte. Merging an
/// already up-to-date module returns it unchanged.
pub fn merge_resolver_module(
    existing: Option<&str>,
    update: &ResolverModuleUpdate,
) -> Result<String, ResolverMergeError> {
    let source = existing.unwrap_or_default();
    if source.trim().is_empty() {
        return Ok(fresh_module(update));
    }

    let module = ExistingModule::parse(source)?;
    let plan = MergePlan::compute(&module, update);
    if plan.is_empty() {
        return Ok(source.to_string());
    }

    let mut edits: Vec<(Range<usize>, String)> = vec![];

    if plan.missing_import {
        edits.push(import_edit(&module, update));
    }

    match &module.resolvers {
        Some(resolvers) => {
            if plan.retype {
                edits.push(retype_edit(resolvers, &update.resolvers_type_identifier));
            }
            if plan.resort || !plan.missing_stubs.is_empty() {
                edits.push((
                    resolvers.object.span.clone(),
                    rebuild_object(source, resolvers, &plan.missing_stubs),
                ));
            }
        },
        None => {
            let separator = if source.ends_with('\n') { "\n" } else { "\n\n" };
            edits.push((
                source.len()..source.len(),
                format!("{separator}{}", resolvers_declaration(update, &plan.missing_stubs)),
            ));
        },
    }

    Ok(apply_edits(source, edits))
}

fn fresh_module(update: &ResolverModuleUpdate) -> String {
    format!(
        "{}\n{}",
        import_statement(update),
        resolvers_declaration(update, &unique_stubs(&update.resolvers, &BTreeSet::new())),
    )
}

fn import_statement(update: &ResolverModuleUpdate) -> String {
    format!(
        "import {{ {} }} from {};\n",
        update.resolvers_type_identifier,
        quote_string(&update.import_path),
    )
}

fn resolvers_declaration(update: &ResolverModuleUpdate, stubs: &[ResolverStub]) -> String {
    let mut entries: Vec<(String, String)> = stubs.iter()
        .map(|stub| (stub.resolver_name.to_string(), stub_text(stub, INDENT_UNIT)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    format!(
        "export const resolvers: {} = {};\n",
        update.resolvers_type_identifier,
        render_object(entries.into_iter().map(|(_, text)| (text, None)), None, INDENT_UNIT, ""),
    )
}

/// A property implementing `stub` that throws until someone fills it in.
fn stub_text(stub: &ResolverStub, indent: &str) -> String {
    let parent_param = match lower_first(&stub.parent_type_name).as_str() {
        "" | "context" | "args" => "parent".to_string(),
        lowered => lowered.to_string(),
    };
    format!(
        "{}: (_context, _{parent_param}, _args) => {{\n\
        {indent}{INDENT_UNIT}throw new Error('Not implemented yet!');\n\
        {indent}}}",
        property_key(&stub.resolver_name),
    )
}

/// Renders one property per line. A property's line comment goes after its
/// comma.
fn render_object<'a>(
    entries: impl Iterator<Item = (String, Option<&'a str>)>,
    trailing_comments: Option<&str>,
    property_indent: &str,
    closing_indent: &str,
) -> String {
    let mut out = String::from("{\n");
    for (entry, line_comment) in entries {
        out.push_str(property_indent);
        out.push_str(&entry);
        out.push(',');
        if let Some(comment) = line_comment {
            out.push(' ');
            out.push_str(comment);
        }
        out.push('\n');
    }
    if let Some(comments) = trailing_comments {
        out.push_str(property_indent);
        out.push_str(comments);
        out.push('\n');
    }
    out.push_str(closing_indent);
    out.push('}');
    out
}

fn rebuild_object(
    source: &str,
    resolvers: &ResolversDeclaration,
    missing_stubs: &[ResolverStub],
) -> String {
    let ObjectLiteral { properties, property_indent, trailing_comments, .. } =
        &resolvers.object;
    let property_indent = property_indent.clone()
        .unwrap_or_else(|| format!("{}{INDENT_UNIT}", resolvers.indent));

    let mut entries: Vec<(String, String, Option<&str>)> = properties.iter()
        .map(|property| (
            property.name.to_string(),
            source[property.span.clone()].to_string(),
            property.line_comment.as_ref().map(|span| &source[span.clone()]),
        ))
        .chain(missing_stubs.iter().map(|stub| {
            (stub.resolver_name.to_string(), stub_text(stub, &property_indent), None)
        }))
        .collect();
    // Stable, so properties sharing a name (spreads) keep their order.
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    render_object(
        entries.into_iter().map(|(_, text, line_comment)| (text, line_comment)),
        trailing_comments.as_ref().map(|span| &source[span.clone()]),
        &property_indent,
        &resolvers.indent,
    )
}

fn retype_edit(resolvers: &ResolversDeclaration, type_identifier: &str) -> (Range<usize>, String) {
    match &resolvers.type_annotation {
        Some((span, _)) => (span.clone(), type_identifier.to_string()),
        None => (
            resolvers.name_end..resolvers.name_end,
            format!(": {type_identifier}"),
        ),
    }
}

fn import_edit(module: &ExistingModule, update: &ResolverModuleUpdate) -> (Range<usize>, String) {
    let identifier = &update.resolvers_type_identifier;
    if let Some(import) = module.import_from(&update.import_path) {
        match (&import.named_imports, import.default_import_end) {
            (Some(named), _) => return match named.last_specifier_end {
                Some(end) => (end..end, format!(", {identifier}")),
                None => (named.span.clone(), format!("{{ {identifier} }}")),
            },
            (None, Some(end)) => return (end..end, format!(", {{ {identifier} }}")),
            // Namespace and side-effect imports get a separate statement.
            (None, None) => (),
        }
    }

    let statement = import_statement(update);
    match module.imports.last() {
        Some(last_import) => {
            let end = last_import.span.end;
            (end..end, format!("\n{}", statement.trim_end()))
        },
        None if !module.has_statements => (0..0, statement),
        None => (0..0, format!("{statement}\n")),
    }
}

/// Applies edits back to front. Edits sharing a start offset come out in the
/// order they were pushed.
fn apply_edits(source: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.reverse();
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = source.to_string();
    for (range, replacement) in edits {
        out.replace_range(range, &replacement);
    }
    out
}
