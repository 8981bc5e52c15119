use std::fmt::Write as _;

use crate::{
    decompiler::Decompiler,
    knowledge::format::{
        event_line, field_line, inheritance_clause, method_signature, property_line,
    },
    metadata::{
        tables::TypeAttributes,
        typesystem::{CilModule, CilType},
    },
    Result,
};

/// Renders declarations from metadata alone.
///
/// The output looks like C# but carries no method bodies: a namespace block, the type
/// declaration with its inheritance clause and one line per member, in metadata order.
/// Nothing outside the module is consulted, so the result is fully deterministic.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkeletonDecompiler;

fn type_visibility(flags: u32) -> &'static str {
    match flags & TypeAttributes::VISIBILITY_MASK {
        TypeAttributes::PUBLIC | TypeAttributes::NESTED_PUBLIC => "public",
        TypeAttributes::NESTED_PRIVATE => "private",
        TypeAttributes::NESTED_FAMILY => "protected",
        TypeAttributes::NESTED_FAM_AND_ASSEM => "private protected",
        TypeAttributes::NESTED_FAM_OR_ASSEM => "protected internal",
        _ => "internal",
    }
}

const MAX_NESTING: usize = 64;

/// Namespace of the outermost type enclosing `ty`; nested rows carry an empty one.
fn declaring_namespace<'m>(module: &'m CilModule, ty: &'m CilType) -> &'m str {
    let mut current = ty;
    for _ in 0..MAX_NESTING {
        if !current.is_nested() {
            break;
        }
        match current.enclosing.and_then(|token| module.type_by_token(token)) {
            Some(outer) => current = outer,
            None => break,
        }
    }
    &current.namespace
}

impl SkeletonDecompiler {
    /// The declaration text of `ty`, wrapped in a `namespace` block unless `namespace` is
    /// empty.
    #[must_use]
    pub fn render(ty: &CilType, namespace: &str) -> String {
        let mut body = String::new();
        let _ = writeln!(
            body,
            "{} {} {}{}",
            type_visibility(ty.flags),
            ty.kind,
            ty.name,
            inheritance_clause(ty)
        );
        body.push_str("{\n");

        for field in &ty.fields {
            let _ = writeln!(body, "    {};", field_line(field));
        }
        for property in &ty.properties {
            let _ = writeln!(body, "    {}", property_line(property));
        }
        for event in &ty.events {
            let _ = writeln!(body, "    {};", event_line(event));
        }
        for method in ty.methods.iter().filter(|m| !m.is_special_name() || m.is_constructor()) {
            let _ = writeln!(body, "    {};", method_signature(method));
        }

        body.push('}');

        if namespace.is_empty() {
            return body;
        }

        let mut text = format!("namespace {namespace}\n{{\n");
        for line in body.lines() {
            if line.is_empty() {
                text.push('\n');
            } else {
                let _ = writeln!(text, "    {line}");
            }
        }
        text.push('}');
        text
    }
}

impl Decompiler for SkeletonDecompiler {
    fn name(&self) -> &str {
        "skeleton"
    }

    fn decompile(&self, module: &CilModule, ty: &CilType) -> Result<String> {
        Ok(Self::render(ty, declaring_namespace(module, ty)))
    }
}
