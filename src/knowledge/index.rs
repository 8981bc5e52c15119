//! The structural index artifact: signatures only, grouped by namespace.

use std::fmt::Write as _;

use crate::{
    config::SynthesisConfig,
    knowledge::{
        format::{event_line, field_line, method_signature, property_line},
        order::{by_simple_name, group_by_namespace, selected_types, sorted_members},
        NamespaceFilter, SEPARATOR,
    },
    metadata::typesystem::{Accessor, CilModule, CilType, MemberAccessFlags},
};

/// The index text and what it contains.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexArtifact {
    /// Complete artifact text
    pub text: String,
    /// Namespace blocks written
    pub namespaces: usize,
    /// Types written
    pub types: usize,
    /// Member lines written
    pub members: usize,
}

/// Builds the index artifact of a module.
pub struct IndexSynthesizer<'c> {
    config: &'c SynthesisConfig,
    filter: NamespaceFilter,
}

fn is_visible(access: MemberAccessFlags) -> bool {
    access.is_public() || access.is_family()
}

fn any_visible(first: Option<&Accessor>, second: Option<&Accessor>) -> bool {
    first
        .into_iter()
        .chain(second)
        .any(|accessor| is_visible(accessor.access))
}

impl<'c> IndexSynthesizer<'c> {
    /// Creates a synthesizer for one run configuration.
    #[must_use]
    pub fn new(config: &'c SynthesisConfig) -> Self {
        IndexSynthesizer {
            config,
            filter: NamespaceFilter::from_config(config),
        }
    }

    /// Renders the index of `module`, stamped with `generated_at`.
    #[must_use]
    pub fn synthesize(&self, module: &CilModule, generated_at: &str) -> IndexArtifact {
        let types = selected_types(module, &self.filter);
        let mut artifact = IndexArtifact::default();
        let text = &mut artifact.text;

        let _ = writeln!(text, "// === Index of Types and Members: {} ===", module.name);
        let _ = writeln!(text, "// Generated at: {generated_at}");
        let _ = writeln!(text, "{SEPARATOR}");
        text.push_str("// \n// Types:\n// \n");
        for ty in by_simple_name(&types) {
            let _ = writeln!(text, "// {}", ty.name);
        }
        let _ = writeln!(text, "{SEPARATOR}");

        for group in group_by_namespace(&types) {
            artifact.namespaces += 1;

            let label = if group.namespace.is_empty() {
                self.config.global_namespace_label.as_str()
            } else {
                group.namespace
            };
            let _ = writeln!(artifact.text, "namespace {label}\n{{");

            for ty in group.types {
                artifact.types += 1;
                artifact.members += self.write_type(&mut artifact.text, ty);
                artifact.text.push('\n');
            }

            artifact.text.push_str("}\n");
        }

        log::info!(
            "Index of '{}': {} namespaces, {} types, {} members",
            module.name,
            artifact.namespaces,
            artifact.types,
            artifact.members
        );

        artifact
    }

    /// Writes the declaration line and member sections of `ty`, returning the member count.
    fn write_type(&self, text: &mut String, ty: &CilType) -> usize {
        let all = self.config.default_include_non_public_members;
        let _ = writeln!(text, "    {} {}", ty.kind, ty.name);

        let mut sections: Vec<(&str, Vec<String>)> = Vec::with_capacity(5);

        sections.push((
            "Fields",
            sorted_members(&ty.fields, |f| all || is_visible(f.access), |f| &f.name)
                .into_iter()
                .map(field_line)
                .collect(),
        ));

        sections.push((
            "Properties",
            sorted_members(
                &ty.properties,
                |p| all || any_visible(p.getter.as_ref(), p.setter.as_ref()),
                |p| &p.name,
            )
            .into_iter()
            .map(property_line)
            .collect(),
        ));

        sections.push((
            "Events",
            sorted_members(
                &ty.events,
                |e| all || any_visible(e.add.as_ref(), e.remove.as_ref()),
                |e| &e.name,
            )
            .into_iter()
            .map(event_line)
            .collect(),
        ));

        sections.push((
            "Constructors",
            sorted_members(
                &ty.methods,
                |m| m.is_constructor() && (all || is_visible(m.access)),
                |m| &m.name,
            )
            .into_iter()
            .map(method_signature)
            .collect(),
        ));

        sections.push((
            "Methods",
            sorted_members(
                &ty.methods,
                |m| !m.is_constructor() && !m.is_special_name() && (all || is_visible(m.access)),
                |m| &m.name,
            )
            .into_iter()
            .map(method_signature)
            .collect(),
        ));

        let mut members = 0;
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }

            let _ = writeln!(text, "        // {title}");
            for line in &lines {
                let _ = writeln!(text, "        - {line}");
            }
            members += lines.len();
        }

        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::model::{method, module, param, receiver, TypeBuilder};

    fn player() -> CilType {
        let mut shoot = method("Shoot", 0x0086, "System.Boolean");
        shoot.parameters = vec![
            receiver("Player"),
            param(Some("target"), "Game.Enemy", false, 0),
            param(Some("hits"), "System.Int32", true, 0x0002),
        ];

        TypeBuilder::class("", "Player")
            .field("Health", 0x0006, "System.Single")
            .field("armor", 0x0001, "System.Int32")
            .field("Bullets", 0x0004, "System.Collections.Generic.List`1<Bullet>")
            .property("Name", "System.String", Some(0x0886), None)
            .property("secret", "System.String", Some(0x0881), None)
            .event("OnDeath", "System.Action", Some(0x0886), Some(0x0886))
            .method(method(".ctor", 0x1886, "System.Void"))
            .method(method(".cctor", 0x1811, "System.Void"))
            .method(method("get_Name", 0x0886, "System.String"))
            .method(shoot)
            .method(method("Awake", 0x0081, "System.Void"))
            .method(method("Update", 0x05C4, "System.Void"))
            .build()
    }

    #[test]
    fn renders_index() {
        let module = module(
            "Assembly-CSharp.dll",
            vec![
                player(),
                TypeBuilder::new(0x00A1, "InnerNet", "IMessage").build(),
                TypeBuilder::class("UnityEngine", "Camera").build(),
                TypeBuilder::class("", "<PrivateImplementationDetails>").build(),
            ],
        );

        let config = SynthesisConfig::default();
        let artifact = IndexSynthesizer::new(&config).synthesize(&module, "2025-01-02 03:04:05");

        const BLANK: &str = "// ";
        let expected = format!(
            "\
// === Index of Types and Members: Assembly-CSharp.dll ===
// Generated at: 2025-01-02 03:04:05
{SEPARATOR}
{BLANK}
// Types:
{BLANK}
// IMessage
// Player
{SEPARATOR}
namespace Global
{{
    class Player
        // Fields
        - protected List Bullets
        - public float Health
        // Properties
        - public string Name {{ get; }}
        // Events
        - public Action OnDeath
        // Constructors
        - public void .ctor()
        // Methods
        - public bool Shoot(Enemy target, out int hits)
        - protected abstract void Update()

}}
namespace InnerNet
{{
    interface IMessage

}}
"
        );

        assert_eq!(artifact.text, expected);
        assert_eq!(artifact.namespaces, 2);
        assert_eq!(artifact.types, 2);
        assert_eq!(artifact.members, 7);
    }

    #[test]
    fn non_public_members_on_request() {
        let module = module("Game.dll", vec![player()]);
        let config = SynthesisConfig {
            default_include_non_public_members: true,
            ..SynthesisConfig::default()
        };

        let artifact = IndexSynthesizer::new(&config).synthesize(&module, "now");

        assert!(artifact.text.contains("        - private int armor\n"));
        assert!(artifact.text.contains("        - private string secret { get; }\n"));
        assert!(artifact.text.contains("        - private static void .cctor()\n"));
        assert!(artifact.text.contains("        - private void Awake()\n"));
        assert!(!artifact.text.contains("get_Name"));
        assert_eq!(artifact.members, 11);
    }
}
