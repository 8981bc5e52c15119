//! Single-line signature text for types and members.
//!
//! Type names are simplified textually: primitive full names become their C# keywords,
//! generic arity markers and everything after them are dropped, and namespace
//! qualification is cut down to the last segment. No type is resolved, so two types that
//! share a simple name render identically.

use strum::Display;

use crate::metadata::typesystem::{
    Accessor, CilType, Event, Field, FieldModifiers, MemberAccessFlags, Method,
    MethodModifiers, MethodVtableFlags, ParamFlags, Property,
};

/// Accessibility keyword of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Accessibility {
    /// `public`
    Public,
    /// `protected`
    Protected,
    /// `private`
    Private,
    /// `internal`, used for properties and events without accessor methods
    Internal,
}

impl Accessibility {
    /// Maps a member access field: exactly public, exactly family, anything else private.
    #[must_use]
    pub fn from_access(access: MemberAccessFlags) -> Self {
        if access.is_public() {
            Accessibility::Public
        } else if access.is_family() {
            Accessibility::Protected
        } else {
            Accessibility::Private
        }
    }

    /// Accessibility of a property or event, taken from its first present accessor.
    #[must_use]
    pub fn from_accessors(first: Option<&Accessor>, second: Option<&Accessor>) -> Self {
        first
            .or(second)
            .map_or(Accessibility::Internal, |accessor| {
                Self::from_access(accessor.access)
            })
    }
}

const PRIMITIVES: &[(&str, &str)] = &[
    ("System.Void", "void"),
    ("System.Boolean", "bool"),
    ("System.Byte", "byte"),
    ("System.SByte", "sbyte"),
    ("System.Char", "char"),
    ("System.Decimal", "decimal"),
    ("System.Double", "double"),
    ("System.Single", "float"),
    ("System.Int16", "short"),
    ("System.Int32", "int"),
    ("System.Int64", "long"),
    ("System.UInt16", "ushort"),
    ("System.UInt32", "uint"),
    ("System.UInt64", "ulong"),
    ("System.String", "string"),
    ("System.Object", "object"),
];

/// Splits trailing array, pointer and by-ref markers off a type name.
fn split_suffix(full_name: &str) -> (&str, &str) {
    let mut end = full_name.len();
    loop {
        let head = &full_name[..end];
        if head.ends_with('*') || head.ends_with('&') {
            end -= 1;
        } else if head.ends_with(']') {
            match head.rfind('[') {
                Some(open) if head[open + 1..end - 1].chars().all(|c| c == ',') => end = open,
                _ => break,
            }
        } else {
            break;
        }
    }

    full_name.split_at(end)
}

/// Simplifies a metadata full name for display.
///
/// ```rust
/// use dotscribe::knowledge::simplify_type_name;
///
/// assert_eq!(simplify_type_name("System.Int32"), "int");
/// assert_eq!(simplify_type_name("System.Collections.Generic.List`1<System.Int32>"), "List");
/// assert_eq!(simplify_type_name("Game.Player/Inner[]"), "Player/Inner[]");
/// ```
#[must_use]
pub fn simplify_type_name(full_name: &str) -> String {
    if full_name.trim().is_empty() {
        return full_name.to_string();
    }

    // The arity marker ends the name; arguments and suffixes after it are dropped.
    if let Some(tick) = full_name.find('`') {
        return last_segment(&full_name[..tick]).to_string();
    }

    let (element, suffix) = split_suffix(full_name);
    if let Some((_, alias)) = PRIMITIVES.iter().find(|(name, _)| *name == element) {
        return format!("{alias}{suffix}");
    }

    format!("{}{suffix}", last_segment(element))
}

fn last_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// `{access}[ static] {Type} {Name}`
#[must_use]
pub fn field_line(field: &Field) -> String {
    let access = Accessibility::from_access(field.access);
    let statik = if field.modifiers.contains(FieldModifiers::STATIC) {
        " static"
    } else {
        ""
    };

    format!(
        "{access}{statik} {} {}",
        simplify_type_name(&field.type_name),
        field.name
    )
}

/// `{ get; }`, `{ set; }`, `{ get; set; }` or `{ }`
#[must_use]
pub fn accessor_text(property: &Property) -> &'static str {
    match (property.getter.is_some(), property.setter.is_some()) {
        (true, true) => "{ get; set; }",
        (true, false) => "{ get; }",
        (false, true) => "{ set; }",
        (false, false) => "{ }",
    }
}

fn static_marker(first: Option<&Accessor>, second: Option<&Accessor>) -> &'static str {
    if first.is_some_and(Accessor::is_static) || second.is_some_and(Accessor::is_static) {
        " static"
    } else {
        ""
    }
}

/// `{access}[ static] {Type} {Name} { get; set; }`
#[must_use]
pub fn property_line(property: &Property) -> String {
    let (getter, setter) = (property.getter.as_ref(), property.setter.as_ref());

    format!(
        "{}{} {} {} {}",
        Accessibility::from_accessors(getter, setter),
        static_marker(getter, setter),
        simplify_type_name(&property.type_name),
        property.name,
        accessor_text(property)
    )
}

/// `{access}[ static] {Type} {Name}`
#[must_use]
pub fn event_line(event: &Event) -> String {
    let (add, remove) = (event.add.as_ref(), event.remove.as_ref());

    format!(
        "{}{} {} {}",
        Accessibility::from_accessors(add, remove),
        static_marker(add, remove),
        simplify_type_name(&event.type_name),
        event.name
    )
}

/// Modifier keywords of a method, in declaration order.
#[must_use]
pub fn method_modifiers(method: &Method) -> Vec<&'static str> {
    let mut modifiers = Vec::new();
    if method.modifiers.contains(MethodModifiers::STATIC) {
        modifiers.push("static");
    }

    if method.modifiers.contains(MethodModifiers::ABSTRACT) {
        modifiers.push("abstract");
    } else if method.modifiers.contains(MethodModifiers::VIRTUAL) {
        if method.modifiers.contains(MethodModifiers::FINAL) {
            modifiers.push("sealed override");
        } else if !method.vtable.contains(MethodVtableFlags::NEW_SLOT) {
            modifiers.push("virtual");
        } else {
            modifiers.push("override");
        }
    }

    modifiers
}

/// `{access}[ {modifiers}] {Return} {Name}({params})`
#[must_use]
pub fn method_signature(method: &Method) -> String {
    let modifiers = method_modifiers(method);
    let modifiers = if modifiers.is_empty() {
        String::new()
    } else {
        format!(" {}", modifiers.join(" "))
    };

    let params = method
        .parameters
        .iter()
        .filter(|param| !param.is_receiver)
        .map(|param| {
            let prefix = match (param.by_ref, param.flags.contains(ParamFlags::OUT)) {
                (true, true) => "out ",
                (true, false) => "ref ",
                (false, _) => "",
            };
            let type_name = simplify_type_name(&param.type_name);

            match param.name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => format!("{prefix}{type_name} {name}"),
                _ => format!("{prefix}{type_name}"),
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}{modifiers} {} {}({params})",
        Accessibility::from_access(method.access),
        simplify_type_name(&method.return_type),
        method.name
    )
}

/// ` : Base, IFace` with `System.Object` omitted, or an empty string.
#[must_use]
pub fn inheritance_clause(ty: &CilType) -> String {
    let parts: Vec<String> = ty
        .base_type
        .iter()
        .filter(|base| base.as_str() != "System.Object")
        .chain(ty.interfaces.iter())
        .map(|name| simplify_type_name(name))
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" : {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::model::{method, param, receiver, TypeBuilder};

    #[test]
    fn simplify_primitives_and_generics() {
        assert_eq!(simplify_type_name("System.Int32"), "int");
        assert_eq!(simplify_type_name("System.UInt32"), "uint");
        assert_eq!(simplify_type_name("System.Void"), "void");
        assert_eq!(simplify_type_name("System.Single[]"), "float[]");
        assert_eq!(simplify_type_name("System.Byte*"), "byte*");
        assert_eq!(simplify_type_name("System.Int32[,][]"), "int[,][]");
        assert_eq!(simplify_type_name("System.IntPtr"), "IntPtr");
        assert_eq!(simplify_type_name("List`1"), "List");
        assert_eq!(
            simplify_type_name("System.Collections.Generic.Dictionary`2<System.String,T>"),
            "Dictionary"
        );
        assert_eq!(simplify_type_name("Ns.Outer`1/Inner"), "Outer");
        assert_eq!(
            simplify_type_name("System.Collections.Generic.List`1<System.Int32>[]"),
            "List"
        );
        assert_eq!(simplify_type_name("System.Nullable`1<System.Single>&"), "Nullable");
        assert_eq!(simplify_type_name("T"), "T");
        assert_eq!(simplify_type_name(""), "");
    }

    #[test]
    fn simplification_is_lossy() {
        assert_eq!(
            simplify_type_name("Game.UI.Button"),
            simplify_type_name("UnityEngine.UI.Button")
        );
    }

    #[test]
    fn method_modifier_resolution() {
        // public static
        assert_eq!(method_modifiers(&method("A", 0x0016, "System.Void")), ["static"]);
        // public abstract virtual newslot
        assert_eq!(
            method_modifiers(&method("B", 0x05C6, "System.Void")),
            ["abstract"]
        );
        // public virtual final
        assert_eq!(
            method_modifiers(&method("C", 0x0066, "System.Void")),
            ["sealed override"]
        );
        // public virtual, reuses the slot
        assert_eq!(
            method_modifiers(&method("D", 0x0046, "System.Void")),
            ["virtual"]
        );
        // public virtual newslot
        assert_eq!(
            method_modifiers(&method("E", 0x0146, "System.Void")),
            ["override"]
        );
        assert!(method_modifiers(&method("F", 0x0006, "System.Void")).is_empty());
    }

    #[test]
    fn method_signatures() {
        let mut try_get = method("TryGet", 0x0086, "System.Boolean");
        try_get.parameters = vec![
            receiver("Game.Player"),
            param(Some("index"), "System.Int32", false, 0),
            param(Some("value"), "System.String", true, 0x0002),
            param(Some("cache"), "System.Object", true, 0),
            param(None, "System.Single[]", false, 0),
        ];

        assert_eq!(
            method_signature(&try_get),
            "public bool TryGet(int index, out string value, ref object cache, float[])"
        );

        let helper = method("Reset", 0x0014, "System.Void");
        assert_eq!(method_signature(&helper), "protected static void Reset()");

        let hidden = method("Tick", 0x0001, "System.Void");
        assert_eq!(method_signature(&hidden), "private void Tick()");

        // by-ref parameters carry the marker as a prefix, by-ref returns as a suffix
        let mut slot = method("Slot", 0x0006, "System.Int32&");
        slot.parameters = vec![param(Some("index"), "System.Int32", true, 0)];
        assert_eq!(method_signature(&slot), "public int& Slot(ref int index)");
    }

    #[test]
    fn member_lines() {
        let ty = TypeBuilder::class("Game", "Player")
            .field("Count", 0x0016, "System.Int32")
            .field("cache", 0x0003, "System.Collections.Generic.List`1<System.Int32>")
            .property("Name", "System.String", Some(0x0886), Some(0x0881))
            .property("Id", "System.Int32", None, Some(0x0896))
            .property("Ghost", "System.Int32", None, None)
            .event("Died", "System.Action", Some(0x0886), None)
            .build();

        assert_eq!(field_line(&ty.fields[0]), "public static int Count");
        assert_eq!(field_line(&ty.fields[1]), "private List cache");
        assert_eq!(property_line(&ty.properties[0]), "public string Name { get; set; }");
        assert_eq!(property_line(&ty.properties[1]), "public static int Id { set; }");
        assert_eq!(property_line(&ty.properties[2]), "internal int Ghost { }");
        assert_eq!(event_line(&ty.events[0]), "public Action Died");
    }

    #[test]
    fn inheritance() {
        let plain = TypeBuilder::class("Game", "Player")
            .base("System.Object")
            .build();
        assert_eq!(inheritance_clause(&plain), "");

        let derived = TypeBuilder::class("Game", "Boss")
            .base("Game.Enemy`1<Game.Boss>")
            .interface("System.IDisposable")
            .interface("Game.IDamageable")
            .build();
        assert_eq!(
            inheritance_clause(&derived),
            " : Enemy, IDisposable, IDamageable"
        );
    }
}
