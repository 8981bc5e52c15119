//! Members of a [`crate::metadata::typesystem::CilType`] and the flag groups they carry.
//!
//! Raw attribute words are split into logical groups the way ECMA-335 II.23.1 lays them
//! out: an access field that is compared by value, and independent modifier bits.

use bitflags::bitflags;

use crate::metadata::token::Token;

/// Bitmask for the member access field of method and field attributes
pub const MEMBER_ACCESS_MASK: u32 = 0x0007;
/// Bitmask for `VTABLE_LAYOUT` information extraction
pub const METHOD_VTABLE_LAYOUT_MASK: u32 = 0x0100;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Member access, shared by methods and fields. Compare by equality, not by bit test.
    pub struct MemberAccessFlags: u32 {
        /// Member not referenceable
        const COMPILER_CONTROLLED = 0x0000;
        /// Accessible only by the parent type
        const PRIVATE = 0x0001;
        /// Accessible by sub-types only in this Assembly
        const FAM_AND_ASSEM = 0x0002;
        /// Accessibly by anyone in the Assembly
        const ASSEM = 0x0003;
        /// Accessible only by type and sub-types
        const FAMILY = 0x0004;
        /// Accessibly by sub-types anywhere, plus anyone in assembly
        const FAM_OR_ASSEM = 0x0005;
        /// Accessibly by anyone who has visibility to this scope
        const PUBLIC = 0x0006;
    }
}

impl MemberAccessFlags {
    /// Extract the access field from raw method or field attributes
    #[must_use]
    pub fn from_member_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & MEMBER_ACCESS_MASK)
    }

    /// Exactly `PUBLIC`
    #[must_use]
    pub fn is_public(self) -> bool {
        self == Self::PUBLIC
    }

    /// Exactly `FAMILY`
    #[must_use]
    pub fn is_family(self) -> bool {
        self == Self::FAMILY
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Method vtable layout flags
    pub struct MethodVtableFlags: u32 {
        /// Method reuses existing slot in vtable
        const REUSE_SLOT = 0x0000;
        /// Method always gets a new slot in the vtable
        const NEW_SLOT = 0x0100;
    }
}

impl MethodVtableFlags {
    /// Extract vtable layout flags from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Method modifiers and properties
    pub struct MethodModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Method cannot be overridden
        const FINAL = 0x0020;
        /// Method is virtual
        const VIRTUAL = 0x0040;
        /// Method hides by name+sig, else just by name
        const HIDE_BY_SIG = 0x0080;
        /// Method can only be overriden if also accessible
        const STRICT = 0x0200;
        /// Method does not provide an implementation
        const ABSTRACT = 0x0400;
        /// Method is special
        const SPECIAL_NAME = 0x0800;
        /// CLI provides 'special' behavior, depending upon the name of the method
        const RTSPECIAL_NAME = 0x1000;
        /// Implementation is forwarded through PInvoke
        const PINVOKE_IMPL = 0x2000;
    }
}

impl MethodModifiers {
    /// Extract method modifiers from raw method attributes
    #[must_use]
    pub fn from_method_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK & !METHOD_VTABLE_LAYOUT_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Field modifiers
    pub struct FieldModifiers: u32 {
        /// Defined on type, else per instance
        const STATIC = 0x0010;
        /// Field can only be initialized, not written to after init
        const INIT_ONLY = 0x0020;
        /// Value is compile time constant
        const LITERAL = 0x0040;
        /// Field is special
        const SPECIAL_NAME = 0x0200;
        /// CLI provides 'special' behavior, depending upon the name of the field
        const RTSPECIAL_NAME = 0x0400;
    }
}

impl FieldModifiers {
    /// Extract field modifiers from raw field attributes
    #[must_use]
    pub fn from_field_flags(flags: u32) -> Self {
        Self::from_bits_truncate(flags & !MEMBER_ACCESS_MASK)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    /// Parameter attributes
    pub struct ParamFlags: u32 {
        /// Param is `[In]`
        const IN = 0x0001;
        /// Param is `[Out]`
        const OUT = 0x0002;
        /// Param is optional
        const OPTIONAL = 0x0010;
        /// Param has a default value
        const HAS_DEFAULT = 0x1000;
    }
}

/// A field of a type.
#[derive(Clone, Debug)]
pub struct Field {
    /// `Field` token
    pub token: Token,
    /// Field name
    pub name: String,
    /// Access field of the attributes
    pub access: MemberAccessFlags,
    /// Modifier bits of the attributes
    pub modifiers: FieldModifiers,
    /// Full name of the field type
    pub type_name: String,
}

/// The method behind a property or event accessor.
#[derive(Clone, Debug)]
pub struct Accessor {
    /// `MethodDef` token
    pub token: Token,
    /// Method name, e.g. `get_Value`
    pub name: String,
    /// Access field of the method
    pub access: MemberAccessFlags,
    /// Modifier bits of the method
    pub modifiers: MethodModifiers,
}

impl Accessor {
    /// Builds the accessor view of `method`.
    #[must_use]
    pub fn of(method: &Method) -> Self {
        Accessor {
            token: method.token,
            name: method.name.clone(),
            access: method.access,
            modifiers: method.modifiers,
        }
    }

    /// True if the accessor is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }
}

/// A property of a type.
#[derive(Clone, Debug)]
pub struct Property {
    /// `Property` token
    pub token: Token,
    /// Property name
    pub name: String,
    /// Full name of the property type
    pub type_name: String,
    /// Getter, if any
    pub getter: Option<Accessor>,
    /// Setter, if any
    pub setter: Option<Accessor>,
}

/// An event of a type.
#[derive(Clone, Debug)]
pub struct Event {
    /// `Event` token
    pub token: Token,
    /// Event name
    pub name: String,
    /// Full name of the delegate type
    pub type_name: String,
    /// `add_` accessor, if any
    pub add: Option<Accessor>,
    /// `remove_` accessor, if any
    pub remove: Option<Accessor>,
}

/// One parameter of a method.
#[derive(Clone, Debug)]
pub struct Parameter {
    /// Declared name, `None` when the `Param` row is missing or unnamed
    pub name: Option<String>,
    /// Full name of the parameter type, without the by-reference marker.
    ///
    /// A by-reference parameter is flagged by [`Parameter::by_ref`] instead, and formats
    /// as `ref int` / `out int` rather than `int&`.
    pub type_name: String,
    /// Passed by reference
    pub by_ref: bool,
    /// Attributes of the `Param` row
    pub flags: ParamFlags,
    /// The implicit `this` of an instance method
    pub is_receiver: bool,
}

/// A method or constructor of a type.
#[derive(Clone, Debug)]
pub struct Method {
    /// `MethodDef` token
    pub token: Token,
    /// Method name, `.ctor` / `.cctor` for constructors
    pub name: String,
    /// Access field of the attributes
    pub access: MemberAccessFlags,
    /// Vtable layout of the attributes
    pub vtable: MethodVtableFlags,
    /// Modifier bits of the attributes
    pub modifiers: MethodModifiers,
    /// Names of the method's own generic parameters
    pub generic_params: Vec<String>,
    /// Full name of the return type. A by-reference return keeps the `&` marker
    /// (`System.Int32&`), since there is no parameter flag to carry it.
    pub return_type: String,
    /// Parameters in order, starting with the receiver for instance methods
    pub parameters: Vec<Parameter>,
}

impl Method {
    /// True for instance and static constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.name == ".ctor" || self.name == ".cctor"
    }

    /// True if the method is static.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MethodModifiers::STATIC)
    }

    /// True for `SpecialName` methods such as accessors and operators.
    #[must_use]
    pub fn is_special_name(&self) -> bool {
        self.modifiers.contains(MethodModifiers::SPECIAL_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_is_compared_by_value() {
        // FamORAssem shares bits with both Family and Public
        let fam_or_assem = MemberAccessFlags::from_member_flags(0x0005);
        assert!(!fam_or_assem.is_public());
        assert!(!fam_or_assem.is_family());

        assert!(MemberAccessFlags::from_member_flags(0x0086).is_public());
        assert!(MemberAccessFlags::from_member_flags(0x0014).is_family());
    }

    #[test]
    fn method_flag_groups() {
        // public hidebysig newslot virtual final
        let flags = 0x0006 | 0x0080 | 0x0100 | 0x0040 | 0x0020;

        assert_eq!(
            MethodVtableFlags::from_method_flags(flags),
            MethodVtableFlags::NEW_SLOT
        );
        let modifiers = MethodModifiers::from_method_flags(flags);
        assert!(modifiers.contains(MethodModifiers::VIRTUAL | MethodModifiers::FINAL));
        assert!(!modifiers.contains(MethodModifiers::STATIC));
    }

    #[test]
    fn field_flag_groups() {
        let modifiers = FieldModifiers::from_field_flags(0x0001 | 0x0010 | 0x0040);
        assert!(modifiers.contains(FieldModifiers::STATIC | FieldModifiers::LITERAL));
        assert_eq!(MemberAccessFlags::from_member_flags(0x0051), MemberAccessFlags::PRIVATE);
    }
}
