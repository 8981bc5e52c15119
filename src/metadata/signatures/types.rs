use crate::metadata::token::Token;

#[allow(non_snake_case)]
/// Element type constants used in signature blobs (ECMA-335 II.23.1.16).
pub mod ELEMENT_TYPE {
    /// Marks the end of a list
    pub const END: u8 = 0x00;
    /// System.Void
    pub const VOID: u8 = 0x01;
    /// System.Boolean
    pub const BOOLEAN: u8 = 0x02;
    /// System.Char
    pub const CHAR: u8 = 0x03;
    /// System.SByte
    pub const I1: u8 = 0x04;
    /// System.Byte
    pub const U1: u8 = 0x05;
    /// System.Int16
    pub const I2: u8 = 0x06;
    /// System.UInt16
    pub const U2: u8 = 0x07;
    /// System.Int32
    pub const I4: u8 = 0x08;
    /// System.UInt32
    pub const U4: u8 = 0x09;
    /// System.Int64
    pub const I8: u8 = 0x0a;
    /// System.UInt64
    pub const U8: u8 = 0x0b;
    /// System.Single
    pub const R4: u8 = 0x0c;
    /// System.Double
    pub const R8: u8 = 0x0d;
    /// System.String
    pub const STRING: u8 = 0x0e;
    /// Unmanaged pointer, followed by the pointee type
    pub const PTR: u8 = 0x0f;
    /// Managed reference, followed by the referenced type
    pub const BYREF: u8 = 0x10;
    /// Value type, followed by a `TypeDefOrRefOrSpecEncoded` token
    pub const VALUETYPE: u8 = 0x11;
    /// Reference type, followed by a `TypeDefOrRefOrSpecEncoded` token
    pub const CLASS: u8 = 0x12;
    /// Generic parameter of a type, followed by its number
    pub const VAR: u8 = 0x13;
    /// General array: type, rank, sizes, lower bounds
    pub const ARRAY: u8 = 0x14;
    /// Generic instantiation: type, argument count, arguments
    pub const GENERICINST: u8 = 0x15;
    /// System.TypedReference
    pub const TYPEDBYREF: u8 = 0x16;
    /// System.IntPtr
    pub const I: u8 = 0x18;
    /// System.UIntPtr
    pub const U: u8 = 0x19;
    /// Function pointer, followed by a full method signature
    pub const FNPTR: u8 = 0x1b;
    /// System.Object
    pub const OBJECT: u8 = 0x1c;
    /// Single-dimension, zero-based array
    pub const SZARRAY: u8 = 0x1d;
    /// Generic parameter of a method, followed by its number
    pub const MVAR: u8 = 0x1e;
    /// Required custom modifier
    pub const CMOD_REQD: u8 = 0x1f;
    /// Optional custom modifier
    pub const CMOD_OPT: u8 = 0x20;
    /// Implemented within the CLI
    pub const INTERNAL: u8 = 0x21;
    /// Start of the vararg part of a call site signature
    pub const SENTINEL: u8 = 0x41;
    /// Pinned local
    pub const PINNED: u8 = 0x45;
}

/// A type as encoded in a signature blob.
///
/// Custom modifiers are consumed by the parser and do not appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    /// void
    Void,
    /// bool
    Boolean,
    /// char
    Char,
    /// signed 8bit integer
    I1,
    /// unsigned 8bit integer
    U1,
    /// signed 16bit integer
    I2,
    /// unsigned 16bit integer
    U2,
    /// signed 32bit integer
    I4,
    /// unsigned 32bit integer
    U4,
    /// signed 64bit integer
    I8,
    /// unsigned 64bit integer
    U8,
    /// 32bit floating-point
    R4,
    /// 64bit floating-point
    R8,
    /// System.String
    String,
    /// System.Object
    Object,
    /// signed integer, sized to executing platform
    I,
    /// unsigned integer, sized to executing platform
    U,
    /// System.TypedReference
    TypedByRef,
    /// Unmanaged pointer
    Ptr(Box<TypeSignature>),
    /// Managed reference
    ByRef(Box<TypeSignature>),
    /// Value type, `TypeDef`, `TypeRef` or `TypeSpec` token
    ValueType(Token),
    /// Reference type, `TypeDef`, `TypeRef` or `TypeSpec` token
    Class(Token),
    /// Generic parameter of the enclosing type
    GenericParamType(u32),
    /// Generic parameter of the enclosing method
    GenericParamMethod(u32),
    /// Multi-dimensional array and its rank
    Array(Box<TypeSignature>, u32),
    /// Single-dimension array
    SzArray(Box<TypeSignature>),
    /// Generic type and its arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
}

/// A parameter or return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    /// Passed by reference
    pub by_ref: bool,
    /// The type, without the by-reference marker
    pub base: TypeSignature,
}

/// Method signature (II.23.2.1)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMethod {
    /// Instance method, the receiver is implicit
    pub has_this: bool,
    /// The receiver is the first entry of `params`
    pub explicit_this: bool,
    /// Number of generic parameters
    pub generic_param_count: u32,
    /// The return type
    pub return_type: SignatureParameter,
    /// Declared parameters, vararg tail included
    pub params: Vec<SignatureParameter>,
}

/// Field signature (II.23.2.4)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureField {
    /// The field type
    pub base: TypeSignature,
}

/// Property signature (II.23.2.5)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureProperty {
    /// Instance property
    pub has_this: bool,
    /// The property type
    pub base: TypeSignature,
    /// Indexer parameters
    pub params: Vec<SignatureParameter>,
}
