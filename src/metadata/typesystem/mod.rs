//! The read-only type model of one module.
//!
//! [`CilModule`] is what the rest of the crate consumes: every `TypeDef` of the module,
//! nested types included, in metadata order, with members and type references already
//! rendered to metadata full names (`System.Collections.Generic.List`1<System.Int32>`,
//! `Ns.Outer/Inner`, `System.Byte[]`). The model is built once by the loader and never
//! mutated afterwards.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscribe::metadata::typesystem::CilModule;
//! use std::path::Path;
//!
//! let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
//! for ty in &module.types {
//!     println!("{} {} ({} methods)", ty.kind, ty.full_name, ty.methods.len());
//! }
//! # Ok::<(), dotscribe::Error>(())
//! ```

mod members;

use std::path::{Path, PathBuf};

use strum::Display;

use crate::{
    file::File,
    metadata::{loader, tables::TypeAttributes, token::Token},
    Result,
};

pub use members::*;

/// The declaration keyword of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum TypeKind {
    /// `interface`
    #[strum(serialize = "interface")]
    Interface,
    /// `enum`, derives from `System.Enum`
    #[strum(serialize = "enum")]
    Enum,
    /// `struct`, derives from `System.ValueType`
    #[strum(serialize = "struct")]
    Struct,
    /// `static class`, abstract and sealed
    #[strum(serialize = "static class")]
    StaticClass,
    /// `abstract class`
    #[strum(serialize = "abstract class")]
    AbstractClass,
    /// `class`
    #[strum(serialize = "class")]
    Class,
}

impl TypeKind {
    /// Classifies a type from its `TypeDef` flags and the full name of its base type.
    ///
    /// Checks run in keyword precedence order: interface, enum, struct, static class,
    /// abstract class, class. `System.Enum` itself is a class even though it derives
    /// from `System.ValueType`.
    #[must_use]
    pub fn classify(flags: u32, full_name: &str, base_type: Option<&str>) -> TypeKind {
        if flags & TypeAttributes::CLASS_SEMANTICS_MASK == TypeAttributes::INTERFACE {
            return TypeKind::Interface;
        }

        match base_type {
            Some("System.Enum") => return TypeKind::Enum,
            Some("System.ValueType") if full_name != "System.Enum" => return TypeKind::Struct,
            _ => {}
        }

        let is_abstract = flags & TypeAttributes::ABSTRACT != 0;
        let is_sealed = flags & TypeAttributes::SEALED != 0;
        match (is_abstract, is_sealed) {
            (true, true) => TypeKind::StaticClass,
            (true, false) => TypeKind::AbstractClass,
            _ => TypeKind::Class,
        }
    }
}

/// One type defined in a module.
#[derive(Clone, Debug)]
pub struct CilType {
    /// `TypeDef` token
    pub token: Token,
    /// Namespace as stored in metadata; empty for nested types and the global namespace
    pub namespace: String,
    /// Simple name including the arity marker, e.g. `List`1`
    pub name: String,
    /// Metadata full name, `Ns.Name` or `Ns.Outer/Inner`
    pub full_name: String,
    /// Reflection name, nested types joined with `+`
    pub reflection_name: String,
    /// Token of the enclosing type for nested types
    pub enclosing: Option<Token>,
    /// Raw `TypeAttributes`
    pub flags: u32,
    /// Declaration keyword
    pub kind: TypeKind,
    /// Full name of the base type, `None` for interfaces and `System.Object` itself
    pub base_type: Option<String>,
    /// Full names of implemented interfaces, in metadata order
    pub interfaces: Vec<String>,
    /// Names of the type's generic parameters
    pub generic_params: Vec<String>,
    /// Fields in metadata order
    pub fields: Vec<Field>,
    /// Properties in metadata order
    pub properties: Vec<Property>,
    /// Events in metadata order
    pub events: Vec<Event>,
    /// Methods and constructors in metadata order
    pub methods: Vec<Method>,
}

impl CilType {
    /// True if the compiler synthesized this type (`<Module>`, closures, iterators, ...).
    #[must_use]
    pub fn is_compiler_generated(&self) -> bool {
        self.name.contains('<')
    }

    /// True if this type is nested in another one.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }
}

/// All types of one loaded module.
#[derive(Clone, Debug, Default)]
pub struct CilModule {
    /// Module name from the `Module` table, e.g. `Assembly-CSharp.dll`
    pub name: String,
    /// The file the module was loaded from, if any
    pub path: Option<PathBuf>,
    /// Every `TypeDef` in metadata order
    pub types: Vec<CilType>,
}

impl CilModule {
    /// Loads the module contained in the PE image at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or its metadata is malformed.
    pub fn from_file(path: &Path) -> Result<CilModule> {
        let file = File::from_file(path)?;
        let mut module = loader::load(&file)?;
        module.path = Some(path.to_path_buf());

        Ok(module)
    }

    /// Loads the module contained in an in-memory PE image.
    ///
    /// # Errors
    /// Returns an error if the data is not a .NET image or its metadata is malformed.
    pub fn from_mem(data: Vec<u8>) -> Result<CilModule> {
        let file = File::from_mem(data)?;
        loader::load(&file)
    }

    /// Looks up a type by its metadata full name.
    #[must_use]
    pub fn type_by_full_name(&self, full_name: &str) -> Option<&CilType> {
        self.types.iter().find(|ty| ty.full_name == full_name)
    }

    /// Looks up a type by its `TypeDef` token.
    #[must_use]
    pub fn type_by_token(&self, token: Token) -> Option<&CilType> {
        self.types.iter().find(|ty| ty.token == token)
    }
}
