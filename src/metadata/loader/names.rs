//! Rendering of type references to metadata full names.

use crate::{
    metadata::{
        loader::LoaderContext,
        signatures::{parse_type_spec_signature, TypeSignature},
        tables::TableId,
        token::Token,
    },
    Error::RecursionLimit,
    Result,
};

/// Deepest chain of nesting or `TypeSpec` indirection followed while naming a type.
const MAX_NAME_DEPTH: usize = 64;

/// Generic parameter names in scope while rendering a signature.
#[derive(Clone, Copy, Default)]
pub(crate) struct GenericScope<'s> {
    pub type_params: &'s [String],
    pub method_params: &'s [String],
}

/// Full name and reflection name of one `TypeDef`.
pub(crate) struct TypeDefNames {
    pub full_name: String,
    pub reflection_name: String,
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

impl LoaderContext<'_> {
    /// Names of `TypeDef` row `rid`; nested types are joined to their enclosing type.
    pub fn type_def_names(&self, rid: u32) -> Result<TypeDefNames> {
        self.type_def_names_at(rid, 0)
    }

    fn type_def_names_at(&self, rid: u32, depth: usize) -> Result<TypeDefNames> {
        if depth >= MAX_NAME_DEPTH {
            return Err(RecursionLimit(MAX_NAME_DEPTH));
        }

        let Some(row) = self.type_defs.get(rid.wrapping_sub(1) as usize) else {
            return Err(malformed_error!("TypeDef row {} does not exist", rid));
        };

        let name = self.string(row.type_name)?;
        match self.enclosing.get(&rid) {
            Some(&outer) => {
                let outer = self.type_def_names_at(outer, depth + 1)?;
                Ok(TypeDefNames {
                    full_name: format!("{}/{}", outer.full_name, name),
                    reflection_name: format!("{}+{}", outer.reflection_name, name),
                })
            }
            None => {
                let full_name = qualify(&self.string(row.type_namespace)?, &name);
                Ok(TypeDefNames {
                    reflection_name: full_name.clone(),
                    full_name,
                })
            }
        }
    }

    fn type_ref_name(&self, rid: u32, depth: usize) -> Result<String> {
        if depth >= MAX_NAME_DEPTH {
            return Err(RecursionLimit(MAX_NAME_DEPTH));
        }

        let Some(row) = self.type_refs.get(rid.wrapping_sub(1) as usize) else {
            return Err(malformed_error!("TypeRef row {} does not exist", rid));
        };

        let name = self.string(row.type_name)?;
        let scope = row.resolution_scope;
        if scope.tag == TableId::TypeRef && !scope.is_null() {
            let outer = self.type_ref_name(scope.row, depth + 1)?;
            return Ok(format!("{outer}/{name}"));
        }

        Ok(qualify(&self.string(row.type_namespace)?, &name))
    }

    /// Full name of a `TypeDef`, `TypeRef` or `TypeSpec` token.
    pub fn token_name(&self, token: Token, scope: GenericScope) -> Result<String> {
        self.token_name_at(token, scope, 0)
    }

    fn token_name_at(&self, token: Token, scope: GenericScope, depth: usize) -> Result<String> {
        if depth >= MAX_NAME_DEPTH {
            return Err(RecursionLimit(MAX_NAME_DEPTH));
        }

        match TableId::from_number(token.table()) {
            Some(TableId::TypeDef) => Ok(self.type_def_names_at(token.row(), depth)?.full_name),
            Some(TableId::TypeRef) => self.type_ref_name(token.row(), depth),
            Some(TableId::TypeSpec) => {
                let Some(row) = self.type_specs.get(token.row().wrapping_sub(1) as usize) else {
                    return Err(malformed_error!("TypeSpec row {} does not exist", token.row()));
                };

                let signature = parse_type_spec_signature(self.blob(row.signature)?)?;
                self.render_at(&signature, scope, depth + 1)
            }
            _ => Err(malformed_error!("Token {} does not reference a type", token)),
        }
    }

    /// Renders a signature type as a metadata full name.
    pub fn render(&self, signature: &TypeSignature, scope: GenericScope) -> Result<String> {
        self.render_at(signature, scope, 0)
    }

    fn render_at(
        &self,
        signature: &TypeSignature,
        scope: GenericScope,
        depth: usize,
    ) -> Result<String> {
        if depth >= MAX_NAME_DEPTH {
            return Err(RecursionLimit(MAX_NAME_DEPTH));
        }

        let primitive = match signature {
            TypeSignature::Void => "System.Void",
            TypeSignature::Boolean => "System.Boolean",
            TypeSignature::Char => "System.Char",
            TypeSignature::I1 => "System.SByte",
            TypeSignature::U1 => "System.Byte",
            TypeSignature::I2 => "System.Int16",
            TypeSignature::U2 => "System.UInt16",
            TypeSignature::I4 => "System.Int32",
            TypeSignature::U4 => "System.UInt32",
            TypeSignature::I8 => "System.Int64",
            TypeSignature::U8 => "System.UInt64",
            TypeSignature::R4 => "System.Single",
            TypeSignature::R8 => "System.Double",
            TypeSignature::String => "System.String",
            TypeSignature::Object => "System.Object",
            // function pointers are shown by their storage type
            TypeSignature::I | TypeSignature::FnPtr(_) => "System.IntPtr",
            TypeSignature::U => "System.UIntPtr",
            TypeSignature::TypedByRef => "System.TypedReference",
            TypeSignature::Ptr(inner) => {
                return Ok(format!("{}*", self.render_at(inner, scope, depth + 1)?))
            }
            TypeSignature::ByRef(inner) => {
                return Ok(format!("{}&", self.render_at(inner, scope, depth + 1)?))
            }
            TypeSignature::SzArray(inner) => {
                return Ok(format!("{}[]", self.render_at(inner, scope, depth + 1)?))
            }
            TypeSignature::Array(inner, rank) => {
                let commas = ",".repeat((*rank).max(1) as usize - 1);
                return Ok(format!(
                    "{}[{}]",
                    self.render_at(inner, scope, depth + 1)?,
                    commas
                ));
            }
            TypeSignature::ValueType(token) | TypeSignature::Class(token) => {
                return self.token_name_at(*token, scope, depth + 1)
            }
            TypeSignature::GenericParamType(number) => {
                return Ok(scope
                    .type_params
                    .get(*number as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!{number}")))
            }
            TypeSignature::GenericParamMethod(number) => {
                return Ok(scope
                    .method_params
                    .get(*number as usize)
                    .cloned()
                    .unwrap_or_else(|| format!("!!{number}")))
            }
            TypeSignature::GenericInst(base, args) => {
                let mut name = self.render_at(base, scope, depth + 1)?;
                name.push('<');
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        name.push(',');
                    }
                    name.push_str(&self.render_at(arg, scope, depth + 1)?);
                }
                name.push('>');
                return Ok(name);
            }
        };

        Ok(primitive.to_string())
    }
}
