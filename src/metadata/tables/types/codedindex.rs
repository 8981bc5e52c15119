use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{TableId, TableInfoRef},
        token::Token,
    },
    Error::OutOfBounds,
    Result,
};

/// The coded index kinds of ECMA-335 II.24.2.6.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
#[allow(missing_docs)]
pub enum CodedIndexType {
    TypeDefOrRef,
    HasConstant,
    HasCustomAttribute,
    HasFieldMarshal,
    HasDeclSecurity,
    MemberRefParent,
    HasSemantics,
    MethodDefOrRef,
    MemberForwarded,
    Implementation,
    CustomAttributeType,
    ResolutionScope,
    TypeOrMethodDef,
}

impl CodedIndexType {
    /// The tables this coded index can reference, in tag order.
    #[must_use]
    pub fn tables(&self) -> &'static [TableId] {
        match self {
            CodedIndexType::TypeDefOrRef => {
                &[TableId::TypeDef, TableId::TypeRef, TableId::TypeSpec]
            }
            CodedIndexType::HasConstant => &[TableId::Field, TableId::Param, TableId::Property],
            CodedIndexType::HasCustomAttribute => &[
                TableId::MethodDef,
                TableId::Field,
                TableId::TypeRef,
                TableId::TypeDef,
                TableId::Param,
                TableId::InterfaceImpl,
                TableId::MemberRef,
                TableId::Module,
                TableId::DeclSecurity,
                TableId::Property,
                TableId::Event,
                TableId::StandAloneSig,
                TableId::ModuleRef,
                TableId::TypeSpec,
                TableId::Assembly,
                TableId::AssemblyRef,
                TableId::File,
                TableId::ExportedType,
                TableId::ManifestResource,
                TableId::GenericParam,
                TableId::GenericParamConstraint,
                TableId::MethodSpec,
            ],
            CodedIndexType::HasFieldMarshal => &[TableId::Field, TableId::Param],
            CodedIndexType::HasDeclSecurity => {
                &[TableId::TypeDef, TableId::MethodDef, TableId::Assembly]
            }
            CodedIndexType::MemberRefParent => &[
                TableId::TypeDef,
                TableId::TypeRef,
                TableId::ModuleRef,
                TableId::MethodDef,
                TableId::TypeSpec,
            ],
            CodedIndexType::HasSemantics => &[TableId::Event, TableId::Property],
            CodedIndexType::MethodDefOrRef => &[TableId::MethodDef, TableId::MemberRef],
            CodedIndexType::MemberForwarded => &[TableId::Field, TableId::MethodDef],
            CodedIndexType::Implementation => {
                &[TableId::File, TableId::AssemblyRef, TableId::ExportedType]
            }
            // Tags 0, 1 and 4 are unused; only the width matters for them.
            CodedIndexType::CustomAttributeType => &[
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MemberRef,
                TableId::MemberRef,
            ],
            CodedIndexType::ResolutionScope => &[
                TableId::Module,
                TableId::ModuleRef,
                TableId::AssemblyRef,
                TableId::TypeRef,
            ],
            CodedIndexType::TypeOrMethodDef => &[TableId::TypeDef, TableId::MethodDef],
        }
    }

    /// Number of low bits used for the tag.
    #[must_use]
    pub fn tag_bits(&self) -> u8 {
        let tables = self.tables().len();
        // ceil(log2(n)) for n >= 2
        (usize::BITS - (tables - 1).leading_zeros()) as u8
    }
}

/// A decoded coded index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CodedIndex {
    /// The referenced table
    pub tag: TableId,
    /// The 1-based row, 0 for a null reference
    pub row: u32,
    /// The token of the referenced row
    pub token: Token,
}

impl CodedIndex {
    /// Reads a coded index of kind `ci_type` at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] on short data or an invalid tag.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfoRef,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let value = read_le_at_dyn(data, offset, info.coded_index_bytes(ci_type) == 4)?;
        let (tag, row) = info.decode_coded_index(value, ci_type)?;

        Ok(CodedIndex::new(tag, row))
    }

    /// Creates a coded index pointing to `row` of `tag`.
    #[must_use]
    pub fn new(tag: TableId, row: u32) -> CodedIndex {
        CodedIndex {
            tag,
            row,
            token: Token::from_parts(tag as u8, row),
        }
    }

    /// True for a null reference.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.row == 0
    }
}

pub(crate) fn decode(value: u32, ci_type: CodedIndexType) -> Result<(TableId, u32)> {
    let tables = ci_type.tables();
    let tag_bits = ci_type.tag_bits();
    let tag = value & ((1 << tag_bits) - 1);

    match tables.get(tag as usize) {
        Some(table) => Ok((*table, value >> tag_bits)),
        None => Err(OutOfBounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_bits() {
        assert_eq!(CodedIndexType::TypeDefOrRef.tag_bits(), 2);
        assert_eq!(CodedIndexType::HasCustomAttribute.tag_bits(), 5);
        assert_eq!(CodedIndexType::HasSemantics.tag_bits(), 1);
        assert_eq!(CodedIndexType::MemberRefParent.tag_bits(), 3);
        assert_eq!(CodedIndexType::ResolutionScope.tag_bits(), 2);
        assert_eq!(CodedIndexType::CustomAttributeType.tag_bits(), 3);
    }

    #[test]
    fn decode_values() {
        assert_eq!(
            decode(0x0009, CodedIndexType::TypeDefOrRef).unwrap(),
            (TableId::TypeRef, 2)
        );
        assert_eq!(
            decode(0x0006, CodedIndexType::HasSemantics).unwrap(),
            (TableId::Event, 3)
        );
        assert!(decode(0x0003, CodedIndexType::TypeDefOrRef).is_err());
    }

    #[test]
    fn token() {
        let index = CodedIndex::new(TableId::TypeSpec, 4);
        assert_eq!(index.token.value(), 0x1B00_0004);
        assert!(!index.is_null());
        assert!(CodedIndex::new(TableId::TypeDef, 0).is_null());
    }
}
