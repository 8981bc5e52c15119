use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef, TypeRefRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeRefRaw {
    const TABLE: TableId = TableId::TypeRef;

    /// Reads a `TypeRef` row.
    ///
    /// Columns, in order:
    /// - ResolutionScope: `ResolutionScope` coded index
    /// - TypeName, TypeNamespace: `#Strings` indexes
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `TypeRef` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated, or an error for an
    /// invalid coded index tag.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeRefRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            resolution_scope: CodedIndex::read(data, offset, sizes, CodedIndexType::ResolutionScope)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
