use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{
            CodedIndex, CodedIndexType, GenericParamRaw, RowReadable, TableId, TableInfoRef,
        },
        token::Token,
    },
    Result,
};

impl RowReadable for GenericParamRaw {
    const TABLE: TableId = TableId::GenericParam;

    /// Reads a `GenericParam` row.
    ///
    /// Columns, in order:
    /// - Number: 2 bytes
    /// - Flags: 2 bytes
    /// - Owner: `TypeOrMethodDef` coded index
    /// - Name: `#Strings` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `GenericParam` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated, or an error for an
    /// invalid coded index tag.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(GenericParamRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            number: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            owner: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeOrMethodDef)?,
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
        })
    }
}
