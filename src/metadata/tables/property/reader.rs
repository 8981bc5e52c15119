use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{PropertyRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for PropertyRaw {
    const TABLE: TableId = TableId::Property;

    /// Reads a `Property` row.
    ///
    /// Columns, in order:
    /// - Flags: 2 bytes
    /// - Name: `#Strings` index
    /// - Type: `#Blob` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `Property` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}
