use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{PropertyMapRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for PropertyMapRaw {
    const TABLE: TableId = TableId::PropertyMap;

    /// Reads a `PropertyMap` row.
    ///
    /// Columns, in order:
    /// - Parent: `TypeDef` index
    /// - PropertyList: `Property` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `PropertyMap` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(PropertyMapRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            property_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Property))?,
        })
    }
}
