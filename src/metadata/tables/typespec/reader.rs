use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{RowReadable, TableId, TableInfoRef, TypeSpecRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeSpecRaw {
    const TABLE: TableId = TableId::TypeSpec;

    /// Reads a `TypeSpec` row.
    ///
    /// Columns, in order:
    /// - Signature: `#Blob` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `TypeSpec` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeSpecRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![0x12, 0x00, 0x34, 0x00];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::TypeSpec, 2)], false, false, false));
        let table = MetadataTable::<TypeSpecRaw>::new(&data, 2, sizes).unwrap();

        assert_eq!(table.get(1).unwrap().signature, 0x12);
        assert_eq!(table.get(2).unwrap().token.value(), 0x1B00_0002);
        assert_eq!(table.get(2).unwrap().signature, 0x34);
    }
}
