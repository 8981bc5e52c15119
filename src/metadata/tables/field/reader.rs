use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{FieldRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for FieldRaw {
    const TABLE: TableId = TableId::Field;

    /// Reads a `Field` row.
    ///
    /// Columns, in order:
    /// - Flags: 2 bytes
    /// - Name: `#Strings` index
    /// - Signature: `#Blob` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `Field` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(FieldRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
        #[rustfmt::skip]
        let data = vec![
            0x16, 0x00, // flags
            0x02, 0x02, // name
            0x03, 0x03, // signature
            0x01, 0x00, // flags
            0x04, 0x00, // name
            0x05, 0x00, // signature
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Field, 2)], false, false, false));
        let table = MetadataTable::<FieldRaw>::new(&data, 2, sizes).unwrap();

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].token.value(), 0x0400_0001);
        assert_eq!(rows[0].flags, 0x16);
        assert_eq!(rows[0].name, 0x0202);
        assert_eq!(rows[0].signature, 0x0303);
        assert_eq!(rows[1].token.value(), 0x0400_0002);
        assert_eq!(rows[1].flags, 0x01);
    }
}
