use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{ParamRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for ParamRaw {
    const TABLE: TableId = TableId::Param;

    /// Reads a `Param` row.
    ///
    /// Columns, in order:
    /// - Flags: 2 bytes
    /// - Sequence: 2 bytes
    /// - Name: `#Strings` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `Param` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ParamRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            sequence: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
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
            0x02, 0x00, // flags
            0x01, 0x00, // sequence
            0x33, 0x00, // name
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Param, 1)], false, false, false));
        let table = MetadataTable::<ParamRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0800_0001);
        assert_eq!(row.flags, 0x02);
        assert_eq!(row.sequence, 1);
        assert_eq!(row.name, 0x33);
    }
}
