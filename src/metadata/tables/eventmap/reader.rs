use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{EventMapRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for EventMapRaw {
    const TABLE: TableId = TableId::EventMap;

    /// Reads an `EventMap` row.
    ///
    /// Columns, in order:
    /// - Parent: `TypeDef` index
    /// - EventList: `Event` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `EventMap` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(EventMapRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            parent: read_le_at_dyn(data, offset, sizes.is_large(TableId::TypeDef))?,
            event_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Event))?,
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
            0x02, 0x00, // parent
            0x01, 0x00, // event_list
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::EventMap, 1)], false, false, false));
        let table = MetadataTable::<EventMapRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x1200_0001);
        assert_eq!(row.parent, 2);
        assert_eq!(row.event_list, 1);
    }
}
