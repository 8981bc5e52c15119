use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{
            CodedIndex, CodedIndexType, MethodSemanticsRaw, RowReadable, TableId, TableInfoRef,
        },
        token::Token,
    },
    Result,
};

impl RowReadable for MethodSemanticsRaw {
    const TABLE: TableId = TableId::MethodSemantics;

    /// Reads a `MethodSemantics` row.
    ///
    /// Columns, in order:
    /// - Semantics: 2 bytes
    /// - Method: `MethodDef` index
    /// - Association: `HasSemantics` coded index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `MethodSemantics` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated, or an error for an
    /// invalid coded index tag.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodSemanticsRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            semantics: u32::from(read_le_at::<u16>(data, offset)?),
            method: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
            association: CodedIndex::read(data, offset, sizes, CodedIndexType::HasSemantics)?,
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
            0x02, 0x00, // semantics (getter)
            0x07, 0x00, // method
            0x03, 0x00, // association (Property 1)
            0x08, 0x00, // semantics (add)
            0x08, 0x00, // method
            0x04, 0x00, // association (Event 2)
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodSemantics, 2), (TableId::MethodDef, 8)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodSemanticsRaw>::new(&data, 2, sizes).unwrap();

        let getter = table.get(1).unwrap();
        assert_eq!(getter.semantics, super::super::MethodSemanticsAttributes::GETTER);
        assert_eq!(getter.method, 7);
        assert_eq!(getter.association.tag, TableId::Property);
        assert_eq!(getter.association.row, 1);

        let adder = table.get(2).unwrap();
        assert_eq!(adder.association.tag, TableId::Event);
        assert_eq!(adder.association.row, 2);
    }
}
