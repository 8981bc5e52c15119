use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef, TypeDefRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeDefRaw {
    const TABLE: TableId = TableId::TypeDef;

    /// Reads a `TypeDef` row.
    ///
    /// Columns, in order:
    /// - Flags: 4 bytes
    /// - TypeName, TypeNamespace: `#Strings` indexes
    /// - Extends: `TypeDefOrRef` coded index
    /// - FieldList: `Field` index
    /// - MethodList: `MethodDef` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `TypeDef` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated, or an error for an
    /// invalid coded index tag.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
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
            0x00, 0x00, 0x00, 0x01, // flags
            0x42, 0x00, // type_name
            0x43, 0x00, // type_namespace
            0x00, 0x02, // extends
            0x00, 0x03, // field_list
            0x00, 0x04, // method_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Field, 1), (TableId::MethodDef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.rid, 1);
        assert_eq!(row.token.value(), 0x0200_0001);
        assert_eq!(row.flags, 0x0100_0000);
        assert_eq!(row.type_name, 0x42);
        assert_eq!(row.type_namespace, 0x43);
        assert_eq!(row.extends.tag, TableId::TypeDef);
        assert_eq!(row.extends.row, 0x80);
        assert_eq!(row.field_list, 0x0300);
        assert_eq!(row.method_list, 0x0400);
    }

    #[test]
    fn crafted_long() {
        #[rustfmt::skip]
        let data = vec![
            0x00, 0x00, 0x00, 0x01, // flags
            0x00, 0x00, 0x00, 0x02, // type_name
            0x00, 0x00, 0x00, 0x03, // type_namespace
            0x01, 0x00, 0x00, 0x04, // extends
            0x00, 0x00, 0x00, 0x05, // field_list
            0x00, 0x00, 0x00, 0x06, // method_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::TypeDef, u32::from(u16::MAX) + 3), (TableId::Field, u32::from(u16::MAX) + 3), (TableId::MethodDef, u32::from(u16::MAX) + 3)],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.type_name, 0x0200_0000);
        assert_eq!(row.type_namespace, 0x0300_0000);
        assert_eq!(row.extends.tag, TableId::TypeRef);
        assert_eq!(row.extends.row, 0x0100_0000);
        assert_eq!(row.field_list, 0x0500_0000);
        assert_eq!(row.method_list, 0x0600_0000);
    }
}
