use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{MethodDefRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for MethodDefRaw {
    const TABLE: TableId = TableId::MethodDef;

    /// Reads a `MethodDef` row.
    ///
    /// Columns, in order:
    /// - RVA: 4 bytes
    /// - ImplFlags: 2 bytes
    /// - Flags: 2 bytes
    /// - Name: `#Strings` index
    /// - Signature: `#Blob` index
    /// - ParamList: `Param` index
    ///
    /// Index columns are 2 or 4 bytes wide as `sizes` dictates.
    ///
    /// ## Arguments
    /// * `data` - The `MethodDef` table, starting at its first row
    /// * `offset` - Read position, advanced past the row
    /// * `rid` - 1-based row id
    /// * `sizes` - Index widths of the current `#~` stream
    ///
    /// ## Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(MethodDefRaw {
            rid,
            token: Token::from_parts(Self::TABLE as u8, rid),
            rva: read_le_at::<u32>(data, offset)?,
            impl_flags: u32::from(read_le_at::<u16>(data, offset)?),
            flags: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            signature: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
            param_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Param))?,
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
            0x50, 0x20, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0xC6, 0x01, // flags
            0x10, 0x00, // name
            0x20, 0x00, // signature
            0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::MethodDef, 1), (TableId::Param, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0600_0001);
        assert_eq!(row.rva, 0x2050);
        assert_eq!(row.impl_flags, 0);
        assert_eq!(row.flags, 0x01C6);
        assert_eq!(row.name, 0x10);
        assert_eq!(row.signature, 0x20);
        assert_eq!(row.param_list, 1);
    }

    #[test]
    fn crafted_large_param_index() {
        #[rustfmt::skip]
        let data = vec![
            0x00, 0x00, 0x00, 0x00, // rva
            0x00, 0x00, // impl_flags
            0x06, 0x00, // flags
            0x10, 0x00, // name
            0x20, 0x00, // signature
            0x02, 0x00, 0x01, 0x00, // param_list
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Param, 0x1_0000)], false, false, false));
        let table = MetadataTable::<MethodDefRaw>::new(&data, 1, sizes).unwrap();

        assert_eq!(table.row_size(), 16);
        assert_eq!(table.get(1).unwrap().param_list, 0x0001_0002);
    }
}
