use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{
        MetadataTable, RowReadable, TableId, TableInfo, TableInfoRef, HEAP_EXTRA_DATA,
    },
    Error::OutOfBounds,
    Result,
};

/// The header of the compressed `#~` stream, plus the location of every present table.
///
/// Tables are laid out back to back after the row counts, in table-number order, so the
/// offset of each table is the running sum of `rows * row_size` over all tables before it.
/// Rows are decoded lazily through [`TablesHeader::table`].
///
/// ```rust,no_run
/// use dotscribe::metadata::{streams::TablesHeader, tables::TypeDefRaw};
///
/// # fn example(tables: &TablesHeader) -> dotscribe::Result<()> {
/// if let Some(typedefs) = tables.table::<TypeDefRaw>()? {
///     for typedef in typedefs.rows()? {
///         println!("{:?} flags=0x{:08x}", typedef.token, typedef.flags);
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.6
pub struct TablesHeader<'a> {
    /// Major version of table schemata, shall be 2
    pub major_version: u8,
    /// Minor version of table schemata, shall be 0
    pub minor_version: u8,
    /// Heap index width flags
    pub heap_sizes: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    offsets: Vec<usize>,
}

impl<'a> TablesHeader<'a> {
    /// Parses the `#~` stream in `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the header or any table is truncated, and
    /// [`crate::Error::Malformed`] if no table is present.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let heap_sizes = read_le::<u8>(&data[6..])?;
        let valid = read_le::<u64>(&data[8..])?;
        if valid == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let mut offset = 24;
        let info = Arc::new(TableInfo::new(data, &mut offset, valid, heap_sizes)?);
        if heap_sizes & HEAP_EXTRA_DATA != 0 {
            offset += 4;
        }

        let mut offsets = Vec::with_capacity(TableId::GenericParamConstraint as usize + 1);
        for table_id in TableId::iter() {
            offsets.push(offset);

            let size = u64::from(info.get(table_id).rows) * u64::from(info.row_size(table_id));
            offset = usize::try_from(size)
                .ok()
                .and_then(|size| offset.checked_add(size))
                .ok_or(OutOfBounds)?;
        }

        if offset > data.len() {
            return Err(OutOfBounds);
        }

        Ok(TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            heap_sizes,
            valid,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            offsets,
        })
    }

    /// True if `table_id` is marked present.
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        self.valid & (1_u64 << (table_id as u8)) != 0
    }

    /// Number of rows in `table_id`, 0 if absent.
    #[must_use]
    pub fn table_row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }

    /// Typed access to the table holding rows of type `T`, `None` if it has no rows.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the table extends past the stream.
    pub fn table<T: RowReadable>(&self) -> Result<Option<MetadataTable<'a, T>>> {
        let rows = self.table_row_count(T::TABLE);
        if rows == 0 {
            return Ok(None);
        }

        let start = self.offsets[T::TABLE as usize];
        let data = self.data.get(start..).ok_or(OutOfBounds)?;

        Ok(Some(MetadataTable::new(data, rows, self.info.clone())?))
    }
}
