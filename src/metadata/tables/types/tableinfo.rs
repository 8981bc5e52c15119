use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::read_le_at,
    metadata::tables::{codedindex, CodedIndexType, Column, TableId},
    Result,
};

/// Heap-size flag: `#Strings` indexes are 4 bytes wide.
const HEAP_LARGE_STRINGS: u8 = 0x01;
/// Heap-size flag: `#GUID` indexes are 4 bytes wide.
const HEAP_LARGE_GUID: u8 = 0x02;
/// Heap-size flag: `#Blob` indexes are 4 bytes wide.
const HEAP_LARGE_BLOB: u8 = 0x04;
/// Heap-size flag: four bytes of extra data follow the row counts.
pub(crate) const HEAP_EXTRA_DATA: u8 = 0x40;

/// Row count and index width of one table.
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits needed to address every row
    pub bits: u8,
    /// True if simple indexes into this table are 4 bytes wide
    pub is_large: bool,
}

impl TableRowInfo {
    /// Computes the index width for a table with `rows` rows.
    #[must_use]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths for every table of a `#~` stream.
#[derive(Clone, Default)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared handle to a [`TableInfo`].
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Reads the row counts that follow the tables header.
    ///
    /// `offset` must point at the first row count and is advanced past the last one.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for a populated table number outside the
    /// known range and [`crate::Error::OutOfBounds`] for truncated data.
    pub fn new(data: &[u8], offset: &mut usize, valid_bitvec: u64, heap_sizes: u8) -> Result<Self> {
        let mut rows = vec![TableRowInfo::default(); TableId::COUNT];

        for number in 0..64_u8 {
            if valid_bitvec & (1_u64 << number) == 0 {
                continue;
            }

            let row_count = read_le_at::<u32>(data, offset)?;
            match TableId::from_number(number) {
                Some(table_id) => rows[table_id as usize] = TableRowInfo::new(row_count),
                None if row_count == 0 => {}
                None => {
                    log::debug!("Unknown metadata table 0x{:02x} with {} rows", number, row_count);
                    return Err(crate::Error::NotSupported);
                }
            }
        }

        let mut table_info = TableInfo {
            rows,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_sizes & HEAP_LARGE_STRINGS != 0,
            is_large_index_guid: heap_sizes & HEAP_LARGE_GUID != 0,
            is_large_index_blob: heap_sizes & HEAP_LARGE_BLOB != 0,
        };

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Builds row information for unit tests.
    ///
    /// ## Arguments
    /// * `valid_tables` - `(table, row count)` pairs for the populated tables
    /// * `large_str` - `#Strings` indexes are 4 bytes wide
    /// * `large_blob` - `#Blob` indexes are 4 bytes wide
    /// * `large_guid` - `#GUID` indexes are 4 bytes wide
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for valid_table in valid_tables {
            table_info.rows[valid_table.0 as usize] = TableRowInfo::new(valid_table.1);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Splits a raw coded index value into its table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for a tag outside the coded index's table list.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        codedindex::decode(value, coded_index_type)
    }

    /// Row information for `table`.
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// True if simple indexes into `id` are 4 bytes wide.
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// True if `#Strings` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// True if `#GUID` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// True if `#Blob` indexes are 4 bytes wide.
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width in bytes of a coded index of kind `coded_index_type`.
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Width in bytes of one column.
    #[must_use]
    pub fn column_bytes(&self, column: Column) -> u32 {
        let wide = |is_large: bool| if is_large { 4 } else { 2 };

        match column {
            Column::Fixed(bytes) => u32::from(bytes),
            Column::Str => wide(self.is_large_index_str),
            Column::Guid => wide(self.is_large_index_guid),
            Column::Blob => wide(self.is_large_index_blob),
            Column::Table(table) => wide(self.is_large(table)),
            Column::Coded(coded) => u32::from(self.coded_index_bytes(coded)),
        }
    }

    /// Size in bytes of one row of `table`.
    #[must_use]
    pub fn row_size(&self, table: TableId) -> u32 {
        table
            .columns()
            .iter()
            .map(|column| self.column_bytes(*column))
            .sum()
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}
