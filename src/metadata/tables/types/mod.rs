//! Generic table infrastructure: table ids, column layouts, coded indexes, index widths
//! and typed row access.

pub(crate) mod codedindex;
mod tableid;
mod tableinfo;

use std::marker::PhantomData;

use crate::Result;

pub use codedindex::{CodedIndex, CodedIndexType};
pub use tableid::{Column, TableId};
pub(crate) use tableinfo::HEAP_EXTRA_DATA;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

/// A typed row of one metadata table.
pub trait RowReadable: Sized + Send {
    /// The table this row belongs to.
    const TABLE: TableId;

    /// Size of one row in bytes for the given index widths.
    fn row_size(sizes: &TableInfoRef) -> u32 {
        sizes.row_size(Self::TABLE)
    }

    /// Reads the row with id `rid` at `offset`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the row is truncated.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed, 1-based access to the rows of one table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Creates a table over `data`, which starts at the first row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `data` cannot hold `row_count` rows.
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Result<Self> {
        let row_size = T::row_size(&sizes);
        let needed = u64::from(row_count) * u64::from(row_size);
        if needed > data.len() as u64 {
            return Err(crate::Error::OutOfBounds);
        }

        Ok(MetadataTable {
            data,
            row_count,
            row_size,
            sizes,
            _phantom: PhantomData,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Size of one row in bytes.
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Returns row `rid` (1-based), or `None` if it does not exist or cannot be read.
    #[must_use]
    pub fn get(&self, rid: u32) -> Option<T> {
        if rid == 0 || rid > self.row_count {
            return None;
        }

        let mut offset = (rid as usize - 1) * self.row_size as usize;
        T::row_read(self.data, &mut offset, rid, &self.sizes).ok()
    }

    /// Reads every row in order.
    ///
    /// # Errors
    /// Returns the first row read error.
    pub fn rows(&self) -> Result<Vec<T>> {
        let mut offset = 0;
        (1..=self.row_count)
            .map(|rid| T::row_read(self.data, &mut offset, rid, &self.sizes))
            .collect()
    }
}
