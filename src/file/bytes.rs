//! Storage for the raw bytes of an assembly image.

use std::{fs, ops::Deref, path::Path};

use memmap2::Mmap;

use crate::{
    Error::{FileError, OutOfBounds},
    Result,
};

/// The bytes behind a [`super::File`]: a read-only map of a file on disk, or a buffer the
/// caller already holds.
#[derive(Debug)]
pub enum ImageBytes {
    /// Mapped from disk.
    Mapped(Mmap),
    /// Owned in memory.
    Owned(Vec<u8>),
}

impl ImageBytes {
    /// Maps the file at `path` read-only.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn map(path: &Path) -> Result<ImageBytes> {
        let file = fs::File::open(path).map_err(FileError)?;
        // The map is read-only and lives no longer than the `File` that owns it.
        let map = unsafe { Mmap::map(&file) }.map_err(FileError)?;

        Ok(ImageBytes::Mapped(map))
    }

    /// Returns `len` bytes starting at `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let end = offset.checked_add(len).ok_or(OutOfBounds)?;
        self.get(offset..end).ok_or(OutOfBounds)
    }
}

impl Deref for ImageBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            ImageBytes::Mapped(map) => &map[..],
            ImageBytes::Owned(buffer) => buffer.as_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn owned_slices() {
        let mut data = vec![0xCC_u8; 1048];
        data[10..15].copy_from_slice(&[0xBB; 5]);
        let bytes = ImageBytes::Owned(data);

        assert_eq!(bytes.len(), 1048);
        assert_eq!(bytes.slice(10, 5).unwrap(), &[0xBB; 5]);
        assert_eq!(bytes.slice(1048, 0).unwrap().len(), 0);
        assert!(bytes.slice(0, 2048).is_err());
        assert!(bytes.slice(usize::MAX, 1).is_err());
    }

    #[test]
    fn mapped_from_disk() {
        let mut temp = tempfile::NamedTempFile::new().unwrap();
        temp.write_all(&[0x4D, 0x5A, 0x90, 0x00, 0x03, 0x00]).unwrap();
        temp.flush().unwrap();

        let bytes = ImageBytes::map(temp.path()).unwrap();

        assert!(matches!(bytes, ImageBytes::Mapped(_)));
        assert_eq!(&bytes[..2], b"MZ");
        assert_eq!(bytes.slice(2, 3).unwrap(), &[0x90, 0x00, 0x03]);
        assert!(bytes.slice(5, 2).is_err());
    }

    #[test]
    fn missing_file() {
        match ImageBytes::map(Path::new("/nonexistent/path/to/file.dll")) {
            Err(FileError(error)) => assert_eq!(error.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected FileError, got {other:?}"),
        }
    }
}
