//! PE image access for .NET assemblies.
//!
//! [`File`] owns the raw bytes of an assembly, either memory-mapped from disk or held in a
//! buffer, together with the `goblin` view of its PE headers. The metadata reader only needs
//! three things from it: the location of the CLR runtime header, RVA to file-offset
//! translation, and bounds-checked slices.
//!
//! # Example
//!
//! ```rust,no_run
//! use dotscribe::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let (clr_rva, clr_size) = file.clr()?;
//! let offset = file.rva_to_offset(clr_rva)?;
//! let cor20 = file.data_slice(offset, clr_size)?;
//! # Ok::<(), dotscribe::Error>(())
//! ```

pub mod io;
pub mod parser;

mod bytes;

use std::path::Path;

use crate::{
    Error::{Empty, GoblinErr},
    Result,
};
use bytes::ImageBytes;
use goblin::pe::PE;
use ouroboros::self_referencing;

/// A parsed PE image holding a CLR runtime header.
#[self_referencing]
pub struct File {
    data: ImageBytes,
    #[borrows(data)]
    #[not_covariant]
    pe: PE<'this>,
}

impl File {
    /// Memory-maps and parses the file at `file`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or is not a .NET PE image.
    pub fn from_file(file: &Path) -> Result<File> {
        Self::load(ImageBytes::map(file)?)
    }

    /// Parses an image that is already in memory.
    ///
    /// # Errors
    /// Returns an error if the data is not a .NET PE image.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        Self::load(ImageBytes::Owned(data))
    }

    fn load(data: ImageBytes) -> Result<File> {
        if data.is_empty() {
            return Err(Empty);
        }

        File::try_new(data, |data| {
            match PE::parse(data) {
                Ok(pe) => match pe.header.optional_header {
                    Some(optional_header) => {
                        if optional_header
                            .data_directories
                            .get_clr_runtime_header()
                            .is_none()
                        {
                            Err(malformed_error!(
                                "File does not have a CLR runtime header directory"
                            ))
                        } else {
                            Ok(pe)
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                },
                Err(error) => Err(GoblinErr(error)),
            }
        })
    }

    /// Size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// True if the image holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// RVA and size of the CLR runtime header.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the directory is missing; `load` rejects such
    /// images, so this only fires on a corrupted view.
    pub fn clr(&self) -> Result<(usize, usize)> {
        self.with_pe(|pe| {
            let clr_dir = pe
                .header
                .optional_header
                .and_then(|optional_header| {
                    optional_header
                        .data_directories
                        .get_clr_runtime_header()
                        .copied()
                })
                .ok_or_else(|| malformed_error!("CLR runtime header directory is missing"))?;

            Ok((clr_dir.virtual_address as usize, clr_dir.size as usize))
        })
    }

    /// The complete image.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.borrow_data()
    }

    /// Returns `len` bytes starting at file offset `offset`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the image.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.borrow_data().slice(offset, len)
    }

    /// Translates a relative virtual address to a file offset using the section table.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if no section maps `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            let rva_u32 = u32::try_from(rva)
                .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{metadata::MetadataBuilder, pe::PeImageBuilder};

    #[test]
    fn load_empty() {
        assert!(matches!(File::from_mem(Vec::new()), Err(Empty)));
    }

    #[test]
    fn load_not_pe() {
        assert!(File::from_mem(vec![0xCC; 512]).is_err());
    }

    #[test]
    fn clr_and_rva() {
        let image = PeImageBuilder::new(MetadataBuilder::new("Empty.dll").build()).build();
        let file = File::from_mem(image).unwrap();

        let (clr_rva, clr_size) = file.clr().unwrap();
        assert_eq!(clr_rva, 0x2000);
        assert_eq!(clr_size, 72);

        let offset = file.rva_to_offset(clr_rva).unwrap();
        assert_eq!(offset, 0x200);
        assert_eq!(file.data_slice(offset, 4).unwrap(), &[72, 0, 0, 0]);
        assert_eq!(file.data_slice(offset + clr_size, 4).unwrap(), b"BSJB");

        assert!(file.rva_to_offset(0x10).is_err());
    }
}
