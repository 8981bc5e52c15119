//! The CLR runtime header (ECMA-335 II.25.3.3).
//!
//! Only the fields that lead to the metadata root are kept; the remaining data
//! directories (resources, strong name, vtable fixups, ...) play no part in text
//! synthesis.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// Size of the header in bytes, which is also the required value of `cb`.
pub const COR20_HEADER_SIZE: usize = 72;

/// The parsed CLR runtime header.
pub struct Cor20Header {
    /// Size of the header, always 72
    pub cb: u32,
    /// Minimum major runtime version required
    pub major_runtime_version: u16,
    /// Minimum minor runtime version required
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata
    pub meta_data_size: u32,
    /// Runtime image flags
    pub flags: u32,
    /// Entry point method or file token
    pub entry_point_token: u32,
}

impl Cor20Header {
    /// Reads the header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for short input and [`crate::Error::Malformed`]
    /// if `cb` or the metadata location is invalid.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < COR20_HEADER_SIZE {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb as usize != COR20_HEADER_SIZE {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        }

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags: parser.read_le::<u32>()?,
            entry_point_token: parser.read_le::<u32>()?,
        })
    }
}
