use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// Names a stream header may carry in an image with compressed tables.
const VALID_STREAM_NAMES: [&str; 5] = ["#Strings", "#US", "#Blob", "#GUID", "#~"];

/// One entry of the metadata root's stream directory.
pub struct StreamHeader {
    /// Offset of the stream relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Stream name, e.g. `#~`
    pub name: String,
}

impl StreamHeader {
    /// Reads a stream header from the start of `data`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an unknown stream name, including the
    /// uncompressed `#-` table stream which is not supported.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name = data[8..]
            .iter()
            .take(32)
            .take_while(|byte| **byte != 0)
            .map(|byte| char::from(*byte))
            .collect::<String>();

        if !VALID_STREAM_NAMES.contains(&name.as_str()) {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x23, 0x7E, 0x00,
        ];

        let parsed_header = StreamHeader::from(&header_bytes).unwrap();

        assert_eq!(parsed_header.offset, 0x6C);
        assert_eq!(parsed_header.size, 0x45A4);
        assert_eq!(parsed_header.name, "#~");
    }

    #[test]
    fn uncompressed_tables_rejected() {
        #[rustfmt::skip]
        let header_bytes = [
            0x6C, 0x00, 0x00, 0x00,
            0xA4, 0x45, 0x00, 0x00,
            0x23, 0x2D, 0x00,
        ];

        assert!(StreamHeader::from(&header_bytes).is_err());
    }
}
