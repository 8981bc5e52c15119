//! Metadata root header and stream directory (ECMA-335 II.24.2.1).
//!
//! The root starts with the `BSJB` signature, followed by a padded version string and the
//! list of stream headers that locate `#~`, `#Strings`, `#Blob`, `#GUID` and `#US`
//! relative to the root itself.

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// The `BSJB` signature at the start of every metadata root.
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The metadata root and its stream directory.
pub struct Root {
    /// Always [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version, usually 1
    pub major_version: u16,
    /// Minor version, usually 1
    pub minor_version: u16,
    /// Padded length of the version string
    pub length: u32,
    /// Runtime version string with its padding removed, e.g. `v4.0.30319`
    pub version: String,
    /// Reserved flags
    pub flags: u16,
    /// The stream headers in file order
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Reads the root from the start of the metadata blob.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a bad signature or stream directory and
    /// [`crate::Error::OutOfBounds`] if any header points past the data.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 36 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {}",
                signature
            ));
        }

        let version_length = read_le_at::<u32>(data, &mut 12)? as usize;
        let Some(version_end) = version_length.checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_length
            ));
        };
        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version = data[16..version_end]
            .iter()
            .take_while(|byte| **byte != 0)
            .map(|byte| char::from(*byte))
            .collect::<String>();

        let flags = read_le::<u16>(&data[version_end..])?;
        let stream_count = read_le_at::<u16>(data, &mut (version_end + 2))?;
        if stream_count == 0 || stream_count > 5 {
            // Must have streams, no duplicates, no more than 5 possible
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut stream_headers = Vec::with_capacity(stream_count as usize);
        let mut stream_offset = version_end + 4;
        for _ in 0..stream_count {
            if stream_offset > data.len() {
                return Err(OutOfBounds);
            }

            let stream = StreamHeader::from(&data[stream_offset..])?;
            match stream.offset.checked_add(stream.size) {
                Some(range) if range as usize <= data.len() => {}
                Some(_) => return Err(OutOfBounds),
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        stream.offset,
                        stream.size
                    ))
                }
            }

            if stream_headers
                .iter()
                .any(|existing: &StreamHeader| existing.name == stream.name)
            {
                return Err(malformed_error!("Duplicate stream - {}", stream.name));
            }

            let name_aligned = ((stream.name.len() + 1) + 3) & !3;
            stream_offset += 8 + name_aligned;

            stream_headers.push(stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            length: u32::try_from(version_length)
                .map_err(|_| malformed_error!("Version string length too large"))?,
            version,
            flags,
            stream_headers,
        })
    }

    /// Returns the header of the stream named `name`.
    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&StreamHeader> {
        self.stream_headers.iter().find(|stream| stream.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let header_bytes = [
            0x42, 0x53, 0x4A, 0x42,
            0x01, 0x00,
            0x01, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x00, 0x00,
            b'v', b'4', b'.', b'0', 0x00, 0x00, 0x00, 0x00,
            0x01, 0x00, // flags
            0x02, 0x00, // streams

            0x30, 0x00, 0x00, 0x00, // StreamHeader
            0x04, 0x00, 0x00, 0x00,
            0x23, 0x7E, 0x00, 0x00,

            0x34, 0x00, 0x00, 0x00, // StreamHeader
            0x04, 0x00, 0x00, 0x00,
            b'#', b'B', b'l', b'o', b'b', 0x00, 0x00, 0x00,

            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
        ];

        let root = Root::read(&header_bytes).unwrap();

        assert_eq!(root.signature, CIL_HEADER_MAGIC);
        assert_eq!(root.major_version, 1);
        assert_eq!(root.minor_version, 1);
        assert_eq!(root.length, 8);
        assert_eq!(root.version, "v4.0");
        assert_eq!(root.flags, 1);
        assert_eq!(root.stream_headers.len(), 2);
        assert_eq!(root.stream_headers[0].name, "#~");
        assert_eq!(root.stream_headers[0].offset, 0x30);
        assert_eq!(root.stream_headers[0].size, 4);
        assert_eq!(root.stream_headers[1].name, "#Blob");
        assert_eq!(root.stream_headers[1].size, 4);
        assert_eq!(root.stream("#Blob").unwrap().offset, 0x34);
        assert!(root.stream("#Strings").is_none());
    }

    #[test]
    fn bad_signature() {
        let mut header_bytes = [0u8; 40];
        header_bytes[0] = 0x42;
        assert!(matches!(
            Root::read(&header_bytes),
            Err(crate::Error::Malformed { .. })
        ));
    }
}
