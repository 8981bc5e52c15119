use std::ffi::CStr;

use crate::{Error::OutOfBounds, Result};

/// The `#Strings` heap: null-terminated UTF-8 identifiers addressed by byte offset.
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wraps the heap data; the first byte must be the empty string.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the heap is empty or does not start with 0.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #Strings heap is empty"));
        }

        Ok(Strings { data })
    }

    /// Returns the identifier starting at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] past the heap and [`crate::Error::Malformed`]
    /// for unterminated or non-UTF-8 data.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        CStr::from_bytes_until_nul(&self.data[index..])
            .ok()
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| malformed_error!("Invalid string at index - {}", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        #[rustfmt::skip]
        let data = [
            0x00,
            0x3c, 0x4d, 0x6f, 0x64, 0x75, 0x6c, 0x65, 0x3e, 0x00,
            0x50, 0x6c, 0x61, 0x79, 0x65, 0x72, 0x00,
            0x47, 0x61, 0x6d, 0x65, 0x00,
        ];

        let strings = Strings::from(&data).unwrap();

        assert_eq!(strings.get(0).unwrap(), "");
        assert_eq!(strings.get(1).unwrap(), "<Module>");
        assert_eq!(strings.get(10).unwrap(), "Player");
        assert_eq!(strings.get(13).unwrap(), "yer");
        assert_eq!(strings.get(17).unwrap(), "Game");
        assert!(strings.get(data.len()).is_err());
    }

    #[test]
    fn invalid() {
        assert!(Strings::from(&[]).is_err());
        assert!(Strings::from(&[0x41, 0x00]).is_err());

        let strings = Strings::from(&[0x00, 0x41, 0x42]).unwrap();
        assert!(strings.get(1).is_err());
    }
}
