//! Metadata streams (ECMA-335 II.24.2.2).
//!
//! Type synthesis reads three of the five streams: the compressed tables (`#~`), the
//! identifier heap (`#Strings`) and the signature heap (`#Blob`). `#GUID` and `#US` are
//! recognized in the stream directory but never dereferenced.

mod blob;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
