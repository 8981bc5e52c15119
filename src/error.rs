use std::path::PathBuf;

use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into two groups. Reader errors describe why an assembly could not be
/// turned into a [`crate::metadata::typesystem::CilModule`]. Pipeline errors describe why a
/// single input or a single type could not be synthesized; each of them is isolated to the
/// narrowest scope by the orchestrator.
///
/// # Error Categories
///
/// ## Reader Errors
/// - [`Error::Malformed`] - Corrupted or invalid file structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond file boundaries
/// - [`Error::NotSupported`] - Unsupported file format or feature
/// - [`Error::Empty`] - Empty input provided
/// - [`Error::RecursionLimit`] - Signature nesting too deep
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::GoblinErr`] - PE parsing errors from goblin crate
///
/// ## Pipeline Errors
/// - [`Error::InvalidInput`] - Input path missing or with the wrong extension
/// - [`Error::MetadataLoad`] - An input could not be loaded as a module
/// - [`Error::Decompile`] - Source reconstruction failed for one type
/// - [`Error::Config`] / [`Error::TomlErr`] - Configuration could not be used
///
/// # Examples
///
/// ```rust,no_run
/// use dotscribe::{Error, metadata::typesystem::CilModule};
/// use std::path::Path;
///
/// match CilModule::from_file(Path::new("Assembly-CSharp.dll")) {
///     Ok(module) => println!("{} types", module.types.len()),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed file: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The file is damaged and could not be parsed.
    ///
    /// Includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// This file type is not supported.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// Nested signature types exceeded the supported depth.
    #[error("Reached the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Error from the goblin crate during PE parsing.
    #[error("{0}")]
    GoblinErr(#[from] goblin::error::Error),

    /// The input path does not name an existing file with the expected extension.
    #[error("Invalid input '{}': {reason}", path.display())]
    InvalidInput {
        /// The rejected path
        path: PathBuf,
        /// Why the path was rejected
        reason: String,
    },

    /// The input exists but its metadata could not be loaded.
    #[error("Failed to load metadata from '{}': {source}", path.display())]
    MetadataLoad {
        /// The input that failed to load
        path: PathBuf,
        /// The underlying reader error
        source: Box<Error>,
    },

    /// Source reconstruction failed for a single type.
    ///
    /// The message is what ends up in the knowledge-base artifact, so it is
    /// kept free of the type name.
    #[error("{message}")]
    Decompile {
        /// Full name of the type that failed
        type_name: String,
        /// Failure reason reported by the decompiler
        message: String,
    },

    /// Configuration values that parse but cannot be used.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for [`crate::Config`].
    #[error("{0}")]
    TomlErr(#[from] toml::de::Error),
}
