//! Builds a [`CilModule`] from a PE image.
//!
//! Loading runs in three steps:
//! - locate the metadata through the CLR header and parse the root and its streams,
//! - read the raw rows of every table the model needs into a [`LoaderContext`],
//! - resolve names and signatures per `TypeDef` row and attach members.

mod context;
mod names;
mod typedef;

use crate::{
    file::File,
    metadata::{
        cor20header::Cor20Header,
        root::Root,
        streams::{Blob, StreamHeader, Strings, TablesHeader},
        typesystem::CilModule,
    },
    Result,
};

pub(crate) use context::LoaderContext;

/// Loads the module contained in `file`.
///
/// # Errors
/// Returns an error if the CLR header, the metadata root, a required stream or any
/// table row the model depends on is malformed.
pub(crate) fn load(file: &File) -> Result<CilModule> {
    let (clr_rva, clr_size) = file.clr()?;
    let clr_slice = file.data_slice(file.rva_to_offset(clr_rva)?, clr_size)?;

    let header = Cor20Header::read(clr_slice)?;

    let meta_root_offset = file.rva_to_offset(header.meta_data_rva as usize)?;
    let meta_root_slice = file.data_slice(meta_root_offset, header.meta_data_size as usize)?;

    let root = Root::read(meta_root_slice)?;
    log::debug!(
        "Metadata root {} with {} streams",
        root.version,
        root.stream_headers.len()
    );

    let tables_stream = required_stream(&root, meta_root_slice, "#~")?;
    let strings_stream = required_stream(&root, meta_root_slice, "#Strings")?;
    let blobs = match root.stream("#Blob") {
        Some(header) => Some(Blob::from(stream_slice(meta_root_slice, header)?)?),
        None => None,
    };

    let context = LoaderContext::new(
        TablesHeader::from(tables_stream)?,
        Strings::from(strings_stream)?,
        blobs,
    )?;

    let module = context.build_module()?;
    log::debug!("Loaded {} types from '{}'", module.types.len(), module.name);

    Ok(module)
}

fn required_stream<'a>(root: &Root, meta: &'a [u8], name: &str) -> Result<&'a [u8]> {
    match root.stream(name) {
        Some(header) => stream_slice(meta, header),
        None => Err(malformed_error!("Metadata has no {} stream", name)),
    }
}

fn stream_slice<'a>(meta: &'a [u8], header: &StreamHeader) -> Result<&'a [u8]> {
    let start = header.offset as usize;
    let Some(end) = start.checked_add(header.size as usize) else {
        return Err(malformed_error!(
            "Stream {} causes integer overflow - {} + {}",
            header.name,
            header.offset,
            header.size
        ));
    };

    meta.get(start..end).ok_or_else(|| {
        malformed_error!(
            "Stream {} exceeds the metadata - {}..{} of {}",
            header.name,
            start,
            end,
            meta.len()
        )
    })
}
