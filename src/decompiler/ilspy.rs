use std::{
    ffi::OsString,
    path::PathBuf,
    process::{Command, Output},
};

use crate::{
    config::DecompilerConfig,
    decompiler::Decompiler,
    metadata::typesystem::{CilModule, CilType},
    Error, Result,
};

/// Decompiles through the `ilspycmd` command line tool.
///
/// Each type is one process: `ilspycmd <assembly> -t <reflection name> -lv <version>`,
/// followed by any configured extra arguments. Standard output is the source text.
#[derive(Clone, Debug)]
pub struct IlSpyDecompiler {
    program: PathBuf,
    language_version: String,
    extra_args: Vec<String>,
}

impl IlSpyDecompiler {
    /// Creates a backend from the decompiler section of the configuration.
    #[must_use]
    pub fn new(config: &DecompilerConfig) -> Self {
        IlSpyDecompiler {
            program: config.program.clone(),
            language_version: config.language_version.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    /// Arguments passed to the tool for one type.
    #[must_use]
    pub fn arguments(&self, assembly: &std::path::Path, ty: &CilType) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            assembly.as_os_str().to_owned(),
            "-t".into(),
            ty.reflection_name.clone().into(),
            "-lv".into(),
            self.language_version.clone().into(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args
    }

    fn failure(ty: &CilType, message: String) -> Error {
        Error::Decompile {
            type_name: ty.full_name.clone(),
            message,
        }
    }

    fn collect(ty: &CilType, output: Output) -> Result<String> {
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or("no diagnostic output");

            return Err(Self::failure(
                ty,
                format!("ilspycmd exited with {}: {reason}", output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Decompiler for IlSpyDecompiler {
    fn name(&self) -> &str {
        "ilspy"
    }

    fn decompile(&self, module: &CilModule, ty: &CilType) -> Result<String> {
        let Some(assembly) = module.path.as_deref() else {
            return Err(Self::failure(
                ty,
                "module was not loaded from a file".to_string(),
            ));
        };

        log::debug!("{} {}", self.program.display(), ty.reflection_name);

        let output = Command::new(&self.program)
            .args(self.arguments(assembly, ty))
            .output()
            .map_err(|e| {
                Self::failure(
                    ty,
                    format!("failed to execute {}: {e}", self.program.display()),
                )
            })?;

        Self::collect(ty, output)
    }
}
