//! Shared input loading for commands

use kubeweave_registry::{ContextRegistry, RegistryBuilder, RegistryFile};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::fs;
use std::path::PathBuf;

/// Assemble the effective registry: the builtin table extended by any
/// user-supplied files
pub fn load_registry(paths: &[PathBuf]) -> Result<ContextRegistry> {
    let mut builder = RegistryBuilder::with_builtin();
    for path in paths {
        let file = RegistryFile::load(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to load registry file {}", path.display()))?;
        builder = builder.extend(file);
    }
    builder.finish().into_diagnostic()
}

/// Read each source file alongside its display name
pub fn read_sources(paths: &[PathBuf]) -> Result<Vec<(String, String)>> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        sources.push((path.display().to_string(), text));
    }
    Ok(sources)
}
