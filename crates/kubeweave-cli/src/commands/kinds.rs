//! Kinds command - list registered type identities

use miette::Result;
use std::path::PathBuf;

use crate::loading::load_registry;

pub fn run(registries: &[PathBuf], resources_only: bool) -> Result<()> {
    let registry = load_registry(registries)?;

    if resources_only {
        for (id, meta) in registry.resources() {
            println!("{:<55} {:<20} {}", id, meta.api_version, meta.kind);
        }
    } else {
        for id in registry.identities() {
            println!("{id}");
        }
    }

    Ok(())
}
