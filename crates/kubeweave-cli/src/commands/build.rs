//! Build command - compile node sources into manifests

use console::style;
use kubeweave_engine::{emit, load_trees, Compiler};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::{Path, PathBuf};

use crate::exit_codes;
use crate::loading::{load_registry, read_sources};

pub fn run(
    sources: &[PathBuf],
    registries: &[PathBuf],
    output: Option<&Path>,
    json: bool,
    strict: bool,
    debug: bool,
) -> Result<()> {
    let registry = load_registry(registries)?;

    if debug {
        eprintln!(
            "{} Registry ready: {} resource kind(s), {} context(s)",
            style("DEBUG").dim(),
            registry.resource_count(),
            registry.context_count()
        );
    }

    let compiler = Compiler::new(&registry);
    let mut documents: Vec<(String, JsonValue)> = Vec::new();
    let mut warning_count = 0usize;

    for (name, text) in read_sources(sources)? {
        let trees = load_trees(&registry, &text).map_err(miette::Report::new)?;

        if debug {
            eprintln!("{} {}: {} root(s)", style("DEBUG").dim(), name, trees.len());
        }

        for (index, tree) in trees.iter().enumerate() {
            let compiled = compiler.compile(tree).map_err(miette::Report::new)?;

            for warning in &compiled.warnings {
                eprintln!("{} {}", style("⚠").yellow(), warning);
                warning_count += 1;
            }

            let header = if trees.len() > 1 {
                format!("{name} (document {index})")
            } else {
                name.clone()
            };
            documents.push((header, compiled.document));
        }
    }

    if strict && warning_count > 0 {
        eprintln!(
            "{} {} warning(s) promoted to errors by --strict",
            style("✗").red().bold(),
            warning_count
        );
        std::process::exit(exit_codes::VALIDATION_ERROR);
    }

    match output {
        Some(path) => {
            let rendered = if json {
                render_json(&documents)?
            } else {
                emit::to_yaml_stream(documents.iter().map(|(_, document)| document))
                    .into_diagnostic()?
            };
            fs::write(path, &rendered)
                .into_diagnostic()
                .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} wrote {} manifest(s) to {}",
                style("✓").green(),
                documents.len(),
                path.display()
            );
        }
        None if json => print!("{}", render_json(&documents)?),
        None => {
            for (header, document) in &documents {
                println!("---");
                println!("{}", style(format!("# Source: {header}")).dim());
                print!("{}", emit::to_yaml(document).into_diagnostic()?);
            }
        }
    }

    Ok(())
}

fn render_json(documents: &[(String, JsonValue)]) -> Result<String> {
    let text = match documents {
        [(_, single)] => emit::to_json_pretty(single),
        _ => {
            let all: Vec<JsonValue> = documents
                .iter()
                .map(|(_, document)| document.clone())
                .collect();
            emit::to_json_pretty(&JsonValue::Array(all))
        }
    }
    .into_diagnostic()?;
    Ok(text + "\n")
}
