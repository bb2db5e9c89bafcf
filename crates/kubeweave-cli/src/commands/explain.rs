//! Explain command - show how a kind is placed and what it accepts

use console::style;
use kubeweave_core::{Arity, Context, Disambiguator};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::loading::load_registry;

pub fn run(kind: &str, registries: &[PathBuf]) -> Result<()> {
    let registry = load_registry(registries)?;
    let id = registry.lookup(kind).into_diagnostic()?;

    println!("{}", style(id.as_str()).cyan().bold());
    println!("{}", style("=".repeat(id.as_str().len())).dim());
    println!();

    if let Some(meta) = registry.resource_meta(&id) {
        println!(
            "{}: {} {}",
            style("Resource root").bold(),
            meta.api_version,
            meta.kind
        );
    }

    let contexts = registry.resolve(&id);
    if contexts.is_empty() {
        println!(
            "{}: none (root-only, or placed with an explicit key)",
            style("Placements").bold()
        );
    } else {
        println!("{}:", style("Placements").bold());
        for context in contexts {
            println!("  - {}", describe(context));
        }
    }

    let children = registry.children_of(&id);
    if !children.is_empty() {
        println!();
        println!("{}:", style("Accepts children").bold());
        for (child, context) in children {
            println!("  - {} at {}", child, context.path);
        }
    }

    Ok(())
}

fn describe(context: &Context) -> String {
    let arity = match context.arity {
        Arity::Scalar => "scalar",
        Arity::List => "list",
    };
    let mut line = format!("under {} at {} ({arity})", context.parent, context.path);
    match &context.disambiguator {
        Some(Disambiguator::Alias { name, default }) => {
            line.push_str(&format!(", alias `{name}`"));
            if *default {
                line.push_str(" (default)");
            }
        }
        Some(Disambiguator::Flag { name, default }) => {
            line.push_str(&format!(", flag `{name}`"));
            if *default {
                line.push_str(" (default)");
            }
        }
        None => {}
    }
    line
}
