//! Check command - validate registry files and node sources

use console::style;
use kubeweave_engine::{load_trees, Compiler};
use kubeweave_registry::{RegistryBuilder, RegistryFile};
use miette::Result;
use std::path::PathBuf;

use crate::exit_codes;
use crate::loading::read_sources;

pub fn run(sources: &[PathBuf], registries: &[PathBuf], strict: bool) -> Result<()> {
    println!(
        "{} Checking {} source file(s)",
        style("→").blue(),
        sources.len()
    );

    let mut errors = 0usize;
    let mut warnings = 0usize;

    // Registry assembly comes first; sources cannot be checked without it
    let mut builder = RegistryBuilder::with_builtin();
    for path in registries {
        match RegistryFile::load(path) {
            Ok(file) => {
                println!("  {} {} parsed", style("✓").green(), path.display());
                builder = builder.extend(file);
            }
            Err(e) => {
                println!("  {} {}: {}", style("✗").red(), path.display(), e);
                errors += 1;
            }
        }
    }

    let registry = match builder.finish() {
        Ok(registry) => {
            println!(
                "  {} registry is consistent ({} resource kind(s), {} context(s))",
                style("✓").green(),
                registry.resource_count(),
                registry.context_count()
            );
            registry
        }
        Err(e) => {
            println!("  {} registry: {}", style("✗").red(), e);
            println!();
            println!(
                "{} Check failed with {} error(s)",
                style("✗").red().bold(),
                errors + 1
            );
            std::process::exit(exit_codes::ERROR);
        }
    };

    let compiler = Compiler::new(&registry);

    for (name, text) in read_sources(sources)? {
        match load_trees(&registry, &text) {
            Ok(trees) => {
                println!(
                    "  {} {} declares {} root(s)",
                    style("✓").green(),
                    name,
                    trees.len()
                );
                for tree in &trees {
                    match compiler.compile(tree) {
                        Ok(compiled) => {
                            for warning in &compiled.warnings {
                                println!("    {} {}", style("⚠").yellow(), warning);
                                warnings += 1;
                            }
                        }
                        Err(e) => {
                            println!(
                                "    {} '{}' failed to compile:",
                                style("✗").red(),
                                tree.id()
                            );
                            println!("{:?}", miette::Report::new(e));
                            errors += 1;
                        }
                    }
                }
            }
            Err(e) => {
                println!("  {} {} is invalid:", style("✗").red(), name);
                println!("{:?}", miette::Report::new(e));
                errors += 1;
            }
        }
    }

    println!();
    if errors > 0 {
        println!(
            "{} Check failed with {} error(s) and {} warning(s)",
            style("✗").red().bold(),
            errors,
            warnings
        );
        std::process::exit(exit_codes::ERROR);
    } else if warnings > 0 && strict {
        println!(
            "{} Check failed: {} warning(s) promoted to errors by --strict",
            style("✗").red().bold(),
            warnings
        );
        std::process::exit(exit_codes::VALIDATION_ERROR);
    } else if warnings > 0 {
        println!(
            "{} Check passed with {} warning(s)",
            style("⚠").yellow().bold(),
            warnings
        );
    } else {
        println!("{} Check passed", style("✓").green().bold());
    }

    Ok(())
}
