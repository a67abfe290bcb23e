//! Solve command handler: ingests a catalog directory and runs the engine.

use course_sat::config::Config;
use course_sat::core::engine;
use std::path::{Path, PathBuf};

/// Run the solve subcommand.
///
/// Resolves the catalog directory from `--catalog`, falling back to
/// `config.solve.catalog_dir`, then ingests and solves it. Prints the
/// decoded plan (or "UNSATISFIABLE") to stdout and returns the process
/// exit code: 0 on any successful run, nonzero on `IngestionError` or
/// `CompileError`.
pub fn run(catalog: Option<PathBuf>, solver: Option<String>, config: &Config) -> i32 {
    let mut effective_config = config.clone();
    if let Some(solver) = solver {
        effective_config.solve.solver = solver;
    }

    let catalog_dir: PathBuf = catalog.unwrap_or_else(|| PathBuf::from(&effective_config.solve.catalog_dir));
    if catalog_dir.as_os_str().is_empty() {
        eprintln!("✗ No catalog directory given (pass --catalog or set solve.catalog_dir)");
        return 1;
    }

    run_on(&catalog_dir)
}

fn run_on(catalog_dir: &Path) -> i32 {
    match engine::solve_from_dir(catalog_dir) {
        Ok(outcome) => {
            match outcome.plan {
                Some(plan) => {
                    println!("SATISFIABLE");
                    for (student, student_plan) in &plan {
                        println!("  {student}:");
                        for (term, sections) in student_plan {
                            println!("    {term}: {}", sections.join(", "));
                        }
                    }
                }
                None => println!("UNSATISFIABLE"),
            }
            if !outcome.diagnostics.is_empty() {
                println!(
                    "({} diagnostic(s) logged; see --log-level debug)",
                    outcome.diagnostics.len()
                );
            }
            0
        }
        Err(e) => {
            eprintln!("✗ {e}");
            1
        }
    }
}
