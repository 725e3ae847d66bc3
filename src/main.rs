//! pdftray - Stage PDF files and merge them into a single document.
//!
//! An interactive session: stage files with `add`, inspect with `list`,
//! drop entries with `remove`, then `merge` to save `merged.pdf` into the
//! download directory. `--merge` runs a single staged merge and exits.

mod cli;

use std::process;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{Cli, Command};
use pdftray::config::Config;
use pdftray::controller::MergeController;
use pdftray::error::PdfTrayError;
use pdftray::io::picker::pick_files;
use pdftray::io::DirectoryDelivery;
use pdftray::merge::DocumentAssembler;
use pdftray::output::{format_file_size, OutputFormatter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    pdftray::logging::init(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfTrayError> {
    let config = cli.to_config();
    config
        .validate()
        .map_err(|e| PdfTrayError::invalid_config(e.to_string()))?;

    let formatter = OutputFormatter::from_config(&config);

    let delivery = DirectoryDelivery::new(&config.download_dir);
    delivery.can_write().await?;

    let mut controller = MergeController::new();

    if !cli.inputs.is_empty() {
        stage(&mut controller, &cli.inputs, &formatter);
    }

    if cli.merge {
        // Batch mode: one attempt, errors drive the exit code.
        let report = merge_once(&mut controller, &delivery, &formatter).await?;
        report_success(&report, &config, &formatter);
        return Ok(());
    }

    if formatter.should_print() {
        formatter.info(&format!("{} v{}", pdftray::NAME, pdftray::VERSION));
        formatter.info(&format!(
            "Merged files are saved to: {}",
            delivery.dir().display()
        ));
        formatter.info("Type 'help' for commands.");
        formatter.blank_line();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        formatter.prompt("pdftray> ");

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Err(message) => formatter.warning(&message),
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_help(&formatter),
            Ok(Command::Add(inputs)) => stage(&mut controller, &inputs, &formatter),
            Ok(Command::Remove(position)) => remove(&mut controller, position, &formatter),
            Ok(Command::List) => show_selection(&controller, &formatter).await,
            Ok(Command::Clear) => {
                let dropped = controller.file_count();
                controller.clear_files();
                formatter.info(&format!("Dropped {dropped} staged file(s)"));
            }
            Ok(Command::Merge) => match merge_once(&mut controller, &delivery, &formatter).await {
                Ok(report) => report_success(&report, &config, &formatter),
                Err(err) if err.is_validation() => formatter.warning(&err.to_string()),
                Err(err) => {
                    // Generic notice; the details went to the diagnostics log.
                    formatter.error("Error merging PDFs. Please try again.");
                    formatter.debug(&err.to_string());
                }
            },
        }
    }

    Ok(())
}

/// Expand inputs and stage the result.
fn stage(controller: &mut MergeController, inputs: &[String], formatter: &OutputFormatter) {
    match pick_files(inputs) {
        Ok(picked) => {
            if !picked.skipped.is_empty() {
                formatter.warning(&format!(
                    "Skipped {} non-PDF file(s)",
                    picked.skipped.len()
                ));
            }

            if picked.files.is_empty() {
                formatter.warning("No PDF files matched");
                return;
            }

            let staged = picked.files.len();
            controller.add_files(picked.files);
            formatter.info(&format!(
                "Staged {staged} file(s), {} total",
                controller.file_count()
            ));
        }
        Err(err) => formatter.warning(&err.to_string()),
    }
}

/// Remove the file at a 1-based position.
fn remove(controller: &mut MergeController, position: usize, formatter: &OutputFormatter) {
    match controller.remove_file(position - 1) {
        Some(removed) => formatter.info(&format!("Removed {}", removed.name())),
        None => formatter.warning(&format!("No staged file at position {position}")),
    }
}

/// Display the staged files with their sizes.
async fn show_selection(controller: &MergeController, formatter: &OutputFormatter) {
    let selection = controller.selection();

    if selection.is_empty() {
        formatter.info("No files staged.");
        return;
    }

    let sizes = selection.sizes().await;
    for (index, (candidate, size)) in selection.iter().zip(sizes).enumerate() {
        let size = size.map(format_file_size).unwrap_or_else(|| "?".to_string());
        formatter.info(&format!("{}. {} ({size})", index + 1, candidate.name()));
    }
}

/// Run one merge attempt with a fresh backend.
async fn merge_once(
    controller: &mut MergeController,
    delivery: &DirectoryDelivery,
    formatter: &OutputFormatter,
) -> Result<pdftray::MergeReport, PdfTrayError> {
    formatter.info(&format!("Merging {} PDF files...", controller.file_count()));

    let mut backend = DocumentAssembler::new();
    controller.merge_all(&mut backend, delivery).await
}

/// Report a completed merge.
fn report_success(
    report: &pdftray::MergeReport,
    config: &Config,
    formatter: &OutputFormatter,
) {
    formatter.success(&format!(
        "Successfully created {} ({})",
        report.output_path.display(),
        format_file_size(report.output_bytes)
    ));

    formatter.detail("Files merged", &report.files_merged.to_string());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", report.merge_time.as_secs_f64()),
    );

    if config.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{json}"),
            Err(err) => formatter.error(&format!("Failed to encode report: {err}")),
        }
    }
}

/// Show the command reference.
fn print_help(formatter: &OutputFormatter) {
    formatter.info("Commands:");
    formatter.info("  add <file|glob|dir>...   stage PDF files");
    formatter.info("  list                     show staged files");
    formatter.info("  remove <number>          unstage one file");
    formatter.info("  clear                    unstage everything");
    formatter.info("  merge                    merge staged files into merged.pdf");
    formatter.info("  quit                     end the session");
}
