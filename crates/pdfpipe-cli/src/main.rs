// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pdfpipe — assemble a PDF from pages of other PDFs.
//
// Entry point. Initialises logging, validates paths, loads the inputs, runs
// the selection/rotation pipeline, and saves the output. Nothing is written
// unless every step succeeds.

mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfpipe_core::error::Result;
use pdfpipe_core::human_errors::humanize_error;
use pdfpipe_core::pipeline::{self, Plan};
use pdfpipe_core::PipeConfig;
use pdfpipe_document::{PdfStore, paths};
use tracing::info;

use cli::Cli;

/// What a successful invocation did.
#[derive(Debug)]
enum Outcome {
    Saved { path: PathBuf, pages: usize },
    Planned(Plan),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(Outcome::Saved { path, pages }) => {
            info!(pages, "Done");
            println!("Saved output file to: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Planned(plan)) => match print_plan(&plan, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => report(&err),
        },
        Err(err) => report(&err),
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let mut config = match &cli.config {
        Some(path) => PipeConfig::load(path)?,
        None => PipeConfig::default(),
    };
    cli.apply_to(&mut config);

    if !cli.dry_run {
        paths::validate_output(&cli.output, config.overwrite)?;
    }
    for input in &cli.inputs {
        paths::validate_input(input)?;
    }

    let mut store = PdfStore::open(&cli.inputs, &config)?;

    if cli.dry_run {
        let plan = pipeline::plan(&store, &cli.structure, &cli.rotate)?;
        return Ok(Outcome::Planned(plan));
    }

    let summary = pipeline::run(&mut store, &cli.structure, &cli.rotate)?;
    info!(
        pages = summary.output_pages,
        rotated = summary.rotated_pages,
        "Pipeline finished"
    );

    store.output_mut().save(&cli.output)?;
    let path = std::path::absolute(&cli.output).unwrap_or_else(|_| cli.output.clone());
    Ok(Outcome::Saved {
        path,
        pages: summary.output_pages,
    })
}

fn print_plan(plan: &Plan, json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, plan)?;
        writeln!(out)?;
        return Ok(());
    }
    for (index, page) in plan.pages.iter().enumerate() {
        match plan.rotations.get(index) {
            Some(rotation) => writeln!(out, "{:>4}  {}  +{}", index + 1, page, rotation)?,
            None => writeln!(out, "{:>4}  {}", index + 1, page)?,
        }
    }
    Ok(())
}

fn report(err: &pdfpipe_core::PdfPipeError) -> ExitCode {
    let human = humanize_error(err);
    eprintln!("{}", human.message);
    eprintln!("  {}", human.suggestion);
    ExitCode::FAILURE
}
