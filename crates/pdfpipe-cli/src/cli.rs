// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use pdfpipe_core::PipeConfig;

const STRUCTURE_HELP: &str = "\
Document/page structure. Documents and pages count from 1.

EXAMPLE 1:  -s 1 2
  All pages of first file, all pages of second file. This is the default behaviour.
EXAMPLE 2:  -s 2:1,3 1:3 3:1-4
  Only first and third page of second file, only third page of first file,
  pages 1-4 of third file.
EXAMPLE 3:  -s 1:3,2,4 2 2 3:1,1
  Third, second and fourth page of first file, two times all pages of second
  file, two times the first page of the third file.
EXAMPLE 4:  -s 2:5 1:5-1,7
  Fifth page of second file, pages 5-1 (reverse order) and page 7 of first file.";

const ROTATE_HELP: &str = "\
Rotation of output pages, in degrees (0, 90, 180 or 270).

EXAMPLE 1:  -r 90
  Rotate every output page by 90 degrees.
EXAMPLE 2:  -r 1-4,7:180 8-12:270
  Output pages 1-4 and 7 by 180 degrees, pages 8-12 by 270 degrees.
  Later assignments win where pages overlap.";

#[derive(Debug, Parser)]
#[command(name = "pdfpipe")]
#[command(version)]
#[command(about = "Assemble a PDF from selected, reordered and rotated pages of other PDFs", long_about = None)]
pub struct Cli {
    /// Input files, e.g: -i file1.pdf file2.pdf
    #[arg(short, long = "input", value_name = "FILES", num_args = 1.., required = true)]
    pub inputs: Vec<PathBuf>,

    /// Document/page structure, e.g: -s 2:1,3 1:5-1
    #[arg(short, long, value_name = "TOKENS", num_args = 1.., long_help = STRUCTURE_HELP)]
    pub structure: Vec<String>,

    /// Page rotation, e.g: -r 90 or -r 1-4:180
    #[arg(short, long, value_name = "TOKENS", num_args = 1.., long_help = ROTATE_HELP)]
    pub rotate: Vec<String>,

    /// Output file, e.g: -o output.pdf
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,

    /// Force creating file, even if output file already exists
    #[arg(short, long)]
    pub force: bool,

    /// Title of the PDF file (not file name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Author of the PDF file
    #[arg(short, long)]
    pub author: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved pages and rotations instead of writing the output
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print the plan as JSON
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Fold command-line overrides into a loaded (or default) configuration.
    pub fn apply_to(&self, config: &mut PipeConfig) {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        if let Some(author) = &self.author {
            config.author = author.clone();
        }
        config.overwrite |= self.force;
    }

    /// Default tracing filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
