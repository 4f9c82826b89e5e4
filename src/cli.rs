//! CLI argument definitions and command execution
//!
//! Rendered output goes to stdout (or `--output`); progress and per-file
//! diagnostics go to stderr through tracing.

use crate::config::ExtractorConfig;
use crate::directory::DirectoryInformation;
use crate::error::{ExtractorError, Result};
use crate::language::DEFAULT_EXTENSION;
use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Dump class, interface and trait metadata from PHP sources without running them
#[derive(Parser, Debug)]
#[command(name = "php-class-dumper")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dump class information for every PHP file below a directory
    Directory(DirectoryArgs),

    /// List the non-private property names of classes and traits
    Properties(PropertiesArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory to scan
    pub directory: PathBuf,

    /// Output format: json, php or serialize
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extension of the files to scan
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Visit files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Do not read .classdumpignore from the scanned directory
    #[arg(long)]
    pub no_ignore: bool,
}

impl OutputArgs {
    pub fn config(&self) -> ExtractorConfig {
        ExtractorConfig::new()
            .with_extension(&self.extension)
            .with_parallel(self.parallel)
            .with_ignore_file(!self.no_ignore)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }
}

#[derive(Args, Debug, Clone)]
pub struct DirectoryArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Dump interfaces and traits too, as {classes, interfaces, traits}
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PropertiesArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    /// Run the selected command and write its output.
    pub fn execute(&self) -> Result<()> {
        let (args, rendered) = match &self.command {
            Commands::Directory(directory) => (&directory.output, render_directory(directory)?),
            Commands::Properties(properties) => {
                (&properties.output, render_properties(properties)?)
            }
        };
        write_output(args.output.as_deref(), &rendered)
    }
}

fn render_directory(args: &DirectoryArgs) -> Result<String> {
    // Validate the format before doing any work
    let format = args.output.output_format()?;
    let extraction =
        DirectoryInformation::with_config(&args.output.directory, args.output.config()).collect()?;

    if args.all {
        format.render(&extraction.information())
    } else {
        format.render(&extraction.class_information())
    }
}

fn render_properties(args: &PropertiesArgs) -> Result<String> {
    let format = args.output.output_format()?;
    let extraction =
        DirectoryInformation::with_config(&args.output.directory, args.output.config()).collect()?;

    format.render_list(&extraction.public_property_names())
}

fn write_output(path: Option<&Path>, rendered: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered).map_err(|e| ExtractorError::io(path, e))?;
            info!("Wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(|e| ExtractorError::io("<stdout>", e))?;
        }
    }
    Ok(())
}
