use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the flowgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "flowgen",
    version,
    about = "Translate TypeScript declaration files into Flow library definitions"
)]
pub struct CliArgs {
    /// Declaration files, or directories to search for `.d.ts`/`.ts` files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Write the translation of a single input to this file.
    #[arg(short = 'o', long = "output-file", conflicts_with = "output_dir")]
    pub output_file: Option<PathBuf>,

    /// Write every translation into this directory instead of next to its input.
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Print translations to stdout instead of writing files.
    #[arg(long, conflicts_with_all = ["output_file", "output_dir"])]
    pub stdout: bool,

    /// Load options from a JSON file (camelCase keys).
    #[arg(long)]
    pub config: Option<PathBuf>,

    // ==================== Output Style ====================
    /// Emit interfaces as exact object type aliases.
    #[arg(long = "interface-records")]
    pub interface_records: bool,

    /// Emit exact object types by default.
    #[arg(long = "no-inexact")]
    pub no_inexact: bool,

    /// Wrap each file in `declare module '<NAME>'`.
    #[arg(long = "as-module", value_name = "NAME")]
    pub as_module: Option<String>,

    /// Prefix each output with `// @flow`.
    #[arg(long = "add-flow-header")]
    pub add_flow_header: bool,

    /// Do not print diagnostics.
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print diagnostics as JSON, one object per line.
    #[arg(long)]
    pub json: bool,

    /// Force colored diagnostics off.
    #[arg(long = "no-color")]
    pub no_color: bool,
}
