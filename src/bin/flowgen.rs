#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use flowgen::cli::args::CliArgs;
use flowgen::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // FLOWGEN_LOG / RUST_LOG enable tracing; see src/tracing_config.rs.
    flowgen::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let translations = driver::run(&args)?;

    let color = !args.no_color && std::io::stderr().is_terminal();
    let mut reporter = Reporter::new(color);
    for translation in &translations {
        if args.stdout {
            print!("{}", translation.result.text);
        }
        let diagnostics = &translation.result.diagnostics;
        if args.quiet || diagnostics.is_empty() {
            continue;
        }
        if args.json {
            eprintln!("{}", Reporter::render_json(diagnostics)?);
        } else {
            eprintln!("{}", reporter.render(diagnostics));
        }
    }
    Ok(())
}
