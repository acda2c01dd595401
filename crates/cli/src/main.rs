use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};

mod printer;
mod scan;

use btrdex_runtime::logging;
use scan::ScanArgs;

#[derive(Debug, Parser)]
#[command(
    name = "btrdex",
    version,
    about = "Inventory file metadata under a directory as JSON or CSV",
    after_help = "Examples:\n  btrdex /home > files.json\n  btrdex -f csv /home > files.csv"
)]
pub struct Cli {
    #[command(flatten)]
    pub scan: ScanArgs,
}

/// Help and version requests succeed; every other parse failure is a usage
/// error with exit status 1.
fn parse_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_code(e.kind()));
        }
    };

    scan::run(cli.scan)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
