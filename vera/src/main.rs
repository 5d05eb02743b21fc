#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};

use vera_parse::parse_source;
use vera_verify::{verify_exact, verify_interval, VerifyError};

#[derive(Parser, Debug)]
#[command(name = "vera", version, about = "Path-sensitive verifier for assert-terminated programs")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Verify that a program's trailing assert holds on every path
    Check {
        /// Program file to verify
        path: PathBuf,

        /// Abstraction to verify with
        #[arg(long, value_enum, default_value_t = StrategyChoice::Interval)]
        strategy: StrategyChoice,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyChoice {
    /// Interval domain with comparison-as-refinement (no solver needed)
    Interval,
    /// Exact polynomial domain backed by an SMT feasibility check
    Exact,
    /// Run both and require agreement
    Both,
}

fn main() -> miette::Result<ExitCode> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Check { path, strategy } => {
            let src = fs::read_to_string(&path)
                .into_diagnostic()
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            let program = parse_source(&src)?;

            let mut all_verified = true;
            if matches!(strategy, StrategyChoice::Interval | StrategyChoice::Both) {
                all_verified &= report("interval", verify_interval(&program))?;
            }
            if matches!(strategy, StrategyChoice::Exact | StrategyChoice::Both) {
                all_verified &= report("exact", verify_exact(&program))?;
            }

            if all_verified {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn report(label: &str, verdict: Result<bool, VerifyError>) -> miette::Result<bool> {
    match verdict {
        Ok(true) => {
            println!("{label}: verified");
            Ok(true)
        }
        Ok(false) => {
            println!("{label}: NOT verified");
            Ok(false)
        }
        Err(err) => Err(err.into()),
    }
}
