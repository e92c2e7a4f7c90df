//! CLI entrypoint for `cargo-fixturegen`.

use std::io::Write;
use std::process::ExitCode;

use cargo_fixturegen::{Args, CliError, Outcome, cli, execute, logging, metadata};
use clap::Parser;

fn main() -> ExitCode {
    let args = Args::parse_from(cli::normalise_args(std::env::args_os()));
    if let Err(err) = logging::init(args.log_level.as_deref()) {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "cargo-fixturegen: {err}").ok();
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "cargo fixturegen failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Outcome, CliError> {
    let cargo = metadata::load_metadata()?;
    let selection = metadata::select_package(&cargo, args.package.as_deref())?;
    let settings = metadata::Settings::resolve(args, &selection);
    let mut stdout = std::io::stdout().lock();
    execute(args, &settings, &mut stdout)
}
