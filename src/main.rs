use color_eyre::Result;
use folio::cli::output::print_failure;
use folio::cli::{parse_args, run_cli_command, CliCommand, USAGE};
use folio::error::FolioError;
use folio::logging;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init_tracing();

    let command = parse_args(std::env::args());
    if let CliCommand::Invalid(message) = &command {
        print_failure(message, None);
        eprintln!();
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    if let Err(e) = run_cli_command(command) {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

fn report(err: &FolioError) {
    tracing::debug!("[{}] {}", err.error_code(), err);
    if let Some(ctx) = err.context() {
        tracing::debug!("context: {}", ctx.to_log_string());
    }
    print_failure(&err.user_message(), Some(err.recovery_hint()));
}
