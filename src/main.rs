use color_print::ceprintln;
use edgecli::{
    cli::{execute_command, run_interruptible},
    commands::{build_cli, params::PARAMETER_VERBOSE},
    exit_codes::EdgeExitCode,
    validation::RuleSet,
};
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

/// Initialize logging. `RUST_LOG` wins; otherwise `--verbose` selects debug.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();
    setup_tracing(matches.get_flag(PARAMETER_VERBOSE));

    // Built once and only borrowed by the commands
    let rules = RuleSet::standard();

    let result =
        run_interruptible(execute_command(&matches, &rules), tokio::signal::ctrl_c()).await;

    let code = match result {
        Ok(message) => {
            println!("{}", message);
            EdgeExitCode::Success
        }
        Err(e) => {
            ceprintln!("<r>ERROR:</r> {}", e);
            e.exit_code()
        }
    };

    debug!("Exiting with {} ({})", code.code(), code.message());
    ::std::process::exit(code.code());
}
