//! Vericode interactive console

mod console;

use std::io;
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vericode_config::Settings;
use vericode_core::Vericode;

use console::Console;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "info";

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let vericode = Vericode::new(settings.secret);
    let stdin = io::stdin();
    let mut console = Console::new(&vericode, settings.params, stdin.lock(), io::stdout());

    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "console I/O failed");
            ExitCode::FAILURE
        }
    }
}
