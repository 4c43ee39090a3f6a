mod app_state;
mod cli;
mod headless;
mod mount;

use std::path::PathBuf;
use std::process::ExitCode;

use marble_common::MarbleError;
use marble_config::MarbleConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use mount::MountTarget;

const DEFAULT_DIRECTIVE: &str = "marble=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Marble crashed ---");
        if let Some(location) = info.location() {
            eprintln!("at {}:{}", location.file(), location.line());
        }
        eprintln!("----------------------\n");
        default_hook(info);
    }));
}

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|e| {
        eprintln!("invalid log directive `{directive}` ({e}), using {DEFAULT_DIRECTIVE}");
        DEFAULT_DIRECTIVE.parse().unwrap()
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn run_window(config: MarbleConfig, config_path: PathBuf) -> Result<(), MarbleError> {
    let event_loop = EventLoop::new()
        .map_err(|e| MarbleError::Other(format!("failed to create event loop: {e}")))?;
    let mut app = app_state::MarbleApp::new(config, config_path);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| MarbleError::Other(format!("event loop error: {e}")))?;

    match app.into_failure() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    install_panic_hook();

    let args = cli::parse();
    let loaded = marble_config::load_config(args.config.as_deref());

    // --log-level, then [logging].level, then the default.
    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => cli::log_directive(level),
        (None, Ok((_, config))) => config.logging.directive(),
        (None, Err(_)) => DEFAULT_DIRECTIVE.to_string(),
    };
    init_logging(&directive);

    tracing::info!("Marble v{} starting...", env!("CARGO_PKG_VERSION"));

    let (config_path, config) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Config loaded from {}", config_path.display());

    let target = match args.headless {
        Some(path) => MountTarget::Png(path),
        None => MountTarget::resolve(&config.window.mount),
    };

    let result = match target.png_path() {
        Some(path) => headless::run(&config, path, args.frames),
        None => run_window(config, config_path),
    };

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Marble failed: {e}");
            ExitCode::FAILURE
        }
    }
}
