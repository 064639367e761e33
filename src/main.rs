use clap::Parser;
use formshot::app::App;
use formshot::capture::FrameRasterizer;
use formshot::clipboard::SystemClipboard;
use formshot::config::{AppConfig, ConfigOverrides};
use formshot::error::AppError;
use formshot::terminal::{Terminal, TerminalEvent};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "formshot", version, about = "Capture a filled-in form as a base64 PNG")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Show the password and confirmation fields.
    #[arg(long)]
    with_password: bool,

    /// Prefix applied to every style class.
    #[arg(long)]
    class_prefix: Option<String>,

    /// Pixel scale of the captured image.
    #[arg(long)]
    scale: Option<u32>,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            with_password: self.with_password,
            class_prefix: self.class_prefix.clone(),
            scale: self.scale,
            log_file: self.log_file.clone(),
        }
    }
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .apply(cli.overrides())?;

    if let Some(path) = &config.log_file {
        init_logging(path)?;
    }
    tracing::info!(variant = ?config.variant, "starting");

    let mut app = App::new(
        &config,
        FrameRasterizer::new(config.capture),
        SystemClipboard::new(),
    )?;

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let result = event_loop(&mut terminal, &mut app);
    terminal.leave()?;

    result.map_err(AppError::from)
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::Logging(format!("{}: {e}", path.display())))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formshot=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn event_loop(
    terminal: &mut Terminal,
    app: &mut App<FrameRasterizer, SystemClipboard>,
) -> std::io::Result<()> {
    let mut render_requested = true;

    loop {
        if terminal.poll(Duration::from_millis(100))? {
            match terminal.read_event()? {
                Some(TerminalEvent::Key(key_event)) => {
                    app.handle_key(key_event);
                    render_requested = true;
                }
                Some(TerminalEvent::Resize(size)) => {
                    app.resize(size);
                    render_requested = true;
                }
                None => {}
            }
        }

        if app.should_exit() {
            break;
        }

        if render_requested {
            app.render(terminal)?;
            render_requested = false;
        }

        // Runs after the disabled submit button is on screen.
        if app.has_pending() {
            app.run_pending();
            render_requested = true;
        }
    }

    Ok(())
}
