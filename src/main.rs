mod app;
mod command;
mod config;
mod consts;
mod game;
mod highscore;
mod options;
mod util;
mod warning;
use crate::app::App;
use crate::config::Config;
use crate::options::{Options, OptionsError};
use anyhow::Context;
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Environment variable from which the log filter is read
const LOG_ENV_VAR: &str = "ARCSNAKE_LOG";

const USAGE: &str = "\
Usage: arcsnake [<options>]

Play Snake in your terminal

Options:
  -c, --config <PATH>    Read configuration from the given file
  -g, --grid-size <N>    Play on an N×N board (2 to 40)
  -s, --speed <MS>       Start with MS milliseconds between moves (50 to 5000)
      --log-file <PATH>  Write log messages to the given file
  -h, --help             Display this help message and exit
  -V, --version          Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('g') | Arg::Long("grid-size") => {
                    args.grid_size = Some(parser.value()?.parse()?);
                }
                Arg::Short('s') | Arg::Long("speed") => {
                    args.speed = Some(Duration::from_millis(parser.value()?.parse()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    grid_size: Option<u16>,
    speed: Option<Duration>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    /// Start logging, load the configuration, and apply command-line
    /// overrides on top of it
    fn setup(self) -> anyhow::Result<App> {
        if let Some(ref path) = self.log_file {
            init_logging(path)?;
        }
        let config = self.load_config()?;
        let options = self.options(&config)?;
        let store = config.score_store();
        tracing::info!(
            grid_size = options.grid_size(),
            initial_speed = ?options.initial_speed(),
            ?store,
            "Starting arcsnake"
        );
        Ok(App::new(options, store))
    }

    /// Return the configured gameplay options with any command-line values
    /// taking precedence
    fn options(&self, config: &Config) -> Result<Options, OptionsError> {
        let mut options = config.game;
        if let Some(size) = self.grid_size {
            options = options.with_grid_size(size)?;
        }
        if let Some(speed) = self.speed {
            options = options.with_initial_speed(speed)?;
        }
        Ok(options)
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        if let Some(ref path) = self.config {
            return Config::load(path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()));
        }
        match Config::default_path() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Config::load(&path, true).with_context(|| {
                    format!("failed to load configuration from {}", path.display())
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Ok(Config::default())
            }
        }
    }
}

/// Send `tracing` events to the file at `path`.  The terminal belongs to the
/// game, so nothing is logged unless a file is given.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

/// Turn the terminal's reporting of focus gained/lost events on or off
fn set_focus_reporting<W: io::Write>(out: &mut W, enable: bool) -> io::Result<()> {
    if enable {
        crossterm::execute!(out, EnableFocusChange)
    } else {
        crossterm::execute!(out, DisableFocusChange)
    }
}

fn main() -> ExitCode {
    let args = match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Invocation::Version) => {
            println!("arcsnake {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("arcsnake: {e}");
            eprintln!("Run `arcsnake --help` for usage");
            return ExitCode::from(2);
        }
    };
    let app = match args.setup() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("arcsnake: {e:?}");
            return ExitCode::from(2);
        }
    };
    let terminal = ratatui::init();
    if let Err(e) = set_focus_reporting(&mut io::stdout(), true) {
        tracing::warn!(error = %e, "Failed to enable focus reporting");
    }
    let r = app.run(terminal);
    if let Err(e) = set_focus_reporting(&mut io::stdout(), false) {
        tracing::warn!(error = %e, "Failed to disable focus reporting");
    }
    ratatui::restore();
    if let Err(ref e) = r {
        tracing::error!(error = %e, "Terminal I/O failed");
    }
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
