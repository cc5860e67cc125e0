//! termfolio - a scripted portfolio console for your terminal
//!
//! termfolio is a closed-vocabulary command console: type one of a handful
//! of built-in commands and it answers from a fixed response table. Long
//! answers are typed out one character at a time.
//!
//! # Quick Start
//!
//! ```text
//! termfolio                          # Interactive console
//! termfolio --script "about;skills"  # Run commands headless, animated
//! termfolio --script help --instant  # Run commands headless, no delay
//! ```
//!
//! # Commands
//!
//! | Command | Response |
//! |---------|----------|
//! | help | Command overview |
//! | about, skills, projects, contact | Typed out |
//! | whoami, ls | Printed at once |
//! | cat resume.txt | Typed out |
//! | clear | Clears the scrollback |
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Submit |
//! | Up/Down | Recall previous commands |
//! | Tab | Complete command |
//! | PageUp/PageDown | Scroll |
//! | Ctrl+U | Clear prompt |
//! | Esc, Ctrl+C | Quit |

mod app;
mod config;
mod core;
mod history;
mod ui;

use std::env;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::{App, Outcome};
use crate::config::Config;
use crate::core::registry::CommandRegistry;
use crate::core::session::ConsoleSession;
use crate::core::ticker::Ticker;
use crate::history::CommandHistory;
use crate::ui::{KeyMapper, Renderer, TextRenderer};

/// Command line options
#[derive(Debug, Default)]
struct Args {
    /// Typing interval override in milliseconds
    interval_ms: Option<u64>,
    /// Color scheme override
    scheme: Option<String>,
    /// Skip the welcome lines
    no_banner: bool,
    /// `;`-separated commands to run headless
    script: Option<String>,
    /// Headless: finish typing immediately
    instant: bool,
    /// Log level for the log file
    log_level: Option<Level>,
    /// Save the effective config and exit
    write_config: bool,
}

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: [&str; 2] = [
    "Welcome to flyingrobots.dev terminal v2.0",
    "Type \"help\" for available commands",
];

fn print_version() {
    eprintln!("termfolio {}", VERSION);
}

fn print_help() {
    eprintln!("termfolio {} - A scripted portfolio console", VERSION);
    eprintln!();
    eprintln!("Usage: termfolio [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i, --interval <MS>   Typing interval in milliseconds (default: 20)");
    eprintln!("      --scheme <NAME>   Color scheme: {}", config::ColorScheme::list().join(", "));
    eprintln!("      --no-banner       Start with an empty console");
    eprintln!("  -s, --script <CMDS>   Run ';'-separated commands and exit");
    eprintln!("      --instant         Skip the typing delay (requires --script)");
    eprintln!("      --write-config    Save the effective config and exit");
    eprintln!("      --log-level <LVL> Log level: error, warn, info, debug, trace");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Configuration is read from ~/.termfolio/config.toml");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    parse_args_from(&args)
}

/// Parse `args`, where `args[0]` is the program name
fn parse_args_from(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-i" | "--interval" => {
                i += 1;
                let value = args.get(i).ok_or("Missing interval argument")?;
                let ms = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid interval: {}", value))?;
                parsed.interval_ms = Some(ms);
            }
            "--scheme" => {
                i += 1;
                parsed.scheme = Some(args.get(i).ok_or("Missing scheme argument")?.clone());
            }
            "--no-banner" => {
                parsed.no_banner = true;
            }
            "-s" | "--script" => {
                i += 1;
                parsed.script = Some(args.get(i).ok_or("Missing script argument")?.clone());
            }
            "--instant" => {
                parsed.instant = true;
            }
            "--log-level" => {
                i += 1;
                let value = args.get(i).ok_or("Missing log level argument")?;
                let level = value
                    .parse::<Level>()
                    .map_err(|_| format!("Invalid log level: {}", value))?;
                parsed.log_level = Some(level);
            }
            "--write-config" => {
                parsed.write_config = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    if parsed.instant && parsed.script.is_none() {
        return Err("--instant requires --script".to_string());
    }

    Ok(parsed)
}

/// Log to `~/.termfolio/termfolio.log`; `RUST_LOG` wins over `--log-level`
fn init_logging(level: Level) {
    let log_path = config::data_dir()
        .map(|dir| dir.join("termfolio.log"))
        .unwrap_or_else(|| std::path::PathBuf::from("termfolio.log"));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok();

    if let Some(file) = log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    init_logging(args.log_level.unwrap_or(Level::INFO));
    info!("termfolio {} starting...", VERSION);

    // Command line overrides the config file
    let mut config = Config::load();
    if let Some(ms) = args.interval_ms {
        config.typing.interval_ms = ms;
    }
    if let Some(ref scheme) = args.scheme {
        config.color_scheme = scheme.clone();
    }
    if args.no_banner {
        config.show_banner = false;
    }
    info!(
        "Scheme: {}, typing every {}ms above {} chars",
        config.color_scheme, config.typing.interval_ms, config.typing.threshold
    );

    if args.write_config {
        let path = config.save()?;
        info!("Wrote config to {}", path.display());
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let registry = CommandRegistry::builtin();
    let banner: &[&str] = if config.show_banner { &BANNER } else { &[] };
    let mut session = ConsoleSession::with_banner(&registry, banner.iter().copied());
    session.set_typing_threshold(config.typing.threshold);

    let result = match args.script {
        Some(ref script) => run_script(session, script, &config, args.instant),
        None => run_console(&registry, session, &config),
    };

    if let Err(ref e) = result {
        error!("Exited with error: {:#}", e);
    }
    info!("termfolio exiting");
    result
}

/// Run the interactive full-screen console
fn run_console(
    registry: &CommandRegistry,
    session: ConsoleSession<'_>,
    config: &Config,
) -> anyhow::Result<()> {
    let hint = format!(
        "Try commands: {}",
        registry.commands().collect::<Vec<_>>().join(", ")
    );
    let mut app = App::new(
        registry,
        session,
        CommandHistory::with_limit(config.history.max_entries),
        Ticker::new(config.typing.interval()),
    );

    let (cols, rows) = Renderer::size()?;
    info!("Terminal size: {}x{}", cols, rows);

    let mut renderer = Renderer::new(config.get_color_scheme(), hint);
    renderer.init()?;

    let result = run_main_loop(&mut app, &mut renderer);

    // Always restore the terminal, even after an error
    if let Err(e) = renderer.cleanup() {
        error!("Failed to restore terminal: {}", e);
    }
    result
}

/// Main event loop
fn run_main_loop(app: &mut App<'_>, renderer: &mut Renderer) -> anyhow::Result<()> {
    renderer.render(&app.session, &app.input)?;

    loop {
        if app.advance(Instant::now()) {
            renderer.scroll_to_bottom();
            renderer.render(&app.session, &app.input)?;
        }

        if !event::poll(app.poll_timeout(Instant::now()))? {
            continue;
        }

        let outcome = match event::read()? {
            Event::Key(key_event) => {
                // Only process key press events
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                match KeyMapper::map(&key_event) {
                    Some(action) => app.handle(action, Instant::now()),
                    None => Outcome::None,
                }
            }
            Event::Paste(text) => app.paste(&text),
            Event::Resize(cols, rows) => {
                info!("Resize: {}x{}", cols, rows);
                Outcome::Redraw
            }
            _ => Outcome::None,
        };

        match outcome {
            Outcome::Quit => {
                info!("Quit requested");
                break;
            }
            Outcome::None => {}
            Outcome::Redraw => renderer.render(&app.session, &app.input)?,
            Outcome::BufferChanged => {
                renderer.scroll_to_bottom();
                renderer.render(&app.session, &app.input)?;
            }
            Outcome::ScrollUp => {
                renderer.scroll_page_up();
                renderer.render(&app.session, &app.input)?;
            }
            Outcome::ScrollDown => {
                renderer.scroll_page_down();
                renderer.render(&app.session, &app.input)?;
            }
        }
    }

    Ok(())
}

/// Run `;`-separated commands without a full-screen UI
fn run_script(
    mut session: ConsoleSession<'_>,
    script: &str,
    config: &Config,
    instant: bool,
) -> anyhow::Result<()> {
    let commands = script.split(';').map(str::trim).filter(|c| !c.is_empty());

    if instant {
        for command in commands {
            session.submit(command);
            session.finish_typing();
        }
        print!("{}", TextRenderer::render(&session));
        return Ok(());
    }

    let interval: Duration = config.typing.interval();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Lines already written to stdout
    let mut printed = 0;
    for line in session.lines() {
        writeln!(out, "{}", line.text)?;
        printed += 1;
    }

    for command in commands {
        session.submit(command);
        // A clear leaves nothing to catch up on
        printed = printed.min(session.len());

        if !session.is_typing() {
            for line in session.lines().skip(printed) {
                writeln!(out, "{}", line.text)?;
            }
            printed = session.len();
            continue;
        }

        // Everything but the line being typed
        for line in session.lines().skip(printed).take(session.len() - printed - 1) {
            writeln!(out, "{}", line.text)?;
        }

        let mut shown = 0;
        while session.is_typing() {
            thread::sleep(interval);
            session.tick();
            if let Some(line) = session.lines().last() {
                write!(out, "{}", &line.text[shown..])?;
                shown = line.text.len();
            }
            out.flush()?;
        }
        writeln!(out)?;
        printed = session.len();
    }

    Ok(())
}
