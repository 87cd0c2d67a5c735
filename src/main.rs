//! uemacs-hl - terminal viewer showing a file through configurable highlighters

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use uemacs_hl::buffer::Buffer;
use uemacs_hl::config::Config;
use uemacs_hl::coord::DisplayCoord;
use uemacs_hl::terminal::Terminal;
use uemacs_hl::viewer::Viewer;
use uemacs_hl::window::Window;
use uemacs_hl::{HighlighterRegistry, Result};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    list: bool,
    help: bool,
    version: bool,
    file: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> std::result::Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => parsed.help = true,
            "--version" | "-V" => parsed.version = true,
            "--list" => parsed.list = true,
            "--config" => {
                let path = iter.next().ok_or("--config requires a file")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--log" => {
                let path = iter.next().ok_or("--log requires a file")?;
                parsed.log = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => return Err(format!("unknown option '{}'", other)),
            other => parsed.file = Some(PathBuf::from(other)),
        }
    }
    Ok(parsed)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("Try 'uemacs-hl --help' for more information.");
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Send tracing output to `path`; the terminal is in raw mode
fn setup_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uemacs_hl=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    tracing::info!(path = %path.display(), "tracing initialized");
    Ok(())
}

fn run(args: Args) -> Result<()> {
    if args.help {
        print_usage();
        return Ok(());
    }
    if args.version {
        print_version();
        return Ok(());
    }

    let registry = HighlighterRegistry::with_builtins();
    if args.list {
        for name in registry.type_names() {
            println!("{}", name);
            for line in registry.describe(name)?.lines() {
                println!("    {}", line);
            }
        }
        return Ok(());
    }

    if let Some(path) = &args.log {
        setup_tracing(path)?;
    }

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let buffer = match &args.file {
        Some(path) => Buffer::from_file(path)?,
        None => Buffer::from_text("*scratch*", ""),
    };

    let mut window = Window::new(DisplayCoord::default());
    let errors = config.apply(&registry, &mut window);

    let terminal = Terminal::new()?;
    let mut viewer = Viewer::new(terminal, buffer, window);
    if let Some(first) = errors.first() {
        viewer.set_message(format!("config: {} ({} error(s), see log)", first, errors.len()));
    }
    viewer.run()
}

fn print_usage() {
    println!("uemacs-hl {} - file viewer with layered highlighters", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: uemacs-hl [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  --config FILE  Read highlighters from FILE instead of ~/.uemacs-hl.toml");
    println!("  --log FILE     Write log output to FILE (filter with RUST_LOG)");
    println!("  --list         List highlighter types and their parameters");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  C-f, Right     Move forward one character");
    println!("  C-b, Left      Move backward one character");
    println!("  C-n, Down      Move to next line");
    println!("  C-p, Up        Move to previous line");
    println!("  C-a, Home      Move to beginning of line");
    println!("  C-e, End       Move to end of line");
    println!("  C-v, PageDown  Scroll down one page");
    println!("  PageUp         Scroll up one page");
    println!("  C-l            Redraw screen");
    println!("  q, Esc, C-c    Quit");
}

fn print_version() {
    println!("uemacs-hl {}", env!("CARGO_PKG_VERSION"));
}
