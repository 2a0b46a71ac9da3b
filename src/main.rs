mod app;
mod domain;
mod prefs;
mod ui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use app::App;
use domain::filter::Filter;
use domain::theme::Theme;
use domain::todo::seed_todos;
use prefs::PreferenceStore;
use prefs::memory::InMemoryPrefs;
use prefs::sqlite::{SqlitePrefs, default_data_dir};

#[derive(Parser, Debug)]
#[command(author, version, about = "kanso — a small todo list for the terminal", long_about = None)]
struct Args {
    /// Tick interval of render loop in milliseconds
    #[arg(long, default_value_t = 120)]
    tick_ms: u64,

    /// Keep preferences in memory only
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Path to the preferences SQLite file (default: OS data dir)
    #[arg(long)]
    prefs_path: Option<PathBuf>,

    /// Start with this theme instead of the stored one (not saved)
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Initial filter: all, active or completed
    #[arg(long, default_value = "all")]
    filter: Filter,

    /// Start with an empty list instead of the sample tasks
    #[arg(long, default_value_t = false)]
    empty: bool,

    /// Log file (default: kanso.log in the OS data dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable logging
    #[arg(long, default_value_t = false)]
    no_log: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let app = build_app(&args);
    ui::run(app, Duration::from_millis(args.tick_ms))
}

/// Everything before the terminal takes over. Logging and the preference
/// store are both optional here; neither can stop the session from starting.
fn build_app(args: &Args) -> App<Box<dyn PreferenceStore>> {
    if !args.no_log
        && let Err(error) = init_logging(args.log_file.as_deref())
    {
        // no subscriber yet, so stderr is the only place to say it
        eprintln!("kanso: logging disabled: {error:#}");
    }

    let prefs = open_prefs(args);
    let seed = if args.empty { Vec::new() } else { seed_todos() };

    let mut app = App::new(prefs, seed);
    if let Some(theme) = args.theme {
        app.theme = theme;
    }
    app.set_filter(args.filter);
    app
}

fn open_prefs(args: &Args) -> Box<dyn PreferenceStore> {
    if args.memory {
        return Box::new(InMemoryPrefs::default());
    }
    let opened = match args.prefs_path.as_ref() {
        Some(path) => SqlitePrefs::open(path),
        None => SqlitePrefs::open_default(),
    };
    match opened {
        Ok(store) => Box::new(store),
        Err(error) => {
            // theme changes only last for this session
            warn!(error = ?error, "preference store unavailable");
            Box::new(InMemoryPrefs::default())
        }
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_data_dir()?.join("kanso.log"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
        .context("failed to install log subscriber")
}

fn parse_theme(raw: &str) -> Result<Theme, String> {
    Theme::parse(&raw.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown theme '{raw}' (expected light or dark)"))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    #[test]
    fn cli_defaults() {
        let args = Args::parse_from(["kanso"]);
        assert_eq!(args.tick_ms, 120);
        assert_eq!(args.filter, Filter::All);
        assert!(args.theme.is_none());
        assert!(!args.memory && !args.empty && !args.no_log);
    }

    #[test]
    fn cli_parses_theme_and_filter() {
        let args = Args::parse_from(["kanso", "--theme", "Dark", "--filter", "completed"]);
        assert_eq!(args.theme, Some(Theme::Dark));
        assert_eq!(args.filter, Filter::Completed);
        assert!(Args::try_parse_from(["kanso", "--theme", "blue"]).is_err());
    }

    #[test]
    fn unopenable_prefs_path_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened as a SQLite file
        let args = Args::parse_from([
            OsStr::new("kanso"),
            OsStr::new("--prefs-path"),
            dir.path().as_os_str(),
        ]);
        let mut prefs = open_prefs(&args);
        assert_eq!(prefs.read("theme"), None);
        prefs.write("theme", "dark");
        assert_eq!(prefs.read("theme").as_deref(), Some("dark"));
    }

    fn unusable_log_path() -> (tempfile::NamedTempFile, PathBuf) {
        // a regular file cannot be a parent directory
        let blocker = tempfile::NamedTempFile::new().unwrap();
        let path = blocker.path().join("logs").join("kanso.log");
        (blocker, path)
    }

    #[test]
    fn init_logging_reports_unusable_path() {
        let (_blocker, path) = unusable_log_path();
        let err = init_logging(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to create log dir"));
    }

    #[test]
    fn startup_survives_unusable_log_file() {
        let (_blocker, path) = unusable_log_path();
        let args = Args::parse_from([
            OsStr::new("kanso"),
            OsStr::new("--memory"),
            OsStr::new("--filter"),
            OsStr::new("active"),
            OsStr::new("--log-file"),
            path.as_os_str(),
        ]);
        let app = build_app(&args);
        assert_eq!(app.filter, Filter::Active);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.view().len(), 6);
    }
}
