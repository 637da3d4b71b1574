mod ai;
mod alerts;
mod app;
mod domain;
mod input;
mod persistence;
mod ticker;
mod ui;

use ai::{AiConfig, AiWorker, GeminiClient, TextService};
use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{builtin_presets, format_minutes, ActivityStore};
use persistence::{
    ensure_data_dir, init_local_data_dir, load_activities, load_templates, log_file, prefers_dark_terminal,
    read_bytes, save_activities, store_file, KvStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "focusflow")]
#[command(about = "A visual focus timer: plan a sequence of activities and play them back on a clock", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusflow directory in the current directory
    Init,
    /// Extract activities from a document or image and append them to the plan
    Import {
        /// File to read (PDF, image, text)
        path: PathBuf,
        /// Media type override; guessed from the extension by default
        #[arg(long)]
        mime: Option<String>,
    },
    /// Print coaching insights for the saved plan
    Insights,
    /// List built-in and saved templates
    Presets,
}

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let path = log_file()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn create_text_service() -> Result<Arc<dyn TextService>> {
    let client = GeminiClient::from_config(AiConfig::from_env()).context("Failed to create AI client")?;
    Ok(Arc::new(client))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        // Initialize before logging so the log lands in the new directory
        let data_dir = init_local_data_dir()?;
        println!("Initialized focusflow directory: {}", data_dir.display());
        println!();
        println!("FocusFlow will now use this local directory for plans and settings.");
        println!("Run 'focusflow' to start planning.");
        return Ok(());
    }

    ensure_data_dir()?;
    setup_logging(cli.log_level.as_deref())?;

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Import { path, mime }) => run_import(path, mime),
        Some(Commands::Insights) => run_insights(),
        Some(Commands::Presets) => run_presets(),
        None => run_tui(),
    }
}

fn run_import(path: PathBuf, mime: Option<String>) -> Result<()> {
    let bytes = read_bytes(&path)?;
    let mime_type = mime.unwrap_or_else(|| {
        mime_guess::from_path(&path)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    });

    println!("Extracting activities from {} ({})...", path.display(), mime_type);
    let service = create_text_service()?;
    let records = ai::extract_activities(service.as_ref(), &bytes, &mime_type)
        .with_context(|| format!("Failed to extract activities from {}", path.display()))?;

    let mut store = KvStore::open(store_file()?);
    let mut activities = ActivityStore::new(load_activities(&store));
    let added = activities.append_extracted(&records);
    save_activities(&mut store, activities.activities());
    store.flush()?;

    info!(added, path = %path.display(), "import: done");
    for activity in &activities.activities()[activities.len() - added..] {
        println!("  + {} ({}m)", activity.name, activity.duration);
    }
    println!("Added {} activities.", added);
    Ok(())
}

fn run_insights() -> Result<()> {
    let store = KvStore::open(store_file()?);
    let activities = load_activities(&store);
    let service = create_text_service()?;
    println!("{}", ai::smart_insights(service.as_ref(), &activities));
    Ok(())
}

fn run_presets() -> Result<()> {
    let store = KvStore::open(store_file()?);
    let custom = load_templates(&store);

    println!("Built-in templates:");
    for preset in builtin_presets() {
        println!(
            "  {} {} ({}) - {}",
            preset.icon,
            preset.name,
            format_minutes(preset.total_minutes()),
            preset.description
        );
    }

    if !custom.is_empty() {
        println!();
        println!("Your templates:");
        for preset in custom {
            println!(
                "  {} {} ({}) - {}",
                preset.icon,
                preset.name,
                format_minutes(preset.total_minutes()),
                preset.description
            );
        }
    }
    Ok(())
}

fn run_tui() -> Result<()> {
    let store_path = store_file()?;
    eprintln!("Using store: {}", store_path.display());

    let worker = AiWorker::spawn(create_text_service()?);
    let store = KvStore::open(&store_path);
    let mut app = AppState::from_store(store, prefers_dark_terminal(), Some(worker));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop timers and any sound still playing
    app.shutdown();

    // Save on exit
    if let Err(e) = app.save() {
        error!(error = %e, "failed to save state on exit");
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        error!(error = %err, "event loop failed");
        eprintln!("Error: {}", err);
    }

    info!("focusflow exiting");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Tick timers, audio and background results
        app.tick(Instant::now());

        // Autosave if needed
        if app.needs_save {
            app.save()?;
        }
    }
}
