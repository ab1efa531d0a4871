//! csvpeek - A terminal viewer for CSV datasets.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use csvpeek::app::App;
use csvpeek::config::AssetConfig;
use csvpeek::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const PAGE_ROWS: usize = 15;

#[derive(Parser, Debug)]
#[command(name = "csvpeek")]
#[command(about = "A terminal viewer for CSV datasets", long_about = None)]
struct Args {
    /// CSV file to open, or a file name under <data-dir>/csv
    dataset: String,

    /// Directory holding the csv/ and pics/ asset folders (default: data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting csvpeek");
    }

    let assets = match &args.data_dir {
        Some(dir) => AssetConfig::rooted_at(dir),
        None => AssetConfig::default(),
    };

    // Validate path before taking over the terminal
    let path = assets.resolve_dataset(&args.dataset);
    if !path.is_file() {
        eprintln!("Error: Dataset not found: {}", path.display());
        std::process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = App::new(assets);
    app.load(path);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("csvpeek exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut pending_g = false; // For 'gg' vim binding

    loop {
        app.poll_loader();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key, &mut pending_g) {
                    return Ok(());
                }
            },
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    app.click(mouse.column, mouse.row);
                }
            },
            _ => {},
        }
    }
}

/// Handle one key press. Returns `true` when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent, pending_g: &mut bool) -> bool {
    // Preview mode: `o` opens externally, anything else closes
    if app.preview.is_visible() {
        match key.code {
            KeyCode::Char('o') => app.open_preview_external(),
            _ => app.close_preview(),
        }
        return false;
    }

    // Search mode - handle separately
    if app.search.is_active() {
        match key.code {
            KeyCode::Enter => app.search_submit(),
            KeyCode::Esc => app.search_cancel(),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Char(c) => app.search_input(c),
            _ => {},
        }
        return false;
    }

    // Normal mode
    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c')) => return true,

        // Navigation
        (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.move_up(1);
        },
        (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.move_down(1);
        },
        (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.move_left();
        },
        (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.move_right();
        },

        // Vim navigation
        (KeyModifiers::NONE, KeyCode::Char('g')) => {
            if *pending_g {
                app.goto_first();
                *pending_g = false;
            } else {
                *pending_g = true;
            }
            return false;
        },
        (KeyModifiers::SHIFT, KeyCode::Char('G')) => app.goto_last(),
        (KeyModifiers::CONTROL, KeyCode::Char('f')) | (KeyModifiers::NONE, KeyCode::PageDown) => {
            app.move_down(PAGE_ROWS);
        },
        (KeyModifiers::CONTROL, KeyCode::Char('b')) | (KeyModifiers::NONE, KeyCode::PageUp) => {
            app.move_up(PAGE_ROWS);
        },

        // Sort and search
        (KeyModifiers::NONE, KeyCode::Char('s')) => app.sort_focused_column(),
        (KeyModifiers::NONE, KeyCode::Char('/')) => app.search_start(),
        (KeyModifiers::NONE, KeyCode::Esc) => app.search_cancel(),

        // Cells
        (KeyModifiers::NONE, KeyCode::Enter) => app.activate_focused_cell(),
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.copy_focused_cell(),

        // Data
        (KeyModifiers::NONE, KeyCode::Char('r')) => app.reload(),

        _ => {},
    }
    *pending_g = false;
    false
}
