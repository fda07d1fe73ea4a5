mod app;
mod config;
mod shuffle;
mod store;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup, Section};
use config::AppConfig;
use shuffle::Rng;
use store::{FileStorage, Roster};

#[derive(Parser, Debug)]
#[command(name = "standup")]
#[command(version = "0.1.0")]
#[command(about = "A terminal roster manager and order shuffler for daily standups")]
struct Args {
    /// Print the roster as JSON (for scripts)
    #[arg(short, long)]
    list: bool,

    /// Add a name to the roster and exit
    #[arg(short, long)]
    add: Option<String>,

    /// Shuffle the roster, print the new order and exit
    #[arg(short, long)]
    shuffle: bool,

    /// Clear the roster and exit
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load().unwrap_or_default();
    let storage = FileStorage::open_default()?;
    let mut roster = Roster::load(Box::new(storage), config.max_names);

    // Handle CLI-only commands
    if args.list {
        return print_roster(&roster);
    }

    if let Some(name) = args.add {
        return add_name(&mut roster, &name);
    }

    if args.shuffle {
        return shuffle_roster(&mut roster, &config);
    }

    if args.clear {
        return clear_roster(&mut roster);
    }

    // Run TUI
    run_tui(config, roster)
}

fn print_roster(roster: &Roster) -> Result<()> {
    let theme = theme::get(roster.theme_index());

    let output = serde_json::json!({
        "names": roster.names(),
        "count": roster.len(),
        "theme": {
            "label": theme.label,
            "emoji": theme.emoji,
        },
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn add_name(roster: &mut Roster, name: &str) -> Result<()> {
    let before = roster.len();
    roster.add(name)?;

    if roster.len() > before {
        println!("Added {} ({} on the roster)", name.trim(), roster.len());
    } else if roster.is_full() {
        println!("Roster is full, {} not added", name.trim());
    }
    Ok(())
}

fn shuffle_roster(roster: &mut Roster, config: &AppConfig) -> Result<()> {
    let mut rng = Rng::from_entropy();
    roster.shuffle(&mut rng, &config.shuffle)?;

    let theme = theme::get(roster.theme_index());
    println!("{} {} Standup", theme.emoji, theme.label);
    for (i, name) in roster.names().iter().enumerate() {
        println!("{:>3}. {}", i + 1, name);
    }

    if config.notifications {
        notify("standup", &format!("{} Order shuffled, {} up first", theme.emoji, roster.names().first().map(String::as_str).unwrap_or("nobody")))?;
    }
    Ok(())
}

fn clear_roster(roster: &mut Roster) -> Result<()> {
    roster.clear()?;
    println!("Roster cleared");
    Ok(())
}

fn run_tui(config: AppConfig, roster: Roster) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, roster);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        // 'q' only quits from the list; in the input field it
                        // is just another letter
                        KeyCode::Char('q')
                            if app.section == Section::List && app.popup == Popup::None =>
                        {
                            return Ok(())
                        }
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Expire stale status messages
        app.tick();
    }
}

fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("appointment-soon")
        .show()?;
    Ok(())
}
