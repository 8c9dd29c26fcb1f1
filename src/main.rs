mod app;
mod cli;
mod config;
mod filter;
mod github;
mod layout;
mod logging;
mod main_actions;
mod main_events;
mod markdown;
mod store;
mod sync;
mod theme;
mod ui;

use std::env;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::runtime::Runtime;
use tracing::info;

use crate::app::{App, AppEvent};
use crate::cli::{CliCommand, USAGE, parse_args};
use crate::config::Config;
use crate::github::GitHubClient;
use crate::logging::LogTarget;
use crate::store::{DiskCache, IssueStore, cache_dir};
use crate::sync::GitHubSource;

type TuiBackend = CrosstermBackend<Stdout>;
type Tui = Terminal<TuiBackend>;

const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);
const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if let Some(command) = parse_args(&args)? {
        logging::init(LogTarget::Stderr)?;
        return handle_command(command);
    }

    logging::init(LogTarget::File)?;
    let config = Config::load()?;
    let runtime = build_runtime()?;
    let store = build_store(&config)?;
    info!(sources = ?config.source_keys(), "starting issue monitor");

    let mut terminal_guard = TerminalGuard::init()?;
    let mut app = App::new(config);
    let size = terminal_guard.terminal_mut().size()?;
    app.handle_event(AppEvent::Resize(size.width, size.height));

    let (event_tx, event_rx) = mpsc::channel();
    start_refresh_timer(event_tx.clone());
    let work = app.init();
    main_actions::dispatch(work, &runtime, &store, &event_tx);

    run_app(
        terminal_guard.terminal_mut(),
        &mut app,
        &runtime,
        &store,
        event_rx,
        event_tx,
    )?;
    info!("issue monitor exited");
    Ok(())
}

fn handle_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Repos => handle_repos(),
        CliCommand::Fetch { repo } => handle_fetch(repo),
        CliCommand::ConfigPath => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
    }
}

fn handle_repos() -> Result<()> {
    let config = Config::load()?;
    for repository in &config.repositories {
        println!("{}", repository.display_name());
    }
    Ok(())
}

fn handle_fetch(repo: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let source_keys = match repo {
        Some(repo) => vec![repo],
        None => config.source_keys(),
    };
    let runtime = build_runtime()?;
    let store = build_store(&config)?;

    // Fails only when no source produced anything, which exits non-zero.
    let snapshot = runtime.block_on(store.get_issues(&source_keys))?;
    for source_key in &source_keys {
        if snapshot.failed_sources.contains(source_key) {
            let note = if snapshot.stale_sources.contains(source_key) {
                " (serving cached issues)"
            } else {
                ""
            };
            println!("{}: failed{}", source_key, note);
            continue;
        }
        let count = snapshot
            .issues
            .iter()
            .filter(|issue| &issue.source_key == source_key)
            .count();
        println!("{}: {} issues", source_key, count);
    }
    println!("{} issues total", snapshot.issues.len());
    Ok(())
}

fn build_runtime() -> Result<Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?)
}

fn build_store(config: &Config) -> Result<Arc<IssueStore>> {
    let client = GitHubClient::new(config.github_token.as_deref())?;
    let source = GitHubSource::new(client, config.repositories.clone());
    let store = IssueStore::new(Arc::new(source)).with_disk_cache(DiskCache::new(cache_dir()));
    Ok(Arc::new(store))
}

fn start_refresh_timer(event_tx: Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            thread::sleep(REFRESH_INTERVAL);
            if event_tx.send(AppEvent::RefreshTick).is_err() {
                return;
            }
        }
    });
}

fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &Runtime,
    store: &Arc<IssueStore>,
    event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        main_events::handle_events(app, runtime, store, &event_rx, &event_tx);

        let view = ui::render(app);
        app.set_max_scroll(view.max_scroll);
        terminal.draw(|frame| ui::draw(frame, &view))?;

        if app.should_quit() {
            return Ok(());
        }

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if !event::poll(timeout)? {
            if last_tick.elapsed() >= TICK_RATE {
                last_tick = Instant::now();
            }
            continue;
        }

        let app_event = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
            Event::Mouse(_) => AppEvent::Mouse,
            Event::Resize(width, height) => AppEvent::Resize(width, height),
            _ => continue,
        };
        let work = app.handle_event(app_event);
        main_actions::dispatch(work, runtime, store, &event_tx);

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }
    }
}

struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    fn init() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
