//! src/main.rs
//! Terminal directory browser backed by a remote listing service

use std::{
    io::{self, Stdout},
    panic::PanicHookInfo,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use vfs_explorer::{
    config::Config,
    controller::{
        actions::Action,
        http_backend::HttpListingBackend,
        navigation::{ListingOutcome, NavigationController},
    },
    error::AppError,
    logging::{LoggerConfig, init_logging_with_config},
    model::ui_state::UIState,
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Redraw cadence while a request is pending, so the elapsed timer moves.
const LOADING_TICK: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let app = App::new()
        .await
        .context("Failed to initialize application")?;
    app.run().await.context("Application runtime error")?;

    info!("Application exited cleanly");
    Ok(())
}

struct App {
    terminal: AppTerminal,
    controller: NavigationController<UIState>,
    outcome_rx: mpsc::UnboundedReceiver<ListingOutcome>,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
    _log_guard: Option<WorkerGuard>,
}

impl App {
    async fn new() -> Result<Self> {
        let mut config = Config::load().await.unwrap_or_else(|e| {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        });
        config.apply_env_overrides();
        if let Some(start_path) = std::env::args().nth(1) {
            config.default_path = Some(start_path);
        }

        let log_guard = match init_logging_with_config(&config.logging).await {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("Configured logging failed ({e}), falling back to defaults");
                init_logging_with_config(&LoggerConfig::default())
                    .await
                    .inspect_err(|e| eprintln!("Logging disabled: {e}"))
                    .ok()
            }
        };
        info!(
            server = %format!("{}:{}", config.server.host, config.server.port),
            default_path = ?config.default_path,
            "Starting vfs-explorer"
        );

        let backend = Arc::new(HttpListingBackend::from_config(&config.server));
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<ListingOutcome>();

        let mut controller =
            NavigationController::new(backend, UIState::new(config.show_sizes), outcome_tx)
                .with_request_timeout(config.server.request_timeout);

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        controller
            .initialize(config.default_path.as_deref())
            .context("Failed to request initial directory")?;

        info!("Application initialized successfully");

        Ok(Self {
            terminal,
            controller,
            outcome_rx,
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        let mut event_stream = EventStream::new();
        let mut loading_tick = tokio::time::interval(LOADING_TICK);

        loop {
            self.render()?;

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(terminal_event)) => {
                            if let Some(action) = Action::from_event(&terminal_event) {
                                if !self.dispatch_action(action) {
                                    break;
                                }
                            }
                        }
                        Some(Err(e)) => warn!("Terminal event error: {}", e),
                        None => {
                            info!("Terminal event stream closed");
                            break;
                        }
                    }
                }

                Some(outcome) = self.outcome_rx.recv() => {
                    let disposition = self.controller.handle_outcome(outcome);
                    debug!(?disposition, "Listing outcome handled");
                }

                _ = loading_tick.tick() => {
                    if self.controller.render().is_loading() {
                        self.controller.render_mut().request_redraw();
                    }
                }
            }
        }

        let stats = self.ui_renderer.stats();
        info!(
            frames = stats.frames,
            slow_frames = stats.slow,
            avg_frame_us = stats.avg_frame_time().as_micros() as u64,
            "Event loop terminated cleanly"
        );
        Ok(())
    }

    /// Returns `false` when the application should exit.
    fn dispatch_action(&mut self, action: Action) -> bool {
        debug!("Dispatching action: {:?}", action);

        let result = match action {
            Action::Quit => {
                info!("Quit requested");
                return false;
            }
            Action::MoveSelectionUp => {
                self.controller.render_mut().move_selection_up();
                Ok(())
            }
            Action::MoveSelectionDown => {
                self.controller.render_mut().move_selection_down();
                Ok(())
            }
            Action::SelectFirst => {
                self.controller.render_mut().select_first();
                Ok(())
            }
            Action::SelectLast => {
                self.controller.render_mut().select_last();
                Ok(())
            }
            Action::ActivateSelected => match self.controller.render().selected_entry().cloned() {
                Some(entry) => self.controller.activate(&entry).map(drop),
                None => Ok(()),
            },
            Action::GoToParent => self.controller.go_up().map(drop),
            Action::ReloadDirectory => self.controller.reload().map(drop),
            Action::DismissError => {
                self.controller.render_mut().dismiss_error();
                Ok(())
            }
            Action::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                self.controller.render_mut().request_redraw();
                Ok(())
            }
        };

        if let Err(e) = result {
            warn!("Action {:?} failed: {}", action, e);
        }
        true
    }

    fn render(&mut self) -> Result<()> {
        if !self.controller.render().needs_redraw() {
            return Ok(());
        }

        let ui_state = self.controller.render();
        let renderer = &mut self.ui_renderer;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, ui_state))
            .context("Failed to draw terminal")?;

        self.controller.render_mut().clear_redraw();
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                    (Ok(mut sigterm), Ok(mut sigint)) => {
                        tokio::select! {
                            _ = sigterm.recv() => info!("Received SIGTERM"),
                            _ = sigint.recv() => info!("Received SIGINT"),
                        }
                    }
                    _ => {
                        warn!("Failed to install signal handlers, falling back to Ctrl+C");
                        if let Err(e) = signal::ctrl_c().await {
                            warn!("Failed to listen for Ctrl+C: {}", e);
                            return;
                        }
                        info!("Received Ctrl+C");
                    }
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal, AppError> {
    enable_raw_mode().map_err(|e| AppError::terminal("enable raw mode", e))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| AppError::terminal("enter alternate screen", e))?;

    let backend = CrosstermBackend::new(stdout);
    let terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal("create terminal", e))?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<(), AppError> {
    disable_raw_mode().map_err(|e| AppError::terminal("disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| AppError::terminal("leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| AppError::terminal("show cursor", e))?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        // Worker panics are contained by their tasks; only a panic on the
        // UI thread ends the application and needs the terminal restored.
        if std::thread::current().name() == Some("main") {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            error!("Application panicked: {}", panic_info);
            original_hook(panic_info);
        } else {
            error!("Background task panicked: {}", panic_info);
        }
    }));
}
