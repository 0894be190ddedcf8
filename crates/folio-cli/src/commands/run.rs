use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use folio_core::paging::SettleTicket;
use folio_core::AppConfig;
use folio_tui::{
    app::{App, ScreenLayout},
    event::{AppEvent, EventHandler},
    widgets::{DocumentWidget, NavbarWidget, OverlayWidget, PromptWidget, StatusBarWidget},
    scroll::ScrollConfigExt,
    MouseCapture,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let (mut app, mut settle_rx) = App::new(config.clone())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Folio"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut capture = MouseCapture::stdout();
    app.mount(&mut capture);

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    info!(width = size.width, height = size.height, "Folio started");

    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );

    let result = main_loop(&mut terminal, &mut app, &mut settle_rx, &event_handler);

    // Restore terminal even when the loop failed
    app.unmount(&mut capture);
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settle_rx: &mut mpsc::UnboundedReceiver<SettleTicket>,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Settle timers that fired since the last frame
        while let Ok(ticket) = settle_rx.try_recv() {
            app.on_settled(ticket);
        }

        app.tick();
        terminal.draw(|frame| draw(frame, app))?;

        // Frame rate while scrolling or waiting for the settle release
        let event = if app.needs_fast_update() || app.controller.is_paging() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.on_key(key),
                AppEvent::Mouse(mouse) => app.on_mouse(mouse),
                AppEvent::Resize(width, height) => app.resize(width, height),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            info!("Quit requested");
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let screen = ScreenLayout::split(frame.area());

    DocumentWidget::render(frame, screen.document, app);
    OverlayWidget::render(frame, screen.document, app);
    NavbarWidget::render(frame, screen.navbar, app);

    match &app.prompt {
        Some(text) => PromptWidget::render(frame, screen.bottom, text, &app.theme),
        None => StatusBarWidget::render(frame, screen.bottom, app),
    }
}
