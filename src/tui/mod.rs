pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use crate::app::{AppContext, Result};
use crate::controller::{spawn_fetch, FeedController, PageRequest, PageResponse};

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs page requests in the background and hands their responses back to the UI loop.
struct Dispatcher {
    ctx: Arc<AppContext>,
    tx: mpsc::UnboundedSender<PageResponse>,
}

impl Dispatcher {
    fn dispatch(&self, request: Option<PageRequest>) {
        if let Some(request) = request {
            spawn_fetch(self.ctx.fetcher.clone(), request, self.tx.clone());
        }
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let config = ctx.config.clone();
    let controller = FeedController::new(ctx.store.clone());
    let mut tui_app = TuiApp::new(controller, &config.ui);
    let event_handler = EventHandler::new(Duration::from_millis(100));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher { ctx, tx };

    dispatcher.dispatch(Some(tui_app.controller.refresh()));

    loop {
        while let Ok(response) = rx.try_recv() {
            tui_app.apply_response(response);
        }

        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => match tui_app.input_mode {
                InputMode::Search => handle_search_key(&mut tui_app, key),
                InputMode::DateFrom | InputMode::DateTo => handle_date_key(&mut tui_app, key),
                InputMode::Normal => {
                    tui_app.clear_status();
                    let action = config.keybindings.get_action(&key);
                    handle_action(&mut tui_app, action, &dispatcher);
                }
            },
            AppEvent::Tick => {
                tui_app.tick(Instant::now());
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(tui_app: &mut TuiApp, action: Action, dispatcher: &Dispatcher) {
    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down();
        }
        Action::NextPage => {
            dispatcher.dispatch(tui_app.next_page());
        }
        Action::PrevPage => {
            dispatcher.dispatch(tui_app.prev_page());
        }
        Action::NextCategory => {
            let category = tui_app.controller.window().category.next();
            dispatcher.dispatch(tui_app.change_category(category));
        }
        Action::PrevCategory => {
            let category = tui_app.controller.window().category.prev();
            dispatcher.dispatch(tui_app.change_category(category));
        }
        Action::ToggleFavorite => {
            tui_app.toggle_favorite();
        }
        Action::OpenInBrowser => {
            if let Some(url) = tui_app.selected_article().and_then(|a| a.url) {
                if let Err(e) = open::that(&url) {
                    tui_app.set_status(format!("Failed to open browser: {}", e));
                }
            }
        }
        Action::Search => {
            tui_app.start_search();
        }
        Action::EditDateFrom => {
            tui_app.start_date_edit(InputMode::DateFrom);
        }
        Action::EditDateTo => {
            tui_app.start_date_edit(InputMode::DateTo);
        }
        Action::ClearFilters => {
            tui_app.clear_filters();
        }
        Action::ToggleTheme => {
            tui_app.toggle_theme();
        }
        Action::Refresh => {
            dispatcher.dispatch(Some(tui_app.controller.refresh()));
        }
        Action::None => {}
    }
}

fn handle_search_key(tui_app: &mut TuiApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => tui_app.finish_search(),
        KeyCode::Esc => tui_app.cancel_search(),
        KeyCode::Backspace => tui_app.pop_search_char(),
        KeyCode::Char(c) => tui_app.push_search_char(c),
        _ => {}
    }
}

fn handle_date_key(tui_app: &mut TuiApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => tui_app.commit_date_edit(),
        KeyCode::Esc => tui_app.cancel_date_edit(),
        KeyCode::Backspace => {
            tui_app.edit_buffer.pop();
        }
        KeyCode::Char(c) => tui_app.edit_buffer.push(c),
        _ => {}
    }
}
