pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Tick rate for the event loop; also the resolution of the search debounce
const TICK_MS: u64 = 50;

pub async fn run_tui(mut app: App, theme: ThemeColors) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(TICK_MS);

    // Ticks that change nothing skip the redraw
    let mut dirty = true;
    let result: anyhow::Result<()> = loop {
        if dirty {
            if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app, &theme)) {
                break Err(e.into());
            }
        }

        dirty = match events.next().await {
            Some(Event::Key(key)) => {
                handle_key_event(&mut app, key);
                true
            }
            Some(Event::Tick) => app.tick(Instant::now()),
            Some(Event::Resize) => true,
            None => break Ok(()),
        };

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            KeyCode::PageDown => app.page_down(),
            KeyCode::PageUp => app.page_up(),

            // Filter panel
            KeyCode::Tab => app.focus_next_field(),
            KeyCode::BackTab => app.focus_previous_field(),
            KeyCode::Enter => app.activate_field(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('c') => app.reset_filters(),

            KeyCode::Char('e') => app.export(),
            KeyCode::Char('R') => app.reload(),
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Editing => match key.code {
            KeyCode::Enter => app.confirm_edit(),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Backspace => app.edit_pop(Instant::now()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.should_quit = true
            }
            KeyCode::Char(c) => app.edit_push(c, Instant::now()),
            // Ignore all other keys (don't propagate to Normal mode)
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
