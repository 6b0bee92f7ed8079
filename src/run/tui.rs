use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, two borders, one header row
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Search => handle_search_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
            app.search_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&screen) = Screen::all().get(idx) {
                switch_screen(app, screen);
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('H') => commands::handle_command("prev-month", app)?,
        KeyCode::Char('L') => commands::handle_command("next-month", app)?,
        KeyCode::Char('D') if app.screen == Screen::Expenses => {
            commands::handle_command("delete", app)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            if !app.search_input.is_empty() {
                app.search_input.clear();
                app.clamp_selection();
                app.set_status("Search cleared");
            } else {
                app.status_message.clear();
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Live filter: every keystroke narrows the Expenses list.
fn handle_search_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            let matches = app.visible_expenses().len();
            app.set_status(format!("{matches} matching expenses"));
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.search_input.clear();
            reset_expense_cursor(app);
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.screen = Screen::Expenses;
            reset_expense_cursor(app);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.screen = Screen::Expenses;
            reset_expense_cursor(app);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteExpense { id, name } => {
                        if app.remove_expense(id).is_some() {
                            app.set_status(format!("Deleted: {name}"));
                        } else {
                            app.set_status(format!("Expense #{id} no longer exists"));
                        }
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Insights {
        app.insights_scroll = 0;
    }
    app.clamp_selection();
    app.set_status(format!("{screen}"));
}

fn reset_expense_cursor(app: &mut App) {
    app.expense_index = 0;
    app.expense_scroll = 0;
}

fn insights_len(app: &App) -> usize {
    app.report_text().lines().count()
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let len = app.visible_expenses().len();
            let page = app.visible_rows;
            scroll_down(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        Screen::Categories => {
            if app.category_index + 1 < app.config.categories.len() {
                app.category_index += 1;
            }
        }
        Screen::Insights => {
            if app.insights_scroll + 1 < insights_len(app) {
                app.insights_scroll += 1;
            }
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Categories => app.category_index = app.category_index.saturating_sub(1),
        Screen::Insights => app.insights_scroll = app.insights_scroll.saturating_sub(1),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Expenses => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Categories => app.category_index = 0,
        Screen::Insights => app.insights_scroll = 0,
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Expenses => {
            let len = app.visible_expenses().len();
            let page = app.visible_rows;
            scroll_to_bottom(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        Screen::Categories => {
            app.category_index = app.config.categories.len().saturating_sub(1);
        }
        Screen::Insights => {
            app.insights_scroll = insights_len(app).saturating_sub(1);
        }
        Screen::Dashboard => {}
    }
}
