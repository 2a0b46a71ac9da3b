pub mod palette;

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, InputMode};
use crate::domain::filter::Filter;
use crate::domain::theme::Theme;
use crate::domain::view::{DerivedView, remaining_label};
use crate::prefs::PreferenceStore;
use palette::Palette;

pub fn run<P: PreferenceStore>(mut app: App<P>, tick_rate: Duration) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app, tick_rate);

    cleanup_terminal(&mut terminal)?;
    res
}

fn event_loop<P: PreferenceStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<P>,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(app, key.code)
        {
            return Ok(());
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

/// Routes one key press to the app. Returns true when the user asked to quit.
pub fn handle_key<P: PreferenceStore>(app: &mut App<P>, code: KeyCode) -> bool {
    match app.mode {
        InputMode::Normal => match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => app.select_next(),
            KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') => {
                app.mode = InputMode::Editing;
                app.input.clear();
                app.set_status("Type new task and press Enter");
            }
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected(),
            KeyCode::Char('m') => app.grab_selected(),
            KeyCode::Tab => app.cycle_filter(),
            KeyCode::Char('1') => app.select_filter(Filter::All),
            KeyCode::Char('2') => app.select_filter(Filter::Active),
            KeyCode::Char('3') => app.select_filter(Filter::Completed),
            KeyCode::Char('c') => app.clear_done(),
            KeyCode::Char('t') => app.switch_theme(),
            _ => {}
        },
        InputMode::Editing => match code {
            KeyCode::Esc => {
                app.mode = InputMode::Normal;
                app.input.clear();
                app.set_status("Canceled");
            }
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => {
                app.input.pop();
            }
            KeyCode::Char(c) => app.input.push(c),
            _ => {}
        },
        InputMode::Dragging { .. } => match code {
            KeyCode::Char('j') | KeyCode::Down => app.drag_by(true),
            KeyCode::Char('k') | KeyCode::Up => app.drag_by(false),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('m') => app.drop_grabbed(),
            _ => {}
        },
    }

    false
}

fn draw<P: PreferenceStore>(f: &mut ratatui::Frame, app: &App<P>) {
    let palette = Palette::for_theme(app.theme);
    let size = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(size);

    f.render_widget(render_header(app.theme, &palette), chunks[0]);
    f.render_widget(render_input(app, &palette), chunks[1]);

    let view = app.view();
    let mut list_state = ListState::default();
    if !view.is_empty() {
        list_state.select(Some(app.selected));
    }
    let list = render_list(&view, app.selected, app.mode, &palette);
    f.render_stateful_widget(list, chunks[2], &mut list_state);

    f.render_widget(render_footer(&view, app.filter, &palette), chunks[3]);
    f.render_widget(render_hint(app, &palette), chunks[4]);
}

fn render_header(theme: Theme, palette: &Palette) -> Paragraph<'static> {
    let toggle = match theme {
        Theme::Light => "☾ dark (t)",
        Theme::Dark => "☀ light (t)",
    };
    let line = Line::from(vec![
        Span::styled("T O D O", palette.accent()),
        Span::styled("    ", palette.base()),
        Span::styled(toggle, palette.muted()),
    ]);
    Paragraph::new(line)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL))
}

fn render_input<'a, P: PreferenceStore>(app: &'a App<P>, palette: &Palette) -> Paragraph<'a> {
    let line = match app.mode {
        InputMode::Editing => Line::from(vec![
            Span::styled("○ ", palette.muted()),
            Span::styled(app.input.as_str(), palette.base()),
            Span::styled("█", palette.accent()),
        ]),
        _ => Line::from(vec![
            Span::styled("○ ", palette.muted()),
            Span::styled("Create a new todo... (a)", palette.muted()),
        ]),
    };
    Paragraph::new(line)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL))
}

fn render_list<'a>(
    view: &DerivedView<'a>,
    selected: usize,
    mode: InputMode,
    palette: &Palette,
) -> List<'a> {
    let dragging = matches!(mode, InputMode::Dragging { .. });
    let items: Vec<ListItem> = view
        .items
        .iter()
        .enumerate()
        .map(|(pos, &(_, todo))| {
            let (symbol, text_style) = if todo.completed {
                ("✔", palette.completed())
            } else {
                ("○", palette.base())
            };
            let line = Line::from(vec![
                Span::styled(format!(" {symbol} "), palette.accent()),
                Span::styled(todo.text.as_str(), text_style),
            ]);
            let mut style = palette.base();
            if pos == selected && dragging {
                style = style.add_modifier(Modifier::DIM | Modifier::ITALIC);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    List::new(items)
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(if dragging { "≡ " } else { "➤ " })
}

fn render_footer(view: &DerivedView<'_>, filter: Filter, palette: &Palette) -> Paragraph<'static> {
    let mut spans = vec![
        Span::styled(remaining_label(view.remaining), palette.muted()),
        Span::styled("   ", palette.base()),
    ];
    for (n, f) in Filter::ALL.into_iter().enumerate() {
        let style = if f == filter {
            palette.accent()
        } else {
            palette.muted()
        };
        spans.push(Span::styled(format!("{} {}", n + 1, f.label()), style));
        spans.push(Span::styled("  ", palette.base()));
    }
    spans.push(Span::styled(" Clear Completed (c)", palette.muted()));
    Paragraph::new(Line::from(spans))
        .style(palette.base())
        .block(Block::default().borders(Borders::ALL))
}

fn render_hint<'a, P: PreferenceStore>(app: &'a App<P>, palette: &Palette) -> Paragraph<'a> {
    Paragraph::new(hint_text(app))
        .style(Style::default().fg(palette.muted).bg(palette.background))
}

/// Last status message, or the key hint for the current mode.
fn hint_text<P: PreferenceStore>(app: &App<P>) -> &str {
    let default_hint = match app.mode {
        InputMode::Dragging { .. } => "j/k move ; Enter drop",
        _ => "m to grab, j/k to move, Enter to drop ; q quit",
    };
    app.status.as_deref().unwrap_or(default_hint)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::todo::{TodoId, seed_todos};
    use crate::prefs::memory::InMemoryPrefs;

    fn app() -> App<InMemoryPrefs> {
        App::new(InMemoryPrefs::default(), seed_todos())
    }

    fn type_str(app: &mut App<InMemoryPrefs>, s: &str) {
        for c in s.chars() {
            handle_key(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_q_while_editing_does_not_quit() {
        let mut app = app();
        assert!(!handle_key(&mut app, KeyCode::Char('a')));
        assert_eq!(app.mode, InputMode::Editing);
        type_str(&mut app, "quiet time");
        handle_key(&mut app, KeyCode::Backspace);
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.todos().last().map(|t| t.text.as_str()), Some("quiet tim"));
        assert!(handle_key(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn escape_discards_pending_input() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "draft");
        handle_key(&mut app, KeyCode::Esc);
        assert!(app.input.is_empty());
        assert_eq!(app.todos().len(), 6);
    }

    #[test]
    fn space_toggles_and_c_clears() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Down);
        handle_key(&mut app, KeyCode::Char(' '));
        assert!(app.todos()[1].completed);
        handle_key(&mut app, KeyCode::Char('c'));
        assert!(app.todos().iter().all(|t| t.id != TodoId(2)));
    }

    #[test]
    fn filter_keys_switch_filter() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('3'));
        assert_eq!(app.filter, Filter::Completed);
        handle_key(&mut app, KeyCode::Tab);
        assert_eq!(app.filter, Filter::All);
        handle_key(&mut app, KeyCode::Char('2'));
        assert_eq!(app.filter, Filter::Active);
    }

    #[test]
    fn grab_move_drop_reorders() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('m'));
        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Char('j'));
        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        let ids: Vec<u64> = app.todos().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1, 4, 5, 6]);
        assert!(app.todos().iter().all(|t| !t.completed));
    }

    #[test]
    fn t_toggles_theme() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.prefs().get("theme"), Some("dark"));
    }

    #[test]
    fn grabbing_shows_drag_keys_until_drop() {
        let mut app = app();
        handle_key(&mut app, KeyCode::Char('t'));
        assert_eq!(hint_text(&app), "Theme: dark");

        handle_key(&mut app, KeyCode::Char('m'));
        assert_eq!(hint_text(&app), "j/k move ; Enter drop");
        handle_key(&mut app, KeyCode::Down);
        assert_eq!(hint_text(&app), "j/k move ; Enter drop");

        handle_key(&mut app, KeyCode::Enter);
        assert_eq!(hint_text(&app), "Dropped");
    }
}
