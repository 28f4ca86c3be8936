//! Ratatui-based terminal front-end for dashboard sessions.
//!
//! Any `Dashboard` can be rendered: a header with the title, the figure chart,
//! a controls panel built from the declared layout, and a footer with the
//! callback message and status.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::dashboard::{Control, ControlKind, Dashboard, Session};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::FigureChart;

/// Start an interactive session for `dashboard` and block until the user quits.
pub fn run<D: Dashboard>(dashboard: D) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(Session::start(dashboard));
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App<D: Dashboard> {
    session: Session<D>,
    selected_control: usize,
}

impl<D: Dashboard> App<D> {
    fn new(session: Session<D>) -> Self {
        Self {
            session,
            selected_control: 0,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let n_controls = self.session.layout().controls.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_control = self.selected_control.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_control + 1 < n_controls {
                    self.selected_control += 1;
                }
            }
            KeyCode::Left => self.session.adjust(self.selected_control, -1),
            KeyCode::Right => self.session.adjust(self.selected_control, 1),
            KeyCode::Char('r') => self.session.refresh(),
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let controls_height = self.session.layout().controls.len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(controls_height),
                Constraint::Length(4),
            ])
            .split(frame.area());

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_controls(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("fxdash", Style::default().fg(Color::Cyan)),
            Span::raw(" | "),
            Span::styled(
                self.session.layout().title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let title = self
            .session
            .view()
            .map(|v| v.figure.title.clone())
            .unwrap_or_else(|| "Chart".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = self.session.view() else {
            let msg = Paragraph::new("No data to display.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        frame.render_widget(FigureChart::new(&view.figure), inner);
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .session
            .layout()
            .controls
            .iter()
            .map(|c| ListItem::new(control_line(c)))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Controls").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_control));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  r refresh  q quit";
        let message = self.session.view().map(|v| v.message.as_str()).unwrap_or("");

        let mut lines = vec![Line::from(Span::styled(message, Style::default().fg(Color::White)))];
        let status = match self.session.error() {
            Some(err) => Span::styled(format!("error: {err}"), Style::default().fg(Color::Red)),
            None => Span::styled(help, Style::default().fg(Color::Gray)),
        };
        lines.push(Line::from(status));

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// One-line rendering of a control, e.g. `Target: ◂ EUR ▸` or `Interval: (•) Weekly ( ) Monthly`.
fn control_line(control: &Control) -> String {
    match control.kind {
        ControlKind::Dropdown => format!("{}: ◂ {} ▸", control.label, control.selected_label()),
        ControlKind::Radio => {
            let options = control
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    let mark = if i == control.selected { "(•)" } else { "( )" };
                    format!("{mark} {}", o.label)
                })
                .collect::<Vec<_>>()
                .join("  ");
            format!("{}: {options}", control.label)
        }
    }
}
