//! # Mistake Notebook Component
//!
//! Lists problems that carry notebook metadata, filterable by review
//! status. Opening an entry jumps straight to that problem's summary so
//! the schema can be re-studied without redoing the capture flow.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};

use crate::content::{NotebookStatus, Problem};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the mistake notebook.
pub struct NotebookState {
    /// `None` = both statuses.
    pub filter: Option<NotebookStatus>,
    pub cursor: usize,
    /// Problem ids under the current filter, synced by the main loop
    /// before events are handled.
    pub ids: Vec<String>,
    pub list_state: ListState,
}

impl Default for NotebookState {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            filter: None,
            cursor: 0,
            ids: Vec::new(),
            list_state,
        }
    }
}

impl NotebookState {
    fn cycle_filter(&mut self, forward: bool) {
        const RING: [Option<NotebookStatus>; 3] = [
            None,
            Some(NotebookStatus::Reviewing),
            Some(NotebookStatus::Mastered),
        ];
        let position = RING.iter().position(|f| *f == self.filter).unwrap_or(0);
        let next = if forward {
            (position + 1) % RING.len()
        } else {
            (position + RING.len() - 1) % RING.len()
        };
        self.filter = RING[next];
        self.cursor = 0;
        self.list_state.select(Some(0));
    }
}

/// Events emitted by the notebook screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookEvent {
    /// Jump to this problem's summary.
    Open(String),
    Back,
}

impl EventHandler for NotebookState {
    type Event = NotebookEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<NotebookEvent> {
        match event {
            TuiEvent::Back => Some(NotebookEvent::Back),
            TuiEvent::CursorLeft => {
                self.cycle_filter(false);
                None
            }
            TuiEvent::CursorRight => {
                self.cycle_filter(true);
                None
            }
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown => {
                if !self.ids.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.ids.len() - 1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::Submit => self.ids.get(self.cursor).cloned().map(NotebookEvent::Open),
            _ => None,
        }
    }
}

/// Transient render wrapper for the notebook screen.
pub struct Notebook<'a> {
    state: &'a mut NotebookState,
    entries: &'a [&'a Problem],
}

impl<'a> Notebook<'a> {
    pub fn new(state: &'a mut NotebookState, entries: &'a [&'a Problem]) -> Self {
        Self { state, entries }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let entries: [(Option<NotebookStatus>, &str); 3] = [
            (None, "全部"),
            (Some(NotebookStatus::Reviewing), NotebookStatus::Reviewing.label()),
            (Some(NotebookStatus::Mastered), NotebookStatus::Mastered.label()),
        ];
        let mut spans = Vec::new();
        for (filter, label) in entries {
            let style = if filter == self.state.filter {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("←/→ 切换筛选", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for Notebook<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [filter_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(4)]).areas(area);

        self.render_filter_bar(frame, filter_area);

        let rows: Vec<ListItem> = self
            .entries
            .iter()
            .map(|problem| {
                // filter_mistakes only yields problems with metadata.
                let (status_span, meta_line) = match &problem.notebook {
                    Some(meta) => {
                        let status_style = match meta.status {
                            NotebookStatus::Reviewing => Style::default().fg(Color::Yellow),
                            NotebookStatus::Mastered => Style::default().fg(Color::Green),
                        };
                        (
                            Span::styled(format!("[{}] ", meta.status.label()), status_style),
                            format!(
                                "  {} · {} · {}",
                                meta.date.format("%Y-%m-%d"),
                                meta.schema_title,
                                meta.tags.join(" / ")
                            ),
                        )
                    }
                    None => (Span::raw("     "), String::new()),
                };
                ListItem::new(vec![
                    Line::from(vec![status_span, Span::raw(problem.raw_text.clone())]),
                    Line::from(Span::styled(meta_line, Style::default().fg(Color::DarkGray))),
                ])
            })
            .collect();

        let list = List::new(rows)
            .block(
                Block::bordered()
                    .title(" 错题本 · 按图式归因 ")
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸");
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn filter_cycles_both_directions() {
        let mut state = NotebookState::default();
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.filter, Some(NotebookStatus::Reviewing));
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.filter, Some(NotebookStatus::Mastered));
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.filter, None);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.filter, Some(NotebookStatus::Mastered));
    }

    #[test]
    fn submit_opens_the_problem_under_the_cursor() {
        let mut state = NotebookState::default();
        state.ids = vec!["prob_001".to_string(), "prob_002".to_string()];
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(NotebookEvent::Open("prob_002".to_string()))
        );
    }

    #[test]
    fn submit_on_empty_list_is_ignored() {
        let mut state = NotebookState::default();
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn renders_entries_with_status_labels() {
        let registry = ContentRegistry::builtin().unwrap();
        let entries = registry.filter_mistakes(None);
        let mut state = NotebookState::default();
        state.ids = entries.iter().map(|p| p.id.clone()).collect();
        let backend = TestBackend::new(110, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Notebook::new(&mut state, &entries).render(f, f.area()))
            .unwrap();
        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .scan(0usize, |hidden, c| {
                if *hidden > 0 {
                    *hidden -= 1;
                    Some("")
                } else {
                    *hidden = unicode_width::UnicodeWidthStr::width(c.symbol()).saturating_sub(1);
                    Some(c.symbol())
                }
            })
            .collect::<String>();
        assert!(text.contains("错题本"));
        assert!(text.contains("待复习"));
        assert!(text.contains("已掌握"));
    }
}
