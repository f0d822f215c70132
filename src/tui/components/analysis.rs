//! # Analysis Screen Component
//!
//! The heart of the trainer: shows the captured statement with its trigger
//! spans highlighted and asks which mental model the problem matches.
//! Selecting an option shows its verdict feedback in place; confirming a
//! correct selection hands off to the scaffold.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AnalysisState` lives in `TuiState`, rebuilt on screen entry
//! - `Analysis` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::content::Problem;
use crate::core::evaluate;
use crate::core::highlight::{self, Segment};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the analysis screen.
pub struct AnalysisState {
    /// Quiz option ids, in display order.
    options: Vec<String>,
    pub cursor: usize,
    /// Synced from `App::selected_option` each frame.
    pub selected: Option<String>,
    /// Which trigger span is visually focused (cycled with ←/→).
    pub trigger_focus: usize,
    trigger_count: usize,
    pub list_state: ListState,
}

impl AnalysisState {
    pub fn new(problem: &Problem) -> Self {
        let mut list_state = ListState::default();
        if !problem.schema_options.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            options: problem.schema_options.iter().map(|o| o.id.clone()).collect(),
            cursor: 0,
            selected: None,
            trigger_focus: 0,
            trigger_count: problem.triggers.len(),
            list_state,
        }
    }
}

/// Events emitted by the analysis screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// An option was chosen; record and evaluate it.
    Select(String),
    /// The already-selected option was activated again; attempt the
    /// matched transition.
    Confirm,
}

impl EventHandler for AnalysisState {
    type Event = AnalysisEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AnalysisEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown => {
                if !self.options.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.options.len() - 1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::CursorLeft => {
                if self.trigger_count > 0 {
                    self.trigger_focus =
                        (self.trigger_focus + self.trigger_count - 1) % self.trigger_count;
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.trigger_count > 0 {
                    self.trigger_focus = (self.trigger_focus + 1) % self.trigger_count;
                }
                None
            }
            TuiEvent::Submit => {
                let id = self.options.get(self.cursor)?;
                if self.selected.as_deref() == Some(id) {
                    Some(AnalysisEvent::Confirm)
                } else {
                    Some(AnalysisEvent::Select(id.clone()))
                }
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the analysis screen.
pub struct Analysis<'a> {
    state: &'a mut AnalysisState,
    problem: &'a Problem,
}

impl<'a> Analysis<'a> {
    pub fn new(state: &'a mut AnalysisState, problem: &'a Problem) -> Self {
        Self { state, problem }
    }

    fn statement_line(&self) -> Line<'a> {
        let mut spans = Vec::new();
        let mut trigger_index = 0usize;
        for segment in highlight::segments(&self.problem.raw_text, &self.problem.triggers) {
            match segment {
                Segment::Plain(text) => spans.push(Span::raw(text)),
                Segment::Trigger { text, .. } => {
                    let mut style = Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                    if trigger_index == self.state.trigger_focus {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    spans.push(Span::styled(text, style));
                    trigger_index += 1;
                }
            }
        }
        Line::from(spans)
    }
}

impl Component for Analysis<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let option_count = self.problem.schema_options.len() as u16;
        let [statement_area, question_area, options_area, feedback_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(1),
            Constraint::Length(option_count * 2 + 2),
            Constraint::Min(4),
        ])
        .areas(area);

        let statement = Paragraph::new(self.statement_line())
            .block(
                Block::bordered()
                    .title(" 题目 · 触发词已标出 ")
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(statement, statement_area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                " 这道题匹配哪种思维模型？",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            question_area,
        );

        let items: Vec<ListItem> = self
            .problem
            .schema_options
            .iter()
            .map(|opt| {
                let marker = match &self.state.selected {
                    Some(sel) if *sel == opt.id => {
                        if opt.is_correct {
                            Span::styled("✓ ", Style::default().fg(Color::Green))
                        } else {
                            Span::styled("✗ ", Style::default().fg(Color::Red))
                        }
                    }
                    _ => Span::raw("  "),
                };
                ListItem::new(vec![
                    Line::from(vec![
                        marker,
                        Span::styled(
                            opt.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", opt.description),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(Block::bordered().padding(Padding::horizontal(1)))
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸");
        frame.render_stateful_widget(list, options_area, &mut self.state.list_state);

        if let Some(verdict) = self
            .state
            .selected
            .as_deref()
            .and_then(|id| evaluate::evaluate(self.problem, id).ok())
        {
            let (title, color) = if verdict.is_correct {
                (" 匹配成功 ", Color::Green)
            } else {
                (" 再想想 ", Color::Red)
            };
            let mut lines = vec![Line::from(verdict.explanation)];
            if verdict.is_correct {
                lines.push(Line::from(Span::styled(
                    "再按 Enter 进入思维脚手架 →",
                    Style::default().fg(Color::Cyan),
                )));
            }
            let feedback = Paragraph::new(lines)
                .block(
                    Block::bordered()
                        .title(title)
                        .border_style(Style::default().fg(color))
                        .padding(Padding::horizontal(1)),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(feedback, feedback_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn problem() -> Problem {
        ContentRegistry::builtin()
            .unwrap()
            .problem("prob_001")
            .unwrap()
            .clone()
    }

    #[test]
    fn first_submit_selects_second_submit_confirms() {
        let problem = problem();
        let mut state = AnalysisState::new(&problem);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(AnalysisEvent::Select("opt_B".to_string()))
        );
        // The main loop records the selection and syncs it back.
        state.selected = Some("opt_B".to_string());
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(AnalysisEvent::Confirm));
    }

    #[test]
    fn moving_the_cursor_after_selecting_re_selects() {
        let problem = problem();
        let mut state = AnalysisState::new(&problem);
        state.selected = Some("opt_A".to_string());
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(AnalysisEvent::Select("opt_B".to_string()))
        );
    }

    #[test]
    fn trigger_focus_wraps_in_both_directions() {
        let problem = problem();
        let mut state = AnalysisState::new(&problem);
        assert_eq!(state.trigger_focus, 0);
        state.handle_event(&TuiEvent::CursorLeft);
        assert_eq!(state.trigger_focus, problem.triggers.len() - 1);
        state.handle_event(&TuiEvent::CursorRight);
        assert_eq!(state.trigger_focus, 0);
    }

    #[test]
    fn renders_statement_options_and_feedback() {
        let problem = problem();
        let mut state = AnalysisState::new(&problem);
        state.selected = Some("opt_B".to_string());
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Analysis::new(&mut state, &problem).render(f, f.area()))
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
        assert!(text.contains("思维模型"));
        assert!(text.contains("匹配成功"));
        assert!(text.contains("思维脚手架"));
    }
}
