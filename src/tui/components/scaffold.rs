//! # Scaffold Screen Component
//!
//! Walks the guided solution step by step. Completed steps stay visible
//! above the current one; when the current step carries a pitfall and the
//! walker has revealed it, a warning card with the counter-example is shown
//! and must be acknowledged before moving on.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::content::Step;
use crate::core::scaffold::ScaffoldProgress;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

/// Persistent presentation state for the scaffold screen.
#[derive(Debug, Default)]
pub struct ScaffoldViewState {
    pub scroll: u16,
}

impl ScaffoldViewState {
    /// Scroll keys are handled locally; everything else falls through to
    /// the main loop.
    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::CursorUp => self.scroll = self.scroll.saturating_sub(1),
            TuiEvent::CursorDown => self.scroll = self.scroll.saturating_add(1),
            _ => {}
        }
    }
}

/// Transient render wrapper for the scaffold screen.
pub struct Scaffold<'a> {
    state: &'a ScaffoldViewState,
    steps: &'a [Step],
    progress: ScaffoldProgress,
}

impl<'a> Scaffold<'a> {
    pub fn new(state: &'a ScaffoldViewState, steps: &'a [Step], progress: ScaffoldProgress) -> Self {
        Self { state, steps, progress }
    }

    fn step_lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            if index > self.progress.step_index {
                break;
            }
            let current = index == self.progress.step_index;
            let marker = if current { "▶" } else { "✓" };
            let title_style = if current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{marker} 第 {} 步  ", index + 1), title_style),
                Span::styled(step.instruction.clone(), title_style),
            ]));
            lines.push(Line::from(Span::raw(format!("   {}", step.content))));
            lines.push(Line::from(""));
        }
        lines
    }
}

impl Component for Scaffold<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let pitfall = self
            .steps
            .get(self.progress.step_index)
            .and_then(|step| step.pitfall.as_ref())
            .filter(|_| self.progress.pitfall_shown);

        let pitfall_height = if pitfall.is_some() { 8 } else { 0 };
        let [steps_area, pitfall_area, hint_area] = Layout::vertical([
            Constraint::Min(6),
            Constraint::Length(pitfall_height),
            Constraint::Length(1),
        ])
        .areas(area);

        let steps = Paragraph::new(self.step_lines())
            .block(
                Block::bordered()
                    .title(" 思维脚手架 · 跟着图式走 ")
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0));
        frame.render_widget(steps, steps_area);

        if let Some(pitfall) = pitfall {
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    pitfall.title.clone(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(pitfall.description.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    format!("反例：{}", pitfall.counter_example),
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(
                Block::bordered()
                    .title(" ⚠ 易错点 ")
                    .border_style(Style::default().fg(Color::Red))
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: true });
            frame.render_widget(card, pitfall_area);
        }

        let hint = if pitfall.is_some() {
            "已了解易错点？按 Enter 继续"
        } else if self.progress.is_last_step(self.steps) {
            "按 Enter 完成并生成 TAP 卡片"
        } else {
            "按 Enter 进入下一步"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
            hint_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(progress: ScaffoldProgress) -> String {
        let registry = ContentRegistry::builtin().unwrap();
        let steps = &registry.problem("prob_001").unwrap().steps;
        let state = ScaffoldViewState::default();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Scaffold::new(&state, steps, progress).render(f, f.area()))
            .unwrap();
        terminal
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
            .collect()
    }

    #[test]
    fn first_step_renders_without_pitfall_card() {
        let text = rendered_text(ScaffoldProgress::default());
        assert!(text.contains("第 1 步"));
        assert!(!text.contains("易错点"));
    }

    #[test]
    fn revealed_pitfall_renders_warning_card() {
        let text = rendered_text(ScaffoldProgress { step_index: 1, pitfall_shown: true });
        assert!(text.contains("易错点"));
        assert!(text.contains("反例"));
    }

    #[test]
    fn last_step_hints_completion() {
        let registry = ContentRegistry::builtin().unwrap();
        let last = registry.problem("prob_001").unwrap().steps.len() - 1;
        let text = rendered_text(ScaffoldProgress { step_index: last, pitfall_shown: false });
        assert!(text.contains("生成 TAP 卡片"));
    }
}
