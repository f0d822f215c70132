//! # Deep Dive Screen Component
//!
//! Renders the content behind a related link: either a solvable variant
//! problem with a hideable walkthrough, or a standalone concept explainer.
//! The caller resolves the link id against the registry (including the
//! fallback record) and passes the content in.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::content::{ConceptContent, DeepDiveContent, VariantContent};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the deep-dive screen.
#[derive(Debug, Default)]
pub struct DeepDiveState {
    /// Variant walkthrough starts hidden so the reader can attempt the
    /// problem first.
    pub show_solution: bool,
    pub scroll: u16,
}

/// Events emitted by the deep-dive screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepDiveEvent {
    Back,
}

impl EventHandler for DeepDiveState {
    type Event = DeepDiveEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DeepDiveEvent> {
        match event {
            TuiEvent::Back => Some(DeepDiveEvent::Back),
            TuiEvent::InputChar('s') | TuiEvent::Submit => {
                self.show_solution = !self.show_solution;
                None
            }
            TuiEvent::CursorUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the deep-dive screen.
pub struct DeepDive<'a> {
    state: &'a DeepDiveState,
    content: &'a DeepDiveContent,
}

impl<'a> DeepDive<'a> {
    pub fn new(state: &'a DeepDiveState, content: &'a DeepDiveContent) -> Self {
        Self { state, content }
    }

    fn variant_lines(&self, variant: &'a VariantContent) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "变式题",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            )),
            Line::from(variant.problem.as_str()),
            Line::from(""),
        ];

        if self.state.show_solution {
            for (index, step) in variant.steps.iter().enumerate() {
                lines.push(Line::from(Span::styled(
                    format!("{}  {}", index + 1, step.title),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(format!("   {}", step.content)));
                if let Some(tip) = &step.tip {
                    lines.push(Line::from(Span::styled(
                        format!("   💡 {tip}"),
                        Style::default().fg(Color::Yellow),
                    )));
                }
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("结论：{}", variant.conclusion),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "模型对比",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("原型  {}", variant.comparison.original)));
            lines.push(Line::from(format!("变式  {}", variant.comparison.variant)));
        } else {
            lines.push(Line::from(Span::styled(
                "先试着做一做 · 按 Enter 或 s 展开解答",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines
    }

    fn concept_lines(&self, concept: &'a ConceptContent) -> Vec<Line<'a>> {
        let mut lines = vec![Line::from(concept.body.as_str()), Line::from("")];
        for point in &concept.points {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("• {}  ", point.label),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(point.desc.as_str()),
            ]));
        }
        if let Some(example) = &concept.example {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("例：{example}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
        let (insight_label, insight_color) = if concept.warning {
            ("⚠ 易错警示", Color::Red)
        } else {
            ("✦ 关键洞察", Color::Green)
        };
        lines.push(Line::from(Span::styled(
            insight_label,
            Style::default().fg(insight_color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(concept.insight.as_str()));
        lines
    }
}

impl Component for DeepDive<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = match self.content {
            DeepDiveContent::Variant(variant) => self.variant_lines(variant),
            DeepDiveContent::Concept(concept) => self.concept_lines(concept),
        };
        let body = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(format!(" {} ", self.content.title()))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0));
        frame.render_widget(body, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentRegistry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(link_id: &str, state: &DeepDiveState) -> String {
        let registry = ContentRegistry::builtin().unwrap();
        let content = registry.resolve_deep_dive(link_id);
        let backend = TestBackend::new(100, 35);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DeepDive::new(state, content).render(f, f.area()))
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
    fn variant_hides_solution_until_toggled() {
        let hidden = rendered_text("r1", &DeepDiveState::default());
        assert!(hidden.contains("先试着做一做"));
        assert!(!hidden.contains("模型对比"));

        let shown = rendered_text(
            "r1",
            &DeepDiveState { show_solution: true, scroll: 0 },
        );
        assert!(shown.contains("模型对比"));
        assert!(shown.contains("结论"));
    }

    #[test]
    fn concept_renders_points_and_insight() {
        let text = rendered_text("r2", &DeepDiveState::default());
        assert!(text.contains("•"));
        assert!(text.contains("洞察") || text.contains("警示"));
    }

    #[test]
    fn toggle_key_flips_solution_visibility() {
        let mut state = DeepDiveState::default();
        state.handle_event(&TuiEvent::InputChar('s'));
        assert!(state.show_solution);
        state.handle_event(&TuiEvent::Submit);
        assert!(!state.show_solution);
    }

    #[test]
    fn back_emits_back() {
        let mut state = DeepDiveState::default();
        assert_eq!(state.handle_event(&TuiEvent::Back), Some(DeepDiveEvent::Back));
    }
}
