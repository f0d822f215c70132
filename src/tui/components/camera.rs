//! # Camera Screen Component
//!
//! Mocked capture view: a viewfinder frame with the problem visible inside
//! it. Pressing the shutter starts a scanning phase; the main loop schedules
//! the capture-complete timer, so this component only displays the two
//! phases.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

/// Persistent state for the camera screen.
#[derive(Debug, Default)]
pub struct CameraState {
    /// Shutter pressed, capture timer pending.
    pub scanning: bool,
}

/// Transient render wrapper for the camera screen.
pub struct Camera<'a> {
    state: &'a CameraState,
    /// Statement shown inside the viewfinder.
    pub raw_text: &'a str,
}

impl<'a> Camera<'a> {
    pub fn new(state: &'a CameraState, raw_text: &'a str) -> Self {
        Self { state, raw_text }
    }
}

impl Component for Camera<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [viewfinder_area] = Layout::horizontal([Constraint::Percentage(70)])
            .flex(Flex::Center)
            .areas(area);
        let [viewfinder_area, hint_area] = Layout::vertical([
            Constraint::Percentage(70),
            Constraint::Length(2),
        ])
        .flex(Flex::Center)
        .areas(viewfinder_area);

        let border_style = if self.state.scanning {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let viewfinder = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(border_style)
            .title(" 取景框 ")
            .padding(Padding::uniform(1));

        let statement = Paragraph::new(self.raw_text)
            .block(viewfinder)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(statement, viewfinder_area);

        let hint = if self.state.scanning {
            Line::from(Span::styled(
                "⊙ 正在识别题目结构…",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                "对准题目，按 Enter 拍摄",
                Style::default().fg(Color::DarkGray),
            ))
        };
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_text(state: &CameraState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| Camera::new(state, "已知偶函数 f(x)").render(f, f.area()))
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
    fn idle_shows_shutter_hint() {
        let text = rendered_text(&CameraState::default());
        assert!(text.contains("按 Enter 拍摄"));
        assert!(!text.contains("正在识别"));
    }

    #[test]
    fn scanning_shows_progress_hint() {
        let text = rendered_text(&CameraState { scanning: true });
        assert!(text.contains("正在识别题目结构"));
    }
}
