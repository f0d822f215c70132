//! # Home Screen Component
//!
//! Entry menu: start the capture flow, browse the schema library, open the
//! mistake notebook, or quit.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const MENU: [(&str, &str); 4] = [
    ("📷 拍题识模", "拍摄题目，训练图式识别"),
    ("📚 模型库", "浏览已建立的思维模型"),
    ("📓 错题本", "按图式归因复盘错题"),
    ("✕ 退出", "离开 TapMath"),
];

/// Persistent state for the home menu.
pub struct HomeState {
    pub cursor: usize,
    pub list_state: ListState,
}

impl Default for HomeState {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { cursor: 0, list_state }
    }
}

/// Events emitted by the home menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvent {
    Capture,
    Library,
    MistakeList,
    Quit,
}

impl EventHandler for HomeState {
    type Event = HomeEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HomeEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown => {
                self.cursor = (self.cursor + 1).min(MENU.len() - 1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::Submit => match self.cursor {
                0 => Some(HomeEvent::Capture),
                1 => Some(HomeEvent::Library),
                2 => Some(HomeEvent::MistakeList),
                _ => Some(HomeEvent::Quit),
            },
            _ => None,
        }
    }
}

/// Transient render wrapper for the home screen.
pub struct Home<'a> {
    state: &'a mut HomeState,
}

impl<'a> Home<'a> {
    pub fn new(state: &'a mut HomeState) -> Self {
        Self { state }
    }
}

impl Component for Home<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let menu_height = MENU.len() as u16 + 2;
        let [banner_area, menu_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(menu_height),
        ])
        .flex(Flex::Center)
        .areas(area);

        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                "TAP 数学",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Trigger · Action · Pitfall",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "识别模式，而不是记忆题目",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(banner, banner_area);

        let [list_area] = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .areas(menu_area);

        let items: Vec<ListItem> = MENU
            .iter()
            .map(|(title, desc)| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{title}  ")),
                    Span::styled(*desc, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::bordered().padding(Padding::horizontal(1)))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▸ ");

        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn cursor_is_clamped_to_menu_bounds() {
        let mut state = HomeState::default();
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.cursor, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.cursor, MENU.len() - 1);
    }

    #[test]
    fn submit_emits_the_entry_under_the_cursor() {
        let mut state = HomeState::default();
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(HomeEvent::Capture));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(HomeEvent::Library));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(HomeEvent::MistakeList)
        );
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(HomeEvent::Quit));
    }

    #[test]
    fn renders_menu_entries() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = HomeState::default();
        terminal
            .draw(|f| Home::new(&mut state).render(f, f.area()))
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
        assert!(text.contains("TAP 数学"));
        assert!(text.contains("模型库"));
        assert!(text.contains("错题本"));
    }
}
