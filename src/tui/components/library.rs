//! # Library Screen Component
//!
//! Browsable catalog of mental models, filterable by category, with a
//! detail overlay showing the selected model's TAP card.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LibraryState` lives in `TuiState`
//! - `Library` is created each frame with borrowed state and the filtered
//!   items resolved by the caller

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::content::{SchemaCategory, SchemaItem};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the library screen.
pub struct LibraryState {
    /// `None` = all categories.
    pub category: Option<SchemaCategory>,
    pub cursor: usize,
    /// Item count under the current filter, synced by the main loop before
    /// events are handled.
    pub item_count: usize,
    pub detail_open: bool,
    pub list_state: ListState,
}

impl Default for LibraryState {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            category: None,
            cursor: 0,
            item_count: 0,
            detail_open: false,
            list_state,
        }
    }
}

impl LibraryState {
    fn cycle_category(&mut self, forward: bool) {
        // None ↔ the four categories, as a ring.
        let ring: Vec<Option<SchemaCategory>> = std::iter::once(None)
            .chain(SchemaCategory::ALL.into_iter().map(Some))
            .collect();
        let position = ring
            .iter()
            .position(|c| *c == self.category)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % ring.len()
        } else {
            (position + ring.len() - 1) % ring.len()
        };
        self.category = ring[next];
        self.cursor = 0;
        self.list_state.select(Some(0));
    }
}

/// Events emitted by the library screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryEvent {
    Back,
}

impl EventHandler for LibraryState {
    type Event = LibraryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LibraryEvent> {
        match event {
            TuiEvent::Back => {
                if self.detail_open {
                    self.detail_open = false;
                    None
                } else {
                    Some(LibraryEvent::Back)
                }
            }
            TuiEvent::CursorLeft => {
                self.cycle_category(false);
                None
            }
            TuiEvent::CursorRight => {
                self.cycle_category(true);
                None
            }
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown => {
                if self.item_count > 0 {
                    self.cursor = (self.cursor + 1).min(self.item_count - 1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::Submit => {
                if self.item_count > 0 {
                    self.detail_open = !self.detail_open;
                }
                None
            }
            _ => None,
        }
    }
}

fn mastery_bar(level: u8) -> String {
    let filled = (usize::from(level) * 10) / 100;
    format!("{}{} {level}%", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Transient render wrapper for the library screen.
pub struct Library<'a> {
    state: &'a mut LibraryState,
    items: &'a [&'a SchemaItem],
}

impl<'a> Library<'a> {
    pub fn new(state: &'a mut LibraryState, items: &'a [&'a SchemaItem]) -> Self {
        Self { state, items }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        let entries: Vec<(Option<SchemaCategory>, &str)> = std::iter::once((None, "全部"))
            .chain(SchemaCategory::ALL.into_iter().map(|c| (Some(c), c.short_label())))
            .collect();
        for (category, label) in entries {
            let style = if category == self.state.category {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("←/→ 切换分类", Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, item: &SchemaItem) {
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);
        let lines = vec![
            Line::from(Span::styled(
                item.sub_title.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Trigger 触发",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(item.tap.trigger.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Action 动作",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(item.tap.action.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "Pitfall 陷阱",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(item.tap.pitfall.clone()),
            Line::from(""),
            Line::from(Span::styled(
                format!("掌握度 {}  上次复习 {}", mastery_bar(item.mastery_level), item.last_reviewed),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let detail = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(format!(" {} ", item.title))
                    .padding(Padding::uniform(1)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(detail, overlay);
    }
}

impl Component for Library<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [filter_area, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(4)]).areas(area);

        self.render_filter_bar(frame, filter_area);

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(
                            item.title.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", item.category.label()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}  {}", mastery_bar(item.mastery_level), item.sub_title),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();
        let list = List::new(rows)
            .block(
                Block::bordered()
                    .title(" 图式模型库 ")
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸");
        frame.render_stateful_widget(list, list_area, &mut self.state.list_state);

        if self.state.detail_open
            && let Some(item) = self.items.get(self.state.cursor)
        {
            self.render_detail(frame, area, item);
        }
    }
}

/// Center a rect of the given percentage size within `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}
