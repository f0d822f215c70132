//! # Summary Screen Component
//!
//! The payoff screen: the generated TAP card (Trigger / Action / Pitfall)
//! beside a small knowledge graph linking the mastered schema to its
//! variants and concepts, plus the related-links list for the deep-dive
//! jump.
//!
//! The graph reveals in two timed phases driven by the main loop: phase 1
//! shows the nodes, phase 2 draws the connections. Node labels are
//! truncated by display width so wide CJK titles stay inside their cells.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

use crate::content::{LinkKind, Problem};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Radial positions for up to five satellite nodes, clockwise from the top.
const NODE_POSITIONS: [(f64, f64); 5] = [
    (0.0, 70.0),
    (85.0, 25.0),
    (55.0, -65.0),
    (-55.0, -65.0),
    (-85.0, 25.0),
];

const MAX_NODE_LABEL_WIDTH: usize = 12;

/// Persistent state for the summary screen.
pub struct SummaryState {
    /// 0 = card only, 1 = graph nodes visible, 2 = links drawn.
    pub graph_phase: u8,
    /// Related link ids, in display order.
    links: Vec<String>,
    pub cursor: usize,
    pub list_state: ListState,
}

impl SummaryState {
    pub fn new(problem: &Problem) -> Self {
        let mut list_state = ListState::default();
        if !problem.related_links.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            graph_phase: 0,
            links: problem.related_links.iter().map(|l| l.id.clone()).collect(),
            cursor: 0,
            list_state,
        }
    }
}

/// Events emitted by the summary screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEvent {
    OpenLink(String),
}

impl EventHandler for SummaryState {
    type Event = SummaryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SummaryEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.list_state.select(Some(self.cursor));
                None
            }
            TuiEvent::CursorDown => {
                if !self.links.is_empty() {
                    self.cursor = (self.cursor + 1).min(self.links.len() - 1);
                    self.list_state.select(Some(self.cursor));
                }
                None
            }
            TuiEvent::Submit => self
                .links
                .get(self.cursor)
                .cloned()
                .map(SummaryEvent::OpenLink),
            _ => None,
        }
    }
}

/// Truncate a label to a maximum display width, honoring wide CJK glyphs.
fn truncate_label(label: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();
    for ch in label.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += ch_width;
        out.push(ch);
    }
    out
}

/// Transient render wrapper for the summary screen.
pub struct Summary<'a> {
    state: &'a mut SummaryState,
    problem: &'a Problem,
}

impl<'a> Summary<'a> {
    pub fn new(state: &'a mut SummaryState, problem: &'a Problem) -> Self {
        Self { state, problem }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect) {
        let card = &self.problem.tap_card;
        let rows = [
            ("Trigger 触发", Color::Yellow, &card.trigger),
            ("Action 动作", Color::Cyan, &card.action),
            ("Pitfall 陷阱", Color::Red, &card.pitfall),
        ];
        let mut lines = Vec::new();
        for (label, color, body) in rows {
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::raw(body.clone())));
            lines.push(Line::from(""));
        }
        let paragraph = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .title(" TAP 图式卡片 ")
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_graph(&self, frame: &mut Frame, area: Rect) {
        let phase = self.state.graph_phase;
        let center = truncate_label(&self.problem.tap_card.trigger, MAX_NODE_LABEL_WIDTH);
        let satellites: Vec<(f64, f64, String, LinkKind)> = self
            .problem
            .related_links
            .iter()
            .zip(NODE_POSITIONS)
            .map(|(link, (x, y))| {
                (x, y, truncate_label(&link.title, MAX_NODE_LABEL_WIDTH), link.kind)
            })
            .collect();

        let canvas = Canvas::default()
            .block(Block::bordered().title(" 知识关联图 "))
            .marker(symbols::Marker::Braille)
            .x_bounds([-100.0, 100.0])
            .y_bounds([-100.0, 100.0])
            .paint(move |ctx| {
                if phase >= 2 {
                    for (x, y, _, _) in &satellites {
                        ctx.draw(&CanvasLine {
                            x1: 0.0,
                            y1: 0.0,
                            x2: *x,
                            y2: *y,
                            color: Color::DarkGray,
                        });
                    }
                    ctx.layer();
                }
                ctx.print(
                    0.0,
                    0.0,
                    Line::from(Span::styled(
                        center.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )),
                );
                if phase >= 1 {
                    for (x, y, label, kind) in &satellites {
                        let color = match kind {
                            LinkKind::Variant => Color::Magenta,
                            LinkKind::Concept => Color::Green,
                        };
                        ctx.print(
                            *x,
                            *y,
                            Line::from(Span::styled(
                                label.clone(),
                                Style::default().fg(color),
                            )),
                        );
                    }
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_links(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .problem
            .related_links
            .iter()
            .map(|link| {
                let tag = match link.kind {
                    LinkKind::Variant => Span::styled("[变式] ", Style::default().fg(Color::Magenta)),
                    LinkKind::Concept => Span::styled("[概念] ", Style::default().fg(Color::Green)),
                };
                ListItem::new(Line::from(vec![tag, Span::raw(link.title.clone())]))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(" 深入拓展 · Enter 打开 ")
                    .padding(Padding::horizontal(1)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▸ ");
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

impl Component for Summary<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let links_height = self.problem.related_links.len() as u16 + 2;
        let [top_area, links_area] =
            Layout::vertical([Constraint::Min(10), Constraint::Length(links_height)]).areas(area);
        let [card_area, graph_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(top_area);

        self.render_card(frame, card_area);
        self.render_graph(frame, graph_area);
        self.render_links(frame, links_area);
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
    fn truncation_is_width_aware() {
        assert_eq!(truncate_label("abc", 12), "abc");
        // 8 CJK chars = 16 columns; cut to fit 12 with an ellipsis.
        assert_eq!(truncate_label("奇函数与不等式题", 12), "奇函数与不…");
        assert_eq!(truncate_label("", 12), "");
    }

    #[test]
    fn submit_opens_the_link_under_the_cursor() {
        let problem = problem();
        let mut state = SummaryState::new(&problem);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SummaryEvent::OpenLink("r2".to_string()))
        );
    }

    #[test]
    fn cursor_clamps_at_last_link() {
        let problem = problem();
        let mut state = SummaryState::new(&problem);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.cursor, problem.related_links.len() - 1);
    }

    #[test]
    fn renders_all_phases() {
        let problem = problem();
        for phase in 0..=2 {
            let mut state = SummaryState::new(&problem);
            state.graph_phase = phase;
            let backend = TestBackend::new(100, 35);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|f| Summary::new(&mut state, &problem).render(f, f.area()))
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
            assert!(text.contains("TAP 图式卡片"));
            assert!(text.contains("知识关联图"));
        }
    }
}
