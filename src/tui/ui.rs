use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::core::state::{App, Screen};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    Analysis, Camera, DeepDive, Home, Library, Notebook, Scaffold, Summary,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, footer_area] = layout.areas(frame.area());

    draw_title_bar(frame, title_area, app);
    draw_screen(frame, main_area, app, tui);
    draw_footer(frame, footer_area, app.screen);
}

fn draw_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title_text = if app.status_message.is_empty() {
        format!("TapMath · {}", app.screen.title())
    } else {
        format!("TapMath · {} | {}", app.screen.title(), app.status_message)
    };
    frame.render_widget(Span::raw(title_text), area);
}

fn draw_screen(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    match app.screen {
        Screen::Home => Home::new(&mut tui.home).render(frame, area),
        Screen::Camera => {
            Camera::new(&tui.camera, &app.active_problem.raw_text).render(frame, area)
        }
        Screen::Analysis => {
            Analysis::new(&mut tui.analysis, &app.active_problem).render(frame, area)
        }
        Screen::Scaffold => Scaffold::new(
            &tui.scaffold_view,
            &app.active_problem.steps,
            app.scaffold,
        )
        .render(frame, area),
        Screen::Summary => Summary::new(&mut tui.summary, &app.active_problem).render(frame, area),
        Screen::Library => {
            let items = app.registry.filter_schemas(tui.library.category);
            Library::new(&mut tui.library, &items).render(frame, area)
        }
        Screen::DeepDive => {
            // The reducer only enters DeepDive after setting the link.
            let link = app
                .selected_link
                .as_ref()
                .expect("deep dive screen requires a selected link");
            let content = app.registry.resolve_deep_dive(&link.id);
            DeepDive::new(&tui.deep_dive, content).render(frame, area)
        }
        Screen::MistakeList => {
            let entries = app.registry.filter_mistakes(tui.notebook.filter);
            Notebook::new(&mut tui.notebook, &entries).render(frame, area)
        }
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, screen: Screen) {
    let hints = match screen {
        Screen::Home => "↑/↓ 选择  Enter 确认  q 退出",
        Screen::Camera => "Enter 拍摄  Esc 返回首页",
        Screen::Analysis => "↑/↓ 选项  ←/→ 触发词  Enter 选择/确认  Esc 返回首页",
        Screen::Scaffold => "Enter 下一步  ↑/↓ 滚动  Esc 返回首页",
        Screen::Summary => "↑/↓ 选择拓展  Enter 打开  h 回首页",
        Screen::Library => "←/→ 分类  ↑/↓ 选择  Enter 详情  Esc 返回",
        Screen::DeepDive => "Enter/s 解答  ↑/↓ 滚动  Esc 返回卡片",
        Screen::MistakeList => "←/→ 筛选  ↑/↓ 选择  Enter 打开  Esc 返回",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray))),
        area,
    );
}
