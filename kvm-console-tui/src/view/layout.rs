//! 主布局渲染

use kvm_console_provider::{Entry, Environment, KeyValueMap};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::components::list_panel::{self, PanelProps, truncate};
use super::components::{draft_panel, modal, statusbar};
use super::theme::colors;
use crate::model::{App, FocusPanel};

/// 渲染主布局
///
/// ```text
/// ┌ 标题栏：组织 / 环境 / KVM ──────────────────────────┐
/// │ Environments │ Key-Value Maps │ Entries            │
/// │              │                ├────────────────────┤
/// │              │                │ Draft              │
/// └ 状态栏 ────────────────────────────────────────────┘
/// ```
pub fn render(app: &App, frame: &mut Frame) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(1),    // 主内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(frame.area());

    render_title_bar(app, frame, main_layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(55),
        ])
        .split(main_layout[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(columns[2]);

    render_environments(app, frame, columns[0]);
    render_kvms(app, frame, columns[1]);
    render_entries(app, frame, right[0]);
    draft_panel::render(
        frame,
        right[1],
        app.view.draft.as_ref(),
        app.focus == FocusPanel::Draft,
        app.highlight(FocusPanel::Draft),
    );

    statusbar::render(app, frame, main_layout[2]);

    // 弹窗在最上层
    modal::render(app, frame);
}

/// 标题栏显示当前资源路径
fn render_title_bar(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" KVM Console │ "),
        Span::raw(app.view.breadcrumb.clone()),
    ]))
    .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}

fn props<'a>(app: &App, panel: FocusPanel, title: &'a str, placeholder: &'a str) -> PanelProps<'a> {
    PanelProps {
        title,
        focused: app.focus == panel,
        highlight: app.highlight(panel),
        placeholder,
    }
}

fn render_environments(app: &App, frame: &mut Frame, area: Rect) {
    list_panel::render(
        frame,
        area,
        &app.view.environments,
        &props(app, FocusPanel::Environments, "Environments", ""),
        |env: &Environment| env.name.as_str(),
        |env, width| Line::raw(truncate(&env.name, width)),
    );
}

fn render_kvms(app: &App, frame: &mut Frame, area: Rect) {
    list_panel::render(
        frame,
        area,
        &app.view.kvms,
        &props(app, FocusPanel::Kvms, "Key-Value Maps", "Select an environment"),
        |kvm: &KeyValueMap| kvm.name.as_str(),
        |kvm, width| {
            let lock = if kvm.encrypted { " 🔒" } else { "" };
            let name = truncate(&kvm.name, width.saturating_sub(lock.width()));
            Line::raw(format!("{name}{lock}"))
        },
    );
}

fn render_entries(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    // name 列宽取当前页最长的名字，最多占一半
    let name_width = app
        .view
        .entries
        .items
        .iter()
        .map(|e| e.name.width())
        .max()
        .unwrap_or(0);

    list_panel::render(
        frame,
        area,
        &app.view.entries,
        &props(app, FocusPanel::Entries, "Entries", "Select a key-value map"),
        |entry: &Entry| entry.name.as_str(),
        move |entry, width| {
            let column = name_width.min(width / 2);
            let name = truncate(&entry.name, column);
            let pad = " ".repeat(column.saturating_sub(name.width()) + 2);
            let value = entry.value.replace(['\r', '\n'], " ");
            let value = truncate(&value, width.saturating_sub(column + 2));
            Line::from(vec![
                Span::styled(name, Style::default().fg(c.fg)),
                Span::raw(pad),
                Span::styled(value, Style::default().fg(c.muted)),
            ])
        },
    );
}
