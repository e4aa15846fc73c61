//! 弹窗组件

use kvm_console_core::{Notice, NoticeLevel};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::App;
use crate::model::state::{DeleteTarget, Modal, PairField};
use crate::view::theme::colors;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(modal) = &app.modal.active else {
        return;
    };

    match modal {
        Modal::CreateKvm { name } => render_create_kvm(frame, name),
        Modal::ConfirmDelete {
            target,
            confirm_focused,
        } => render_confirm_delete(frame, target, *confirm_focused),
        Modal::PairInput {
            line,
            name,
            value,
            field,
        } => render_pair_input(frame, *line, name, value, *field),
        Modal::BulkInput { text } => render_bulk_input(frame, text),
        Modal::EntryDetail { name, value } => render_entry_detail(frame, name, value),
        Modal::Notices { notices } => render_notices(frame, notices, app.modal.notice_level()),
        Modal::Help => render_help(frame),
    }
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 清空背景并画出边框，返回内容区域
fn frame_modal(frame: &mut Frame, area: Rect, title: &str, border: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(colors().modal_bg));
    frame.render_widget(block, area);
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}

/// 输入框的一行：有焦点时带光标
fn input_line(value: &str, focused: bool) -> Line<'static> {
    let c = colors();
    if focused {
        Line::styled(format!("  {value}▎"), Style::default().fg(Color::Cyan))
    } else {
        Line::styled(format!("  {value}"), Style::default().fg(c.fg))
    }
}

fn label(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().fg(Color::Gray))
}

fn footer(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().fg(Color::DarkGray))
}

fn render_create_kvm(frame: &mut Frame, name: &str) {
    let area = centered_rect(50, 8, frame.area());
    let inner = frame_modal(frame, area, "New Key-Value Map", Color::Cyan);

    let lines = vec![
        label("Name"),
        input_line(name, true),
        Line::from(""),
        footer("New maps are created encrypted"),
        footer("Enter create · Esc cancel"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm_delete(frame: &mut Frame, target: &DeleteTarget, confirm_focused: bool) {
    let area = centered_rect(46, 9, frame.area());
    let inner = frame_modal(frame, area, "Confirm Deletion", Color::Red);

    let cancel_style = if confirm_focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Black).bg(Color::White)
    };
    let confirm_style = if confirm_focused {
        Style::default().fg(Color::Black).bg(Color::Red)
    } else {
        Style::default().fg(Color::Red)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            format!("  Delete {} ?", target.kind()),
            Style::default().fg(colors().fg),
        ),
        Line::styled(
            format!("  \"{}\"", target.name()),
            Style::default().fg(Color::Yellow),
        ),
        Line::from(""),
        Line::from(vec![
            Span::raw("    "),
            Span::styled(" Cancel ", cancel_style),
            Span::raw("    "),
            Span::styled(" Delete ", confirm_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_pair_input(
    frame: &mut Frame,
    line: Option<usize>,
    name: &str,
    value: &str,
    field: PairField,
) {
    let area = centered_rect(60, 11, frame.area());
    let title = match line {
        Some(index) => format!("Edit Line {}", index + 1),
        None => "Add Entry".to_string(),
    };
    let inner = frame_modal(frame, area, &title, Color::Cyan);

    let lines = vec![
        label("Name"),
        input_line(name, field == PairField::Name),
        Line::from(""),
        label("Value"),
        input_line(value, field == PairField::Value),
        Line::from(""),
        footer("Tab switch field · Enter save · Esc cancel"),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_bulk_input(frame: &mut Frame, text: &str) {
    let screen = frame.area();
    let area = centered_rect(
        screen.width.saturating_sub(10).max(40),
        screen.height.saturating_sub(6).max(10),
        screen,
    );
    let inner = frame_modal(frame, area, "Bulk JSON", Color::Cyan);

    let mut lines = vec![
        footer(r#"[{"name": "...", "value": "..."}, ...]"#),
        Line::from(""),
    ];
    let body: Vec<&str> = text.split('\n').collect();
    let last = body.len().saturating_sub(1);
    for (i, row) in body.iter().enumerate() {
        let cursor = if i == last { "▎" } else { "" };
        lines.push(Line::styled(
            format!("{row}{cursor}"),
            Style::default().fg(colors().fg),
        ));
    }

    // 内容超出时保持末尾可见
    let visible = usize::from(inner.height.saturating_sub(1));
    let scroll = u16::try_from(lines.len().saturating_sub(visible)).unwrap_or(u16::MAX);
    let editor = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), editor);

    let hint_area = Rect::new(inner.x, inner.y + editor.height, inner.width, 1);
    frame.render_widget(
        Paragraph::new(footer("Ctrl+S import · Enter newline · Esc cancel")),
        hint_area,
    );
}

fn render_entry_detail(frame: &mut Frame, name: &str, value: &str) {
    let screen = frame.area();
    let area = centered_rect(screen.width.saturating_sub(20).max(40), 14, screen);
    let inner = frame_modal(frame, area, name, Color::Cyan);

    let mut lines = vec![label("Value"), Line::from("")];
    lines.extend(value.lines().map(|l| Line::raw(l.to_string())));
    lines.push(Line::from(""));
    lines.push(footer("Enter or Esc to close"));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_notices(frame: &mut Frame, notices: &[Notice], level: Option<NoticeLevel>) {
    let c = colors();
    let height = u16::try_from(notices.len()).unwrap_or(u16::MAX).saturating_add(5).min(20);
    let area = centered_rect(70, height, frame.area());
    let border = level.map_or(c.error, |l| c.notice(l));
    let inner = frame_modal(frame, area, "Attention", border);

    let mut lines: Vec<Line> = notices
        .iter()
        .map(|notice| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(c.notice(notice.level))),
                Span::styled(notice.message.clone(), Style::default().fg(c.fg)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(footer("Press Esc or Enter to close"));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(58, 24, frame.area());
    let inner = frame_modal(frame, area, "Help", Color::Cyan);

    let section = |text: &'static str| {
        Line::styled(
            text,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), Style::default().fg(Color::Yellow)),
            Span::styled(desc, Style::default().fg(colors().fg)),
        ])
    };

    let lines = vec![
        section("Navigation"),
        key("Tab / ←→", "Switch panel"),
        key("↑↓ / jk", "Move"),
        key("Enter", "Open environment or map, view entry"),
        key("PgUp / PgDn", "Previous / next page"),
        key("Alt+r", "Refresh"),
        Line::from(""),
        section("Maps and entries"),
        key("Alt+a", "New map / add draft line"),
        key("Alt+d", "Delete map or entry"),
        key("Alt+x", "Export entries to JSON"),
        Line::from(""),
        section("Draft"),
        key("Alt+m", "Switch pair / bulk JSON input"),
        key("Alt+e", "Edit highlighted line"),
        key("Alt+d", "Remove highlighted line"),
        key("Alt+c", "Commit all lines"),
        Line::from(""),
        key("Esc", "Clear status / close"),
        key("Alt+q", "Quit"),
        Line::from(""),
        footer("Press Esc to close the help"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
