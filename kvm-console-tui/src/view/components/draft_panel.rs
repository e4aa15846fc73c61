//! 条目草稿面板

use kvm_console_core::{EntryDraftBuffer, InputMode};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use unicode_width::UnicodeWidthStr;

use super::list_panel::truncate;
use crate::view::theme::{Styles, colors};

/// 渲染草稿面板；没有选中 KVM 时只画一个空框
pub fn render(
    frame: &mut Frame,
    area: Rect,
    draft: Option<&EntryDraftBuffer>,
    focused: bool,
    highlight: usize,
) {
    let Some(draft) = draft else {
        let block = Block::default()
            .title(" Draft ")
            .borders(Borders::ALL)
            .border_style(Styles::border(false));
        let hint = Paragraph::new(Line::styled(" Select a key-value map", Styles::muted()))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let mode = match draft.mode() {
        InputMode::Pair => "pair",
        InputMode::BulkJson => "bulk JSON",
    };
    let block = Block::default()
        .title(format!(" Draft [{mode}] ({}) ", draft.len()))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    render_lines(frame, rows[0], draft, focused, highlight);
    frame.render_widget(Paragraph::new(pending_input(draft)), rows[1]);
}

fn render_lines(
    frame: &mut Frame,
    area: Rect,
    draft: &EntryDraftBuffer,
    focused: bool,
    highlight: usize,
) {
    if draft.is_empty() {
        let hint = match draft.mode() {
            InputMode::Pair => " Alt+a to add a name / value pair",
            InputMode::BulkJson => " Alt+a to paste a JSON array of {name, value}",
        };
        frame.render_widget(Paragraph::new(Line::styled(hint, Styles::muted())), area);
        return;
    }

    let c = colors();
    let width = usize::from(area.width);
    let items: Vec<ListItem> = draft
        .lines()
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let prefix = format!("{:>3}. ", i + 1);
            let name = truncate(&line.name, width / 3);
            let rest = width.saturating_sub(prefix.len() + name.width() + 3);
            ListItem::new(Line::from(vec![
                Span::styled(prefix, Style::default().fg(c.muted)),
                Span::styled(name, Style::default().fg(c.fg)),
                Span::styled(" = ", Style::default().fg(c.muted)),
                Span::raw(truncate(&single_line(&line.value), rest)),
            ]))
        })
        .collect();

    let mut list = List::new(items);
    let mut state = ListState::default();
    if focused {
        list = list.highlight_style(Styles::selected());
        state.select(Some(highlight));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// 最后一行：暂存区或未导入的批量文本
fn pending_input(draft: &EntryDraftBuffer) -> Line<'static> {
    let c = colors();
    match draft.mode() {
        InputMode::Pair => {
            let staging = draft.staging();
            if staging.name.is_empty() && staging.value.is_empty() {
                return Line::styled(" Alt+c commit · Alt+m switch mode", Styles::muted());
            }
            Line::from(vec![
                Span::styled(" staged: ", Style::default().fg(c.warning)),
                Span::raw(format!("{} = {}", staging.name, single_line(&staging.value))),
            ])
        }
        InputMode::BulkJson => {
            let text = draft.bulk_text();
            if text.trim().is_empty() {
                return Line::styled(" Alt+c commit · Alt+m switch mode", Styles::muted());
            }
            Line::from(vec![
                Span::styled(" pending JSON: ", Style::default().fg(c.warning)),
                Span::raw(format!("{} chars not imported", text.chars().count())),
            ])
        }
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
