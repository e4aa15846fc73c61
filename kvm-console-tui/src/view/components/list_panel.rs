//! 分页列表面板（环境 / KVM / 条目共用）

use kvm_console_core::ListView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use crate::view::theme::{Styles, colors};

/// 面板外观参数
pub struct PanelProps<'a> {
    pub title: &'a str,
    pub focused: bool,
    /// 当前页内的高亮行
    pub highlight: usize,
    /// 上级未选中时显示的提示
    pub placeholder: &'a str,
}

/// 渲染一个分页列表
///
/// `label` 负责把一项画成一行，`name` 用于和 `ListView::selected` 比较。
pub fn render<T>(
    frame: &mut Frame,
    area: Rect,
    list: &ListView<T>,
    props: &PanelProps<'_>,
    name: impl Fn(&T) -> &str,
    label: impl Fn(&T, usize) -> Line<'static>,
) {
    let c = colors();
    let block = Block::default()
        .title(format!(" {} ({}) ", props.title, list.total))
        .title_style(Styles::title())
        .title_bottom(page_indicator(list))
        .borders(Borders::ALL)
        .border_style(Styles::border(props.focused));

    if !list.visible {
        let hint = Paragraph::new(Line::styled(
            format!(" {}", props.placeholder),
            Styles::muted(),
        ))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    if list.items.is_empty() {
        let text = if list.loading { " Loading..." } else { " (empty)" };
        let hint = Paragraph::new(Line::styled(text, Styles::muted())).block(block);
        frame.render_widget(hint, area);
        return;
    }

    // 左侧 2 列留给选中标记
    let width = usize::from(area.width.saturating_sub(4));
    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|item| {
            let marker = if list.selected.as_deref() == Some(name(item)) {
                Span::styled("● ", Style::default().fg(c.success))
            } else {
                Span::raw("  ")
            };
            let mut line = label(item, width);
            line.spans.insert(0, marker);
            ListItem::new(line)
        })
        .collect();

    let mut widget = List::new(items).block(block);
    let mut state = ListState::default();
    if props.focused {
        widget = widget.highlight_style(Styles::selected());
        state.select(Some(props.highlight));
    }
    frame.render_stateful_widget(widget, area, &mut state);
}

/// 底部的页码和翻页提示
fn page_indicator<T>(list: &ListView<T>) -> Line<'static> {
    let c = colors();
    let mut spans = Vec::new();
    if list.loading {
        spans.push(Span::styled(" loading ", Style::default().fg(c.warning)));
    }
    if list.page_count > 1 {
        let arrow = |enabled: bool, text: &'static str| {
            if enabled {
                Span::styled(text, Style::default().fg(c.highlight))
            } else {
                Span::styled(text, Style::default().fg(c.border))
            }
        };
        spans.push(arrow(list.has_prev, " ◀"));
        spans.push(Span::styled(
            format!(" {}/{} ", list.page + 1, list.page_count),
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD),
        ));
        spans.push(arrow(list.has_next, "▶ "));
    }
    Line::from(spans)
}

/// 按显示宽度截断，超出时以 `…` 结尾
pub fn truncate(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        // 留出省略号的位置
        if width + w > max_width - 1 {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
