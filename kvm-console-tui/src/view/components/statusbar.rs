//! 底部状态栏组件

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::model::{App, FocusPanel};
use crate::view::theme::{Styles, colors};

/// 渲染状态栏：左侧快捷键提示，有提示消息时接在后面
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints(app.focus).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    if let Some(notice) = &app.status {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            notice.message.clone(),
            Style::default()
                .fg(colors().notice(notice.level))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

/// 根据焦点面板生成快捷键提示
fn hints(focus: FocusPanel) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("Tab", "Panel"), ("↑↓", "Select")];

    match focus {
        FocusPanel::Environments => {
            hints.push(("Enter", "Open"));
        }
        FocusPanel::Kvms => {
            hints.push(("Enter", "Open"));
            hints.push(("Alt+a", "New"));
            hints.push(("Alt+d", "Delete"));
        }
        FocusPanel::Entries => {
            hints.push(("Enter", "View"));
            hints.push(("Alt+a", "Add"));
            hints.push(("Alt+d", "Delete"));
            hints.push(("Alt+x", "Export"));
        }
        FocusPanel::Draft => {
            hints.push(("Alt+a", "Add"));
            hints.push(("Alt+e", "Edit"));
            hints.push(("Alt+d", "Remove"));
            hints.push(("Alt+m", "Mode"));
            hints.push(("Alt+c", "Commit"));
        }
    }
    if focus != FocusPanel::Draft {
        hints.push(("PgUp/PgDn", "Page"));
    }

    hints.push(("?", "Help"));
    hints.push(("Alt+q", "Quit"));
    hints
}
