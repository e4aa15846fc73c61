//! 主题和样式定义

use std::sync::atomic::{AtomicU8, Ordering};

use kvm_console_core::NoticeLevel;
use ratatui::style::{Color, Style, Stylize};
use serde::Deserialize;

// 0 = Dark, 1 = Light
static CURRENT_THEME: AtomicU8 = AtomicU8::new(0);

/// 主题枚举，配置文件里写作 "dark" / "light"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// 启动时设置一次主题
pub fn set_theme(theme: Theme) {
    let index = match theme {
        Theme::Dark => 0,
        Theme::Light => 1,
    };
    CURRENT_THEME.store(index, Ordering::Relaxed);
}

/// 获取当前主题的颜色方案
pub fn colors() -> ThemeColors {
    if CURRENT_THEME.load(Ordering::Relaxed) == 0 {
        ThemeColors::DARK
    } else {
        ThemeColors::LIGHT
    }
}

/// 主题颜色
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub modal_bg: Color,
}

impl ThemeColors {
    pub const DARK: Self = Self {
        fg: Color::Rgb(205, 214, 224),
        border: Color::Rgb(70, 76, 86),
        border_focused: Color::Rgb(97, 175, 239),
        highlight: Color::Rgb(40, 110, 170),
        selected_bg: Color::Rgb(44, 62, 88),
        selected_fg: Color::Rgb(240, 244, 248),
        success: Color::Rgb(152, 195, 121),
        warning: Color::Rgb(229, 192, 123),
        error: Color::Rgb(224, 108, 117),
        muted: Color::Rgb(120, 128, 140),
        modal_bg: Color::Rgb(24, 26, 31),
    };

    pub const LIGHT: Self = Self {
        fg: Color::Rgb(40, 44, 52),
        border: Color::Rgb(190, 196, 204),
        border_focused: Color::Rgb(30, 110, 190),
        highlight: Color::Rgb(30, 110, 190),
        selected_bg: Color::Rgb(214, 230, 248),
        selected_fg: Color::Rgb(16, 24, 32),
        success: Color::Rgb(56, 140, 70),
        warning: Color::Rgb(170, 120, 20),
        error: Color::Rgb(200, 50, 60),
        muted: Color::Rgb(130, 136, 146),
        modal_bg: Color::Rgb(246, 247, 249),
    };

    /// 提示级别对应的颜色
    pub fn notice(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => self.success,
            NoticeLevel::Warning => self.warning,
            NoticeLevel::Error | NoticeLevel::Blocking => self.error,
        }
    }
}

/// 常用样式
pub struct Styles;

impl Styles {
    pub fn border(focused: bool) -> Style {
        let c = colors();
        let color = if focused { c.border_focused } else { c.border };
        Style::new().fg(color)
    }

    /// 选中项样式
    pub fn selected() -> Style {
        let c = colors();
        Style::new().fg(c.selected_fg).bg(c.selected_bg).bold()
    }

    /// 标题样式
    pub fn title() -> Style {
        Style::new().fg(colors().fg).bold()
    }

    pub fn muted() -> Style {
        Style::new().fg(colors().muted)
    }

    /// 状态栏样式
    pub fn statusbar() -> Style {
        let c = colors();
        Style::new().fg(Color::White).bg(c.highlight)
    }

    /// 快捷键提示样式
    pub fn hint_key() -> Style {
        Style::new().fg(colors().warning).bold()
    }

    /// 快捷键说明样式
    pub fn hint_desc() -> Style {
        Style::new().fg(colors().fg)
    }
}
