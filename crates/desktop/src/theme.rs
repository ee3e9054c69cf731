use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::app::scaled;
use crate::settings::Appearance;

/// Resolve the iced Theme from the appearance setting.
pub fn resolve_theme(appearance: Appearance) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = if is_dark {
        dark_palette()
    } else {
        light_palette()
    };

    Theme::custom("People Counter", palette)
}

fn dark_palette() -> Palette {
    Palette {
        background: color!(0x1c, 0x1c, 0x1e),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0x00, 0x7b, 0xff),
        success: color!(0x30, 0xd1, 0x58),
        warning: color!(0xff, 0xcc, 0x00),
        danger: color!(0xff, 0x00, 0x00),
    }
}

fn light_palette() -> Palette {
    Palette {
        background: color!(0xf5, 0xf5, 0xf7),
        text: color!(0x1d, 0x1d, 0x1f),
        primary: color!(0x00, 0x7b, 0xff),
        success: color!(0x34, 0xc7, 0x59),
        warning: color!(0xff, 0x9f, 0x0a),
        danger: color!(0xd7, 0x00, 0x15),
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}

/// Panel background, slightly offset from the window background.
pub fn surface_color(theme: &Theme) -> Color {
    let p = theme.palette();
    let luma = p.background.r * 0.299 + p.background.g * 0.587 + p.background.b * 0.114;
    if luma > 0.5 {
        Color::WHITE
    } else {
        Color {
            r: (p.background.r + 0.06).min(1.0),
            g: (p.background.g + 0.06).min(1.0),
            b: (p.background.b + 0.06).min(1.0),
            a: 1.0,
        }
    }
}

/// De-emphasised text (hints, placeholders).
pub fn tertiary_color(theme: &Theme) -> Color {
    let p = theme.palette();
    Color { a: 0.45, ..p.text }
}

/// Sizes and colors of the upload form.
///
/// Built once per frame from the active theme and font scale and passed to
/// the form view; nothing about the form's look lives in globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormStyle {
    pub title_size: f32,
    pub body_size: f32,
    pub result_size: f32,
    pub preview_title_size: f32,
    pub button_padding: [u16; 2],
    pub corner_radius: f32,
    pub preview_radius: f32,
    pub column_gap: f32,
    pub max_width: f32,
    pub accent: Color,
    pub disabled: Color,
    pub error: Color,
    pub result: Color,
    pub hint: Color,
    pub surface: Color,
}

impl FormStyle {
    pub fn from_theme(theme: &Theme, font_scale: f32) -> Self {
        let palette = theme.palette();
        Self {
            title_size: scaled(25.0, font_scale),
            body_size: scaled(16.0, font_scale),
            result_size: scaled(20.0, font_scale),
            preview_title_size: scaled(18.0, font_scale),
            button_padding: [10, 20],
            corner_radius: 4.0,
            preview_radius: 8.0,
            column_gap: 20.0,
            max_width: 1000.0,
            accent: palette.primary,
            disabled: color!(0xcc, 0xcc, 0xcc),
            error: palette.danger,
            result: palette.text,
            hint: tertiary_color(theme),
            surface: surface_color(theme),
        }
    }
}
