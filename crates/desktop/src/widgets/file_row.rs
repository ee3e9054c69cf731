use iced::widget::{column, container, row, text, Space};
use iced::{Color, Element, Length, Theme};

use crate::app::Message;
use crate::theme::FormStyle;
use crate::widgets::secondary_button;

const CORNER_RADIUS: f32 = 12.0;

/// "IMAGE / photo.jpg [Browse]" row acting as the form's file picker.
pub fn file_row<'a>(
    label: &str,
    file_label: String,
    has_file: bool,
    on_browse: Message,
    hovered: bool,
    on_hover: impl Fn(bool) -> Message + 'a,
    style: &FormStyle,
) -> Element<'a, Message> {
    let hint = style.hint;
    let surface = style.surface;
    let body = style.body_size;

    let display_text = if has_file {
        text(file_label).size(body).font(iced::Font {
            weight: iced::font::Weight::Medium,
            ..iced::Font::DEFAULT
        })
    } else {
        text(file_label).size(body).color(hint)
    };

    let btn = secondary_button::secondary_button(
        move || text("Browse\u{2026}").size(body - 2.0).into(),
        on_browse,
        hovered,
        on_hover,
        [6, 14],
    );

    let label_text = text(label.to_uppercase())
        .size(body - 4.0)
        .font(iced::Font {
            weight: iced::font::Weight::Semibold,
            ..iced::Font::DEFAULT
        })
        .color(hint);

    let info = column![label_text, Space::new().height(2), display_text].width(Length::Fill);

    let content = row![info, btn].spacing(8).align_y(iced::Alignment::Center);

    container(content)
        .padding([14, 16])
        .width(Length::Fill)
        .max_width(300.0 + 32.0)
        .style(move |theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                color: border_color(theme, hovered),
                width: 1.0,
                radius: CORNER_RADIUS.into(),
            },
            ..container::Style::default()
        })
        .into()
}

fn border_color(theme: &Theme, hovered: bool) -> Color {
    let p = theme.palette();
    Color {
        a: if hovered { 0.18 } else { 0.10 },
        ..p.text
    }
}
