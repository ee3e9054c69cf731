use iced::border::Border;
use iced::widget::{column, container, image, row, text, Space};
use iced::{Element, Length, Shadow, Theme, Vector};

use people_counter_core::form::form_view::{FormView, PreviewPane};
use people_counter_core::shared::constants::PREVIEW_UNAVAILABLE;

use crate::app::{HoverState, Message};
use crate::theme::FormStyle;
use crate::widgets::file_row::file_row;
use crate::widgets::primary_button::{primary_button, PrimaryStyle};

/// The upload form: picker, submit button, error and count on the left,
/// preview on the right.
pub fn view<'a>(
    form: FormView,
    style: &FormStyle,
    preview: Option<&image::Handle>,
    hover: HoverState,
) -> Element<'a, Message> {
    let title = text(form.title).size(style.title_size).font(iced::Font {
        weight: iced::font::Weight::Bold,
        ..iced::Font::DEFAULT
    });

    let body = row![
        container(left_column(&form, style, hover))
            .width(Length::FillPortion(1))
            .max_width(style.max_width * 0.45),
        container(preview_column(form.preview, style, preview))
            .max_width(style.max_width * 0.45)
            .center_x(Length::FillPortion(1)),
    ]
    .spacing(style.column_gap);

    container(column![title, Space::new().height(20), body])
        .max_width(style.max_width)
        .center_x(Length::Fill)
        .into()
}

fn left_column<'a>(form: &FormView, style: &FormStyle, hover: HoverState) -> Element<'a, Message> {
    let picker = file_row(
        "Image",
        form.file_label.clone(),
        form.file_selected,
        Message::SelectFile,
        hover.browse,
        Message::BrowseHovered,
        style,
    );

    let label = form.submit.label;
    let body_size = style.body_size;
    let upload = primary_button(
        move || text(label).size(body_size).into(),
        form.submit.enabled.then_some(Message::Upload),
        hover.upload,
        Message::UploadHovered,
        style.button_padding,
        PrimaryStyle {
            background: style.accent,
            disabled: style.disabled,
            radius: style.corner_radius,
        },
    );

    let mut col = column![picker, Space::new().height(10), upload].spacing(0);

    if let Some(error) = &form.error {
        col = col
            .push(Space::new().height(10))
            .push(text(error.clone()).size(style.body_size).color(style.error));
    }

    if let Some(result) = &form.result {
        col = col.push(Space::new().height(20)).push(
            text(result.clone())
                .size(style.result_size)
                .color(style.result)
                .font(iced::Font {
                    weight: iced::font::Weight::Bold,
                    ..iced::Font::DEFAULT
                }),
        );
    }

    col.into()
}

fn preview_column<'a>(
    pane: PreviewPane,
    style: &FormStyle,
    handle: Option<&image::Handle>,
) -> Element<'a, Message> {
    match (pane, handle) {
        (PreviewPane::Hidden, _) => Space::new().into(),
        (PreviewPane::Message(message), _) => {
            text(message).size(style.body_size).color(style.hint).into()
        }
        (PreviewPane::Image { title, .. }, Some(handle)) => {
            let radius = style.preview_radius;
            let framed = container(image(handle.clone()).width(Length::Fill))
                .style(move |_theme: &Theme| container::Style {
                    border: Border {
                        radius: radius.into(),
                        ..Border::default()
                    },
                    shadow: Shadow {
                        color: iced::Color::from_rgba(0.0, 0.0, 0.0, 0.1),
                        offset: Vector::new(0.0, 4.0),
                        blur_radius: 6.0,
                    },
                    ..container::Style::default()
                });
            column![
                text(title).size(style.preview_title_size).color(style.result),
                Space::new().height(10),
                framed,
            ]
            .into()
        }
        // Preview decoded into a data URI but could not be turned into pixels.
        (PreviewPane::Image { .. }, None) => text(PREVIEW_UNAVAILABLE)
            .size(style.body_size)
            .color(style.hint)
            .into(),
    }
}
