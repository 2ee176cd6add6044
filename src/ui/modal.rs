use iced::widget::{
    button, center, column, container, mouse_area, opaque, row, scrollable, stack, text, Column,
};
use iced::{Color, Element, Length};

use super::{frame_view, MediaContext};
use crate::Message;
use obras::state::carousel::Frame;
use obras::state::data::Project;
use obras::state::details::{duration_until_now, format_date, format_end_date};

const DETAIL_IMAGE_HEIGHT: f32 = 360.0;

/// Layer `content` over `base` with a dimmed backdrop.
///
/// The backdrop swallows input meant for the page underneath, so the
/// portfolio cannot be scrolled or hovered while the overlay is up.
/// Clicking it emits `on_blur`.
pub fn overlay<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(
                    Color {
                        a: 0.8,
                        ..Color::BLACK
                    }
                    .into(),
                ),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

fn field<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![text(label).size(13).width(Length::Fixed(140.0)), text(value).size(15)]
        .spacing(12)
        .into()
}

/// Full detail panel for one project: every image, every video entry and
/// the complete metadata block.
pub fn details<'a>(project: &'a Project, media: MediaContext<'a>) -> Element<'a, Message> {
    let gallery = Column::with_children(
        project
            .images
            .iter()
            .map(|path| frame_view(Frame::Image(path), media, DETAIL_IMAGE_HEIGHT))
            .chain(
                project
                    .videos
                    .iter()
                    .map(|path| frame_view(Frame::Video(path), media, DETAIL_IMAGE_HEIGHT)),
            ),
    )
    .spacing(12);

    let duration = duration_until_now(project).unwrap_or_else(|| "N/A".to_string());

    let info = column![
        text(&project.name).size(28),
        text(&project.category).size(14),
        text(&project.description).size(15),
        field("Estado", project.status.clone()),
        field("Ubicación", project.location.clone()),
        field("Superficie", project.area.clone()),
        field("Fecha de inicio", format_date(project.start_date.as_deref())),
        field("Fecha de fin", format_end_date(project)),
        field("Duración", duration),
        field("Cliente", project.client.clone()),
    ]
    .spacing(10);

    let panel = column![
        row![
            iced::widget::horizontal_space(),
            button(text("Cerrar").size(14))
                .style(button::secondary)
                .on_press(Message::CloseModal),
        ],
        scrollable(column![gallery, info].spacing(20)).height(Length::Fill),
    ]
    .spacing(12);

    container(panel)
        .width(Length::Fixed(760.0))
        .height(Length::Fixed(680.0))
        .padding(24)
        .style(container::rounded_box)
        .into()
}
