use iced::widget::{button, column, container, mouse_area, row, text, Column};
use iced::{Element, Length};
use iced_aw::Wrap;

use super::{frame_view, MediaContext};
use crate::Message;
use obras::state::carousel::Carousels;
use obras::state::data::Project;
use obras::state::details::format_date;
use obras::state::filter::{Layout, PortfolioView, ViewEntry};

const CARD_WIDTH: f32 = 320.0;
const CARD_IMAGE_HEIGHT: f32 = 200.0;
const ROW_IMAGE_HEIGHT: f32 = 140.0;

/// Literal placeholder for lists with no matches
pub fn no_results<'a>() -> Element<'a, Message> {
    message_box(
        "No se encontraron obras",
        "No hay obras que coincidan con los filtros seleccionados.",
    )
}

/// Literal placeholder when the manifest could not be loaded
pub fn load_error<'a>() -> Element<'a, Message> {
    message_box(
        "Error al cargar las obras",
        "No se pudieron cargar las obras. Por favor, intenta nuevamente más tarde.",
    )
}

fn message_box<'a>(title: &'a str, body: &'a str) -> Element<'a, Message> {
    container(column![text(title).size(22), text(body).size(15)].spacing(8))
        .padding(40)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

fn detail<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    column![text(label).size(11), text(value).size(14)]
        .spacing(2)
        .into()
}

fn card_body<'a>(project: &'a Project) -> Column<'a, Message> {
    column![
        row![
            text(format_date(project.start_date.as_deref())).size(12),
            text(&project.category).size(12),
            text(&project.status).size(12),
        ]
        .spacing(10),
        text(&project.name).size(20),
        text(&project.client).size(14),
        text(&project.description).size(13),
        row![
            detail("Ubicación", project.location.clone()),
            detail("Superficie", project.area.clone()),
        ]
        .spacing(16),
        button(text("Ver Detalles").size(13))
            .style(button::primary)
            .on_press(Message::OpenModal(project.id.clone())),
    ]
    .spacing(6)
}

/// A single project card. Hover drives its carousel, a click opens the modal.
fn card<'a>(
    project: &'a Project,
    layout: Layout,
    carousels: &'a Carousels,
    media: MediaContext<'a>,
) -> Element<'a, Message> {
    let frame = carousels.frame_for(project);

    let content: Element<'a, Message> = match layout {
        Layout::List => row![
            container(frame_view(frame, media, ROW_IMAGE_HEIGHT)).width(Length::Fixed(220.0)),
            card_body(project).width(Length::Fill),
        ]
        .spacing(16)
        .into(),
        Layout::Grid | Layout::Timeline => column![
            frame_view(frame, media, CARD_IMAGE_HEIGHT),
            card_body(project),
        ]
        .spacing(10)
        .into(),
    };

    let width = match layout {
        Layout::List => Length::Fill,
        Layout::Grid | Layout::Timeline => Length::Fixed(CARD_WIDTH),
    };

    mouse_area(
        container(content)
            .padding(12)
            .width(width)
            .style(container::rounded_box),
    )
    .on_enter(Message::CardEntered(project.id.clone()))
    .on_exit(Message::CardLeft(project.id.clone()))
    .on_press(Message::OpenModal(project.id.clone()))
    .into()
}

/// The portfolio area for the derived view
pub fn portfolio<'a>(
    view: PortfolioView<'a>,
    layout: Layout,
    carousels: &'a Carousels,
    media: MediaContext<'a>,
) -> Element<'a, Message> {
    let entries = match view {
        PortfolioView::Empty => return no_results(),
        PortfolioView::Cards(entries) => entries,
    };

    match layout {
        Layout::Grid => Wrap::with_elements(
            entries
                .into_iter()
                .filter_map(|e| match e {
                    ViewEntry::Card(p) => Some(card(p, layout, carousels, media)),
                    ViewEntry::YearMarker(_) => None,
                })
                .collect(),
        )
        .spacing(16.0)
        .line_spacing(16.0)
        .into(),
        Layout::List => Column::with_children(
            entries
                .into_iter()
                .filter_map(|e| match e {
                    ViewEntry::Card(p) => Some(card(p, layout, carousels, media)),
                    ViewEntry::YearMarker(_) => None,
                }),
        )
        .spacing(12)
        .into(),
        Layout::Timeline => Column::with_children(entries.into_iter().map(|e| match e {
            ViewEntry::YearMarker(year) => text(year.to_string()).size(28).into(),
            ViewEntry::Card(p) => card(p, layout, carousels, media),
        }))
        .spacing(12)
        .into(),
    }
}
