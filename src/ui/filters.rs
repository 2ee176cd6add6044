use iced::widget::{button, row, text, Row};
use iced::{Alignment, Element};

use crate::Message;
use obras::state::data::{Category, Status};
use obras::state::filter::{CategoryFilter, FilterState, Layout, StatusFilter, ViewAction};

/// One button of a group; the active one is highlighted
fn choice<'a>(label: &'a str, active: bool, action: ViewAction) -> Element<'a, Message> {
    button(text(label).size(14))
        .padding([6, 14])
        .style(if active { button::primary } else { button::secondary })
        .on_press(Message::Filter(action))
        .into()
}

fn group<'a>(title: &'a str, buttons: Vec<Element<'a, Message>>) -> Row<'a, Message> {
    let mut group = row![text(title).size(14)]
        .spacing(8)
        .align_y(Alignment::Center);
    for b in buttons {
        group = group.push(b);
    }
    group
}

/// The three button groups. Each group shows exactly one active button,
/// derived from the current state.
pub fn filter_bar<'a>(state: &FilterState) -> Element<'a, Message> {
    let mut categories = vec![choice(
        "Todas",
        state.category == CategoryFilter::All,
        ViewAction::SetCategory(CategoryFilter::All),
    )];
    categories.extend(Category::ALL.iter().map(|&c| {
        choice(
            c.label(),
            state.category == CategoryFilter::Only(c),
            ViewAction::SetCategory(CategoryFilter::Only(c)),
        )
    }));

    let mut statuses = vec![choice(
        "Todas",
        state.status == StatusFilter::All,
        ViewAction::SetStatus(StatusFilter::All),
    )];
    statuses.extend(Status::ALL.iter().map(|&s| {
        choice(
            s.label(),
            state.status == StatusFilter::Only(s),
            ViewAction::SetStatus(StatusFilter::Only(s)),
        )
    }));

    let layouts = Layout::ALL
        .iter()
        .map(|&l| choice(l.label(), state.layout == l, ViewAction::SetLayout(l)))
        .collect();

    iced::widget::column![
        group("Categoría", categories),
        row![group("Estado", statuses), group("Vista", layouts)].spacing(32),
    ]
    .spacing(12)
    .into()
}
