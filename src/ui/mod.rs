/// Viewer widgets
///
/// - `filters.rs` - category/status/layout button groups
/// - `cards.rs` - the project grid, list and timeline
/// - `modal.rs` - detail overlay
///
/// Everything here is a pure function of the viewer state; events go back
/// to `update` as `Message`s.

pub mod cards;
pub mod filters;
pub mod modal;

use iced::widget::{container, image, text};
use iced::{Alignment, ContentFit, Element, Length};
use std::collections::HashSet;
use std::path::Path;

use crate::Message;
use obras::state::carousel::Frame;

/// Where media paths resolve, and which of them are missing on disk
#[derive(Clone, Copy)]
pub struct MediaContext<'a> {
    pub images_root: &'a Path,
    pub missing: &'a HashSet<String>,
}

impl MediaContext<'_> {
    fn available(&self, path: &str) -> bool {
        !self.missing.contains(path)
    }
}

/// Neutral box shown for missing or broken media
pub fn placeholder<'a>(label: &'a str, height: f32) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .style(container::rounded_box)
        .into()
}

/// Render a card frame (image, video preview or placeholder)
pub fn frame_view<'a>(frame: Frame<'a>, media: MediaContext<'a>, height: f32) -> Element<'a, Message> {
    match frame {
        Frame::Image(path) if media.available(path) => image(image::Handle::from_path(
            media.images_root.join(path),
        ))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .content_fit(ContentFit::Cover)
        .into(),
        Frame::Video(path) if media.available(path) => placeholder("▶ Video", height),
        _ => placeholder("Sin imagen", height),
    }
}
