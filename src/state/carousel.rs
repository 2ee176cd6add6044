/// Hover media carousel for project cards
///
/// Each hovered card owns one `CarouselController`, stored in `Carousels`
/// under the project id. A controller is acquired on pointer-enter and
/// released on pointer-leave, or when its card is no longer rendered after a
/// filter change. The viewer creates one timer per live controller from
/// [`Carousels::active_timers`], so releasing the controller is what stops
/// the timer.

use std::collections::HashMap;

use super::data::{Project, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing to animate (fewer than two images, no video)
    Idle,
    /// First video is playing; cycling starts when it ends
    PlayingVideo,
    /// Advancing through the images on every interval tick
    Cycling,
}

/// Which timer a live controller needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Repeating image interval
    Interval,
    /// Bound on the video preview; fires `video_ended`
    VideoHold,
}

/// What a card displays right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    Image(&'a str),
    Video(&'a str),
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct CarouselController {
    images: Vec<String>,
    videos: Vec<String>,
    index: usize,
    phase: Phase,
}

impl CarouselController {
    pub fn start(project: &Project) -> Self {
        let phase = if !project.videos.is_empty() {
            Phase::PlayingVideo
        } else {
            Self::phase_after_video(project.images.len())
        };

        CarouselController {
            images: project.images.clone(),
            videos: project.videos.clone(),
            index: 0,
            phase,
        }
    }

    fn phase_after_video(image_count: usize) -> Phase {
        if image_count >= 2 {
            Phase::Cycling
        } else {
            Phase::Idle
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance to the next image, wrapping. Only moves while cycling.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Cycling {
            return false;
        }
        self.index = (self.index + 1) % self.images.len();
        true
    }

    /// The preview video finished: cross back to the first image and cycle
    pub fn video_ended(&mut self) {
        if self.phase == Phase::PlayingVideo {
            self.index = 0;
            self.phase = Self::phase_after_video(self.images.len());
        }
    }

    pub fn timer(&self) -> Option<TimerKind> {
        match self.phase {
            Phase::Idle => None,
            Phase::PlayingVideo => Some(TimerKind::VideoHold),
            Phase::Cycling => Some(TimerKind::Interval),
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        match self.phase {
            Phase::PlayingVideo => Frame::Video(&self.videos[0]),
            _ => self
                .images
                .get(self.index)
                .map_or(Frame::Placeholder, |img| Frame::Image(img)),
        }
    }
}

/// Resting frame of a card that is not hovered
pub fn resting_frame(project: &Project) -> Frame<'_> {
    project
        .images
        .first()
        .map_or(Frame::Placeholder, |img| Frame::Image(img))
}

/// Live carousel controllers, keyed by project id
#[derive(Debug, Default)]
pub struct Carousels {
    active: HashMap<ProjectId, CarouselController>,
}

impl Carousels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a card. Re-entering restarts from the first frame.
    pub fn enter(&mut self, project: &Project) {
        self.active
            .insert(project.id.clone(), CarouselController::start(project));
    }

    /// Pointer left a card. Returns whether a controller was released.
    pub fn leave(&mut self, id: &ProjectId) -> bool {
        self.active.remove(id).is_some()
    }

    /// Interval fired for a card. Ticks for released cards are ignored.
    pub fn tick(&mut self, id: &ProjectId) -> bool {
        self.active.get_mut(id).is_some_and(|c| c.tick())
    }

    pub fn video_ended(&mut self, id: &ProjectId) {
        if let Some(controller) = self.active.get_mut(id) {
            controller.video_ended();
        }
    }

    /// Release controllers whose cards are no longer rendered
    pub fn retain_mounted<'a>(&mut self, mounted: impl IntoIterator<Item = &'a ProjectId>) -> usize {
        let mounted: std::collections::HashSet<&ProjectId> = mounted.into_iter().collect();
        let before = self.active.len();
        self.active.retain(|id, _| mounted.contains(id));
        before - self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn get(&self, id: &ProjectId) -> Option<&CarouselController> {
        self.active.get(id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Frame to draw for a card, hovered or not
    pub fn frame_for<'a>(&'a self, project: &'a Project) -> Frame<'a> {
        match self.active.get(&project.id) {
            Some(controller) => controller.frame(),
            None => resting_frame(project),
        }
    }

    /// One entry per controller that needs a timer, ordered by id
    pub fn active_timers(&self) -> Vec<(ProjectId, TimerKind)> {
        let mut timers: Vec<_> = self
            .active
            .iter()
            .filter_map(|(id, c)| c.timer().map(|kind| (id.clone(), kind)))
            .collect();
        timers.sort_by(|a, b| a.0.cmp(&b.0));
        timers
    }
}
