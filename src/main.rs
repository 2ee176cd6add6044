use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{column, container, scrollable, text};
use iced::{time, Element, Length, Subscription, Task, Theme};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

use obras::config::Config;
use obras::logging;
use obras::state::carousel::{Carousels, TimerKind};
use obras::state::data::{Project, ProjectId};
use obras::state::filter::{build_view, FilterState, ViewAction};
use obras::state::manifest::Manifest;
use obras::state::modal::ModalState;

mod ui;

/// Loaded manifest plus the media paths that are absent or cannot be decoded
#[derive(Debug, Clone)]
pub struct Portfolio {
    projects: Vec<Project>,
    missing: HashSet<String>,
}

#[derive(Debug)]
enum LoadState {
    Loading,
    Loaded(Portfolio),
    Failed(String),
}

/// Main application state
struct ObrasViewer {
    config: Config,
    images_root: PathBuf,
    load: LoadState,
    filters: FilterState,
    carousels: Carousels,
    modal: ModalState,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background manifest load finished
    Loaded(Result<Portfolio, String>),
    /// A filter or layout button was pressed
    Filter(ViewAction),
    CardEntered(ProjectId),
    CardLeft(ProjectId),
    /// Interval timer of one hovered card fired
    CarouselTick(ProjectId),
    /// The video preview of one hovered card finished
    VideoEnded(ProjectId),
    OpenModal(ProjectId),
    CloseModal,
}

impl ObrasViewer {
    fn new() -> (Self, Task<Message>) {
        let config = viewer_config(&Config::site_root_from_env());
        let images_root = config.images_root();
        let manifest_path = config.manifest_path();

        info!("🏗️  Loading portfolio from {}", manifest_path.display());

        (
            ObrasViewer {
                config,
                images_root: images_root.clone(),
                load: LoadState::Loading,
                filters: FilterState::default(),
                carousels: Carousels::new(),
                modal: ModalState::default(),
            },
            Task::perform(load_portfolio(manifest_path, images_root), Message::Loaded),
        )
    }

    fn projects(&self) -> &[Project] {
        match &self.load {
            LoadState::Loaded(portfolio) => &portfolio.projects,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(portfolio)) => {
                info!(
                    "✅ Loaded {} projects ({} media files missing)",
                    portfolio.projects.len(),
                    portfolio.missing.len()
                );
                self.load = LoadState::Loaded(portfolio);
            }
            Message::Loaded(Err(error)) => {
                warn!("❌ Failed to load portfolio: {}", error);
                self.load = LoadState::Failed(error);
            }
            Message::Filter(action) => {
                self.filters = self.filters.apply(action);

                // Cards that left the view take their timers with them
                let LoadState::Loaded(portfolio) = &self.load else {
                    return Task::none();
                };
                let view = build_view(&self.filters, &portfolio.projects);
                let released = self
                    .carousels
                    .retain_mounted(view.projects().iter().map(|p| &p.id));
                if released > 0 {
                    info!("released {} carousels for hidden cards", released);
                }
            }
            Message::CardEntered(id) => {
                if !self.modal.is_open() {
                    if let LoadState::Loaded(portfolio) = &self.load {
                        if let Some(project) = portfolio.projects.iter().find(|p| p.id == id) {
                            self.carousels.enter(project);
                        }
                    }
                }
            }
            Message::CardLeft(id) => {
                self.carousels.leave(&id);
            }
            Message::CarouselTick(id) => {
                self.carousels.tick(&id);
            }
            Message::VideoEnded(id) => {
                self.carousels.video_ended(&id);
            }
            Message::OpenModal(id) => {
                if let LoadState::Loaded(portfolio) = &self.load {
                    if self.modal.open(&id, &portfolio.projects) {
                        self.carousels.clear();
                    }
                }
            }
            Message::CloseModal => {
                self.modal.close();
            }
        }

        Task::none()
    }

    fn view(&self) -> Element<Message> {
        let media = ui::MediaContext {
            images_root: &self.images_root,
            missing: match &self.load {
                LoadState::Loaded(portfolio) => &portfolio.missing,
                LoadState::Loading | LoadState::Failed(_) => &*EMPTY,
            },
        };

        let body: Element<Message> = match &self.load {
            LoadState::Loading => container(text("Cargando obras...").size(16))
                .padding(40)
                .center_x(Length::Fill)
                .into(),
            LoadState::Failed(_) => ui::cards::load_error(),
            LoadState::Loaded(portfolio) => ui::cards::portfolio(
                build_view(&self.filters, &portfolio.projects),
                self.filters.layout,
                &self.carousels,
                media,
            ),
        };

        let page = scrollable(
            column![
                text("Obras").size(40),
                ui::filters::filter_bar(&self.filters),
                body,
            ]
            .spacing(24)
            .padding(32)
            .width(Length::Fill),
        )
        .height(Length::Fill);

        match self.modal.current(self.projects()) {
            Some(project) => ui::modal::overlay(
                page,
                ui::modal::details(project, media),
                Message::CloseModal,
            ),
            None => page.into(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let interval = self.config.viewer.carousel_interval();
        let hold = self.config.viewer.video_hold();

        let mut subscriptions: Vec<Subscription<Message>> = self
            .carousels
            .active_timers()
            .into_iter()
            .map(|(id, kind)| match kind {
                TimerKind::Interval => time::every(interval)
                    .with(id)
                    .map(|(id, _)| Message::CarouselTick(id)),
                TimerKind::VideoHold => time::every(hold)
                    .with(id)
                    .map(|(id, _)| Message::VideoEnded(id)),
            })
            .collect();

        if self.modal.is_open() {
            subscriptions.push(keyboard::on_key_press(close_on_escape));
        }

        Subscription::batch(subscriptions)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// A broken config file falls back to the defaults, still under `site_root`
fn viewer_config(site_root: &Path) -> Config {
    Config::load_from(site_root).unwrap_or_else(|e| {
        warn!("⚠️  {}, using defaults", e);
        Config::with_site_root(site_root)
    })
}

static EMPTY: LazyLock<HashSet<String>> = LazyLock::new(HashSet::new);

fn close_on_escape(key: Key, _modifiers: Modifiers) -> Option<Message> {
    match key {
        Key::Named(key::Named::Escape) => Some(Message::CloseModal),
        _ => None,
    }
}

fn main() -> iced::Result {
    logging::init();

    iced::application("Obras", ObrasViewer::update, ObrasViewer::view)
        .subscription(ObrasViewer::subscription)
        .theme(ObrasViewer::theme)
        .centered()
        .run_with(ObrasViewer::new)
}

/// Read the manifest and check which referenced media files are usable.
/// The check touches every file, so it runs off the async runtime.
async fn load_portfolio(manifest_path: PathBuf, images_root: PathBuf) -> Result<Portfolio, String> {
    let json = tokio::fs::read_to_string(&manifest_path)
        .await
        .map_err(|e| format!("{}: {}", manifest_path.display(), e))?;
    let manifest = Manifest::from_json(&json).map_err(|e| e.to_string())?;
    let projects = manifest.projects;

    tokio::task::spawn_blocking(move || {
        let missing = unavailable_media(&projects, &images_root);
        for path in &missing {
            warn!("⚠️  Missing or unreadable media file: {}", path);
        }
        Portfolio { projects, missing }
    })
    .await
    .map_err(|e| e.to_string())
}

/// Images must exist and have a readable header; videos only need to exist
fn unavailable_media(projects: &[Project], images_root: &Path) -> HashSet<String> {
    let broken_image = |path: &&String| {
        let file = images_root.join(path.as_str());
        !file.is_file() || image::image_dimensions(&file).is_err()
    };
    let missing_video = |path: &&String| !images_root.join(path.as_str()).is_file();

    projects
        .iter()
        .flat_map(|p| {
            p.images
                .iter()
                .filter(broken_image)
                .chain(p.videos.iter().filter(missing_video))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use obras::state::data::Category;
    use obras::state::filter::CategoryFilter;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"[
        {"id": 1, "nombre": "Casa", "cliente": "A", "categoria": "residential",
         "estado": "completed", "ubicacion": "", "superficie": "", "descripcion": "",
         "imagenes": ["obras/casa/1.webp", "obras/casa/2.webp"], "videos": []},
        {"id": 2, "nombre": "Nave", "cliente": "B", "categoria": "industrial",
         "estado": "in-progress", "ubicacion": "", "superficie": "", "descripcion": "",
         "imagenes": ["obras/nave/1.webp", "obras/nave/2.webp"], "videos": []}
    ]"#;

    fn viewer() -> ObrasViewer {
        let projects = Manifest::from_json(MANIFEST).unwrap().projects;
        ObrasViewer {
            config: Config::default(),
            images_root: PathBuf::from("assets/images"),
            load: LoadState::Loaded(Portfolio {
                projects,
                missing: HashSet::new(),
            }),
            filters: FilterState::default(),
            carousels: Carousels::new(),
            modal: ModalState::default(),
        }
    }

    #[test]
    fn test_filter_change_releases_hidden_carousels() {
        let mut app = viewer();
        let _ = app.update(Message::CardEntered(ProjectId::Number(1)));
        let _ = app.update(Message::CardEntered(ProjectId::Number(2)));
        assert_eq!(app.carousels.len(), 2);

        let _ = app.update(Message::Filter(ViewAction::SetCategory(CategoryFilter::Only(
            Category::Industrial,
        ))));
        assert_eq!(app.carousels.len(), 1);
        assert!(app.carousels.get(&ProjectId::Number(2)).is_some());
    }

    #[test]
    fn test_modal_open_and_close() {
        let mut app = viewer();
        let _ = app.update(Message::CardEntered(ProjectId::Number(1)));

        let _ = app.update(Message::OpenModal(ProjectId::Number(99)));
        assert!(!app.modal.is_open());
        assert_eq!(app.carousels.len(), 1);

        let _ = app.update(Message::OpenModal(ProjectId::Number(1)));
        assert!(app.modal.is_open());
        assert!(app.carousels.is_empty());

        // Hover is ignored while the overlay is up
        let _ = app.update(Message::CardEntered(ProjectId::Number(2)));
        assert!(app.carousels.is_empty());

        let _ = app.update(Message::CloseModal);
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_escape_maps_to_close() {
        assert!(matches!(
            close_on_escape(Key::Named(key::Named::Escape), Modifiers::default()),
            Some(Message::CloseModal)
        ));
        assert!(close_on_escape(Key::Named(key::Named::Enter), Modifiers::default()).is_none());
    }

    #[tokio::test]
    async fn test_load_reports_missing_media() {
        let tmp = TempDir::new().unwrap();
        let manifest_path = tmp.path().join("obras.json");
        std::fs::write(&manifest_path, MANIFEST).unwrap();

        let casa = tmp.path().join("obras/casa");
        std::fs::create_dir_all(&casa).unwrap();
        image::RgbImage::new(8, 6)
            .save_with_format(casa.join("1.webp"), image::ImageFormat::WebP)
            .unwrap();
        // Present on disk but not an image
        std::fs::write(casa.join("2.webp"), b"not a webp").unwrap();

        let portfolio = load_portfolio(manifest_path, tmp.path().to_path_buf())
            .await
            .unwrap();
        assert_eq!(portfolio.projects.len(), 2);
        assert_eq!(portfolio.missing.len(), 3);
        assert!(!portfolio.missing.contains("obras/casa/1.webp"));
        assert!(portfolio.missing.contains("obras/casa/2.webp"));
        assert!(portfolio.missing.contains("obras/nave/1.webp"));
    }

    #[tokio::test]
    async fn test_load_failure_is_an_error_message() {
        let tmp = TempDir::new().unwrap();
        let result = load_portfolio(tmp.path().join("missing.json"), tmp.path().to_path_buf()).await;
        assert!(result.is_err());

        let bad = tmp.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(load_portfolio(bad, tmp.path().to_path_buf()).await.is_err());
    }

    #[test]
    fn test_broken_config_keeps_site_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(obras::config::CONFIG_FILE), "{ broken").unwrap();

        let config = viewer_config(tmp.path());
        assert_eq!(config.site_root, tmp.path());
        assert_eq!(config.images_root(), tmp.path().join("assets/images"));
    }

    #[test]
    fn test_failed_load_ignores_filters() {
        let mut app = viewer();
        app.load = LoadState::Failed("boom".to_string());
        let _ = app.update(Message::Filter(ViewAction::SetCategory(CategoryFilter::Only(
            Category::Residential,
        ))));
        assert_eq!(app.filters.category, CategoryFilter::Only(Category::Residential));
        assert!(app.projects().is_empty());
    }
}
