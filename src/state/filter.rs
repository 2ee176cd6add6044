/// Filter and layout state for the portfolio page
///
/// The state is an immutable value: every user action produces a new
/// `FilterState`, and the view is always derived from it with
/// [`build_view`].

use chrono::Datelike;

use super::data::{Category, Project, Status};
use super::details::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    List,
    /// Sorted by start date with a marker before each new year
    Timeline,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Grid, Layout::List, Layout::Timeline];

    pub fn label(&self) -> &'static str {
        match self {
            Layout::Grid => "Cuadrícula",
            Layout::List => "Lista",
            Layout::Timeline => "Línea de tiempo",
        }
    }
}

/// A discrete user action on the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    SetCategory(CategoryFilter),
    SetStatus(StatusFilter),
    SetLayout(Layout),
}

/// Current filter selection: one value per button group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub status: StatusFilter,
    pub layout: Layout,
}

impl FilterState {
    /// Produce the state that results from `action`
    pub fn apply(self, action: ViewAction) -> Self {
        match action {
            ViewAction::SetCategory(category) => Self { category, ..self },
            ViewAction::SetStatus(status) => Self { status, ..self },
            ViewAction::SetLayout(layout) => Self { layout, ..self },
        }
    }

    /// Whether the project passes both filter axes
    pub fn matches(&self, project: &Project) -> bool {
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => project.category() == c,
        };
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(s) => project.status() == s,
        };
        category_ok && status_ok
    }
}

/// Projects passing the filters, in manifest order
pub fn filter_projects<'a>(state: &FilterState, projects: &'a [Project]) -> Vec<&'a Project> {
    projects.iter().filter(|p| state.matches(p)).collect()
}

/// One entry of the rendered list
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEntry<'a> {
    YearMarker(i32),
    Card(&'a Project),
}

/// What the portfolio area shows for a given state
#[derive(Debug, Clone, PartialEq)]
pub enum PortfolioView<'a> {
    /// Nothing matched: render the "no results" placeholder
    Empty,
    Cards(Vec<ViewEntry<'a>>),
}

impl<'a> PortfolioView<'a> {
    /// Cards in display order (markers skipped)
    pub fn projects(&self) -> Vec<&'a Project> {
        match self {
            PortfolioView::Empty => Vec::new(),
            PortfolioView::Cards(entries) => entries
                .iter()
                .filter_map(|e| match e {
                    ViewEntry::Card(p) => Some(*p),
                    ViewEntry::YearMarker(_) => None,
                })
                .collect(),
        }
    }
}

/// Derive the view for the current state
pub fn build_view<'a>(state: &FilterState, projects: &'a [Project]) -> PortfolioView<'a> {
    let mut filtered = filter_projects(state, projects);

    if filtered.is_empty() {
        return PortfolioView::Empty;
    }

    if state.layout != Layout::Timeline {
        return PortfolioView::Cards(filtered.into_iter().map(ViewEntry::Card).collect());
    }

    // Stable sort: undated projects go last, in manifest order
    filtered.sort_by_key(|p| {
        let date = p.start_date.as_deref().and_then(parse_date);
        (date.is_none(), date)
    });

    let mut entries = Vec::with_capacity(filtered.len() + 4);
    let mut last_year = None;
    for project in filtered {
        let year = project
            .start_date
            .as_deref()
            .and_then(parse_date)
            .map(|d| d.year());
        if let Some(y) = year {
            if last_year != Some(y) {
                entries.push(ViewEntry::YearMarker(y));
                last_year = Some(y);
            }
        }
        entries.push(ViewEntry::Card(project));
    }

    PortfolioView::Cards(entries)
}
