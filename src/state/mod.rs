/// Portfolio state module
///
/// This module handles all state of the portfolio page, including:
/// - Project records (data.rs)
/// - The manifest document (manifest.rs)
/// - Filter/layout state and the derived view (filter.rs)
/// - Dates and durations shown in the details (details.rs)
/// - Hover media carousels (carousel.rs)
/// - The detail modal (modal.rs)

pub mod data;
pub mod manifest;
pub mod filter;
pub mod details;
pub mod carousel;
pub mod modal;
