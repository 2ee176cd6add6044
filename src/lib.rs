//! Obras portfolio: the offline media pipeline that prepares project images
//! and the manifest, and the state that drives the portfolio viewer.

pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod state;
