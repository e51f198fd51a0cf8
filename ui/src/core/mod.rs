//! Platform-agnostic building blocks shared by the analytics pipeline and views.

pub mod config;
pub mod error;
pub mod format;
pub mod platform;
pub mod timing;
