//! View models
//!
//! Page state that sits between the query functions and the rendered
//! markup. Everything here is plain data plus transitions, so the same
//! rules drive server rendering and the browser-side behavior.

pub mod catalog;
pub mod detail;
pub mod thumbnail;

pub use catalog::{
    save_scroll_position, take_scroll_position, CatalogView, CategoryFilter, MemorySessionStore,
    SessionStore,
};
pub use detail::{ProjectDetail, ViewMode};
pub use thumbnail::{
    remote_thumbnail_url, transition_table, ImageProbe, ImageSource, ThumbnailEvent,
    ThumbnailResolver, ThumbnailSources, ThumbnailState,
};
