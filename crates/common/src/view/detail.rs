//! Project detail page state

use crate::catalog::{CategoryInfo, Project};
use crate::errors::{AppError, Result};
use crate::query::Catalog;

/// How the detail page shows the project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    /// The hosted artifact in a frame
    #[default]
    Embedded,
    /// Static info panel with metadata and links
    Info,
}

impl ViewMode {
    /// Parse the `view` query parameter; anything but `info` embeds
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("info") => ViewMode::Info,
            _ => ViewMode::Embedded,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ViewMode::Embedded => "embedded",
            ViewMode::Info => "info",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Embedded => ViewMode::Info,
            ViewMode::Info => ViewMode::Embedded,
        }
    }
}

/// A resolved project plus its local, non-persistent UI state
#[derive(Debug, Clone)]
pub struct ProjectDetail<'a> {
    project: &'a Project,
    mode: ViewMode,
    frame_loaded: bool,
}

impl<'a> ProjectDetail<'a> {
    /// Resolve `id`; unknown ids yield [`AppError::ProjectNotFound`]
    pub fn resolve(catalog: Catalog<'a>, id: &str, mode: ViewMode) -> Result<Self> {
        let project = catalog
            .by_id(id)
            .ok_or_else(|| AppError::ProjectNotFound { id: id.to_string() })?;

        Ok(Self {
            project,
            mode,
            frame_loaded: false,
        })
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    pub fn category(&self) -> CategoryInfo {
        self.project.category_info()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch modes. Re-entering embedded mode remounts the frame, so the
    /// loading indicator shows again.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode != self.mode && mode == ViewMode::Embedded {
            self.frame_loaded = false;
        }
        self.mode = mode;
    }

    pub fn toggle(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    /// The embedded frame finished loading
    pub fn on_frame_load(&mut self) {
        if self.mode == ViewMode::Embedded {
            self.frame_loaded = true;
        }
    }

    /// Whether the frame spinner is visible
    pub fn is_loading(&self) -> bool {
        self.mode == ViewMode::Embedded && !self.frame_loaded
    }

    /// Human-readable `date_added`, e.g. "March 15, 2024"
    pub fn added_label(&self) -> String {
        self.project
            .added_on()
            .map(|d| d.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| self.project.date_added.to_string())
    }

    pub fn data_source_label(&self) -> &'a str {
        self.project.data_source.unwrap_or("N/A")
    }
}
