//! Card thumbnail resolution
//!
//! Each card first tries the pre-generated local image, then a remote
//! screenshot of the project URL, and finally settles on the category
//! glyph. Transitions:
//!
//! ```text
//! Local  --load-->  Ready(Local)
//! Local  --error--> Remote --load--> Ready(Remote)
//!                   Remote --error-> Failed
//! ```
//!
//! `Ready` and `Failed` are terminal. Failures never leave this type.
//! The browser script runs the same table, see [`transition_table`].

use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::Project;
use crate::config::ThumbnailConfig;

/// Which tier produced the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailState {
    /// Loading the local pre-generated image
    Local,
    /// Local image failed; loading the screenshot-service image
    Remote,
    Ready(ImageSource),
    /// Both tiers failed; only the glyph is shown
    Failed,
}

impl ThumbnailState {
    /// Stable name, used as a `data-state` attribute in rendered markup
    pub fn key(&self) -> &'static str {
        match self {
            ThumbnailState::Local => "local",
            ThumbnailState::Remote => "remote",
            ThumbnailState::Ready(_) => "ready",
            ThumbnailState::Failed => "failed",
        }
    }

    /// One state per distinct key
    pub const KEYED: [ThumbnailState; 4] = [
        ThumbnailState::Local,
        ThumbnailState::Remote,
        ThumbnailState::Ready(ImageSource::Local),
        ThumbnailState::Failed,
    ];

    /// State after `event`. Terminal states absorb every event.
    pub fn transition(self, event: ThumbnailEvent) -> Self {
        match (self, event) {
            (ThumbnailState::Local, ThumbnailEvent::Load) => ThumbnailState::Ready(ImageSource::Local),
            (ThumbnailState::Local, ThumbnailEvent::Error) => ThumbnailState::Remote,
            (ThumbnailState::Remote, ThumbnailEvent::Load) => {
                ThumbnailState::Ready(ImageSource::Remote)
            }
            (ThumbnailState::Remote, ThumbnailEvent::Error) => ThumbnailState::Failed,
            (terminal, _) => terminal,
        }
    }
}

/// What the image element reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailEvent {
    Load,
    Error,
}

impl ThumbnailEvent {
    pub const ALL: [ThumbnailEvent; 2] = [ThumbnailEvent::Load, ThumbnailEvent::Error];

    pub fn key(&self) -> &'static str {
        match self {
            ThumbnailEvent::Load => "load",
            ThumbnailEvent::Error => "error",
        }
    }
}

/// `state -> event -> next state`, by key, e.g. `table["local"]["error"] == "remote"`
pub fn transition_table() -> BTreeMap<&'static str, BTreeMap<&'static str, &'static str>> {
    ThumbnailState::KEYED
        .into_iter()
        .map(|state| {
            let row = ThumbnailEvent::ALL
                .into_iter()
                .map(|event| (event.key(), state.transition(event).key()))
                .collect();
            (state.key(), row)
        })
        .collect()
}

/// Candidate image URLs for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailSources {
    pub local: String,
    pub remote: String,
}

impl ThumbnailSources {
    /// The project's custom thumbnail wins over the generated `{id}` image
    pub fn for_project(project: &Project, config: &ThumbnailConfig, base_path: &str) -> Self {
        let base = base_path.trim_end_matches('/');
        let local = match project.thumbnail {
            Some(path) => format!("{}{}", base, path),
            None => format!("{}/thumbnails/{}.{}", base, project.id, config.extension),
        };

        Self {
            local,
            remote: remote_thumbnail_url(project.url, config),
        }
    }
}

/// Screenshot-service URL for `url` at the configured card size
pub fn remote_thumbnail_url(url: &str, config: &ThumbnailConfig) -> String {
    format!(
        "{}/width/{}/crop/{}/{}",
        config.service_base.trim_end_matches('/'),
        config.remote_width,
        config.remote_crop,
        url
    )
}

/// Snapshot of an image element's completion signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageProbe {
    pub complete: bool,
    pub natural_width: u32,
}

impl ImageProbe {
    /// Decoded successfully (a broken image is `complete` with zero width)
    pub fn is_loaded(&self) -> bool {
        self.complete && self.natural_width > 0
    }

    /// The event an already-settled image missed. A broken image is
    /// `complete` with zero width; `None` while still loading.
    pub fn missed_event(&self) -> Option<ThumbnailEvent> {
        match (self.complete, self.natural_width) {
            (false, _) => None,
            (true, 0) => Some(ThumbnailEvent::Error),
            (true, _) => Some(ThumbnailEvent::Load),
        }
    }
}

/// Per-card thumbnail state machine
#[derive(Debug, Clone)]
pub struct ThumbnailResolver {
    sources: ThumbnailSources,
    glyph: &'static str,
    state: ThumbnailState,
}

impl ThumbnailResolver {
    pub fn new(sources: ThumbnailSources, glyph: &'static str) -> Self {
        Self {
            sources,
            glyph,
            state: ThumbnailState::Local,
        }
    }

    /// Resolver for a catalog card, using the category icon as glyph
    pub fn for_project(project: &Project, config: &ThumbnailConfig, base_path: &str) -> Self {
        Self::new(
            ThumbnailSources::for_project(project, config, base_path),
            project.category_info().icon,
        )
    }

    pub fn state(&self) -> ThumbnailState {
        self.state
    }

    pub fn sources(&self) -> &ThumbnailSources {
        &self.sources
    }

    pub fn glyph(&self) -> &'static str {
        self.glyph
    }

    /// URL the image element should point at; `None` once failed
    pub fn current_src(&self) -> Option<&str> {
        match self.state {
            ThumbnailState::Local | ThumbnailState::Ready(ImageSource::Local) => {
                Some(self.sources.local.as_str())
            }
            ThumbnailState::Remote | ThumbnailState::Ready(ImageSource::Remote) => {
                Some(self.sources.remote.as_str())
            }
            ThumbnailState::Failed => None,
        }
    }

    /// Loading indicator visible
    pub fn is_loading(&self) -> bool {
        matches!(self.state, ThumbnailState::Local | ThumbnailState::Remote)
    }

    /// Image visible over the glyph
    pub fn is_ready(&self) -> bool {
        matches!(self.state, ThumbnailState::Ready(_))
    }

    /// Check an image that may have finished before handlers were attached.
    /// Call on mount and after every source change.
    pub fn check_complete(&mut self, probe: ImageProbe) {
        if let Some(event) = probe.missed_event() {
            self.apply(event);
        }
    }

    pub fn on_load(&mut self) {
        self.apply(ThumbnailEvent::Load);
    }

    pub fn on_error(&mut self) {
        self.apply(ThumbnailEvent::Error);
    }

    pub fn apply(&mut self, event: ThumbnailEvent) {
        let next = self.state.transition(event);
        if event == ThumbnailEvent::Error && next != self.state {
            tracing::debug!(
                src = self.current_src().unwrap_or_default(),
                next = next.key(),
                "Thumbnail failed to load"
            );
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, PROJECTS};

    fn resolver() -> ThumbnailResolver {
        let project = Project {
            id: "x",
            url: "https://example.org/x/",
            ..PROJECTS[0]
        };
        ThumbnailResolver::for_project(&project, &ThumbnailConfig::default(), "")
    }

    #[test]
    fn test_sources() {
        let r = resolver();
        assert_eq!(r.sources().local, "/thumbnails/x.webp");
        assert_eq!(
            r.sources().remote,
            "https://image.thum.io/get/width/600/crop/400/https://example.org/x/"
        );
        assert_eq!(r.glyph(), Category::Kaggle.info().icon);
    }

    #[test]
    fn test_sources_with_base_path() {
        let sources =
            ThumbnailSources::for_project(&PROJECTS[0], &ThumbnailConfig::default(), "/hub/");
        assert_eq!(sources.local, "/hub/thumbnails/kaggle-airbnb-nyc.webp");
    }

    #[test]
    fn test_custom_thumbnail_is_local_source() {
        let project = Project {
            thumbnail: Some("/images/airbnb-hero.png"),
            ..PROJECTS[0]
        };
        let config = ThumbnailConfig::default();

        let sources = ThumbnailSources::for_project(&project, &config, "");
        assert_eq!(sources.local, "/images/airbnb-hero.png");
        assert_eq!(sources.remote, remote_thumbnail_url(project.url, &config));

        let nested = ThumbnailSources::for_project(&project, &config, "/hub/");
        assert_eq!(nested.local, "/hub/images/airbnb-hero.png");
    }

    #[test]
    fn test_local_success() {
        let mut r = resolver();
        assert_eq!(r.state(), ThumbnailState::Local);
        assert!(r.is_loading());

        r.on_load();
        assert_eq!(r.state(), ThumbnailState::Ready(ImageSource::Local));
        assert!(!r.is_loading());
        assert_eq!(r.current_src(), Some("/thumbnails/x.webp"));
    }

    #[test]
    fn test_remote_fallback_success() {
        let mut r = resolver();
        r.on_error();
        assert_eq!(r.state(), ThumbnailState::Remote);
        assert!(r.is_loading());
        assert!(r.current_src().unwrap().contains("https://example.org/x/"));

        r.on_load();
        assert_eq!(r.state(), ThumbnailState::Ready(ImageSource::Remote));
        assert!(r.is_ready());
    }

    #[test]
    fn test_both_tiers_fail() {
        let mut r = resolver();
        assert_eq!(r.current_src(), Some("/thumbnails/x.webp"));

        r.on_error();
        let remote = r.current_src().unwrap().to_string();
        assert!(remote.contains("https://example.org/x/"));

        r.on_error();
        assert_eq!(r.state(), ThumbnailState::Failed);
        assert_eq!(r.state().key(), "failed");
        assert!(!r.is_loading());
        assert!(!r.is_ready());
        assert_eq!(r.current_src(), None);
        assert_eq!(r.glyph(), "📊");

        // No further attempts
        r.on_error();
        r.on_load();
        assert_eq!(r.state(), ThumbnailState::Failed);
    }

    #[test]
    fn test_already_complete_at_mount() {
        let mut r = resolver();
        r.check_complete(ImageProbe {
            complete: true,
            natural_width: 400,
        });
        assert_eq!(r.state(), ThumbnailState::Ready(ImageSource::Local));
    }

    #[test]
    fn test_incomplete_probe_keeps_waiting() {
        let mut r = resolver();
        r.check_complete(ImageProbe::default());
        assert_eq!(r.state(), ThumbnailState::Local);
        assert!(r.is_loading());
    }

    #[test]
    fn test_error_before_handlers_attached_falls_back() {
        // Broken images report complete with zero natural width
        let broken = ImageProbe {
            complete: true,
            natural_width: 0,
        };
        let mut r = resolver();
        r.check_complete(broken);
        assert_eq!(r.state(), ThumbnailState::Remote);
        assert!(r.current_src().unwrap().contains("https://example.org/x/"));

        r.check_complete(broken);
        assert_eq!(r.state(), ThumbnailState::Failed);
        assert!(!r.is_loading());
    }

    #[test]
    fn test_transition_table() {
        let table = transition_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table["local"]["load"], "ready");
        assert_eq!(table["local"]["error"], "remote");
        assert_eq!(table["remote"]["load"], "ready");
        assert_eq!(table["remote"]["error"], "failed");
        for terminal in ["ready", "failed"] {
            assert_eq!(table[terminal]["load"], terminal);
            assert_eq!(table[terminal]["error"], terminal);
        }

        // Both ready variants share a row
        for event in ThumbnailEvent::ALL {
            assert_eq!(
                ThumbnailState::Ready(ImageSource::Remote).transition(event).key(),
                table["ready"][event.key()]
            );
        }
    }

    #[test]
    fn test_resolver_follows_table() {
        let table = transition_table();
        for start in [ThumbnailEvent::Load, ThumbnailEvent::Error] {
            for then in ThumbnailEvent::ALL {
                let mut r = resolver();
                r.apply(start);
                let before = r.state().key();
                r.apply(then);
                assert_eq!(r.state().key(), table[before][then.key()]);
            }
        }
    }

    #[test]
    fn test_probe_after_fallback() {
        let mut r = resolver();
        r.on_error();
        r.check_complete(ImageProbe {
            complete: true,
            natural_width: 600,
        });
        assert_eq!(r.state(), ThumbnailState::Ready(ImageSource::Remote));
    }
}
