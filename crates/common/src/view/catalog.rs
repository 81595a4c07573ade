//! Catalog page state: search text, active category, and scroll carry-over

use crate::catalog::{Category, Project};
use crate::query::Catalog;
use crate::SCROLL_STORAGE_KEY;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Category selection in the filter bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse a query-string value. Missing or unknown keys select everything.
    pub fn from_param(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(CategoryFilter::All)
    }

    pub fn key(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.key(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryFilter {
    type Err = crate::catalog::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Search text plus category selection over a catalog
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: Catalog<'a>,
    search: String,
    category: CategoryFilter,
}

impl<'a> CatalogView<'a> {
    pub fn new(catalog: Catalog<'a>) -> Self {
        Self {
            catalog,
            search: String::new(),
            category: CategoryFilter::All,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn catalog(&self) -> Catalog<'a> {
        self.catalog
    }

    /// Whether search text is active (it overrides the category)
    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    /// The visible list. Search text wins over the category filter.
    pub fn projects(&self) -> Vec<&'a Project> {
        if self.is_searching() {
            return self.catalog.search(&self.search);
        }
        match self.category {
            CategoryFilter::All => self.catalog.all(),
            CategoryFilter::Only(category) => self.catalog.by_category(category),
        }
    }

    /// Label for metrics, following the same precedence as [`Self::projects`]
    pub fn query_kind(&self) -> &'static str {
        match (self.is_searching(), self.category) {
            (true, _) => "search",
            (false, CategoryFilter::All) => "all",
            (false, CategoryFilter::Only(_)) => "category",
        }
    }
}

/// Per-session key/value storage (the browser's session storage)
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str) -> Option<String>;
}

/// In-memory session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

/// Remember the scroll offset before leaving the catalog
pub fn save_scroll_position<S: SessionStore + ?Sized>(store: &mut S, offset: f64) {
    store.set(SCROLL_STORAGE_KEY, offset.to_string());
}

/// One-shot restore: returns the saved offset and clears it.
/// Unparseable values are cleared and ignored.
pub fn take_scroll_position<S: SessionStore + ?Sized>(store: &mut S) -> Option<f64> {
    store
        .remove(SCROLL_STORAGE_KEY)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|offset| offset.is_finite() && *offset >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(projects: &[&Project]) -> Vec<&'static str> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_default_shows_everything() {
        let view = CatalogView::new(Catalog::builtin());
        assert_eq!(view.projects(), Catalog::builtin().all());
        assert_eq!(view.query_kind(), "all");
    }

    #[test]
    fn test_category_filter() {
        let view = CatalogView::new(Catalog::builtin())
            .with_category(CategoryFilter::Only(Category::Space));
        assert_eq!(
            ids(&view.projects()),
            vec!["nasa-exoplanet-detection", "ariel-atmosphere-kan"]
        );
        assert_eq!(view.query_kind(), "category");
    }

    #[test]
    fn test_search_overrides_category() {
        let catalog = Catalog::builtin();
        let view = CatalogView::new(catalog)
            .with_category(CategoryFilter::Only(Category::Space))
            .with_search("fraud");

        assert_eq!(view.projects(), catalog.search("fraud"));
        assert_ne!(view.projects(), catalog.by_category(Category::Space));
        assert_eq!(view.query_kind(), "search");
    }

    #[test]
    fn test_clearing_search_restores_category() {
        let mut view = CatalogView::new(Catalog::builtin())
            .with_category(CategoryFilter::Only(Category::Kaggle))
            .with_search("nasa");
        assert_eq!(ids(&view.projects()), vec!["nasa-exoplanet-detection"]);

        view.set_search("");
        assert_eq!(view.projects().len(), 3);
        assert!(view.projects().iter().all(|p| p.category == Category::Kaggle));
    }

    #[test]
    fn test_empty_result() {
        let view = CatalogView::new(Catalog::builtin()).with_search("no such thing");
        assert!(view.projects().is_empty());
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "machine-learning".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::MachineLearning))
        );
        assert!("bogus".parse::<CategoryFilter>().is_err());

        assert_eq!(CategoryFilter::from_param(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_param(Some("bogus")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from_param(Some("finance")),
            CategoryFilter::Only(Category::Finance)
        );
        assert_eq!(CategoryFilter::Only(Category::Space).to_string(), "space");
    }

    #[test]
    fn test_scroll_restore_is_one_shot() {
        let mut store = MemorySessionStore::default();
        assert_eq!(take_scroll_position(&mut store), None);

        save_scroll_position(&mut store, 1240.5);
        assert_eq!(store.get(SCROLL_STORAGE_KEY).as_deref(), Some("1240.5"));

        assert_eq!(take_scroll_position(&mut store), Some(1240.5));
        assert_eq!(take_scroll_position(&mut store), None);
        assert_eq!(store.get(SCROLL_STORAGE_KEY), None);
    }

    #[test]
    fn test_scroll_restore_overwrites() {
        let mut store = MemorySessionStore::default();
        save_scroll_position(&mut store, 10.0);
        save_scroll_position(&mut store, 20.0);
        assert_eq!(take_scroll_position(&mut store), Some(20.0));
    }

    #[test]
    fn test_garbage_scroll_value_is_cleared() {
        let mut store = MemorySessionStore::default();
        store.set(SCROLL_STORAGE_KEY, "NaN-ish".to_string());
        assert_eq!(take_scroll_position(&mut store), None);
        assert_eq!(store.get(SCROLL_STORAGE_KEY), None);
    }
}
