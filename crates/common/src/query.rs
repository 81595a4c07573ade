//! Catalog query functions
//!
//! Pure, synchronous lookups over a project slice. Results always keep
//! catalog order; there is no relevance ranking.

use crate::catalog::{Category, Project, PROJECTS};
use serde::Serialize;
use std::collections::HashSet;

/// Read-only view over a project list
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    projects: &'a [Project],
}

/// Summary numbers shown in the catalog hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_projects: usize,
    /// Distinct categories actually used by at least one project
    pub total_categories: usize,
}

impl Catalog<'static> {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self { projects: PROJECTS }
    }
}

impl<'a> Catalog<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self { projects }
    }

    /// The underlying slice
    pub fn as_slice(&self) -> &'a [Project] {
        self.projects
    }

    /// Every project in catalog order
    pub fn all(&self) -> Vec<&'a Project> {
        self.projects.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Projects in `category`; empty when none match
    pub fn by_category(&self, category: Category) -> Vec<&'a Project> {
        self.projects
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Projects flagged as featured
    pub fn featured(&self) -> Vec<&'a Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Case-insensitive substring match on name, description, or any tag.
    /// An empty query matches every project.
    pub fn search(&self, query: &str) -> Vec<&'a Project> {
        let needle = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| matches_query(p, &needle))
            .collect()
    }

    /// Exact id lookup
    pub fn by_id(&self, id: &str) -> Option<&'a Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn stats(&self) -> CatalogStats {
        let categories: HashSet<Category> = self.projects.iter().map(|p| p.category).collect();
        CatalogStats {
            total_projects: self.projects.len(),
            total_categories: categories.len(),
        }
    }

    /// Number of projects per category, in filter-bar order
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .iter()
            .map(|&c| (c, self.projects.iter().filter(|p| p.category == c).count()))
            .collect()
    }
}

/// `needle` must already be lowercase
fn matches_query(project: &Project, needle: &str) -> bool {
    project.name.to_lowercase().contains(needle)
        || project.description.to_lowercase().contains(needle)
        || project
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(projects: &[&Project]) -> Vec<&'static str> {
        projects.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_search_returns_catalog_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search(""), catalog.all());
    }

    #[test]
    fn test_search_nasa() {
        let catalog = Catalog::builtin();
        let results = catalog.search("nasa");
        assert_eq!(ids(&results), vec!["nasa-exoplanet-detection"]);

        // Same answer as brute force over every searchable field
        let expected: Vec<_> = PROJECTS
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains("nasa")
                    || p.description.to_lowercase().contains("nasa")
                    || p.tags.iter().any(|t| t.to_lowercase().contains("nasa"))
            })
            .collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search("NaSa"), catalog.search("nasa"));
        assert_eq!(catalog.search("FRAUD"), catalog.search("fraud"));
    }

    #[test]
    fn test_search_matches_partition_catalog() {
        let catalog = Catalog::builtin();
        for query in ["fraud", "exo", "pricing", "ml", "a", "zzz-nothing", "Data"] {
            let needle = query.to_lowercase();
            let hits = catalog.search(query);
            for project in PROJECTS {
                let hit = hits.iter().any(|p| p.id == project.id);
                assert_eq!(hit, matches_query(project, &needle), "{query} / {}", project.id);
            }
        }
    }

    #[test]
    fn test_search_matches_tags() {
        let catalog = Catalog::builtin();
        let results = catalog.search("kepler");
        assert_eq!(ids(&results), vec!["nasa-exoplanet-detection"]);
    }

    #[test]
    fn test_search_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let results = catalog.search("exoplanet");
        assert_eq!(
            ids(&results),
            vec!["nasa-exoplanet-detection", "ariel-atmosphere-kan"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(Catalog::builtin().search("quantum chromodynamics").is_empty());
    }

    #[test]
    fn test_categories_partition_catalog() {
        let catalog = Catalog::builtin();
        let mut seen = Vec::new();
        for category in Category::ALL {
            for project in catalog.by_category(category) {
                assert_eq!(project.category, category);
                seen.push(project.id);
            }
        }
        seen.sort_unstable();
        let mut all: Vec<_> = PROJECTS.iter().map(|p| p.id).collect();
        all.sort_unstable();
        assert_eq!(seen, all);
    }

    #[test]
    fn test_by_category_preserves_order() {
        let catalog = Catalog::builtin();
        assert_eq!(
            ids(&catalog.by_category(Category::Kaggle)),
            vec!["kaggle-airbnb-nyc", "kaggle-books-dataset", "kaggle-laptop-sales"]
        );
    }

    #[test]
    fn test_by_category_without_projects_is_empty() {
        let only_space: Vec<Project> = PROJECTS
            .iter()
            .copied()
            .filter(|p| p.category == Category::Space)
            .collect();
        let catalog = Catalog::new(&only_space);
        assert!(catalog.by_category(Category::Finance).is_empty());
        assert_eq!(catalog.by_category(Category::Space).len(), 2);
    }

    #[test]
    fn test_featured_subset_and_idempotent() {
        let catalog = Catalog::builtin();
        let first = catalog.featured();
        assert_eq!(first, catalog.featured());
        assert!(first.iter().all(|p| p.featured));
        assert!(first.iter().all(|p| PROJECTS.contains(*p)));
        assert_eq!(first.len(), PROJECTS.iter().filter(|p| p.featured).count());
    }

    #[test]
    fn test_by_id_round_trip() {
        let catalog = Catalog::builtin();
        for project in PROJECTS {
            assert_eq!(catalog.by_id(project.id), Some(project));
        }
        assert_eq!(catalog.by_id("nonexistent"), None);
        assert_eq!(catalog.by_id(""), None);
    }

    #[test]
    fn test_stats() {
        let stats = Catalog::builtin().stats();
        assert_eq!(stats.total_projects, 10);
        assert_eq!(stats.total_categories, 7);
    }

    #[test]
    fn test_category_counts_sum_to_total() {
        let catalog = Catalog::builtin();
        let counts = catalog.category_counts();
        assert_eq!(counts.len(), Category::ALL.len());
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), catalog.len());
    }
}
