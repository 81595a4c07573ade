//! Project catalog
//!
//! The catalog is a process-wide constant table. Every record is built from
//! `&'static` data, so nothing can mutate it after compilation:
//! - [`Project`] records in display order ([`PROJECTS`])
//! - [`Category`] keys with their display metadata ([`CategoryInfo`])
//! - Invariant checks the type system cannot express ([`validate_catalog`])

mod data;
mod validate;

pub use data::PROJECTS;
pub use validate::{validate_catalog, CatalogIssue};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Closed set of project categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Kaggle,
    MachineLearning,
    Space,
    Security,
    Entertainment,
    Finance,
    Other,
}

/// Display metadata for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub label: &'static str,
    /// Hex color, e.g. `#20BEFF`
    pub color: &'static str,
    pub icon: &'static str,
}

impl Category {
    /// All categories in filter-bar order
    pub const ALL: [Category; 7] = [
        Category::Kaggle,
        Category::MachineLearning,
        Category::Space,
        Category::Security,
        Category::Entertainment,
        Category::Finance,
        Category::Other,
    ];

    /// URL/query key for this category
    pub fn key(&self) -> &'static str {
        match self {
            Category::Kaggle => "kaggle",
            Category::MachineLearning => "machine-learning",
            Category::Space => "space",
            Category::Security => "security",
            Category::Entertainment => "entertainment",
            Category::Finance => "finance",
            Category::Other => "other",
        }
    }

    /// Display metadata. Adding a variant without metadata fails to compile.
    pub const fn info(&self) -> CategoryInfo {
        match self {
            Category::Kaggle => CategoryInfo {
                label: "Kaggle Dataset",
                color: "#20BEFF",
                icon: "📊",
            },
            Category::MachineLearning => CategoryInfo {
                label: "Machine Learning",
                color: "#FF6B6B",
                icon: "🤖",
            },
            Category::Space => CategoryInfo {
                label: "Space & Astronomy",
                color: "#9B59B6",
                icon: "🚀",
            },
            Category::Security => CategoryInfo {
                label: "Cybersecurity",
                color: "#2ECC71",
                icon: "🔐",
            },
            Category::Entertainment => CategoryInfo {
                label: "Entertainment",
                color: "#F39C12",
                icon: "🎵",
            },
            Category::Finance => CategoryInfo {
                label: "Finance",
                color: "#1ABC9C",
                icon: "💰",
            },
            Category::Other => CategoryInfo {
                label: "Other Projects",
                color: "#95A5A6",
                icon: "📁",
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when parsing an unknown category key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A `{value, label}` pair shown on detail pages, e.g. `91%` / `Accuracy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
}

/// One catalog entry: an externally hosted analysis artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique, URL-safe identifier (usually the repository name)
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Hosted artifact displayed in the detail view
    pub url: &'static str,
    pub repo_url: &'static str,
    pub category: Category,
    /// Searchable tags; cards show only the first few
    pub tags: &'static [&'static str],
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source: Option<&'static str>,
    /// ISO date (`YYYY-MM-DD`)
    pub date_added: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_insight: Option<Stat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_size: Option<Stat>,
    /// Custom card image, site-relative (e.g. `/thumbnails/custom.png`).
    /// `None` uses the generated `{id}` thumbnail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<&'static str>,
}

impl Project {
    /// Category metadata for this project
    pub fn category_info(&self) -> CategoryInfo {
        self.category.info()
    }

    /// Tags shown on catalog cards
    pub fn card_tags(&self, limit: usize) -> &'static [&'static str] {
        &self.tags[..self.tags.len().min(limit)]
    }

    /// Parsed `date_added`, if well-formed
    pub fn added_on(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.date_added, "%Y-%m-%d").ok()
    }
}
