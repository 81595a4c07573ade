//! Catalog invariant checks
//!
//! Category coverage is enforced at compile time; everything else
//! (unique ids, parseable dates and URLs, non-empty text) is checked here.

use super::Project;
use regex_lite::Regex;
use reqwest::Url;
use std::collections::HashSet;
use thiserror::Error;

/// A single broken catalog invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("duplicate project id: {id}")]
    DuplicateId { id: String },

    #[error("project id is not a URL-safe token: {id:?}")]
    InvalidId { id: String },

    #[error("project {id}: {field} must not be empty")]
    EmptyField { id: String, field: &'static str },

    #[error("project {id}: {field} is not an absolute http(s) URL: {value}")]
    InvalidUrl {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("project {id}: dateAdded is not a YYYY-MM-DD date: {value}")]
    InvalidDate { id: String, value: String },

    #[error("project {id}: tag #{index} is empty")]
    EmptyTag { id: String, index: usize },

    #[error("project {id}: thumbnail must be a site-relative path: {value:?}")]
    InvalidThumbnail { id: String, value: String },
}

/// Check every record, collecting all issues instead of stopping at the first
pub fn validate_catalog(projects: &[Project]) -> Result<(), Vec<CatalogIssue>> {
    let id_pattern = Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("static id pattern");
    let mut seen = HashSet::with_capacity(projects.len());
    let mut issues = Vec::new();

    for project in projects {
        let id = project.id.to_string();

        if !id_pattern.is_match(project.id) {
            issues.push(CatalogIssue::InvalidId { id: id.clone() });
        }
        if !seen.insert(project.id) {
            issues.push(CatalogIssue::DuplicateId { id: id.clone() });
        }

        for (field, value) in [("name", project.name), ("description", project.description)] {
            if value.trim().is_empty() {
                issues.push(CatalogIssue::EmptyField { id: id.clone(), field });
            }
        }

        for (field, value) in [("url", project.url), ("repoUrl", project.repo_url)] {
            if !is_web_url(value) {
                issues.push(CatalogIssue::InvalidUrl {
                    id: id.clone(),
                    field,
                    value: value.to_string(),
                });
            }
        }

        if project.added_on().is_none() {
            issues.push(CatalogIssue::InvalidDate {
                id: id.clone(),
                value: project.date_added.to_string(),
            });
        }

        for (index, tag) in project.tags.iter().enumerate() {
            if tag.trim().is_empty() {
                issues.push(CatalogIssue::EmptyTag { id: id.clone(), index });
            }
        }

        if let Some(path) = project.thumbnail {
            if !path.starts_with('/') || path.starts_with("//") || path.trim().len() < 2 {
                issues.push(CatalogIssue::InvalidThumbnail {
                    id: id.clone(),
                    value: path.to_string(),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}
