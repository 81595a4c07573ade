//! JSON catalog API

use axum::{
    extract::{Path, Query, State},
    Json,
};
use datahub_common::{
    catalog::{Category, CategoryInfo, Project},
    errors::{AppError, Result},
    metrics,
    view::{CatalogView, CategoryFilter, ThumbnailSources},
};
use serde::Serialize;
use tracing::instrument;

use super::pages::CatalogParams;
use crate::AppState;

/// Response for listing projects
#[derive(Serialize)]
pub struct ProjectListResponse {
    pub total: usize,
    pub projects: Vec<&'static Project>,
}

/// A project with its resolved category metadata and thumbnail URLs
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: &'static Project,
    pub category_info: CategoryInfo,
    /// Kept apart from the project's own optional `thumbnail` path
    pub thumbnail_sources: ThumbnailSources,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub key: Category,
    #[serde(flatten)]
    pub info: CategoryInfo,
    pub project_count: usize,
}

/// `GET /api/projects` - same precedence as the catalog page, but an
/// unknown category is rejected instead of ignored
#[instrument(skip(state))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<ProjectListResponse>> {
    let category = match params.category.as_deref() {
        None => CategoryFilter::All,
        Some(key) => key
            .parse::<CategoryFilter>()
            .map_err(|_| AppError::InvalidCategory {
                key: key.to_string(),
            })?,
    };

    let view = CatalogView::new(state.catalog)
        .with_category(category)
        .with_search(params.q.unwrap_or_default());
    let projects = view.projects();
    metrics::record_query(view.query_kind(), projects.len());

    Ok(Json(ProjectListResponse {
        total: projects.len(),
        projects,
    }))
}

/// `GET /api/projects/{id}`
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let project = state.catalog.by_id(&id).ok_or_else(|| {
        metrics::record_not_found();
        AppError::ProjectNotFound { id: id.clone() }
    })?;

    Ok(Json(ProjectResponse {
        project,
        category_info: project.category_info(),
        thumbnail_sources: ThumbnailSources::for_project(
            project,
            &state.config.thumbnails,
            &state.config.site.base_path,
        ),
    }))
}

/// `GET /api/categories` - every category, including empty ones
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryResponse>> {
    let categories = state
        .catalog
        .category_counts()
        .into_iter()
        .map(|(category, project_count)| CategoryResponse {
            key: category,
            info: category.info(),
            project_count,
        })
        .collect();

    Json(categories)
}
