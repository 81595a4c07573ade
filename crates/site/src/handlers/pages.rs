//! HTML page handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use datahub_common::{
    catalog::Category,
    errors::Result,
    metrics,
    view::{CatalogView, CategoryFilter, ProjectDetail, ViewMode},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{render, AppState};

/// Catalog page query string
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    /// Search text; overrides the category when non-empty
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    #[serde(default)]
    pub view: Option<String>,
}

fn render_catalog(
    state: &AppState,
    search: Option<String>,
    category: CategoryFilter,
) -> Result<Html<String>> {
    let view = CatalogView::new(state.catalog)
        .with_category(category)
        .with_search(search.unwrap_or_default());

    metrics::record_query(view.query_kind(), view.projects().len());
    metrics::record_page_view("catalog");

    Ok(Html(render::catalog::page(&state.config, &view)?))
}

fn not_found_response(state: &AppState) -> Response {
    metrics::record_page_view("not_found");
    (
        StatusCode::NOT_FOUND,
        Html(render::not_found_page(&state.config.site)),
    )
        .into_response()
}

/// `GET /` - catalog with optional `q` and `category`
#[instrument(skip(state))]
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Html<String>> {
    let category = CategoryFilter::from_param(params.category.as_deref());
    render_catalog(&state, params.q, category)
}

/// `GET /category/{key}` - catalog with the category preselected
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<CatalogParams>,
) -> Response {
    match key.parse::<Category>() {
        Ok(category) => {
            render_catalog(&state, params.q, CategoryFilter::Only(category)).into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Unknown category page");
            not_found_response(&state)
        }
    }
}

/// `GET /project/{id}` - detail page, embedded by default
#[instrument(skip(state))]
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DetailParams>,
) -> Response {
    let mode = ViewMode::from_param(params.view.as_deref());
    match ProjectDetail::resolve(state.catalog, &id, mode) {
        Ok(detail) => {
            metrics::record_page_view("project");
            Html(render::detail::page(&state.config, &detail)).into_response()
        }
        Err(e) => {
            tracing::info!(error = %e, "Project page not found");
            metrics::record_not_found();
            not_found_response(&state)
        }
    }
}

/// Fallback for unmatched paths
pub async fn not_found(State(state): State<AppState>) -> Response {
    not_found_response(&state)
}

#[cfg(test)]
mod tests {
    use crate::create_router;
    use crate::test_support::{get, state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_catalog_page() {
        let (status, body) = get(create_router(state()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("All Projects"));
        assert!(body.contains("data-project=\"typing-game-site\""));
    }

    #[tokio::test]
    async fn test_search_overrides_category_param() {
        let (status, body) = get(create_router(state()), "/?q=fraud&category=space").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a class="card" href="/project/credit-card-fraud-detect""#));
        assert!(body.contains(r#"<a class="card" hidden href="/project/ariel-atmosphere-kan""#));
    }

    #[tokio::test]
    async fn test_unknown_category_param_shows_all() {
        let (status, body) = get(create_router(state()), "/?category=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("data-project=\"charity-protocol\""));
        assert!(body.contains("data-category=\"all\" class=\"active\""));
    }

    #[tokio::test]
    async fn test_category_page() {
        let (status, body) = get(create_router(state()), "/category/space").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"<a class="card" href="/project/ariel-atmosphere-kan""#));
        assert!(body.contains(r#"<a class="card" hidden href="/project/charity-protocol""#));

        let (status, _) = get(create_router(state()), "/category/bogus").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_no_results_message() {
        let (status, body) = get(create_router(state()), "/?q=qwertyuiop").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<div class=\"empty\">\n<p>No projects found</p>"));
    }

    #[tokio::test]
    async fn test_project_page_modes() {
        let (status, body) = get(create_router(state()), "/project/charity-protocol").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<iframe src="));
        assert!(body.contains(r#"<section class="info" hidden>"#));

        let (status, body) =
            get(create_router(state()), "/project/charity-protocol?view=info").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("<iframe src="));
        assert!(body.contains(r#"<section class="info">"#));
        assert!(body.contains("Source Code"));
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let (status, body) = get(create_router(state()), "/project/nonexistent").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("404"));
    }
}
