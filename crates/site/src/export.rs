//! Static export
//!
//! Writes every page the server can render to a directory tree that any
//! static host can serve. Search and the detail view toggle run in the
//! page scripts, so the exported tree needs no server.

use datahub_common::{
    catalog::Category,
    config::AppConfig,
    errors::Result,
    query::Catalog,
    view::{CatalogView, CategoryFilter, ProjectDetail, ViewMode},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

use crate::{handlers::api::ProjectListResponse, render};

/// Counts of what an export wrote
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub pages: usize,
    pub thumbnails: usize,
}

async fn write_page(path: PathBuf, html: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    debug!(path = %path.display(), "Writing page");
    fs::write(&path, html).await?;
    Ok(())
}

/// Render the whole site into `out`. Stops at the first I/O error.
#[instrument(skip(config, catalog))]
pub async fn export_site(config: &AppConfig, catalog: Catalog<'static>, out: &Path) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();
    fs::create_dir_all(out).await?;

    let index = CatalogView::new(catalog);
    write_page(out.join("index.html"), render::catalog::page(config, &index)?).await?;
    summary.pages += 1;

    for category in Category::ALL {
        let view = CatalogView::new(catalog).with_category(CategoryFilter::Only(category));
        let path = out.join("category").join(category.key()).join("index.html");
        write_page(path, render::catalog::page(config, &view)?).await?;
        summary.pages += 1;
    }

    for project in catalog.all() {
        let detail = ProjectDetail::resolve(catalog, project.id, ViewMode::Embedded)?;
        let path = out.join("project").join(project.id).join("index.html");
        write_page(path, render::detail::page(config, &detail)).await?;
        summary.pages += 1;
    }

    write_page(out.join("404.html"), render::not_found_page(&config.site)).await?;
    summary.pages += 1;

    let projects = catalog.all();
    let listing = ProjectListResponse {
        total: projects.len(),
        projects,
    };
    let api_dir = out.join("api");
    fs::create_dir_all(&api_dir).await?;
    fs::write(api_dir.join("projects.json"), serde_json::to_vec_pretty(&listing)?).await?;

    summary.thumbnails = copy_thumbnails(&config.thumbnails.dir, &out.join("thumbnails")).await?;

    info!(
        pages = summary.pages,
        thumbnails = summary.thumbnails,
        out = %out.display(),
        "Static export complete"
    );
    Ok(summary)
}

/// Copy thumbnail files; a missing source directory copies nothing
async fn copy_thumbnails(from: &Path, to: &Path) -> Result<usize> {
    if !fs::try_exists(from).await? {
        info!(dir = %from.display(), "No thumbnail directory, skipping copy");
        return Ok(0);
    }

    fs::create_dir_all(to).await?;
    let mut entries = fs::read_dir(from).await?;
    let mut copied = 0;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            fs::copy(entry.path(), to.join(entry.file_name())).await?;
            copied += 1;
        }
    }
    Ok(copied)
}
