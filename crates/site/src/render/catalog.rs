//! Catalog page: hero, search, category filter, featured row, and grid
//!
//! Every project is rendered into the grid; the ones outside the current
//! view are `hidden`. The embedded scripts re-apply the same filtering and
//! thumbnail rules in the browser, so an exported copy behaves like the
//! server without a query string.

use datahub_common::{
    catalog::{Category, Project},
    config::AppConfig,
    errors::Result,
    view::{transition_table, CatalogView, CategoryFilter, ThumbnailResolver},
    SCROLL_STORAGE_KEY,
};
use std::collections::HashSet;

use super::{category_badge, escape, home_href, json_script, layout};

/// Element id of the embedded project list
pub const CATALOG_DATA_ID: &str = "catalog-data";
/// Element id of the embedded thumbnail transition table
pub const TRANSITIONS_ID: &str = "thumbnail-transitions";

/// Drives each card image with the transition table from `ThumbnailResolver`.
/// An image that settled before the handlers attached is checked the same
/// way as `ImageProbe::missed_event`.
const THUMBNAIL_SCRIPT: &str = r#"
(function () {
  var transitions = JSON.parse(document.getElementById("__TRANSITIONS__").textContent);
  document.querySelectorAll(".thumb img[data-fallback]").forEach(function (img) {
    var thumb = img.parentElement;
    function check() {
      if (img.complete) fire(img.naturalWidth > 0 ? "load" : "error");
    }
    function fire(event) {
      var next = transitions[thumb.dataset.state][event];
      if (next === thumb.dataset.state) return;
      thumb.dataset.state = next;
      if (next === "remote") {
        img.src = img.dataset.fallback;
        setTimeout(check, 0);
      } else if (next === "failed") {
        img.removeAttribute("src");
      }
    }
    img.addEventListener("load", function () { fire("load"); });
    img.addEventListener("error", function () { fire("error"); });
    check();
  });
})();
"#;

/// Live search over the embedded project list. Non-empty text overrides
/// the page category, as in `CatalogView::projects`.
const SEARCH_SCRIPT: &str = r#"
(function () {
  var projects = JSON.parse(document.getElementById("__CATALOG__").textContent);
  var form = document.querySelector("form.search");
  var input = form.querySelector("input[name=q]");
  var section = document.querySelector("section.projects");
  var heading = section.querySelector("h2");
  var empty = section.querySelector(".empty");
  function matches(project, needle) {
    function has(text) { return text.toLowerCase().indexOf(needle) !== -1; }
    return has(project.name) || has(project.description) || project.tags.some(has);
  }
  function visible(search) {
    if (search !== "") {
      var needle = search.toLowerCase();
      return projects.filter(function (p) { return matches(p, needle); });
    }
    var category = section.dataset.category;
    if (category === "all") return projects;
    return projects.filter(function (p) { return p.category === category; });
  }
  function apply() {
    var search = input.value;
    var shown = {};
    var results = visible(search);
    results.forEach(function (p) { shown[p.id] = true; });
    section.querySelectorAll("a.card").forEach(function (card) {
      card.hidden = !shown[card.dataset.project];
    });
    empty.hidden = results.length > 0;
    heading.textContent = search !== "" ? "Results for \"" + search + "\"" : section.dataset.heading;
    var query = search !== "" ? "?q=" + encodeURIComponent(search) : window.location.pathname;
    window.history.replaceState(null, "", query);
  }
  var initial = new URLSearchParams(window.location.search).get("q");
  if (initial !== null && input.value === "") input.value = initial;
  input.addEventListener("input", apply);
  form.addEventListener("submit", function (event) {
    event.preventDefault();
    apply();
  });
  if (input.value !== "") apply();
})();
"#;

/// One-shot scroll restore; `__KEY__` is replaced with the session key
const SCROLL_SCRIPT: &str = r#"
(function () {
  var key = "__KEY__";
  var saved = sessionStorage.getItem(key);
  if (saved !== null) {
    sessionStorage.removeItem(key);
    var offset = parseFloat(saved);
    if (isFinite(offset) && offset >= 0) window.scrollTo(0, offset);
  }
  document.querySelectorAll("a[data-project]").forEach(function (link) {
    link.addEventListener("click", function () {
      sessionStorage.setItem(key, String(window.scrollY));
    });
  });
})();
"#;

/// Href of a category filter button
pub fn filter_href(config: &AppConfig, filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => home_href(&config.site),
        CategoryFilter::Only(category) => {
            config.site.href(&format!("/category/{}", category.key()))
        }
    }
}

pub fn project_href(config: &AppConfig, project: &Project) -> String {
    config.site.href(&format!("/project/{}", project.id))
}

/// Render the catalog page for the given view state
pub fn page(config: &AppConfig, view: &CatalogView<'_>) -> Result<String> {
    let catalog = view.catalog();
    let stats = catalog.stats();
    let mut body = String::new();

    body.push_str(&format!(
        r#"<section class="hero">
<h1>{title}</h1>
<p>Interactive analyses of public datasets, from Kaggle to NASA.</p>
<div class="hero-stats"><div><strong>{projects}</strong> Projects</div><div><strong>{categories}</strong> Categories</div></div>
</section>
"#,
        title = escape(&config.site.title),
        projects = stats.total_projects,
        categories = stats.total_categories,
    ));

    body.push_str(&search_form(config, view));
    body.push_str(&filter_bar(config, view.category()));

    let featured: Vec<&Project> = catalog
        .featured()
        .into_iter()
        .take(config.site.featured_limit)
        .collect();
    if !featured.is_empty() {
        body.push_str("<section class=\"featured\">\n<h2>Featured Projects</h2>\n<div class=\"grid\">\n");
        for project in featured {
            body.push_str(&card(config, project, false));
        }
        body.push_str("</div>\n</section>\n");
    }

    let visible: HashSet<&str> = view.projects().iter().map(|p| p.id).collect();
    body.push_str(&format!(
        "<section class=\"projects\" data-category=\"{}\" data-heading=\"{}\">\n<h2>{}</h2>\n<div class=\"grid\">\n",
        view.category().key(),
        category_heading(view.category()),
        section_heading(view)
    ));
    for project in catalog.all() {
        body.push_str(&card(config, project, !visible.contains(project.id)));
    }
    body.push_str(&format!(
        r#"</div>
<div class="empty"{hidden}>
<p>No projects found</p>
<p>Try adjusting your search or filter.</p>
</div>
</section>
"#,
        hidden = if visible.is_empty() { "" } else { " hidden" },
    ));

    body.push_str(&json_script(CATALOG_DATA_ID, &catalog.all())?);
    body.push_str(&json_script(TRANSITIONS_ID, &transition_table())?);
    body.push_str(&format!(
        "<script>{}{}{}</script>",
        THUMBNAIL_SCRIPT.replace("__TRANSITIONS__", TRANSITIONS_ID),
        SEARCH_SCRIPT.replace("__CATALOG__", CATALOG_DATA_ID),
        SCROLL_SCRIPT.replace("__KEY__", SCROLL_STORAGE_KEY)
    ));

    let title = match (view.is_searching(), view.category()) {
        (true, _) => format!("Search: {}", view.search()),
        (false, CategoryFilter::Only(category)) => category.info().label.to_string(),
        (false, CategoryFilter::All) => String::new(),
    };
    Ok(layout(&config.site, &title, &body))
}

/// Heading without search text
fn category_heading(filter: CategoryFilter) -> String {
    match filter {
        CategoryFilter::All => "All Projects".to_string(),
        CategoryFilter::Only(category) => escape(category.info().label),
    }
}

fn section_heading(view: &CatalogView<'_>) -> String {
    if view.is_searching() {
        return format!("Results for &quot;{}&quot;", escape(view.search()));
    }
    category_heading(view.category())
}

fn search_form(config: &AppConfig, view: &CatalogView<'_>) -> String {
    // Without scripts the form falls back to the server's `?q=` handling
    format!(
        r#"<form class="search" method="get" action="{action}">
<input type="search" name="q" value="{value}" placeholder="Search projects, tags, descriptions...">
</form>
"#,
        action = filter_href(config, view.category()),
        value = escape(view.search()),
    )
}

fn filter_bar(config: &AppConfig, active: CategoryFilter) -> String {
    let filters = std::iter::once(CategoryFilter::All)
        .chain(Category::ALL.into_iter().map(CategoryFilter::Only));

    let mut bar = String::from("<nav class=\"filters\">\n");
    for filter in filters {
        let label = match filter {
            CategoryFilter::All => "All Projects".to_string(),
            CategoryFilter::Only(category) => {
                let info = category.info();
                format!("{} {}", info.icon, escape(info.label))
            }
        };
        let class = if filter == active { " class=\"active\"" } else { "" };
        bar.push_str(&format!(
            "<a href=\"{}\" data-category=\"{}\"{}>{}</a>\n",
            filter_href(config, filter),
            filter.key(),
            class,
            label
        ));
    }
    bar.push_str("</nav>\n");
    bar
}

/// Thumbnail markup in its initial resolver state
pub fn thumbnail(config: &AppConfig, project: &Project) -> String {
    let resolver = ThumbnailResolver::for_project(project, &config.thumbnails, &config.site.base_path);
    let image = match resolver.current_src() {
        Some(src) => format!(
            r#"<img src="{}" data-fallback="{}" alt="{}" loading="lazy">"#,
            escape(src),
            escape(&resolver.sources().remote),
            escape(project.name)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="thumb" data-state="{state}" style="background: {color}22"><span class="glyph">{glyph}</span>{image}<span class="spinner">Loading...</span></div>"#,
        state = resolver.state().key(),
        color = project.category_info().color,
        glyph = resolver.glyph(),
    )
}

fn card(config: &AppConfig, project: &Project, hidden: bool) -> String {
    let tags: String = project
        .card_tags(config.site.card_tag_limit)
        .iter()
        .map(|tag| format!("<span>{}</span>", escape(tag)))
        .collect();

    let insight = project
        .key_insight
        .map(|stat| {
            format!(
                "<p class=\"insight\"><strong>{}</strong> {}</p>",
                escape(stat.value),
                escape(stat.label)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<a class="card"{hidden} href="{href}" data-project="{id}">
{thumb}
<div class="body">
{badge}
<h3>{name}</h3>
<p>{description}</p>
{insight}<div class="tags">{tags}</div>
</div>
</a>
"#,
        hidden = if hidden { " hidden" } else { "" },
        href = project_href(config, project),
        id = escape(project.id),
        thumb = thumbnail(config, project),
        badge = category_badge(project.category_info()),
        name = escape(project.name),
        description = escape(project.description),
    )
}
