//! Project detail page
//!
//! Both modes are rendered; the inactive one is `hidden`. The toggle is a
//! plain `?view=` link that the page script turns into a local switch, so
//! the mode is never persisted.

use datahub_common::{
    catalog::Stat,
    config::AppConfig,
    view::{ProjectDetail, ViewMode},
};

use super::{category_badge, escape, home_href, layout};

/// Swaps the panels in place. Entering embedded mode reloads the frame
/// with its spinner, as `ProjectDetail::set_mode` does.
const TOGGLE_SCRIPT: &str = r#"
(function () {
  var toggle = document.querySelector("a.toggle");
  var frame = document.querySelector(".frame");
  var iframe = frame.querySelector("iframe");
  var info = document.querySelector("section.info");
  function show(mode) {
    var embedded = mode === "embedded";
    toggle.dataset.mode = mode;
    toggle.setAttribute("href", "?view=" + (embedded ? "info" : "embedded"));
    toggle.textContent = embedded ? toggle.dataset.labelEmbedded : toggle.dataset.labelInfo;
    frame.hidden = !embedded;
    info.hidden = embedded;
    if (embedded) {
      frame.dataset.loading = "true";
      iframe.setAttribute("src", iframe.dataset.src);
    } else {
      iframe.setAttribute("src", "about:blank");
    }
  }
  toggle.addEventListener("click", function (event) {
    event.preventDefault();
    show(toggle.dataset.mode === "embedded" ? "info" : "embedded");
  });
  var requested = new URLSearchParams(window.location.search).get("view");
  if (requested === "info" && toggle.dataset.mode !== "info") show("info");
})();
"#;

/// Label of the toggle while `mode` is showing
fn toggle_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Embedded => "Show Info",
        ViewMode::Info => "View Project",
    }
}

pub fn page(config: &AppConfig, detail: &ProjectDetail<'_>) -> String {
    let project = detail.project();
    let mode = detail.mode();

    let mut body = format!(
        r#"<nav class="detail-nav">
<a href="{back}">&larr; Back to all projects</a>
<a class="toggle" href="?view={toggle_key}" data-mode="{mode}" data-label-embedded="{label_embedded}" data-label-info="{label_info}">{label}</a>
<a href="{url}" target="_blank" rel="noopener noreferrer">Open in new tab</a>
</nav>
<header class="detail">
{badge}
<h1>{name}</h1>
</header>
"#,
        back = home_href(&config.site),
        toggle_key = mode.toggled().key(),
        mode = mode.key(),
        label_embedded = toggle_label(ViewMode::Embedded),
        label_info = toggle_label(ViewMode::Info),
        label = toggle_label(mode),
        url = escape(project.url),
        badge = category_badge(detail.category()),
        name = escape(project.name),
    );

    body.push_str(&embedded(detail));
    body.push_str(&info_panel(detail));
    body.push_str(&format!("<script>{}</script>", TOGGLE_SCRIPT));

    layout(&config.site, project.name, &body)
}

/// Frame panel. Outside embedded mode the frame has no `src`, so nothing
/// loads until the panel is shown.
fn embedded(detail: &ProjectDetail<'_>) -> String {
    let project = detail.project();
    let active = detail.mode() == ViewMode::Embedded;
    let url = escape(project.url);
    format!(
        r#"<div class="frame" data-loading="{loading}"{hidden}>
<span class="spinner">Loading project...</span>
<iframe {src}data-src="{url}" title="{name}" onload="if (this.getAttribute('src') === this.dataset.src) this.parentElement.dataset.loading = 'false'"></iframe>
</div>
"#,
        loading = detail.is_loading(),
        hidden = if active { "" } else { " hidden" },
        src = if active { format!(r#"src="{}" "#, url) } else { String::new() },
        url = url,
        name = escape(project.name),
    )
}

fn stat(stat: Option<Stat>) -> String {
    stat.map(|s| {
        format!(
            "<div class=\"stat\"><strong>{}</strong><span>{}</span></div>\n",
            escape(s.value),
            escape(s.label)
        )
    })
    .unwrap_or_default()
}

fn info_panel(detail: &ProjectDetail<'_>) -> String {
    let project = detail.project();
    let tags: String = project
        .tags
        .iter()
        .map(|tag| format!("<span>{}</span>", escape(tag)))
        .collect();

    let hidden = if detail.mode() == ViewMode::Info { "" } else { " hidden" };
    format!(
        r#"<section class="info"{hidden}>
<p>{description}</p>
<div class="stats">
{insight}{size}</div>
<dl>
<dt>Data Source</dt><dd>{source}</dd>
<dt>Added</dt><dd>{added}</dd>
</dl>
<div class="tags">{tags}</div>
<p class="links">
<a href="{url}" target="_blank" rel="noopener noreferrer">Live Project</a>
<a href="{repo}" target="_blank" rel="noopener noreferrer">Source Code</a>
</p>
</section>
"#,
        description = escape(project.description),
        insight = stat(project.key_insight),
        size = stat(project.dataset_size),
        source = escape(detail.data_source_label()),
        added = escape(&detail.added_label()),
        url = escape(project.url),
        repo = escape(project.repo_url),
    )
}
