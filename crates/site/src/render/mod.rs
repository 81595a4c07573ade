//! HTML rendering
//!
//! Pages are plain strings built from the view models in `datahub-common`.
//! Every interpolated catalog value goes through [`escape`].

pub mod catalog;
pub mod detail;

use datahub_common::{catalog::CategoryInfo, config::SiteConfig, errors::Result};
use serde::Serialize;

const STYLE: &str = r#"
[hidden] { display: none !important; }
body { margin: 0; font-family: system-ui, sans-serif; background: #0f172a; color: #e2e8f0; }
a { color: inherit; }
header.site { padding: 1rem 2rem; border-bottom: 1px solid #1e293b; }
header.site a { text-decoration: none; font-weight: 700; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
.hero-stats { display: flex; gap: 2rem; }
.filters a { display: inline-block; margin: 0 .5rem .5rem 0; padding: .25rem .75rem; border-radius: 999px; border: 1px solid #334155; text-decoration: none; }
.filters a.active { background: #334155; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(18rem, 1fr)); gap: 1.5rem; }
.card { display: block; border-radius: .75rem; background: #1e293b; text-decoration: none; overflow: hidden; }
.card .body { padding: 1rem; }
.thumb { position: relative; height: 10rem; display: flex; align-items: center; justify-content: center; font-size: 3rem; }
.thumb img { position: absolute; inset: 0; width: 100%; height: 100%; object-fit: cover; opacity: 0; }
.thumb[data-state="ready"] img { opacity: 1; }
.thumb[data-state="failed"] img { display: none; }
.thumb .spinner { position: absolute; bottom: .5rem; right: .5rem; font-size: .75rem; }
.thumb[data-state="ready"] .spinner, .thumb[data-state="failed"] .spinner { display: none; }
.badge { font-size: .8rem; font-weight: 600; }
.tags span { display: inline-block; margin-right: .25rem; font-size: .75rem; padding: .1rem .5rem; border-radius: .25rem; background: #334155; }
.empty { text-align: center; padding: 4rem 0; }
.frame { position: relative; height: 80vh; }
.frame iframe { width: 100%; height: 100%; border: 0; }
.frame .spinner { position: absolute; top: 50%; left: 50%; }
.frame[data-loading="false"] .spinner { display: none; }
.stats { display: flex; gap: 2rem; }
"#;

/// Escape text for HTML element content and double-quoted attributes
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inline JSON data block read by page scripts. Every `<` is written as
/// `\u003c`, so catalog text cannot close the element.
pub fn json_script(id: &str, value: &impl Serialize) -> Result<String> {
    let json = serde_json::to_string(value)?.replace('<', "\\u003c");
    Ok(format!(
        r#"<script type="application/json" id="{}">{}</script>"#,
        escape(id),
        json
    ))
}

/// Link to the catalog root. Nested sites have no trailing slash.
pub fn home_href(site: &SiteConfig) -> String {
    let base = site.base_path.trim_end_matches('/');
    if base.is_empty() {
        "/".to_string()
    } else {
        base.to_string()
    }
}

/// Category label with its icon, tinted with the category color
pub fn category_badge(info: CategoryInfo) -> String {
    format!(
        r#"<span class="badge" style="color: {}">{} {}</span>"#,
        info.color,
        info.icon,
        escape(info.label)
    )
}

/// Full document around `body`
pub fn layout(site: &SiteConfig, title: &str, body: &str) -> String {
    let page_title = if title.is_empty() {
        escape(&site.title)
    } else {
        format!("{} | {}", escape(title), escape(&site.title))
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{page_title}</title>
<style>{STYLE}</style>
</head>
<body>
<header class="site"><a href="{home}">{site_title}</a></header>
<main>
{body}
</main>
</body>
</html>
"#,
        home = home_href(site),
        site_title = escape(&site.title),
    )
}

/// The standard "not found" page
pub fn not_found_page(site: &SiteConfig) -> String {
    let body = format!(
        r#"<section class="empty">
<h1>404</h1>
<p>The page you are looking for does not exist.</p>
<p><a href="{}">Back to all projects</a></p>
</section>"#,
        home_href(site)
    );
    layout(site, "Not Found", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_json_script_cannot_break_out() {
        let html = json_script("data", &["</script><script>alert(1)</script>"]).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.ends_with("</script>"));

        let json = html
            .trim_start_matches(r#"<script type="application/json" id="data">"#)
            .trim_end_matches("</script>");
        let parsed: Vec<String> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, vec!["</script><script>alert(1)</script>"]);
    }

    #[test]
    fn test_home_href() {
        let mut site = SiteConfig::default();
        assert_eq!(home_href(&site), "/");

        site.base_path = "/hub/".to_string();
        assert_eq!(home_href(&site), "/hub");
    }

    #[test]
    fn test_layout_titles() {
        let site = SiteConfig::default();
        assert!(layout(&site, "", "").contains("<title>Data Insights Hub</title>"));
        assert!(layout(&site, "A & B", "")
            .contains("<title>A &amp; B | Data Insights Hub</title>"));
    }

    #[test]
    fn test_not_found_page() {
        let html = not_found_page(&SiteConfig::default());
        assert!(html.contains("404"));
        assert!(html.contains(r#"href="/""#));
    }
}
