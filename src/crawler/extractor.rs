//! Link and text extraction from fetched pages

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

/// One candidate link found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Display title: visible text, falling back to the title attribute,
    /// falling back to the URL itself
    pub title: String,

    /// Absolute, fragment-free target URL
    pub url: Url,
}

/// Extracts candidate links from a page, in document order
///
/// Relative hrefs are resolved against `base_url`. Excluded: `javascript:`,
/// `mailto:`, `tel:` and `data:` schemes, fragment-only anchors, download
/// links, and anything that does not resolve to HTTP(S). Fragments are
/// stripped from the targets, and duplicate targets on the same page count
/// once (first occurrence wins).
///
/// Off-domain links are returned alongside same-domain ones; filtering by
/// host is the orchestrator's job, since external links still get a status
/// check.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<PageLink> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    for element in document.select(&selector) {
        if element.value().attr("download").is_some() {
            continue;
        }

        let href = match element.value().attr("href") {
            Some(h) => h.trim(),
            None => continue,
        };

        let url = match resolve_href(href, base_url) {
            Some(u) => u,
            None => continue,
        };

        if !seen.insert(url.clone()) {
            continue;
        }

        let text = element.text().collect::<String>().trim().to_string();
        let title = if !text.is_empty() {
            text
        } else if let Some(attr) = element.value().attr("title") {
            let attr = attr.trim();
            if attr.is_empty() {
                url.to_string()
            } else {
                attr.to_string()
            }
        } else {
            url.to_string()
        };

        links.push(PageLink { title, url });
    }

    links
}

/// Resolves an href to an absolute, fragment-free HTTP(S) URL
///
/// Returns None for excluded schemes, fragment-only anchors, and
/// unresolvable hrefs.
fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Some(crate::url::strip_fragment(url))
        }
        _ => None,
    }
}

/// Extracts the visible text of a page for classification
///
/// Walks the document tree collecting text nodes while skipping `script`,
/// `style` and `noscript` subtrees, then collapses whitespace.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.tree.root(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(element) => {
                if !matches!(element.name(), "script" | "style" | "noscript") {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_and_relative_links() {
        let html = r#"<html><body>
            <a href="https://other.com/a">External</a>
            <a href="/local">Local</a>
            <a href="sibling">Sibling</a>
        </body></html>"#;
        let links = extract_links(html, &base());

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].url.as_str(), "https://other.com/a");
        assert_eq!(links[1].url.as_str(), "https://example.com/local");
        assert_eq!(links[2].url.as_str(), "https://example.com/sibling");
    }

    #[test]
    fn test_title_fallback_chain() {
        let html = r#"<html><body>
            <a href="/a">Visible</a>
            <a href="/b" title="From attribute"></a>
            <a href="/c"></a>
        </body></html>"#;
        let links = extract_links(html, &base());

        assert_eq!(links[0].title, "Visible");
        assert_eq!(links[1].title, "From attribute");
        assert_eq!(links[2].title, "https://example.com/c");
    }

    #[test]
    fn test_whitespace_only_text_falls_back() {
        let html = r#"<html><body><a href="/a">   </a></body></html>"#;
        let links = extract_links(html, &base());
        assert_eq!(links[0].title, "https://example.com/a");
    }

    #[test]
    fn test_skips_special_schemes_and_anchors() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:a@example.com">Mail</a>
            <a href="tel:+123">Call</a>
            <a href="data:text/html,x">Data</a>
            <a href="#section">Anchor</a>
            <a href="/keep">Keep</a>
        </body></html>"##;
        let links = extract_links(html, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "Keep");
    }

    #[test]
    fn test_skips_download_links() {
        let html = r#"<html><body><a href="/file.pdf" download>Get</a></body></html>"#;
        assert!(extract_links(html, &base()).is_empty());
    }

    #[test]
    fn test_strips_fragments_from_targets() {
        let html = r#"<html><body><a href="/doc#part2">Doc</a></body></html>"#;
        let links = extract_links(html, &base());
        assert_eq!(links[0].url.as_str(), "https://example.com/doc");
    }

    #[test]
    fn test_duplicate_targets_count_once() {
        let html = r#"<html><body>
            <a href="/doc">First</a>
            <a href="/doc#section">Same doc via fragment</a>
            <a href="/doc">Third</a>
        </body></html>"#;
        let links = extract_links(html, &base());

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].title, "First");
    }

    #[test]
    fn test_page_text_skips_script_and_style() {
        let html = r#"<html><head>
            <style>body { color: red; }</style>
            <script>var hidden = "secret";</script>
        </head><body>
            <h1>Welcome</h1>
            <p>Visible   text</p>
            <noscript>Enable JS</noscript>
        </body></html>"#;
        let text = page_text(html);

        assert!(text.contains("Welcome"));
        assert!(text.contains("Visible text"));
        assert!(!text.contains("secret"));
        assert!(!text.contains("color"));
        assert!(!text.contains("Enable JS"));
    }

    #[test]
    fn test_page_text_collapses_whitespace() {
        let html = "<html><body><p>a\n\n   b</p></body></html>";
        assert_eq!(page_text(html), "a b");
    }
}
