//! HTML list surface

use parking_lot::Mutex;

use webshare_storage::SharedLink;

use crate::view::ListSurface;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_item(link: &SharedLink) -> String {
    format!(
        r#"<li class="web_share"><a href="{}">{}</a></li>"#,
        escape_html(&link.url),
        escape_html(&link.label)
    )
}

/// Renders each link as an `<li>` and keeps them in display order.
#[derive(Debug, Default)]
pub struct HtmlListSurface {
    items: Mutex<Vec<String>>,
}

impl HtmlListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<String> {
        self.items.lock().clone()
    }

    pub fn to_html(&self) -> String {
        let items = self.items.lock();
        let mut out = String::from("<ul class=\"web_shares\">\n");
        for item in items.iter() {
            out.push_str("  ");
            out.push_str(item);
            out.push('\n');
        }
        out.push_str("</ul>\n");
        out
    }
}

impl ListSurface for HtmlListSurface {
    fn clear(&self) {
        self.items.lock().clear();
    }

    fn append(&self, link: &SharedLink) {
        self.items.lock().push(render_item(link));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_is_escaped() {
        let link = SharedLink::new("https://example.com/?a=1&b=2", "<b>\"Rust\"</b>");
        assert_eq!(
            render_item(&link),
            r#"<li class="web_share"><a href="https://example.com/?a=1&amp;b=2">&lt;b&gt;&quot;Rust&quot;&lt;/b&gt;</a></li>"#
        );
    }

    #[test]
    fn test_to_html_keeps_order() {
        let surface = HtmlListSurface::new();
        surface.append(&SharedLink::new("https://a", "a"));
        surface.append(&SharedLink::new("https://b", "b"));

        let html = surface.to_html();
        let a = html.find("https://a").unwrap();
        let b = html.find("https://b").unwrap();
        assert!(a < b);
        assert!(html.starts_with("<ul class=\"web_shares\">"));

        surface.clear();
        assert!(surface.items().is_empty());
    }
}
