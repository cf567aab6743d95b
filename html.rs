use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

const SKIPPED_TAGS: [&str; 7] = [
    "script", "style", "header", "footer", "nav", "noscript", "template",
];

// elements that end a word; inline ones (span, a, em, sub, wbr, ...) do not
const BLOCK_TAGS: [&str; 36] = [
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "div", "dl", "dt",
    "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li", "main",
    "ol", "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "title",
    "tr", "ul", "option",
];

/// Visible text of an HTML document, whitespace collapsed to single spaces
pub fn extract_text(input: &str) -> String {
    let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(input);
    fn recurse(handle: &Handle, out: &mut String) {
        match &handle.data {
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref();
                if SKIPPED_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
                    return;
                }
                if BLOCK_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)) {
                    out.push(' ');
                }
            }
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            _ => {}
        }
        for child in handle.children.borrow().iter() {
            recurse(child, out);
        }
    }
    let mut text = String::new();
    recurse(&dom.document, &mut text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a Content-Type header value names an HTML document
pub fn is_html(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_body_text_and_drops_scripts() {
        let html = r#"<html><head><title>Doc</title><style>p { color: red }</style></head>
            <body><nav>Home About</nav><p>Hello <b>bold</b> world</p>
            <script>var x = "hidden";</script><footer>copyright</footer></body></html>"#;
        assert_eq!(extract_text(html), "Doc Hello bold world");
    }

    #[test]
    fn separates_adjacent_cells() {
        let html = "<table><tr><td>one</td><td>two</td></tr></table>";
        assert_eq!(extract_text(html), "one two");
    }

    #[test]
    fn inline_elements_do_not_split_words() {
        let html = "<p>un<em>believ</em>able, Bob<wbr>by and H<sub>2</sub>O</p>";
        assert_eq!(extract_text(html), "unbelievable, Bobby and H2O");
        assert_eq!(
            crate::normalize::tokenize(&extract_text(html)),
            vec!["unbelievable", "bobby", "and", "h2o"]
        );
    }

    #[test]
    fn block_elements_separate_words() {
        let html = "<div>one</div><div>two<br>three</div><ul><li>four</li><li>five</li></ul>";
        assert_eq!(extract_text(html), "one two three four five");
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(extract_text("<p>fish &amp; chips</p>"), "fish & chips");
    }

    #[test]
    fn detects_html_content_types() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Application/XHTML+XML"));
        assert!(!is_html("text/plain; charset=utf-8"));
        assert!(!is_html(""));
    }
}
