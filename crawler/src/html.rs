use lazy_static::lazy_static;
use scraper::{Html, Node, Selector};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
}

/// Extract `(title, plain_text)` from an HTML page.
///
/// The title is the trimmed text of the first `<title>` element, `None` when it
/// is missing or blank. The text is every text node outside `<script>` and
/// `<style>`, joined by single spaces so adjacent blocks do not run together.
pub fn extract_html(html: &str) -> (Option<String>, String) {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|n| n.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let mut parts: Vec<&str> = Vec::new();
    for node in doc.root_element().descendants() {
        let Node::Text(text) = node.value() else { continue };
        let in_code = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style")))
            .unwrap_or(false);
        let text = text.trim();
        if !in_code && !text.is_empty() {
            parts.push(text);
        }
    }
    (title, parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_text() {
        let (title, text) = extract_html(
            "<html><head><title> Dog Training </title><style>p{}</style></head>\
             <body><h1>Dogs</h1><p>are great</p><script>var x = 1;</script></body></html>",
        );
        assert_eq!(title.as_deref(), Some("Dog Training"));
        assert_eq!(text, "Dog Training Dogs are great");
    }

    #[test]
    fn missing_title() {
        let (title, text) = extract_html("<p>just text</p>");
        assert_eq!(title, None);
        assert_eq!(text, "just text");
    }

    #[test]
    fn blank_title_is_none() {
        let (title, _) = extract_html("<title>   </title><p>x</p>");
        assert_eq!(title, None);
    }
}
