//! Directory listing generation
//!
//! Renders a plain HTML index of a directory: sorted entries, trailing
//! slash on subdirectories, names escaped for HTML and hrefs escaped for
//! URLs.

use std::io;
use std::path::Path;
use tokio::fs;

/// Render the listing page for `dir`, shown under the request path.
pub async fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.is_ok_and(|t| t.is_dir()) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut html = String::with_capacity(256 + names.len() * 64);
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<meta charset=\"utf-8\">\n<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for name in &names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(name),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

/// Escape text for inclusion in HTML content or attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Percent-encode the characters that would break a relative href. The
/// trailing slash of directory names stays literal so the link targets
/// the slash form directly.
fn encode_href(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'%' | b'#' | b'?' | b'"' | b' ' | 0x00..=0x1F | 0x7F..=0xFF => {
                encoded.push_str(&format!("%{byte:02X}"));
            }
            _ => encoded.push(byte as char),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("uiserve-listing-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_render_lists_sorted_entries() {
        let dir = fixture_dir("sorted");
        std::fs::write(dir.join("b.js"), "x").unwrap();
        std::fs::write(dir.join("a.css"), "y").unwrap();
        std::fs::create_dir(dir.join("sub")).unwrap();

        let html = render(&dir, "/").await.unwrap();
        assert!(html.contains("Directory listing for /"));
        assert!(html.contains("<a href=\"a.css\">a.css</a>"));
        assert!(html.contains("<a href=\"b.js\">b.js</a>"));
        assert!(html.contains("<a href=\"sub/\">sub/</a>"));
        assert!(html.find("a.css").unwrap() < html.find("b.js").unwrap());
    }

    #[tokio::test]
    async fn test_render_escapes_names() {
        let dir = fixture_dir("escape");
        std::fs::write(dir.join("a b.txt"), "x").unwrap();

        let html = render(&dir, "/").await.unwrap();
        assert!(html.contains("href=\"a%20b.txt\""));
        assert!(html.contains(">a b.txt</a>"));
    }

    #[tokio::test]
    async fn test_render_missing_dir_errors() {
        let dir = fixture_dir("gone").join("missing");
        assert!(render(&dir, "/missing/").await.is_err());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("a b.txt"), "a%20b.txt");
        assert_eq!(encode_href("100%.js"), "100%25.js");
        assert_eq!(encode_href("sub/"), "sub/");
    }
}
