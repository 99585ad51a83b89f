//! Escaping for component data embedded in Markdown reports.
//!
//! Names, versions and licenses come straight from the input documents and
//! may contain Markdown syntax. Everything taken from a document goes
//! through [`escape_markdown_inline`] before it is written.

/// Escape a string for safe inclusion in Markdown inline content.
///
/// Line breaks are folded into spaces so one component stays on one line.
///
/// # Examples
///
/// ```
/// use sbom_delta::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// assert_eq!(escape_markdown_inline("[link](url)"), "\\[link\\](url)");
/// assert_eq!(escape_markdown_inline("MIT OR Apache-2.0"), "MIT OR Apache-2.0");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '!' => result.push_str("\\!"),
            '~' => result.push_str("\\~"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' | '\0' => {}
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_markdown_inline("libfoo"), "libfoo");
        assert_eq!(escape_markdown_inline("1.2.3-rc.1+build"), "1.2.3-rc.1+build");
        assert_eq!(escape_markdown_inline("@angular/core"), "@angular/core");
    }

    #[test]
    fn test_emphasis_and_code() {
        assert_eq!(escape_markdown_inline("my_pkg"), "my\\_pkg");
        assert_eq!(escape_markdown_inline("`rm -rf`"), "\\`rm -rf\\`");
        assert_eq!(escape_markdown_inline("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_heading_and_html_injection() {
        assert_eq!(escape_markdown_inline("# Title"), "\\# Title");
        assert_eq!(
            escape_markdown_inline("<script>alert(1)</script>"),
            "\\<script\\>alert(1)\\</script\\>"
        );
        assert_eq!(escape_markdown_inline("![img](x)"), "\\!\\[img\\](x)");
    }

    #[test]
    fn test_newlines_fold() {
        assert_eq!(escape_markdown_inline("line1\nline2\r\n"), "line1 line2 ");
    }
}
