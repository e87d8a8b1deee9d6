//! Response sanitization.
//!
//! Model replies routinely arrive wrapped in markdown code fences even when
//! the prompt forbids them. This strips the wrapping into plain source text.

use once_cell::sync::Lazy;
use regex::Regex;

// Opening or closing fence, with an optional language tag and the newline
// that follows the opener.
static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+#.-]*\n?").expect("fence regex is valid"));

/// Strip markdown code fences and stray edge backticks from raw model
/// output, returning the clean code string.
pub fn clean_code(raw: &str) -> String {
    let without_fences = FENCE.replace_all(raw, "");
    let mut code = without_fences.trim();
    // A stray single backtick at either edge survives the fence pass. Strip
    // at most one per side; code can legitimately start or end with one.
    code = code.strip_prefix('`').unwrap_or(code);
    code = code.strip_suffix('`').unwrap_or(code);
    code.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_with_language_tag() {
        assert_eq!(clean_code(" ```html\n<p>hi</p>\n``` "), "<p>hi</p>");
    }

    #[test]
    fn test_fence_without_language_tag() {
        assert_eq!(clean_code("```\nlet x = 1;\n```"), "let x = 1;");
    }

    #[test]
    fn test_no_fences_passthrough() {
        assert_eq!(clean_code("body { margin: 0; }"), "body { margin: 0; }");
    }

    #[test]
    fn test_stray_backticks_at_edges() {
        assert_eq!(clean_code("`<p>hi</p>`"), "<p>hi</p>");
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(clean_code("  let x = 1;\n\n"), "let x = 1;");
    }

    #[test]
    fn test_edge_backtick_strip_is_bounded() {
        // Only one stray backtick is removed per side; the rest is content.
        assert_eq!(clean_code("``x``"), "`x`");
        assert_eq!(clean_code("`const s = `done`;`"), "const s = `done`;");
    }

    #[test]
    fn test_interior_backticks_preserved() {
        assert_eq!(
            clean_code("```js\nconst s = `tpl ${x}`;\n```"),
            "const s = `tpl ${x}`;"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_code(""), "");
        assert_eq!(clean_code("``` ```"), "");
    }

    #[test]
    fn test_language_tag_with_plus() {
        assert_eq!(clean_code("```c++\nint main() {}\n```"), "int main() {}");
    }
}
