const SCRIPT_OPEN: &[u8] = b"<script";
const SCRIPT_CLOSE: &[u8] = b"</script>";

/// Remove every `<script ...>...</script>` region from raw markup.
///
/// Regions are removed one at a time from the front until none is left, so
/// fragments that only join into a new `<script` after a removal are caught
/// too. An unterminated script runs to the end of the input.
pub fn strip_scripts(html: &str) -> String {
    let mut out = html.to_string();

    while let Some(start) = find_ignore_case(&out, SCRIPT_OPEN, 0) {
        let end = find_ignore_case(&out, SCRIPT_CLOSE, start + SCRIPT_OPEN.len())
            .map(|idx| idx + SCRIPT_CLOSE.len())
            .unwrap_or(out.len());
        out.replace_range(start..end, "");
    }

    out
}

/// Byte offset of the first ASCII case-insensitive match of `needle` at or after `from`
pub(crate) fn find_ignore_case(haystack: &str, needle: &[u8], from: usize) -> Option<usize> {
    let bytes = haystack.as_bytes();
    if from >= bytes.len() || needle.is_empty() {
        return None;
    }

    bytes[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|idx| idx + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_all_script_regions() {
        let html = r#"<div>a<script>var x = "<div>";</script>b<SCRIPT src="x.js"></SCRIPT>c</div>"#;
        assert_eq!(strip_scripts(html), "<div>abc</div>");
    }

    #[test]
    fn unterminated_script_runs_to_end() {
        assert_eq!(strip_scripts("<p>keep</p><script>if (a < b) {"), "<p>keep</p>");
    }

    #[test]
    fn joined_fragments_are_removed_too() {
        let stripped = strip_scripts("<scr<script></script>ipt>alert(1)</script>tail");
        assert!(!stripped.to_ascii_lowercase().contains("<script"));
        assert_eq!(stripped, "tail");
    }

    #[test]
    fn idempotent() {
        let html = "<html><script>1</script><body>text<script>2</script></body></html>";
        let once = strip_scripts(html);
        assert_eq!(strip_scripts(&once), once);
        assert!(!once.contains("<script"));
    }

    #[test]
    fn untouched_without_scripts() {
        let html = "<p>description of a manuscript</p>";
        assert_eq!(strip_scripts(html), html);
    }
}
