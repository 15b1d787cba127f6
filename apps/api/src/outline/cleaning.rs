//! Text cleaning applied to model output before it is parsed as JSON.

const FENCE_WITH_TAG: &str = "```json";
const FENCE: &str = "```";
const BOM: char = '\u{feff}';

/// Removes every ```` ```json ```` and ```` ``` ```` marker from `text`, wherever
/// it appears, then trims surrounding whitespace and byte-order marks.
///
/// Only these two literal tokens are recognized. Other language tags
/// (```` ```JSON ````, ```` ```js ````) are left in place and will fail to parse.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(FENCE_WITH_TAG, "")
        .replace(FENCE, "")
        .trim_matches(|c: char| c.is_whitespace() || c == BOM)
        .to_string()
}
