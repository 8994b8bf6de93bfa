use serde_json::Value;

/// Decode a JSON resource. Object key order is preserved (`preserve_order`),
/// so keys come out in the order they appear in the file.
pub fn parse_json(content: &str) -> Result<Value, serde_json::Error> {
    // Editors on Windows like to leave a BOM behind.
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    serde_json::from_str(content)
}
