/// Canonical form used before any equality comparison between choices:
/// surrounding whitespace removed and lowercased. Missing text yields "".
pub fn normalize_text(text: Option<&str>) -> String {
    text.map(|value| value.trim().to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_text(Some("  Red ")), "red");
        assert_eq!(normalize_text(Some("\tBLUE\n")), "blue");
    }

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(normalize_text(None), "");
        assert_eq!(normalize_text(Some("   ")), "");
    }

    #[test]
    fn normalizing_is_idempotent() {
        for raw in ["  Mixed Case  ", "already", "ÄÖÜ straße ", "", " \t "] {
            let once = normalize_text(Some(raw));
            assert_eq!(normalize_text(Some(&once)), once, "input {raw:?}");
        }
    }
}
