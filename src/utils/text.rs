//! Small text helpers shared by the scrapers.

/// Split a credit line into names, dropping empty pieces.
pub fn split_names(text: &str, separators: &[char]) -> Vec<String> {
    text.split(|c| separators.contains(&c))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove later duplicates, keeping the first occurrence.
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// `Some` for a non-blank string, trimmed.
pub fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// First non-blank line, trimmed.
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_names() {
        assert_eq!(split_names("A / B /  / C", &['/']), ["A", "B", "C"]);
        assert_eq!(split_names("A、B・C,D", &[',', '、', '・']), ["A", "B", "C", "D"]);
        assert!(split_names("  ", &['/']).is_empty());
    }

    #[test]
    fn test_dedup_preserving_order() {
        let names = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(dedup_preserving_order(names), ["b", "a"]);
    }

    #[test]
    fn test_non_empty_and_first_line() {
        assert_eq!(non_empty("  x "), Some("x".to_string()));
        assert_eq!(non_empty(" \n "), None);
        assert_eq!(first_line("\n  サークル \n フォローする"), "サークル");
        assert_eq!(normalize_whitespace(" a \n  b "), "a b");
    }
}
