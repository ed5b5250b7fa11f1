//! Per-logo caption overrides
//!
//! External format, one line per logo:
//!
//! ```text
//! acme: Great service | Open daily | Call us
//! 2: Second logo line one | line two
//! ```
//!
//! The identifier is matched against the logo's filename stem; a bare number
//! matches the logo's 1-based position in the upload order.

use std::collections::HashMap;

/// Mapping from logo identifier to its caption set.
pub type CaptionTable = HashMap<String, Vec<String>>;

/// Parse override lines into a [`CaptionTable`].
///
/// Lines without a `:` separator are ignored. Identifiers and captions are
/// whitespace-trimmed.
pub fn parse_overrides(input: &str) -> CaptionTable {
    let mut table = CaptionTable::new();
    for line in input.lines() {
        let Some((name, rest)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let captions = rest.split('|').map(|c| c.trim().to_string()).collect();
        table.insert(name.to_string(), captions);
    }
    table
}

/// Pick the caption set for the logo named `stem` at 0-based upload position
/// `index`: stem key first, then the position as a 1-based string key, then
/// the shared defaults.
pub fn resolve_captions<'a>(
    table: &'a CaptionTable,
    stem: &str,
    index: usize,
    defaults: &'a [String],
) -> &'a [String] {
    if let Some(captions) = table.get(stem) {
        return captions;
    }
    if let Some(captions) = table.get(&(index + 1).to_string()) {
        return captions;
    }
    defaults
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_pipe_separated_captions() {
        let table = parse_overrides("acme: First | Second | Third\n");
        assert_eq!(table["acme"], strings(&["First", "Second", "Third"]));
    }

    #[test]
    fn skips_lines_without_separator() {
        let table = parse_overrides("no separator here\nacme: One\n");
        assert_eq!(table.len(), 1);
        assert_eq!(table["acme"], strings(&["One"]));
    }

    #[test]
    fn caption_text_may_contain_colons() {
        // Only the first colon splits; the rest belongs to the captions
        let table = parse_overrides("shop: Hours: 9-5 | Closed Sunday");
        assert_eq!(table["shop"], strings(&["Hours: 9-5", "Closed Sunday"]));
    }

    #[test]
    fn stem_match_wins_over_position() {
        let mut table = CaptionTable::new();
        table.insert("acme".to_string(), strings(&["by name"]));
        table.insert("1".to_string(), strings(&["by position"]));
        let defaults = strings(&["default"]);

        assert_eq!(
            resolve_captions(&table, "acme", 0, &defaults),
            &strings(&["by name"])[..]
        );
    }

    #[test]
    fn position_key_is_one_based() {
        let mut table = CaptionTable::new();
        table.insert("2".to_string(), strings(&["second logo"]));
        let defaults = strings(&["default"]);

        assert_eq!(
            resolve_captions(&table, "unknown", 1, &defaults),
            &strings(&["second logo"])[..]
        );
        assert_eq!(
            resolve_captions(&table, "unknown", 0, &defaults),
            &defaults[..]
        );
    }
}
