//! Regular expressions and text helpers shared by the parsers

use regex::Regex;
use std::sync::LazyLock;

/// Line-leading section number: `1.`, `## 2.`, `**3.**`
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#{1,6}[ \t]*)?(?:\*\*)?[ \t]*\d{1,3}\.(?:\*\*)?(?:[ \t]+|$)").unwrap()
});

/// Lettered option line: `A) text`, `- B. text`, `**C)** text`, `• D) text`
static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-*•●▪◦‣–—][ \t]*)?(?:\*\*)?([A-D])(?:\*\*)?[ \t]*[).](?:\*\*)?[ \t]*(\S.*)$",
    )
    .unwrap()
});

/// Bold/underline emphasis markers
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*|__").unwrap());

/// Leading markdown heading hashes
static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}[ \t]*").unwrap());

/// First label/description separator: spaced dash or colon
static OPTION_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+[-–—][ \t]+|:[ \t]+").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Phrases that mark a section as closing remarks or instructions
const BOILERPLATE: &[&str] = &["thank you", "please select", "### comprehensive"];

/// Split questionnaire text into candidate sections at numeric markers.
///
/// Text before the first marker forms its own section.
pub(super) fn split_sections(text: &str) -> Vec<&str> {
    SECTION_MARKER
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub(super) fn is_boilerplate(section: &str) -> bool {
    let lower = section.to_lowercase();
    BOILERPLATE.iter().any(|phrase| lower.contains(phrase))
}

/// Match an option line, returning its letter and raw label
pub(super) fn match_option(line: &str) -> Option<(char, &str)> {
    let caps = OPTION_LINE.captures(line)?;
    let letter = caps.get(1)?.as_str().chars().next()?;
    let label = caps.get(2)?.as_str().trim();
    Some((letter, label))
}

/// Remove emphasis markers anywhere and wrapping italics
pub(super) fn strip_emphasis(text: &str) -> String {
    let stripped = EMPHASIS.replace_all(text, "");
    stripped
        .trim()
        .trim_matches(|c| c == '*' || c == '_')
        .trim()
        .to_string()
}

/// Clean a prompt line for display
pub(super) fn clean_prompt(line: &str) -> String {
    let without_heading = HEADING.replace(line.trim(), "");
    strip_emphasis(&without_heading)
}

/// Split a label at its first separator into text and description
pub(super) fn split_label(label: &str) -> (String, Option<String>) {
    let cleaned = strip_emphasis(label);
    if let Some(m) = OPTION_SEPARATOR.find(&cleaned) {
        let text = cleaned[..m.start()].trim();
        let description = cleaned[m.end()..].trim();
        if !text.is_empty() {
            let description = (!description.is_empty()).then(|| description.to_string());
            return (text.to_string(), description);
        }
    }
    (cleaned, None)
}

/// Normalized key used for deduplication
pub(super) fn normalize(text: &str) -> String {
    WHITESPACE
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sections_with_heading_markup() {
        let text = "Intro\n## 1. First?\nA) x\n**2.** Second?\nB) y\n# 3. Third?";
        let sections = split_sections(text);
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0], "Intro");
        assert!(sections[1].starts_with("First?"));
        assert!(sections[2].starts_with("Second?"));
        assert_eq!(sections[3], "Third?");
    }

    #[test]
    fn test_split_ignores_inline_numbers() {
        let sections = split_sections("1. Is $1.99 too much?\nA) Yes 2. maybe");
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn test_match_option_variants() {
        assert_eq!(match_option("A) Price"), Some(('A', "Price")));
        assert_eq!(match_option("B. Speed"), Some(('B', "Speed")));
        assert_eq!(match_option("- C) Battery"), Some(('C', "Battery")));
        assert_eq!(match_option("**D)** Weight"), Some(('D', "Weight")));
        assert_eq!(match_option("• A) Bullet"), Some(('A', "Bullet")));
        assert_eq!(match_option("E) Too far"), None);
        assert_eq!(match_option("A)"), None);
        assert_eq!(match_option("Always on"), None);
    }

    #[test]
    fn test_split_label() {
        assert_eq!(
            split_label("Price - lowest cost wins"),
            ("Price".to_string(), Some("lowest cost wins".to_string()))
        );
        assert_eq!(
            split_label("Budget: under $500"),
            ("Budget".to_string(), Some("under $500".to_string()))
        );
        assert_eq!(split_label("Wi-Fi 6 support"), ("Wi-Fi 6 support".to_string(), None));
        assert_eq!(
            split_label("**Compact** – easy to park"),
            ("Compact".to_string(), Some("easy to park".to_string()))
        );
    }

    #[test]
    fn test_clean_prompt() {
        assert_eq!(clean_prompt("### **What matters most?**"), "What matters most?");
        assert_eq!(clean_prompt("*Which size?*"), "Which size?");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Big   Screen "), "big screen");
    }
}
