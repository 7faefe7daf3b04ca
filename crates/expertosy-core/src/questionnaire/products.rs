//! Candidate and ranked product lines returned by the backend

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Leading rank marker: `1.`, `2)`, `**3.**`, `#4`
static RANK_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#{1,6}[ \t]*)?(?:\*\*)?#?(\d{1,3})[.)](?:\*\*)?[ \t]+").unwrap()
});

/// Trailing price: `- $1,499`, `: €899.99`, `($250)`
static TRAILING_PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[ \t]+[-–—][ \t]+|:[ \t]+|[ \t]*\()([$€£¥][ \t]?\d[\d,]*(?:\.\d{1,2})?)\)?[ \t]*$")
        .unwrap()
});

/// A product line split into its parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl Product {
    /// Parse a line like `1. Dell XPS 15 - $1,499`.
    ///
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (rank, rest) = match RANK_PREFIX.captures(line) {
            Some(caps) => {
                let rank = caps.get(1).and_then(|m| m.as_str().parse().ok());
                let end = caps.get(0).map_or(0, |m| m.end());
                (rank, &line[end..])
            }
            None => (None, line),
        };

        let rest = rest.replace("**", "");
        let (name, price) = match TRAILING_PRICE.captures(&rest) {
            Some(caps) => {
                let start = caps.get(0).map_or(rest.len(), |m| m.start());
                let price = caps.get(1).map(|m| m.as_str().to_string());
                (rest[..start].trim().to_string(), price)
            }
            None => (rest.trim().to_string(), None),
        };

        if name.is_empty() {
            return None;
        }
        Some(Self { rank, name, price })
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(rank) = self.rank {
            write!(f, "{}. ", rank)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(price) = &self.price {
            write!(f, " - {}", price)?;
        }
        Ok(())
    }
}

/// Non-empty trimmed lines of a recommendation payload
pub fn candidate_lines(recommendation: &str) -> Vec<String> {
    recommendation
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranked_line_with_price() {
        let product = Product::parse("1. Dell XPS 15 - $1,499").unwrap();
        assert_eq!(product.rank, Some(1));
        assert_eq!(product.name, "Dell XPS 15");
        assert_eq!(product.price.as_deref(), Some("$1,499"));
        assert_eq!(product.to_string(), "1. Dell XPS 15 - $1,499");
    }

    #[test]
    fn test_parse_variants() {
        let bold = Product::parse("**2.** MacBook Air M3 ($1,099.99)").unwrap();
        assert_eq!(bold.rank, Some(2));
        assert_eq!(bold.name, "MacBook Air M3");
        assert_eq!(bold.price.as_deref(), Some("$1,099.99"));

        let plain = Product::parse("Lenovo ThinkPad X1 Carbon").unwrap();
        assert_eq!(plain.rank, None);
        assert_eq!(plain.price, None);

        let hyphenated = Product::parse("3. Wi-Fi Router - mesh edition").unwrap();
        assert_eq!(hyphenated.name, "Wi-Fi Router - mesh edition");
        assert_eq!(hyphenated.price, None);

        assert!(Product::parse("   ").is_none());
    }

    #[test]
    fn test_candidate_lines() {
        let text = "1. Dell XPS 15 - $1,499\n\n  2. MacBook Pro 14 - $1,999  \n";
        assert_eq!(
            candidate_lines(text),
            vec!["1. Dell XPS 15 - $1,499", "2. MacBook Pro 14 - $1,999"]
        );
        assert!(candidate_lines("\n \n").is_empty());
    }
}
