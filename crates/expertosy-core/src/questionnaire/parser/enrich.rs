//! Keyword heuristics for question categories and help text

/// Coarse topic label for a prompt
pub fn categorize(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    if lower.contains("space") || lower.contains("cargo") {
        "Space & Capacity"
    } else if lower.contains("price") || lower.contains("budget") {
        "Budget"
    } else if lower.contains("fuel") || lower.contains("efficiency") {
        "Efficiency"
    } else if lower.contains("safety") || lower.contains("security") {
        "Safety"
    } else {
        "General"
    }
}

/// Clarifying text for prompts about common decision factors
pub fn help_text_for(prompt: &str) -> Option<&'static str> {
    let lower = prompt.to_lowercase();
    if lower.contains("space") {
        Some("Consider your daily needs for passengers and cargo, including future requirements.")
    } else if lower.contains("budget") {
        Some("Remember to factor in maintenance, insurance, and fuel costs beyond the purchase price.")
    } else if lower.contains("fuel") {
        Some("Think about your typical driving patterns and local fuel prices.")
    } else {
        None
    }
}
