//! Keyword classification of news articles.

use gamerhub_catalog::NewsCategory;

const INVEST_KEYWORDS: &[&str] = &[
    "investment",
    "investor",
    "invested",
    "funding",
    "acquisition",
    "acquire",
    "merger",
    " ipo",
    "initial public offering",
    "revenue",
    "earnings",
    "stock",
    "valuation",
    "venture capital",
    "raises $",
    "layoff",
    "fiscal",
    "quarterly results",
];

const DEV_KEYWORDS: &[&str] = &[
    "unreal engine",
    "unity engine",
    "godot",
    "game engine",
    "gamedev",
    "game development",
    "developer",
    "sdk",
    "postmortem",
    "gdc",
    "shader",
    "programming",
    "open source",
];

const HARDWARE_KEYWORDS: &[&str] = &[
    "gpu",
    "cpu",
    "nvidia",
    "radeon",
    "geforce",
    "rtx",
    "ryzen",
    "intel core",
    "graphics card",
    "processor",
    "motherboard",
    "ssd",
    "benchmark",
    "steam deck",
    "handheld pc",
];

const ESPORTS_KEYWORDS: &[&str] = &[
    "esports",
    "e-sports",
    "tournament",
    "championship",
    "pro league",
];

/// Keyword sets in priority order. The first set with a match decides.
const KEYWORD_SETS: &[(&[&str], NewsCategory)] = &[
    (INVEST_KEYWORDS, NewsCategory::Invest),
    (DEV_KEYWORDS, NewsCategory::Devs),
    (HARDWARE_KEYWORDS, NewsCategory::Hardware),
    (ESPORTS_KEYWORDS, NewsCategory::General),
];

/// Classify an article by case-insensitive substring search over its title
/// and description. Falls back to the source's category.
pub fn classify(title: &str, description: &str, fallback: NewsCategory) -> NewsCategory {
    let haystack = format!("{title} {description}").to_lowercase();
    KEYWORD_SETS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| haystack.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(fallback)
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
