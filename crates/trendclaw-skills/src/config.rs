//! Static lookup tables owned by each skill
//!
//! Every table defaults to the built-in data set, so an empty configuration
//! reproduces the stock behavior. Supplying a table in configuration replaces
//! the built-in one wholesale; entries are not merged.

use serde::Deserialize;
use std::collections::BTreeMap;
use trendclaw_types::Tone;

/// Configuration for every built-in skill
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillsConfig {
    /// Seed data for `fetch_trends`
    #[serde(default)]
    pub trends: TrendCatalog,
    /// Templates for `generate_caption`
    #[serde(default)]
    pub caption: CaptionTemplates,
}

/// Seed topics per niche plus the fixed fields stamped on every trend
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrendCatalog {
    /// Niche name to ordered topic list
    pub topics: BTreeMap<String, Vec<String>>,
    /// Sources attributed to every synthesized trend
    pub sources: Vec<String>,
    /// Keyword added to every trend between the niche and the topic's first word
    pub keyword_token: String,
}

impl TrendCatalog {
    /// Topics seeded for `niche`, or a single synthesized topic for unknown niches
    pub fn topics_for(&self, niche: &str) -> Vec<String> {
        match self.topics.get(niche) {
            Some(topics) => topics.clone(),
            None => vec![format!("{} Trend", title_case(niche))],
        }
    }
}

impl Default for TrendCatalog {
    fn default() -> Self {
        let seed = |topics: &[&str]| -> Vec<String> {
            topics.iter().map(|t| (*t).to_string()).collect()
        };

        let mut topics = BTreeMap::new();
        topics.insert(
            "fashion".to_string(),
            seed(&["AI Couture", "Sustainable Fabrics", "Virtual Try-On"]),
        );
        topics.insert(
            "crypto".to_string(),
            seed(&["Layer-2 Adoption", "DeFi Yield Reset", "On-chain Identity"]),
        );
        topics.insert(
            "gaming".to_string(),
            seed(&["Co-op Roguelikes", "Indie Pixel Revival", "Crossplay Updates"]),
        );

        Self {
            topics,
            sources: vec!["twitter".to_string(), "news".to_string()],
            keyword_token: "trend".to_string(),
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// `"unknown-niche"` becomes `"Unknown-Niche"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Caption prefix per tone
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TonePrefixes {
    /// Used for `Tone::Witty`
    pub witty: String,
    /// Used for `Tone::Professional`
    pub professional: String,
    /// Used for `Tone::Casual`
    pub casual: String,
}

impl TonePrefixes {
    /// Prefix phrase for `tone`
    pub fn prefix(&self, tone: Tone) -> &str {
        match tone {
            Tone::Witty => &self.witty,
            Tone::Professional => &self.professional,
            Tone::Casual => &self.casual,
        }
    }
}

impl Default for TonePrefixes {
    fn default() -> Self {
        Self {
            witty: "Hot take:".to_string(),
            professional: "Insight:".to_string(),
            casual: "Vibes:".to_string(),
        }
    }
}

/// Templates and constants used by the caption generator
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptionTemplates {
    /// Opening phrase per tone
    pub tone_prefixes: TonePrefixes,
    /// Tag used to pad the hashtag list when the context runs out of words
    pub fallback_hashtag: String,
    /// Reported confidence; the generator is rule-based, so this is fixed
    pub confidence_score: f64,
    /// Explanation attached to every caption
    pub reasoning: String,
}

impl Default for CaptionTemplates {
    fn default() -> Self {
        Self {
            tone_prefixes: TonePrefixes::default(),
            fallback_hashtag: "#trend".to_string(),
            confidence_score: 0.72,
            reasoning: "Rule-based template for deterministic output.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("unknown-niche"), "Unknown-Niche");
        assert_eq!(title_case("SPACE travel"), "Space Travel");
        assert_eq!(title_case("web3"), "Web3");
    }

    #[test]
    fn test_unknown_niche_synthesizes_one_topic() {
        let catalog = TrendCatalog::default();
        assert_eq!(catalog.topics_for("unknown-niche"), vec!["Unknown-Niche Trend"]);
        assert_eq!(catalog.topics_for("fashion").len(), 3);
    }

    #[test]
    fn test_empty_config_uses_builtin_tables() {
        let config: SkillsConfig = toml::from_str("").unwrap();
        assert_eq!(config.trends.sources, vec!["twitter", "news"]);
        assert_eq!(config.caption.tone_prefixes.prefix(Tone::Witty), "Hot take:");
        assert_eq!(config.caption.confidence_score, 0.72);
    }

    #[test]
    fn test_toml_overrides_replace_tables() {
        let toml_str = r##"
            [trends.topics]
            cooking = ["Air Fryer Hacks", "Fermentation"]

            [caption]
            fallback_hashtag = "#viral"

            [caption.tone_prefixes]
            casual = "Psst:"
        "##;

        let config: SkillsConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
        assert_eq!(config.trends.topics_for("cooking").len(), 2);
        // Replaced wholesale, so the built-in niches are gone
        assert_eq!(config.trends.topics_for("fashion"), vec!["Fashion Trend"]);
        assert_eq!(config.trends.keyword_token, "trend");
        assert_eq!(config.caption.fallback_hashtag, "#viral");
        assert_eq!(config.caption.tone_prefixes.prefix(Tone::Casual), "Psst:");
        assert_eq!(config.caption.tone_prefixes.prefix(Tone::Witty), "Hot take:");
    }
}
