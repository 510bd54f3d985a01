//! Segment naming strategies
//!
//! A `Namer` converts raw path segments into the casing convention the
//! manifest uses for synthesized node names. Conversions are pure string
//! transforms with no filesystem knowledge.

use serde::Deserialize;

/// Segments that always render as a canonical uppercase acronym,
/// bypassing the configured convention.
const ACRONYM_OVERRIDES: &[(&str, &str)] = &[("ui", "UI")];

/// The fixed set of casing conventions a config may select.
///
/// Serialized names match the config-file spelling (`"PascalCase"`,
/// `"snake_case"`, ...); anything else fails deserialization with a
/// message listing the valid options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "PascalCase")]
    Pascal,
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "lowercase")]
    Lower,
    #[default]
    #[serde(rename = "passthrough")]
    Passthrough,
}

/// Applies a [`NamingConvention`] to individual path segments.
#[derive(Debug, Clone, Copy)]
pub struct Namer {
    convention: NamingConvention,
}

impl Namer {
    pub fn new(convention: NamingConvention) -> Self {
        Self { convention }
    }

    /// Transform a single path segment into the configured convention.
    pub fn apply(&self, segment: &str) -> String {
        for (raw, canonical) in ACRONYM_OVERRIDES {
            if segment.eq_ignore_ascii_case(raw) {
                return (*canonical).to_string();
            }
        }

        match self.convention {
            NamingConvention::Passthrough => segment.to_string(),
            NamingConvention::Lower => segment
                .chars()
                .filter(|c| !is_delimiter(*c))
                .flat_map(|c| c.to_lowercase())
                .collect(),
            NamingConvention::Pascal => split_words(segment)
                .iter()
                .map(|w| capitalize(w))
                .collect(),
            NamingConvention::Camel => {
                let words = split_words(segment);
                let mut out = String::with_capacity(segment.len());
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.extend(word.chars().flat_map(|c| c.to_lowercase()));
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            NamingConvention::Snake => split_words(segment)
                .iter()
                .map(|w| w.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}

/// Lowercase a word and uppercase its first character.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.extend(chars.flat_map(|c| c.to_lowercase()));
            out
        }
        None => String::new(),
    }
}

/// Split a segment into words on delimiters and casing transitions.
///
/// A lowercase-to-uppercase transition starts a new word, and so does the
/// last capital of an uppercase run followed by a lowercase letter
/// ("XMLHttp" splits into "XML" and "Http").
fn split_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = segment.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if is_delimiter(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() && c.is_uppercase() {
            let prev_lower = chars[i - 1].is_lowercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower || (chars[i - 1].is_uppercase() && next_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namer(convention: NamingConvention) -> Namer {
        Namer::new(convention)
    }

    #[test]
    fn test_pascal_simple() {
        assert_eq!(namer(NamingConvention::Pascal).apply("core"), "Core");
    }

    #[test]
    fn test_pascal_delimiters() {
        let n = namer(NamingConvention::Pascal);
        assert_eq!(n.apply("game-state"), "GameState");
        assert_eq!(n.apply("game_state"), "GameState");
        assert_eq!(n.apply("game state"), "GameState");
    }

    #[test]
    fn test_pascal_casing_transitions() {
        let n = namer(NamingConvention::Pascal);
        assert_eq!(n.apply("gameState"), "GameState");
        assert_eq!(n.apply("XMLHttp"), "XmlHttp");
    }

    #[test]
    fn test_camel() {
        let n = namer(NamingConvention::Camel);
        assert_eq!(n.apply("GameState"), "gameState");
        assert_eq!(n.apply("game-state"), "gameState");
        assert_eq!(n.apply("core"), "core");
    }

    #[test]
    fn test_snake() {
        let n = namer(NamingConvention::Snake);
        assert_eq!(n.apply("GameState"), "game_state");
        assert_eq!(n.apply("game-state"), "game_state");
    }

    #[test]
    fn test_lowercase() {
        let n = namer(NamingConvention::Lower);
        assert_eq!(n.apply("GameState"), "gamestate");
        assert_eq!(n.apply("game-state"), "gamestate");
    }

    #[test]
    fn test_passthrough_is_identity() {
        let n = namer(NamingConvention::Passthrough);
        assert_eq!(n.apply("Weird_mixedCase"), "Weird_mixedCase");
    }

    #[test]
    fn test_acronym_override_beats_convention() {
        assert_eq!(namer(NamingConvention::Snake).apply("ui"), "UI");
        assert_eq!(namer(NamingConvention::Lower).apply("UI"), "UI");
        assert_eq!(namer(NamingConvention::Pascal).apply("Ui"), "UI");
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(namer(NamingConvention::Pascal).apply(""), "");
    }

    #[test]
    fn test_unknown_convention_rejected() {
        let err = serde_json::from_str::<NamingConvention>("\"kebab-case\"")
            .expect_err("should reject unknown convention");
        let msg = err.to_string();
        assert!(msg.contains("PascalCase"), "should list options: {}", msg);
        assert!(msg.contains("passthrough"), "should list options: {}", msg);
    }
}
