//! English to German phrase translation backed by a fixed vocabulary.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

const VOCABULARY: &[(&str, &str)] = &[
    ("good morning", "Guten Morgen"),
    ("good afternoon", "Guten Tag"),
    ("good evening", "Guten Abend"),
    ("good night", "Gute Nacht"),
    ("hello", "Hallo"),
    ("hi", "Hallo"),
    ("goodbye", "Auf Wiedersehen"),
    ("thank you", "Danke"),
    ("please", "Bitte"),
    ("yes", "Ja"),
    ("no", "Nein"),
    ("sunshine", "Sonnenschein"),
    ("have a nice day", "Einen schönen Tag noch"),
    ("how are you", "Wie geht es dir"),
    ("i am fine", "Mir geht es gut"),
    ("welcome", "Willkommen"),
    ("excuse me", "Entschuldigung"),
    ("sorry", "Entschuldigung"),
    ("water", "Wasser"),
    ("bread", "Brot"),
    ("house", "Haus"),
    ("car", "Auto"),
    ("book", "Buch"),
    ("friend", "Freund"),
    ("family", "Familie"),
    ("work", "Arbeit"),
    ("school", "Schule"),
    ("time", "Zeit"),
    ("day", "Tag"),
    ("night", "Nacht"),
    ("morning", "Morgen"),
    ("afternoon", "Nachmittag"),
    ("evening", "Abend"),
    ("week", "Woche"),
    ("month", "Monat"),
    ("year", "Jahr"),
    ("today", "Heute"),
    ("tomorrow", "Morgen"),
    ("yesterday", "Gestern"),
    ("big", "Groß"),
    ("small", "Klein"),
    ("good", "Gut"),
    ("bad", "Schlecht"),
    ("beautiful", "Schön"),
    ("ugly", "Hässlich"),
    ("hot", "Heiß"),
    ("cold", "Kalt"),
    ("new", "Neu"),
    ("old", "Alt"),
    ("young", "Jung"),
    ("happy", "Glücklich"),
    ("sad", "Traurig"),
    ("angry", "Wütend"),
    ("tired", "Müde"),
    ("hungry", "Hungrig"),
    ("thirsty", "Durstig"),
    ("love", "Liebe"),
    ("hate", "Hass"),
    ("like", "Gefallen"),
    ("want", "Wollen"),
    ("need", "Brauchen"),
    ("can", "Können"),
    ("must", "Müssen"),
    ("should", "Sollten"),
    ("will", "Werden"),
    ("would", "Würden"),
    ("could", "Könnten"),
    ("may", "Dürfen"),
    ("might", "Könnten"),
];

const PARTIAL_NOTE: &str = "Some words may not be accurately translated";

// Quoted phrase followed or preceded by a mention of German. First match wins.
static REQUEST_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r#"(?i)\btranslate\s+['"]([^'"]+)['"]\s+into\s+german"#,
        r#"(?i)\btranslate\s+['"]([^'"]+)['"]\s+to\s+german"#,
        r#"(?i)['"]([^'"]+)['"]\s+in\s+german"#,
        r#"(?i)\bhow\s+do\s+you\s+say\s+['"]([^'"]+)['"]\s+in\s+german"#,
        r#"(?i)\bgerman\s+for\s+['"]([^'"]+)['"]"#,
        r#"(?i)\bwhat\s+is\s+['"]([^'"]+)['"]\s+in\s+german"#,
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("{0}")]
    NotAvailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The whole phrase is a vocabulary entry
    High,
    /// Assembled word by word; unknown words kept in brackets
    Partial,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Partial => f.write_str("partial"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Phrase as the user wrote it
    pub source: String,
    pub translated: String,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A translation request found in free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub phrase: String,
    pub target_language: String,
}

#[derive(Debug, Clone)]
pub struct Translator {
    vocabulary: HashMap<&'static str, &'static str>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        Self {
            vocabulary: VOCABULARY.iter().copied().collect(),
        }
    }

    /// Number of vocabulary entries
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Find a quoted phrase the user wants in German.
    ///
    /// The phrase is trimmed but keeps the user's casing.
    pub fn detect(text: &str) -> Option<TranslationRequest> {
        REQUEST_PATTERNS.iter().find_map(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| TranslationRequest {
                    phrase: m.as_str().trim().to_string(),
                    target_language: "german".to_string(),
                })
        })
    }

    /// Translate a phrase.
    ///
    /// Whole-phrase hits are `High` confidence. Otherwise the phrase is
    /// translated word by word; if no word at all is known the translation
    /// is not available.
    pub fn lookup(&self, phrase: &str) -> Result<Translation, TranslationError> {
        let normalized = phrase.trim().to_lowercase();

        if let Some(german) = self.vocabulary.get(normalized.as_str()) {
            return Ok(Translation {
                source: phrase.to_string(),
                translated: german.to_string(),
                confidence: Confidence::High,
                note: None,
            });
        }

        let mut known = 0usize;
        let words: Vec<String> = normalized
            .split_whitespace()
            .map(|word| {
                let bare = word.trim_matches(|c: char| c.is_ascii_punctuation());
                match self.vocabulary.get(bare) {
                    Some(german) => {
                        known += 1;
                        german.to_string()
                    }
                    None => format!("[{}]", word),
                }
            })
            .collect();

        if known == 0 {
            return Err(TranslationError::NotAvailable(
                "Translation not available for this text".to_string(),
            ));
        }

        Ok(Translation {
            source: phrase.to_string(),
            translated: words.join(" "),
            confidence: Confidence::Partial,
            note: Some(PARTIAL_NOTE.to_string()),
        })
    }

    /// Render an outcome for display
    pub fn format_result(result: &Result<Translation, TranslationError>) -> String {
        match result {
            Ok(t) => {
                let mut out = format!(
                    "Translation: '{}' → '{}' (Confidence: {})",
                    t.source, t.translated, t.confidence
                );
                if let Some(note) = &t.note {
                    out.push_str(&format!("\nNote: {}", note));
                }
                out
            }
            Err(e) => format!("Translation error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let t = Translator::new().lookup("Good Morning").unwrap();
        assert_eq!(t.source, "Good Morning");
        assert_eq!(t.translated, "Guten Morgen");
        assert_eq!(t.confidence, Confidence::High);
        assert!(t.note.is_none());
    }

    #[test]
    fn test_lookup_ignores_case_and_padding() {
        let t = Translator::new().lookup("  SUNSHINE ").unwrap();
        assert_eq!(t.translated, "Sonnenschein");
    }

    #[test]
    fn test_partial_lookup() {
        let t = Translator::new().lookup("good coffee").unwrap();
        assert_eq!(t.translated, "Gut [coffee]");
        assert_eq!(t.confidence, Confidence::Partial);
        assert_eq!(t.note.as_deref(), Some(PARTIAL_NOTE));
    }

    #[test]
    fn test_partial_lookup_strips_punctuation() {
        let t = Translator::new().lookup("hello, friend").unwrap();
        assert_eq!(t.translated, "Hallo Freund");
    }

    #[test]
    fn test_lookup_not_available() {
        let translator = Translator::new();
        let err = translator.lookup("quantum chromodynamics").unwrap_err();
        assert_eq!(err.to_string(), "Translation not available for this text");
        assert!(translator.lookup("   ").is_err());
    }

    #[test]
    fn test_detect_shapes() {
        let cases = [
            ("Translate 'Good Morning' into German", "Good Morning"),
            ("Translate \"Sunshine\" to German.", "Sunshine"),
            ("What is 'Have a nice day' in German?", "Have a nice day"),
            ("How do you say 'Hello' in German?", "Hello"),
            ("What's the German for 'thank you'", "thank you"),
            ("translate ' water ' into german", "water"),
        ];

        for (text, phrase) in cases {
            let request = Translator::detect(text).unwrap_or_else(|| panic!("no match: {}", text));
            assert_eq!(request.phrase, phrase);
            assert_eq!(request.target_language, "german");
        }
    }

    #[test]
    fn test_detect_requires_quotes_and_german() {
        assert!(Translator::detect("Translate good morning into German").is_none());
        assert!(Translator::detect("Translate 'Good Morning' into French").is_none());
        assert!(Translator::detect("Add 10 and 20").is_none());
    }

    #[test]
    fn test_format_result() {
        let translator = Translator::new();
        assert_eq!(
            Translator::format_result(&translator.lookup("yes")),
            "Translation: 'yes' → 'Ja' (Confidence: high)"
        );
        assert_eq!(
            Translator::format_result(&translator.lookup("zzz")),
            "Translation error: Translation not available for this text"
        );
    }

    #[test]
    fn test_vocabulary_loaded() {
        let translator = Translator::new();
        assert_eq!(translator.len(), VOCABULARY.len());
        assert!(!translator.is_empty());
    }
}
