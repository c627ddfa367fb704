//! Intent extraction
//!
//! Splits a free-text query into ordered [`SubTask`]s using four passes:
//!
//! 1. translation: the first quoted phrase requested in German
//! 2. arithmetic: every addition form, then every multiplication form
//! 3. knowledge: question fragments delimited by "and", "then" or the end
//! 4. fallback: the whole query, when nothing else matched
//!
//! Matching is case-insensitive; captured values keep the user's casing.
//! Passes do not de-duplicate against each other.

use crate::step::SubTask;
use crate::tools::calculator::{parse_operand, Operator};
use crate::tools::translator::Translator;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

static ADDITION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\badd\s+([0-9]+)\s+and\s+([0-9]+)",
        r"([0-9]+)\s*\+\s*([0-9]+)",
        r"(?i)([0-9]+)\s+plus\s+([0-9]+)",
    ])
});

static MULTIPLICATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\bmultiply\s+([0-9]+)\s+and\s+([0-9]+)",
        r"([0-9]+)\s*\*\s*([0-9]+)",
        r"(?i)([0-9]+)\s+times\s+([0-9]+)",
    ])
});

// Specific shapes first; their fragment keeps the subject phrase.
static KNOWLEDGE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)\b(distance\s+between\s+.+?\s+and\s+.+?)(?:\s+and\s+|\s+then\s+|$)",
        r"(?i)\b(capital\s+of\s+\w+)",
        r"(?i)\btell\s+me\s+(.+?)(?:\s+and\s+|\s+then\s+|$)",
        r"(?i)\bwhat\s+is\s+(?:the\s+)?(.+?)(?:\s+and\s+|\s+then\s+|$)",
        r"(?i)\bwhich\s+(.+?)(?:\s+and\s+|\s+then\s+|$)",
    ])
});

const MIN_FRAGMENT_CHARS: usize = 4;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
}

/// Which optional passes run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractorOptions {
    pub translation: bool,
    pub arithmetic: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            translation: true,
            arithmetic: true,
        }
    }
}

/// Pattern-based query decomposition
#[derive(Debug, Clone, Default)]
pub struct IntentExtractor {
    options: ExtractorOptions,
}

impl IntentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExtractorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ExtractorOptions {
        self.options
    }

    /// Decompose `query`. Never returns an empty list.
    pub fn extract(&self, query: &str) -> Vec<SubTask> {
        let mut steps = Vec::new();

        if self.options.translation {
            steps.extend(translation_pass(query));
        }
        if self.options.arithmetic {
            steps.extend(arithmetic_pass(query));
        }
        steps.extend(knowledge_pass(query));

        if steps.is_empty() {
            debug!("No specific intent recognized, using fallback step");
            steps.push(SubTask::fallback(query));
        }

        debug!(count = steps.len(), "Extracted sub-tasks");
        steps
    }
}

fn translation_pass(query: &str) -> Option<SubTask> {
    Translator::detect(query).map(|request| SubTask::translation(&request.phrase))
}

fn arithmetic_pass(query: &str) -> Vec<SubTask> {
    let families = [
        (Operator::Add, &*ADDITION_PATTERNS),
        (Operator::Multiply, &*MULTIPLICATION_PATTERNS),
    ];

    let mut steps = Vec::new();
    for (operator, patterns) in families {
        for re in patterns {
            for caps in re.captures_iter(query) {
                let operands = (
                    caps.get(1).and_then(|m| parse_operand(m.as_str())),
                    caps.get(2).and_then(|m| parse_operand(m.as_str())),
                );
                if let (Some(a), Some(b)) = operands {
                    steps.push(SubTask::arithmetic(operator, a, b));
                }
            }
        }
    }
    steps
}

fn knowledge_pass(query: &str) -> Vec<SubTask> {
    let mut accepted: Vec<(Range<usize>, String)> = Vec::new();

    for re in KNOWLEDGE_PATTERNS.iter() {
        for caps in re.captures_iter(query) {
            let (Some(whole), Some(fragment)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let fragment = clean_fragment(fragment.as_str());
            if fragment.chars().count() < MIN_FRAGMENT_CHARS {
                continue;
            }
            let span = whole.range();
            if accepted.iter().any(|(taken, _)| overlaps(taken, &span)) {
                continue;
            }
            accepted.push((span, fragment));
        }
    }

    accepted.sort_by_key(|(span, _)| span.start);
    accepted
        .into_iter()
        .map(|(_, fragment)| SubTask::knowledge(&fragment))
        .collect()
}

fn clean_fragment(fragment: &str) -> String {
    fragment
        .trim()
        .trim_end_matches(['?', '.', '!'])
        .trim_end()
        .to_string()
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}
