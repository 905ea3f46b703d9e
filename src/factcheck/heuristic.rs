//! Local rule-based fact-check responder.
//!
//! Used when no external provider answers. The rules are plain ordered data:
//! curated responses for specific false claims first, then the generic
//! incorrect-statement patterns, then correct-statement patterns, then an
//! "uncertain" verdict. Within each table the first match wins, so entry
//! order is significant.

use super::models::FactCheckResult;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Curated response for a well-known false claim
#[derive(Debug)]
struct KeyedResponse {
    key: &'static str,
    /// The claim this response answers; each is narrower than a generic
    /// incorrect pattern, so a curated hit is always an incorrect hit too
    pattern: &'static str,
    verdict: &'static str,
    confidence: f64,
    sources: &'static [&'static str],
}

/// Patterns over lowercased text for common false claims
const INCORRECT_PATTERNS: &[&str] = &[
    r"\b(elephants?|pigs?|monkeys?|cows?|dogs?|cats?|horses?|penguins?|ostrich(es)?|humans?)\s+(can|could|are\s+able\s+to)\s+fly\b",
    r"\bearth\s+is\s+flat\b",
    r"\bfire\s+is\s+(cold|freezing)\b",
    r"\bice\s+is\s+hot\b",
    r"\bsun\s+(orbits|revolves\s+around|goes\s+around|circles)\s+the\s+earth\b",
    r"\bmoon\s+is\s+made\s+of\s+cheese\b",
    r"\bhumans?\s+(can|could)\s+breathe\s+underwater\b",
    r"\bwater\s+boils\s+at\s+(0|50)([^0-9]|$)",
];

/// Curated responses, tried in order before the generic incorrect patterns
const KEYED_RESPONSES: &[KeyedResponse] = &[
    KeyedResponse {
        key: "elephant",
        pattern: r"\belephants?\s+(can|could|are\s+able\s+to)\s+fly\b",
        verdict: "Incorrect. Elephants cannot fly. They are the largest land animals, weighing several tonnes, and have no wings or any other adaptation for flight.",
        confidence: 0.99,
        sources: &["Zoological Research", "Animal Biology Textbooks"],
    },
    KeyedResponse {
        key: "pig",
        pattern: r"\bpigs?\s+(can|could|are\s+able\s+to)\s+fly\b",
        verdict: "Incorrect. Pigs cannot fly. \"When pigs fly\" is an idiom for something that will never happen; pigs have no wings.",
        confidence: 0.99,
        sources: &["Animal Biology Textbooks", "Idiom Dictionaries"],
    },
    KeyedResponse {
        key: "monkey",
        pattern: r"\bmonkeys?\s+(can|could|are\s+able\s+to)\s+fly\b",
        verdict: "Incorrect. Monkeys cannot fly. They are primates adapted for climbing and leaping between trees, not for flight.",
        confidence: 0.98,
        sources: &["Primatology Research", "Zoological Research"],
    },
    KeyedResponse {
        key: "penguin",
        pattern: r"\bpenguins?\s+(can|could|are\s+able\s+to)\s+fly\b",
        verdict: "Incorrect. Penguins are flightless birds. Their wings evolved into flippers for swimming, and they can reach 35 km/h underwater.",
        confidence: 0.97,
        sources: &["Ornithology Research", "Marine Biology Databases"],
    },
    KeyedResponse {
        key: "flat",
        pattern: r"\bearth\s+is\s+flat\b",
        verdict: "Incorrect. The Earth is not flat. It is an oblate spheroid, as confirmed by satellite imagery, circumnavigation and centuries of astronomical observation.",
        confidence: 0.99,
        sources: &["NASA", "Geodesy Research", "Astronomical Observations"],
    },
    KeyedResponse {
        key: "fire",
        pattern: r"\bfire\s+is\s+(cold|freezing)\b",
        verdict: "Incorrect. Fire is not cold. Flames are produced by combustion and typically burn at temperatures between 600°C and 1,500°C.",
        confidence: 0.98,
        sources: &["Combustion Science", "Physics Textbooks"],
    },
    KeyedResponse {
        key: "sun",
        pattern: r"\bsun\s+(orbits|revolves\s+around|goes\s+around|circles)\s+the\s+earth\b",
        verdict: "Incorrect. The Sun does not orbit the Earth. The Earth orbits the Sun roughly once every 365.25 days.",
        confidence: 0.98,
        sources: &["NASA", "Astronomical Observations"],
    },
    KeyedResponse {
        key: "moon",
        pattern: r"\bmoon\s+is\s+made\s+of\s+cheese\b",
        verdict: "Incorrect. The Moon is not made of cheese. Samples returned by the Apollo missions show it is composed of silicate rock and metals.",
        confidence: 0.99,
        sources: &["NASA Lunar Sample Analysis", "Planetary Science Research"],
    },
    KeyedResponse {
        key: "breathe",
        pattern: r"\bhumans?\s+(can|could)\s+breathe\s+underwater\b",
        verdict: "Incorrect. Humans cannot breathe underwater without equipment. Human lungs cannot extract dissolved oxygen from water.",
        confidence: 0.97,
        sources: &["Human Physiology Textbooks", "Medical Literature"],
    },
];

/// Patterns over lowercased text for well-known true claims
const CORRECT_PATTERNS: &[&str] = &[
    r"\bearth\s+is\s+(a\s+)?(sphere|round|spherical|an\s+oblate\s+spheroid)\b",
    r"\bwater\s+boils\s+at\s+100([^0-9]|$)",
    r"\bfire\s+is\s+hot\b",
    r"\bbirds\s+can\s+fly\b",
    r"\bice\s+is\s+cold\b",
    r"\bearth\s+(orbits|revolves\s+around|goes\s+around)\s+the\s+sun\b",
    r"\bwater\s+freezes\s+at\s+0([^0-9.]|$)",
    r"\bsun\s+is\s+a\s+star\b",
    r"\bhumans?\s+need\s+oxygen\b",
];

const INCORRECT_CONFIDENCE: f64 = 0.85;
const INCORRECT_SOURCES: &[&str] = &["Scientific Literature", "Fact-Checking Database"];

const CORRECT_CONFIDENCE: f64 = 0.90;
const CORRECT_SOURCES: &[&str] = &[
    "Scientific Literature",
    "Educational Resources",
    "Verified Databases",
];

const UNCERTAIN_CONFIDENCE: f64 = 0.50;
const UNCERTAIN_SOURCES: &[&str] = &["Fact-Checking Guidelines", "Research Methodology"];

struct RuleTables {
    keyed: Vec<(Regex, &'static KeyedResponse)>,
    incorrect: Vec<Regex>,
    correct: Vec<Regex>,
}

static RULES: Lazy<RuleTables> = Lazy::new(|| RuleTables {
    keyed: KEYED_RESPONSES
        .iter()
        .map(|r| (compile_one(r.pattern), r))
        .collect(),
    incorrect: compile(INCORRECT_PATTERNS),
    correct: compile(CORRECT_PATTERNS),
});

fn compile_one(pattern: &str) -> Regex {
    Regex::new(pattern).expect("heuristic patterns are valid regexes")
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| compile_one(p)).collect()
}

/// Which branch of the rule tables produced a verdict
#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classification {
    /// Matched an incorrect pattern and a curated response
    KnownFalse(&'static str),
    /// Matched an incorrect pattern without a curated response
    Incorrect,
    Correct,
    Uncertain,
}

enum RuleMatch {
    Keyed(&'static KeyedResponse),
    Incorrect,
    Correct,
    Uncertain,
}

/// Rule-based classifier over the static tables
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Force compilation of the rule tables
    pub fn warm_up(&self) {
        Lazy::force(&RULES);
    }

    /// Classify already-lowercased text
    #[cfg(test)]
    fn evaluate(&self, lowered: &str) -> Classification {
        match self.first_match(lowered) {
            RuleMatch::Keyed(response) => Classification::KnownFalse(response.key),
            RuleMatch::Incorrect => Classification::Incorrect,
            RuleMatch::Correct => Classification::Correct,
            RuleMatch::Uncertain => Classification::Uncertain,
        }
    }

    fn first_match(&self, lowered: &str) -> RuleMatch {
        let rules = &*RULES;

        if let Some((_, response)) = rules.keyed.iter().find(|(re, _)| re.is_match(lowered)) {
            return RuleMatch::Keyed(*response);
        }

        if rules.incorrect.iter().any(|re| re.is_match(lowered)) {
            return RuleMatch::Incorrect;
        }

        if rules.correct.iter().any(|re| re.is_match(lowered)) {
            return RuleMatch::Correct;
        }

        RuleMatch::Uncertain
    }

    /// Produce a verdict for `text`. Never fails.
    pub fn classify(&self, text: &str) -> FactCheckResult {
        self.classify_lowered(text, &text.to_lowercase())
    }

    /// Produce a verdict given the original text (quoted back in messages)
    /// and its lowercase form (used for matching)
    pub fn classify_lowered(&self, original: &str, lowered: &str) -> FactCheckResult {
        match self.first_match(lowered) {
            RuleMatch::Keyed(response) => {
                debug!("Heuristic matched curated response {}", response.key);
                FactCheckResult::new(response.verdict, response.confidence, labels(response.sources))
            }
            RuleMatch::Incorrect => FactCheckResult::new(
                format!(
                    "Incorrect. The statement \"{}\" appears to be incorrect based on established scientific knowledge. Please verify with reliable sources.",
                    original
                ),
                INCORRECT_CONFIDENCE,
                labels(INCORRECT_SOURCES),
            ),
            RuleMatch::Correct => FactCheckResult::new(
                format!(
                    "Correct. The statement \"{}\" aligns with established scientific knowledge.",
                    original
                ),
                CORRECT_CONFIDENCE,
                labels(CORRECT_SOURCES),
            ),
            RuleMatch::Uncertain => FactCheckResult::new(
                format!(
                    "Uncertain. The statement \"{}\" requires further verification. Please consult authoritative sources.",
                    original
                ),
                UNCERTAIN_CONFIDENCE,
                labels(UNCERTAIN_SOURCES),
            ),
        }
    }
}

fn labels(sources: &[&str]) -> Vec<String> {
    sources.iter().map(|s| s.to_string()).collect()
}
