//! English polarity lexicon for short product and service reviews.
//!
//! Polarities live in [-1.0, 1.0]. Intensifiers scale the next sentiment
//! word; negators flip and dampen it.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Multiplier applied to a sentiment word preceded by a negator.
pub const NEGATION_FACTOR: f64 = -0.5;

static POLARITY: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("clean", 0.37),
    ("comfortable", 0.4),
    ("cool", 0.35),
    ("delicious", 1.0),
    ("delighted", 0.7),
    ("easy", 0.43),
    ("efficient", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("exceptional", 0.67),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("friendly", 0.38),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("gorgeous", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressed", 0.6),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("like", 0.2),
    ("liked", 0.3),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("okay", 0.1),
    ("ok", 0.1),
    ("outstanding", 0.5),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("pleased", 0.5),
    ("polite", 0.5),
    ("quick", 0.33),
    ("recommend", 0.4),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("special", 0.357),
    ("superb", 1.0),
    ("thanks", 0.2),
    ("useful", 0.3),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // negative
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("confusing", -0.3),
    ("damaged", -0.5),
    ("dirty", -0.6),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dreadful", -0.8),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("faulty", -0.5),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("late", -0.3),
    ("mediocre", -0.5),
    ("poor", -0.4),
    ("problem", -0.3),
    ("rude", -0.3),
    ("sad", -0.5),
    ("scam", -0.8),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unacceptable", -0.75),
    ("unhappy", -0.6),
    ("useless", -0.5),
    ("waste", -0.2),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

static INTENSITY: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.5),
    ("too", 1.3),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
    ("fairly", 0.8),
    ("rather", 0.8),
    ("somewhat", 0.7),
    ("slightly", 0.5),
    ("barely", 0.4),
];

static NEGATORS: &[&str] = &[
    "no", "not", "never", "nothing", "none", "neither", "nor", "without", "hardly",
];

static POLARITY_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| POLARITY.iter().copied().collect());

static INTENSITY_INDEX: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSITY.iter().copied().collect());

pub fn polarity(word: &str) -> Option<f64> {
    POLARITY_INDEX.get(word).copied()
}

pub fn intensity(word: &str) -> Option<f64> {
    INTENSITY_INDEX.get(word).copied()
}

/// `not`, `never`, ... and any contraction ending in `n't`.
pub fn is_negator(word: &str) -> bool {
    NEGATORS.contains(&word) || word.ends_with("n't")
}

pub fn emoticon_polarity(token: &str) -> Option<f64> {
    match token {
        ":)" | ":-)" | "=)" | ";)" | ";-)" | ":]" => Some(0.5),
        ":d" | ":-d" | "<3" => Some(1.0),
        ":(" | ":-(" | "=(" | ":[" => Some(-0.75),
        ":p" | ":-p" => Some(0.1),
        _ => None,
    }
}
