//! # Classifier
//!
//! Lexicon-based polarity scoring with fixed three-way thresholds.
//! Pure: no I/O, no state, no error path.

use bg_core::Sentiment;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::lexicon::{self, NEGATION_FACTOR};

/// Scores strictly below this are CRITICAL.
pub const CRITICAL_BELOW: f64 = -0.1;
/// Scores strictly above this are POSITIVE.
pub const POSITIVE_ABOVE: f64 = 0.1;

// Emoticons first so ":)" is not split into a clause boundary.
static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[:;=]-?[()\[\]DdPp]|<3|[\p{L}\p{N}]+(?:['’]\p{L}+)?|[.,;:!?]")
        .expect("token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub sentiment: Sentiment,
    pub score: f64,
}

pub fn classify(text: &str) -> Classification {
    let score = polarity(text);
    Classification {
        sentiment: categorize(score),
        score,
    }
}

/// Both thresholds are inclusive on the NEUTRAL side.
pub fn categorize(score: f64) -> Sentiment {
    if score < CRITICAL_BELOW {
        Sentiment::Critical
    } else if score > POSITIVE_ABOVE {
        Sentiment::Positive
    } else {
        Sentiment::Neutral
    }
}

/// Mean polarity of the assessed tokens, clamped to [-1.0, 1.0].
/// Text without any sentiment-bearing token scores 0.0.
pub fn polarity(text: &str) -> f64 {
    let mut sum = 0.0;
    let mut assessed = 0usize;
    let mut intensity = 1.0;
    let mut negated = false;

    let mut at = 0;
    while let Some(found) = TOKEN.find_at(text, at) {
        let mut end = found.end();
        // An emoticon glued to a following word is just its leading mark,
        // so "Item:dreadful" keeps the word.
        if is_emoticon_shape(found.as_str()) && starts_word(&text[end..]) {
            end = found.start() + 1;
        }
        at = end;
        let token = text[found.start()..end].to_lowercase().replace('’', "'");

        if let Some(value) = lexicon::emoticon_polarity(&token) {
            sum += value;
            assessed += 1;
            intensity = 1.0;
            negated = false;
            continue;
        }

        if is_clause_boundary(&token) {
            intensity = 1.0;
            negated = false;
            continue;
        }

        if let Some(factor) = lexicon::intensity(&token) {
            intensity *= factor;
            continue;
        }

        if lexicon::is_negator(&token) {
            negated = true;
            continue;
        }

        if let Some(value) = lexicon::polarity(&token) {
            let mut value = value * intensity;
            if negated {
                value *= NEGATION_FACTOR;
            }
            sum += value;
            assessed += 1;
            intensity = 1.0;
            negated = false;
        }
    }

    if assessed == 0 {
        return 0.0;
    }
    (sum / assessed as f64).clamp(-1.0, 1.0)
}

fn is_emoticon_shape(token: &str) -> bool {
    token.len() > 1 && token.starts_with([':', ';', '=', '<'])
}

fn starts_word(rest: &str) -> bool {
    rest.chars().next().is_some_and(char::is_alphanumeric)
}

fn is_clause_boundary(token: &str) -> bool {
    matches!(token, "." | "," | ";" | ":" | "!" | "?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_review() {
        let result = classify("This product is amazing!");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert!(result.score > 0.1);
    }

    #[test]
    fn test_critical_review() {
        let result = classify("Terrible service, very disappointed");
        assert_eq!(result.sentiment, Sentiment::Critical);
        assert!(result.score < -0.1);
    }

    #[test]
    fn test_neutral_review() {
        let result = classify("It was okay, nothing special");
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert!((-0.1..=0.1).contains(&result.score), "score {}", result.score);
    }

    #[test]
    fn test_no_sentiment_tokens_scores_zero() {
        for text in ["", "   ", "The parcel arrived on Tuesday", "12345", "?!"] {
            let result = classify(text);
            assert_eq!(result.score, 0.0, "{text:?}");
            assert_eq!(result.sentiment, Sentiment::Neutral);
        }
    }

    #[test]
    fn test_thresholds_are_inclusive_on_neutral() {
        assert_eq!(categorize(-0.1), Sentiment::Neutral);
        assert_eq!(categorize(0.1), Sentiment::Neutral);
        assert_eq!(categorize(0.0), Sentiment::Neutral);
        assert_eq!(categorize(-0.100001), Sentiment::Critical);
        assert_eq!(categorize(0.100001), Sentiment::Positive);
        assert_eq!(categorize(-1.0), Sentiment::Critical);
        assert_eq!(categorize(1.0), Sentiment::Positive);
    }

    #[test]
    fn test_negation_flips_and_dampens() {
        let plain = polarity("good");
        let negated = polarity("not good");
        assert!(plain > 0.0);
        assert!((negated - plain * NEGATION_FACTOR).abs() < 1e-9);
        assert!(polarity("not bad") > 0.0);
        assert!(polarity("it isn't good") < 0.0);
    }

    #[test]
    fn test_negation_stops_at_clause_boundary() {
        assert_eq!(polarity("no. good"), polarity("good"));
    }

    #[test]
    fn test_intensifier_scales_next_word() {
        assert!(polarity("very bad") < polarity("bad"));
        assert!(polarity("slightly good") < polarity("good"));
    }

    #[test]
    fn test_score_stays_bounded() {
        let loud = "absolutely extremely incredibly super perfect";
        assert_eq!(polarity(loud), 1.0);
        let grim = "absolutely extremely incredibly super terrible";
        assert_eq!(polarity(grim), -1.0);
    }

    #[test]
    fn test_emoticons_and_case() {
        assert_eq!(classify("arrived today :)").sentiment, Sentiment::Positive);
        assert_eq!(classify("arrived today :(").sentiment, Sentiment::Critical);
        assert_eq!(polarity("GREAT"), polarity("great"));
        assert_eq!(polarity("It isn’t good"), polarity("It isn't good"));
    }

    #[test]
    fn test_colon_before_word_is_not_an_emoticon() {
        assert_eq!(classify("Item:dreadful").sentiment, Sentiment::Critical);
        assert_eq!(classify("Condition:dirty").sentiment, Sentiment::Critical);
        assert_eq!(
            classify("Status:damaged and broken").sentiment,
            Sentiment::Critical
        );
        assert_eq!(polarity("Item:dreadful"), polarity("dreadful"));
        assert_eq!(polarity("good;perfect"), polarity("good perfect"));
        assert_eq!(classify("Loved it :D").sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_classification_is_deterministic_and_consistent() {
        let samples = [
            "This product is amazing!",
            "Terrible service, very disappointed",
            "It was okay, nothing special",
            "not very good, but the staff were friendly :)",
            "Worst purchase ever. Never again!!!",
            "Fine.",
            "meh",
        ];
        for text in samples {
            let first = classify(text);
            assert_eq!(first, classify(text));
            assert!((-1.0..=1.0).contains(&first.score));
            assert_eq!(first.sentiment, categorize(first.score));
        }
    }
}
