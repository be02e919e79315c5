//! Confirmation-utterance classification
//!
//! The orchestrator, not the model, decides whether the user affirmed a
//! proposal. Classification is lexicon-based and deliberately conservative:
//! anything that is neither a clear yes nor a clear objection is ambiguous
//! and must not move the state machine.

use lazy_static::lazy_static;
use regex::Regex;

/// Classification of the user's reply to a read-back proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Unambiguous yes.
    Affirmative,
    /// Objection or correction request.
    Negative,
    /// Neither; repeat the proposal.
    Ambiguous,
}

lazy_static! {
    /// Objection markers. Checked first: "yes, but change the time" is a
    /// correction, not a confirmation.
    static ref NEGATIVE: Regex = Regex::new(
        r"(?i)\b(no|nope|nah|don't|do not|wrong|change|actually|instead|cancel|different|rather|not (?:right|quite|correct)|hold on|wait)\b"
    ).unwrap();

    /// Affirmation markers, anchored to the start of the utterance so a
    /// trailing "yes?" inside a question does not count.
    static ref AFFIRMATIVE: Regex = Regex::new(
        r"(?i)^\s*(yes|yeah|yep|yup|correct|confirmed?|sure|perfect|absolutely|exactly|sounds good|that works|that's right|that is right|go ahead|book it|please do|do it)\b"
    ).unwrap();
}

/// Classify one user utterance.
pub fn classify(utterance: &str) -> Verdict {
    if NEGATIVE.is_match(utterance) {
        Verdict::Negative
    } else if AFFIRMATIVE.is_match(utterance) {
        Verdict::Affirmative
    } else {
        Verdict::Ambiguous
    }
}
