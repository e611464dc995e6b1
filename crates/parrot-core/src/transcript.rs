//! Canned transcript generation.
//!
//! Completed uploads get a placeholder transcript: a contiguous prefix of a
//! fixed pool of stock sentences, with the prefix length drawn uniformly
//! from the configured range. No relation to the submitted audio.

use rand::Rng;

const STOCK_SENTENCES: &[&str] = &[
    "Thank you all for joining the call today.",
    "Let's start with a quick review of last week's action items.",
    "The quarterly numbers are trending slightly ahead of forecast.",
    "I think we should circle back to the budget discussion.",
    "Can everyone see the shared screen?",
    "We'll need sign-off from the platform team before the rollout.",
    "The customer feedback on the beta has been largely positive.",
    "Let's schedule a follow-up for early next week.",
    "I'll send out the updated notes after this meeting.",
    "That covers everything on the agenda for today.",
];

/// Build a transcript of `min..=max` stock sentences joined with single
/// spaces. Bounds are clamped to the pool size, and at least one sentence is
/// always produced.
pub fn generate(min_sentences: usize, max_sentences: usize) -> String {
    let upper = max_sentences.clamp(1, STOCK_SENTENCES.len());
    let lower = min_sentences.clamp(1, upper);
    let count = rand::thread_rng().gen_range(lower..=upper);
    STOCK_SENTENCES[..count].join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_a_prefix_of_the_pool() {
        for _ in 0..50 {
            let transcript = generate(3, 7);
            let matches_some_prefix = (3..=7)
                .map(|n| STOCK_SENTENCES[..n].join(" "))
                .any(|prefix| prefix == transcript);
            assert!(matches_some_prefix, "not a pool prefix: {transcript}");
        }
    }

    #[test]
    fn degenerate_range_is_exact() {
        assert_eq!(generate(4, 4), STOCK_SENTENCES[..4].join(" "));
    }

    #[test]
    fn bounds_clamp_to_pool_size() {
        assert_eq!(generate(50, 60), STOCK_SENTENCES.join(" "));
        // A zero lower bound still yields at least one sentence.
        let transcript = generate(0, 1);
        assert_eq!(transcript, STOCK_SENTENCES[0]);
    }
}
