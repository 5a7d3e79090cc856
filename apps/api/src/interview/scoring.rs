//! Score-hint → points.
//!
//! Rules are checked in order against the lowercased hint; the first match wins.

/// Points for an answer, given the model's one-word hint and the candidate's answer.
pub fn score_delta(score_hint: &str, answer: &str) -> u32 {
    let hint = score_hint.to_lowercase();
    let has_any = |needles: &[&str]| needles.iter().any(|n| hint.contains(n));

    if has_any(&["good", "excellent", "strong"]) {
        10
    } else if has_any(&["ok", "average", "decent"]) {
        7
    } else if has_any(&["partial"]) {
        5
    } else if has_any(&["improvement", "weak", "needs work"]) {
        3
    } else if answer.trim().is_empty() && has_any(&["neutral", "ok"]) {
        // Only "neutral" reaches this branch: "ok" already scored 7 above.
        1
    } else {
        // Covers the "error" hint of an unparseable reply and anything unrecognized.
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_is_ten_regardless_of_case() {
        assert_eq!(score_delta("Good", "answer"), 10);
        assert_eq!(score_delta("GOOD", "answer"), 10);
        assert_eq!(score_delta("gOoD", ""), 10);
    }

    #[test]
    fn test_excellent_and_strong() {
        assert_eq!(score_delta("Excellent", "a"), 10);
        assert_eq!(score_delta("Strong answer", "a"), 10);
    }

    #[test]
    fn test_ok_average_decent() {
        assert_eq!(score_delta("OK", "a"), 7);
        assert_eq!(score_delta("Average", "a"), 7);
        assert_eq!(score_delta("decent", "a"), 7);
    }

    #[test]
    fn test_partial() {
        assert_eq!(score_delta("Partial", "a"), 5);
    }

    #[test]
    fn test_partial_wins_over_improvement() {
        assert_eq!(score_delta("Partial, needs improvement", "a"), 5);
    }

    #[test]
    fn test_needs_improvement_mixed_case() {
        assert_eq!(score_delta("NeEdS iMpRoVeMent", "a"), 3);
        assert_eq!(score_delta("Needs Improvement", ""), 3);
        assert_eq!(score_delta("Weak", "a"), 3);
        assert_eq!(score_delta("needs work", "a"), 3);
    }

    #[test]
    fn test_neutral_with_empty_answer_gets_one() {
        assert_eq!(score_delta("Neutral", ""), 1);
        assert_eq!(score_delta("Neutral", "   "), 1);
    }

    #[test]
    fn test_neutral_with_answer_gets_nothing() {
        assert_eq!(score_delta("Neutral", "I think it is O(n)"), 0);
    }

    #[test]
    fn test_error_and_unknown_hints_get_nothing() {
        assert_eq!(score_delta("Error", ""), 0);
        assert_eq!(score_delta("Mediocre", "a"), 0);
        assert_eq!(score_delta("", ""), 0);
    }
}
