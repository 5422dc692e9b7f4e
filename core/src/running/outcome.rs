use super::case::TestCase;

/// Penalty factor applied to the reference score of a case whose server
/// produced no extractable score. Historical constant, kept as-is.
pub const MISSING_SCORE_PENALTY: f64 = 21.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub case: TestCase,
    pub score: f64,
}

impl Outcome {
    /// Difference to the reference score.
    pub fn delta(&self) -> f64 {
        self.score - self.case.reference_score
    }

    /// Difference to the reference score, as a percentage of it.
    pub fn relative_gain(&self) -> f64 {
        self.delta() / self.case.reference_score * 100.0
    }
}

/// Replaces every zero score with `reference_score * MISSING_SCORE_PENALTY`.
/// A score of exactly 0.0 means the server produced no measurable result.
pub fn apply_missing_score_penalty(outcomes: Vec<Outcome>) -> Vec<Outcome> {
    outcomes
        .into_iter()
        .map(|o| {
            if o.score == 0.0 {
                let score = o.case.reference_score * MISSING_SCORE_PENALTY;
                Outcome { score, ..o }
            } else {
                o
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_score_gets_penalized() {
        let outcomes = vec![
            Outcome {
                case: TestCase::new("a", 100.0),
                score: 0.0,
            },
            Outcome {
                case: TestCase::new("b", 100.0),
                score: 87.5,
            },
        ];
        let adjusted = apply_missing_score_penalty(outcomes);
        assert_eq!(adjusted[0].score, 100.0 * MISSING_SCORE_PENALTY);
        assert_eq!(adjusted[1].score, 87.5);
    }

    #[test]
    fn nonzero_scores_pass_through_unchanged() {
        let outcomes = vec![Outcome {
            case: TestCase::new("a", 50.0),
            score: 0.001,
        }];
        let adjusted = apply_missing_score_penalty(outcomes.clone());
        assert_eq!(adjusted, outcomes);
    }

    #[test]
    fn relative_gain() {
        let o = Outcome {
            case: TestCase::new("a", 200.0),
            score: 150.0,
        };
        assert_eq!(o.delta(), -50.0);
        assert_eq!(o.relative_gain(), -25.0);
    }
}
