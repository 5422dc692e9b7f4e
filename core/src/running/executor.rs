use std::time::Duration;

use super::case::TestCase;
use super::outcome::Outcome;
use super::pair::{ProcessPair, ServerOutput};
use crate::config::{RunConfig, ScoringConfig};
use crate::scoring::extract_score;

/// Runs a single case to completion: spawn the pair, watch the server's
/// stdout for a score, tear both processes down, emit the outcome.
///
/// A server that never emits a matching line (stream end, or timeout when
/// one is configured) yields score 0.0; the penalty pass turns that into
/// `reference_score * MISSING_SCORE_PENALTY` later.
pub async fn run_case(config: &RunConfig, case: &TestCase) -> anyhow::Result<Outcome> {
    let (mut pair, mut output) = ProcessPair::spawn(&config.server, &config.client, case)?;

    let score = match config.scoring.timeout() {
        Some(limit) => monitor_with_timeout(&mut output, &config.scoring, case, limit).await?,
        None => monitor(&mut output, &config.scoring, case).await?,
    };

    pair.terminate()?;
    pair.wait().await?;

    Ok(Outcome {
        case: case.clone(),
        score: score.unwrap_or(0.0),
    })
}

async fn monitor_with_timeout(
    output: &mut ServerOutput,
    scoring: &ScoringConfig,
    case: &TestCase,
    limit: Duration,
) -> anyhow::Result<Option<f64>> {
    match tokio::time::timeout(limit, monitor(output, scoring, case)).await {
        Ok(res) => res,
        Err(_) => {
            log::warn!(
                "Case '{}' produced no score within {}s",
                case.name,
                limit.as_secs()
            );
            Ok(None)
        }
    }
}

/// Reads server output line by line until a score shows up or the stream
/// ends. The confirmation line only flips the released flag; it does not
/// stop monitoring.
async fn monitor(
    output: &mut ServerOutput,
    scoring: &ScoringConfig,
    case: &TestCase,
) -> anyhow::Result<Option<f64>> {
    let mut released = false;

    while let Some(line) = output.next_line().await? {
        if !released && line == scoring.confirmation_line {
            released = true;
            log::debug!("Case '{}': server confirmed startup", case.name);
        }

        if let Some(score) = extract_score(&scoring.score_pattern, &line) {
            log::debug!("Case '{}': scored {}", case.name, score);
            return Ok(Some(score));
        }
    }

    log::debug!("Case '{}': server output ended without a score", case.name);
    Ok(None)
}
