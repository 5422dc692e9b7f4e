pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::path::Path;

use colored::Colorize as _;
use error::*;
use tokio::process::Command;

use crate::config::Config;
use crate::running::{apply_missing_score_penalty, BenchPool, Outcome, Progress};
use crate::style;

/// Runs every configured case on a pool of `workers` workers and applies
/// the missing-score penalty pass to the collected outcomes.
pub async fn run_benchmark(
    cfg: &Config,
    workers: usize,
    progress: Progress,
) -> Result<Vec<Outcome>> {
    ensure!(!cfg.cases.is_empty(), "No [[case]] entries configured");
    ensure!(workers >= 1, "Worker count must be at least 1");

    log::info!(
        "Running {} case(s) with {} worker(s)",
        cfg.cases.len(),
        workers
    );

    let pool = BenchPool::new(cfg.run.clone());
    let outcomes = pool.run(cfg.cases.clone(), workers, progress).await?;
    Ok(apply_missing_score_penalty(outcomes))
}

/// Best-effort cleanup of server/client processes left over from an earlier
/// run. Failures (no such process, no killall on this system) are not
/// surfaced.
pub async fn sweep_stray_processes(names: &[String]) {
    if names.is_empty() {
        return;
    }
    log::info!("Sweeping stray processes: {}", names.join(", "));

    match Command::new("killall").arg("-9").args(names).status().await {
        Ok(status) => log::debug!("killall exited with {}", status),
        Err(e) => log::debug!("Could not run killall: {}", e),
    }
}

pub fn init_bench_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create dir {:?}", dir))?;

    let filepath = dir.join(Config::FILENAME);
    ensure!(
        !filepath.exists(),
        "'{}' already exists",
        filepath.to_string_lossy()
    );

    std::fs::write(&filepath, Config::example_toml())
        .with_context(|| format!("Cannot write config file {:?}", filepath))
}

/// Per-case lines plus the totals block: score, delta to the reference
/// score, relative percentage.
pub fn print_report(outcomes: &[Outcome]) {
    let bar = "-".repeat(26);
    println!("{}", bar);

    let mut total_score = 0.0;
    let mut mean_gain = 0.0;

    for outcome in outcomes {
        let gain = outcome.relative_gain();
        let line = format!(
            "Case {}: {:.2} ref {:+.2} ({:+.1}%)",
            outcome.case.name,
            outcome.score,
            outcome.delta(),
            gain,
        );
        println!("{}", line.color(style::gain_color(gain)));

        total_score += outcome.score;
        mean_gain += gain;
    }

    if !outcomes.is_empty() {
        let n = outcomes.len() as f64;
        println!("Total score: {:.2}", total_score);
        println!("Mean score: {:.2}", total_score / n);
        println!("Mean ref: {:+.1}%", mean_gain / n);
    }
    println!("{}", bar);
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::*;
    use crate::config::{ProgramConfig, RunConfig, ScoringConfig, SweepConfig};
    use crate::running::{TestCase, MISSING_SCORE_PENALTY};

    fn printf_config(cases: Vec<TestCase>) -> Config {
        Config {
            source_config_file: None,
            run: RunConfig {
                server: ProgramConfig {
                    executable: "printf".into(),
                    args: String::new(),
                    workdir: ".".into(),
                },
                client: ProgramConfig {
                    executable: "true".into(),
                    args: String::new(),
                    workdir: ".".into(),
                },
                scoring: ScoringConfig {
                    confirmation_line: "ready".to_owned(),
                    score_pattern: "Score: # pts".to_owned(),
                    timeout_secs: None,
                },
            },
            sweep: SweepConfig::default(),
            cases,
        }
    }

    #[tokio::test]
    async fn scoreless_case_gets_the_penalty_after_the_run() {
        let scored = TestCase {
            server_args: r"ready\nScore:55.5pts\n".to_owned(),
            ..TestCase::new("scored", 100.0)
        };
        let scoreless = TestCase {
            server_args: r"ready\nnothing\n".to_owned(),
            ..TestCase::new("scoreless", 100.0)
        };

        let cfg = printf_config(vec![scored, scoreless]);
        let mut outcomes = run_benchmark(&cfg, 2, Arc::new(|_: &str| {}))
            .await
            .unwrap();
        outcomes.sort_by(|a, b| a.case.name.cmp(&b.case.name));

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].case.name, "scored");
        assert_eq!(outcomes[0].score, 55.5);
        assert_eq!(outcomes[1].case.name, "scoreless");
        assert_eq!(outcomes[1].score, 100.0 * MISSING_SCORE_PENALTY);
    }

    #[tokio::test]
    async fn benchmark_without_cases_is_rejected() {
        let cfg = printf_config(vec![]);
        assert!(run_benchmark(&cfg, 1, Arc::new(|_: &str| {})).await.is_err());
    }

    #[tokio::test]
    async fn sweep_with_no_names_is_a_noop() {
        sweep_stray_processes(&[]).await;
    }
}
