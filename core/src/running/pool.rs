use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Context as _;
use tokio::sync::Mutex;

use super::case::TestCase;
use super::executor;
use super::outcome::Outcome;
use crate::config::RunConfig;

/// Progress callback, invoked with a human-readable line at case start/end.
pub type Progress = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Previous run left {0} case(s) in the queue")]
    QueueNotDrained(usize),
}

/// Fixed-size pool of workers draining a shared case queue.
///
/// The queue and the result list are the only state shared between workers;
/// each running case (processes, line buffers) is owned by exactly one
/// worker.
pub struct BenchPool {
    config: Arc<RunConfig>,
    pending: Arc<Mutex<VecDeque<TestCase>>>,
}

impl BenchPool {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config: Arc::new(config),
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Runs every case with `workers` concurrent workers and returns one
    /// outcome per case, in completion order.
    ///
    /// Starting a run while a previous run's queue is still non-empty is a
    /// usage error ([`PoolError::QueueNotDrained`]). A failing case (spawn
    /// error, broken output stream) is recorded as a zero-score outcome and
    /// never aborts the run.
    pub async fn run(
        &self,
        cases: Vec<TestCase>,
        workers: usize,
        progress: Progress,
    ) -> anyhow::Result<Vec<Outcome>> {
        let total = cases.len();
        {
            let mut pending = self.pending.lock().await;
            if !pending.is_empty() {
                return Err(PoolError::QueueNotDrained(pending.len()).into());
            }
            pending.extend(cases);
        }

        let results = Arc::new(Mutex::new(Vec::with_capacity(total)));

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers.max(1) {
            let config = Arc::clone(&self.config);
            let pending = Arc::clone(&self.pending);
            let results = Arc::clone(&results);
            let progress = Arc::clone(&progress);

            handles.push(tokio::spawn(async move {
                loop {
                    let Some(case) = pending.lock().await.pop_front() else {
                        break;
                    };

                    progress(&format!("Case {} has started.", case.name));
                    let outcome = match executor::run_case(&config, &case).await {
                        Ok(outcome) => outcome,
                        Err(e) => {
                            log::warn!("Case '{}' failed: {:#}", case.name, e);
                            Outcome {
                                case: case.clone(),
                                score: 0.0,
                            }
                        }
                    };
                    progress(&format!("Case {} has ended.", case.name));

                    results.lock().await.push(outcome);
                }
            }));
        }

        for handle in handles {
            handle.await.context("Bench worker panicked")?;
        }

        let outcomes = std::mem::take(&mut *results.lock().await);
        debug_assert_eq!(outcomes.len(), total);
        Ok(outcomes)
    }
}
