use std::path::PathBuf;
use std::sync::Arc;

use tandem_core::running::Progress;
use tandem_core::{action, Config};

use crate::util;

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Number of concurrent workers.
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,

    /// Explicit config file path (default: find tandem.toml in ancestors).
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Skip killing stray server/client processes before the run.
    #[arg(long)]
    pub no_sweep: bool,
}

pub async fn exec(args: &Args, _global_args: &GlobalArgs) -> SubcmdResult {
    let cfg = match &args.config {
        Some(path) => Config::from_toml_file(path.clone())?,
        None => Config::from_file_finding_in_ancestors(util::current_dir())?,
    };
    log::debug!("Loaded config from {:?}", cfg.source_config_file);

    if !args.no_sweep {
        action::sweep_stray_processes(&cfg.sweep.kill).await;
    }

    let progress: Progress = Arc::new(|msg: &str| println!("{}", msg));
    let outcomes = action::run_benchmark(&cfg, args.jobs, progress).await?;

    println!("{}", outcomes.len());
    action::print_report(&outcomes);
    Ok(())
}
