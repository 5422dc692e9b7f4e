use std::path::PathBuf;

use tandem_core::{action, print_success};

use super::{GlobalArgs, SubcmdResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[arg(default_value = "./")]
    dir: PathBuf,
}

pub fn exec(args: &Args, _: &GlobalArgs) -> SubcmdResult {
    action::init_bench_dir(&args.dir)?;
    print_success!(
        "Successfully created {} (path: {})",
        tandem_core::Config::FILENAME,
        args.dir.to_string_lossy()
    );
    Ok(())
}
