use std::io;
use std::process::{ExitStatus, Stdio};

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt as _, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

use super::case::TestCase;
use crate::config::ProgramConfig;

/// Line stream over the server's stdout. Ends when the server closes its
/// output (i.e. the process exited); it cannot be restarted.
pub type ServerOutput = Lines<BufReader<ChildStdout>>;

/// Result of a kill request. An already-exited process is a normal outcome
/// of the race between scoring and process exit, not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Killed,
    AlreadyExited,
}

/// The server and client processes of one benchmark case.
///
/// Both are always spawned together, and both must reach a terminal state
/// (via [`ProcessPair::wait`]) before the case counts as finished.
#[derive(Debug)]
pub struct ProcessPair {
    server: Child,
    client: Child,
}

impl ProcessPair {
    pub fn spawn(
        server: &ProgramConfig,
        client: &ProgramConfig,
        case: &TestCase,
    ) -> anyhow::Result<(Self, ServerOutput)> {
        let mut server_proc = build_command(server, &case.server_args)
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn server '{}' for case '{}'",
                    server.executable.to_string_lossy(),
                    case.name
                )
            })?;

        let client_proc = build_command(client, &case.client_args)
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn client '{}' for case '{}'",
                    client.executable.to_string_lossy(),
                    case.name
                )
            })?;

        let stdout = server_proc
            .stdout
            .take()
            .context("Failed to open server stdout")?;
        let output = BufReader::new(stdout).lines();

        let pair = Self {
            server: server_proc,
            client: client_proc,
        };
        Ok((pair, output))
    }

    /// Requests forcible termination of both processes. Safe to call after
    /// either process has already exited.
    pub fn terminate(&mut self) -> anyhow::Result<(Termination, Termination)> {
        let server = request_kill(&mut self.server).context("Failed to kill server process")?;
        let client = request_kill(&mut self.client).context("Failed to kill client process")?;
        Ok((server, client))
    }

    /// Blocks until both processes have exited (or been reaped after a kill).
    pub async fn wait(&mut self) -> anyhow::Result<(ExitStatus, ExitStatus)> {
        tokio::try_join!(self.server.wait(), self.client.wait())
            .context("Failed to wait for process pair")
    }
}

fn build_command(prog: &ProgramConfig, extra_args: &str) -> Command {
    let mut cmd = Command::new(&prog.executable);
    cmd.args(prog.args.split_whitespace())
        .args(extra_args.split_whitespace())
        .current_dir(&prog.workdir)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}

fn request_kill(proc: &mut Child) -> io::Result<Termination> {
    match proc.start_kill() {
        Ok(()) => Ok(Termination::Killed),
        // tokio reports a kill on an already-reaped child as InvalidInput.
        Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(Termination::AlreadyExited),
        Err(e) => Err(e),
    }
}
