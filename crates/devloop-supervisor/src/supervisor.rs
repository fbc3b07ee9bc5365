use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::session::{ManagedProcess, ProcessStatus, Session};
use crate::{Result, SupervisorError};

/// Interval between liveness polls over the registered children.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Time given to children after a termination request before the session
/// is considered stopped.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(1);

// ─── ServiceSpec ──────────────────────────────────────────────────────────

/// What to start: a named shell command rooted at a working directory.
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    pub name: String,
    pub command: String,
    pub dir: PathBuf,
}

// ─── Supervisor ───────────────────────────────────────────────────────────

/// Runs named long-running service processes concurrently and guarantees
/// that stopping or crashing any one of them brings the whole session down
/// in bounded time.
///
/// The supervisor owns its [`Session`] outright: children are registered
/// during the launch phase, polled by [`monitor`](Supervisor::monitor), and
/// torn down by [`shutdown_all`](Supervisor::shutdown_all). A crashed child
/// is fatal to the session — the services are assumed to depend on each
/// other, so nothing is restarted.
pub struct Supervisor {
    session: Session,
    poll_interval: Duration,
    grace_period: Duration,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::with_timing(DEFAULT_POLL_INTERVAL, DEFAULT_GRACE_PERIOD)
    }

    /// Override the poll interval and shutdown grace period.
    pub fn with_timing(poll_interval: Duration, grace_period: Duration) -> Self {
        Supervisor {
            session: Session::new(),
            poll_interval,
            grace_period,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start `spec.command` as a child process rooted at `spec.dir` and
    /// register it in the session.
    ///
    /// The command runs through `sh -c`, so the same strings an operator
    /// would type (`npm run dev`) work unchanged.
    ///
    /// # Errors
    ///
    /// `DuplicateName` if a service with this name is already registered,
    /// `Launch` if the working directory does not exist, the OS spawn call
    /// fails, or shutdown has already begun. The session is unchanged on
    /// every error path.
    pub fn launch(&mut self, spec: &ServiceSpec) -> Result<()> {
        if self.session.is_shutting_down() {
            return Err(SupervisorError::Launch {
                name: spec.name.clone(),
                reason: "session is shutting down".into(),
            });
        }
        if self.session.contains(&spec.name) {
            return Err(SupervisorError::DuplicateName(spec.name.clone()));
        }
        if !spec.dir.is_dir() {
            return Err(SupervisorError::Launch {
                name: spec.name.clone(),
                reason: format!("working directory does not exist: {}", spec.dir.display()),
            });
        }

        let child = Command::new("sh")
            .arg("-c")
            .arg(&spec.command)
            .current_dir(&spec.dir)
            .spawn()
            .map_err(|e| SupervisorError::Launch {
                name: spec.name.clone(),
                reason: e.to_string(),
            })?;

        info!(
            name = %spec.name,
            pid = child.id().unwrap_or(0),
            dir = %spec.dir.display(),
            "service started"
        );

        self.session.register(ManagedProcess {
            name: spec.name.clone(),
            child,
            status: ProcessStatus::Running,
        });
        Ok(())
    }

    /// Watch the session until a child dies or the operator interrupts.
    ///
    /// Polls every `poll_interval` for exited children. The first child
    /// found exited while the session is running is an unexpected
    /// termination: everything else is shut down and
    /// `UnexpectedExit { name, exit_code }` is returned (the caller exits
    /// non-zero). On SIGINT or SIGTERM the session is shut down exactly
    /// once and `Ok(())` is returned (the caller exits 0).
    pub async fn monitor(&mut self) -> Result<()> {
        self.monitor_with(interrupt_signal()).await
    }

    /// Monitor loop with an injectable interrupt future, so tests can
    /// drive the signal path without delivering real signals.
    pub(crate) async fn monitor_with<F>(&mut self, interrupt: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(interrupt);
        self.session.mark_running();

        loop {
            tokio::select! {
                () = &mut interrupt => {
                    info!("interrupt received, stopping all services");
                    self.shutdown_all().await;
                    return Ok(());
                }
                () = sleep(self.poll_interval) => {
                    if let Some((name, exit_code)) = self.poll_exited() {
                        warn!(name = %name, "service exited unexpectedly");
                        self.shutdown_all().await;
                        return Err(SupervisorError::UnexpectedExit { name, exit_code });
                    }
                }
            }
        }
    }

    /// Stop every still-running service: one termination request each,
    /// then a single grace-period wait. Children that ignore the request
    /// are left running — there is no escalation to a forceful kill.
    ///
    /// Idempotent: the first call flips the session into `ShuttingDown`;
    /// later calls return immediately without signalling anything again.
    pub async fn shutdown_all(&mut self) {
        if !self.session.begin_shutdown() {
            return;
        }

        for process in self.session.iter_mut() {
            if process.status != ProcessStatus::Running {
                continue;
            }
            info!(name = %process.name, "sending termination request");
            terminate(&process.name, &mut process.child);
        }

        sleep(self.grace_period).await;

        // Reap what exited within the grace window; anything still alive
        // stays alive, and the session is considered stopped regardless.
        for process in self.session.iter_mut() {
            if process.status != ProcessStatus::Running {
                continue;
            }
            match process.child.try_wait() {
                Ok(Some(status)) => {
                    process.status = ProcessStatus::Exited(status.code());
                }
                Ok(None) => {
                    warn!(
                        name = %process.name,
                        "service did not exit within the grace period, leaving it running"
                    );
                }
                Err(err) => {
                    warn!(name = %process.name, %err, "failed to reap service");
                }
            }
        }

        self.session.mark_stopped();
    }

    /// Find the first running child that has exited, record its status,
    /// and return its name and exit code.
    fn poll_exited(&mut self) -> Option<(String, Option<i32>)> {
        for process in self.session.iter_mut() {
            if process.status != ProcessStatus::Running {
                continue;
            }
            match process.child.try_wait() {
                Ok(Some(status)) => {
                    let code = status.code();
                    process.status = ProcessStatus::Exited(code);
                    return Some((process.name.clone(), code));
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(name = %process.name, %err, "failed to poll service status");
                }
            }
        }
        None
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Signals ──────────────────────────────────────────────────────────────

/// Resolve when the operator asks the session to stop: SIGINT (ctrl-c) or,
/// on unix, SIGTERM.
async fn interrupt_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
    }
}

/// Ask one child to terminate gracefully (SIGTERM on unix).
fn terminate(name: &str, child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            #[allow(clippy::cast_possible_wrap)]
            if let Err(err) = kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
                warn!(name, %err, "failed to signal service");
            }
            return;
        }
    }

    // Already reaped, or no SIGTERM on this platform.
    if let Err(err) = child.start_kill() {
        warn!(name, %err, "failed to kill service");
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
