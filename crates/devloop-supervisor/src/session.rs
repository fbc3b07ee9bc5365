use tokio::process::Child;

// ─── SessionState ─────────────────────────────────────────────────────────

/// Lifecycle of one supervised run.
///
/// `Idle → Launching → Running → ShuttingDown → Stopped`. Shutdown may begin
/// from any live state (a failed launch tears down partially-started
/// sessions), and `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Launching,
    Running,
    ShuttingDown,
    Stopped,
}

// ─── ManagedProcess ───────────────────────────────────────────────────────

/// Liveness of a single managed child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Running,
    /// The child has exited. `None` means it was killed by a signal.
    Exited(Option<i32>),
}

/// A child service process registered with the session.
pub struct ManagedProcess {
    pub name: String,
    pub(crate) child: Child,
    pub status: ProcessStatus,
}

// ─── Session ──────────────────────────────────────────────────────────────

/// The set of services launched together in one supervisor run.
///
/// Entries are append-only and uniquely named; no entry is added once
/// shutdown has begun. The session is owned by the `Supervisor` for its
/// whole lifetime — there is no shared or global process list.
pub struct Session {
    entries: Vec<ManagedProcess>,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Session {
            entries: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|p| p.name == name)
    }

    pub fn processes(&self) -> &[ManagedProcess] {
        &self.entries
    }

    /// True once shutdown has begun (or completed).
    pub fn is_shutting_down(&self) -> bool {
        matches!(
            self.state,
            SessionState::ShuttingDown | SessionState::Stopped
        )
    }

    pub(crate) fn register(&mut self, process: ManagedProcess) {
        debug_assert!(!self.contains(&process.name));
        debug_assert!(!self.is_shutting_down());
        self.entries.push(process);
        self.state = SessionState::Launching;
    }

    pub(crate) fn mark_running(&mut self) {
        if self.state == SessionState::Launching {
            self.state = SessionState::Running;
        }
    }

    /// Flip the session into `ShuttingDown`. Returns `false` if shutdown
    /// has already begun, so a second interrupt cannot re-enter it.
    pub(crate) fn begin_shutdown(&mut self) -> bool {
        if self.is_shutting_down() {
            return false;
        }
        self.state = SessionState::ShuttingDown;
        true
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.state = SessionState::Stopped;
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ManagedProcess> {
        self.entries.iter_mut()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.is_empty());
        assert!(!session.is_shutting_down());
    }

    #[test]
    fn begin_shutdown_is_one_shot() {
        let mut session = Session::new();
        assert!(session.begin_shutdown());
        assert_eq!(session.state(), SessionState::ShuttingDown);

        // Second request must not re-enter shutdown.
        assert!(!session.begin_shutdown());

        session.mark_stopped();
        assert!(!session.begin_shutdown());
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn mark_running_only_applies_after_launching() {
        let mut session = Session::new();
        // No launches yet — stays idle.
        session.mark_running();
        assert_eq!(session.state(), SessionState::Idle);

        session.begin_shutdown();
        session.mark_running();
        assert_eq!(session.state(), SessionState::ShuttingDown);
    }
}
