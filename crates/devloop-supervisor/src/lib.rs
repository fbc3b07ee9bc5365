//! `devloop-supervisor` — process supervision for local dev sessions.
//!
//! Launches a configurable set of named long-running service processes
//! (a frontend dev server, a backend server), keeps the foreground free for
//! the operator, and guarantees that stopping or crashing any one service
//! brings the whole session down in bounded time.
//!
//! # Architecture
//!
//! ```text
//! ServiceSpec {name, command, dir}
//!     │  launch()
//!     ▼
//! Session          ← append-only registry of ManagedProcess, unique names,
//!     │              single shutdown flag; owned by the Supervisor
//!     ▼
//! Supervisor       ← poll loop (try_wait) + SIGINT/SIGTERM handling;
//!                    one SIGTERM per child on shutdown, one grace wait,
//!                    no forceful kill
//! ```
//!
//! A crashed child is fatal to the whole session: the managed services are
//! assumed to depend on each other, so nothing is restarted.

pub mod error;
pub mod session;
pub mod supervisor;

pub use error::{Result, SupervisorError};
pub use session::{ManagedProcess, ProcessStatus, Session, SessionState};
pub use supervisor::{ServiceSpec, Supervisor, DEFAULT_GRACE_PERIOD, DEFAULT_POLL_INTERVAL};
