//! Writable-session acquisition.
//!
//! The grid must stay readable even when write capability cannot be
//! established, so bootstrap runs off-thread and is polled with a deadline.
//! Timeout or failure degrades the app to read-only; it never blocks the UI.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session bootstrap timed out after {0:?}")]
    Timeout(Duration),
    #[error("session unavailable: {0}")]
    Unavailable(String),
}

/// The identity collaborator: yields a write-capable session or an error.
/// Implementations may block; they are always driven from a worker thread.
pub trait SessionProvider: Send + 'static {
    fn ensure_writable(&mut self) -> Result<(), SessionError>;
}

/// A provider that always succeeds immediately. Pairs with
/// [`crate::services::sync::LocalSyncAdapter`].
pub struct LocalSession;

impl SessionProvider for LocalSession {
    fn ensure_writable(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

/// Poll-state of an in-flight bootstrap.
#[derive(Debug)]
enum BootstrapState {
    Pending(Receiver<Result<(), SessionError>>),
    Resolved(Result<(), SessionError>),
}

/// Runs a [`SessionProvider`] on a worker thread and exposes a non-blocking
/// poll with a deadline. Once the deadline passes, the result is
/// `Err(Timeout)` regardless of what the provider later reports.
pub struct SessionBootstrap {
    state: BootstrapState,
    deadline: Instant,
    timeout: Duration,
}

impl SessionBootstrap {
    pub fn begin<P: SessionProvider>(mut provider: P, timeout: Duration) -> Self {
        let (tx, rx) = channel();
        thread::spawn(move || {
            // The receiver may be gone if the app resolved via timeout first.
            let _ = tx.send(provider.ensure_writable());
        });
        Self {
            state: BootstrapState::Pending(rx),
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    /// Non-blocking poll. Returns `None` while still pending, then the final
    /// result on every subsequent call.
    pub fn poll(&mut self) -> Option<&Result<(), SessionError>> {
        if let BootstrapState::Pending(rx) = &self.state {
            match rx.try_recv() {
                Ok(result) => {
                    self.state = BootstrapState::Resolved(result);
                }
                Err(TryRecvError::Empty) => {
                    if Instant::now() >= self.deadline {
                        self.state =
                            BootstrapState::Resolved(Err(SessionError::Timeout(self.timeout)));
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    self.state = BootstrapState::Resolved(Err(SessionError::Unavailable(
                        "session provider dropped without answering".to_string(),
                    )));
                }
            }
        }

        match &self.state {
            BootstrapState::Resolved(result) => Some(result),
            BootstrapState::Pending(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowProvider(Duration);

    impl SessionProvider for SlowProvider {
        fn ensure_writable(&mut self) -> Result<(), SessionError> {
            thread::sleep(self.0);
            Ok(())
        }
    }

    struct FailingProvider;

    impl SessionProvider for FailingProvider {
        fn ensure_writable(&mut self) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("no anonymous auth".to_string()))
        }
    }

    fn poll_until_resolved(bootstrap: &mut SessionBootstrap) -> Result<(), SessionError> {
        loop {
            if let Some(result) = bootstrap.poll() {
                return result.clone();
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_local_session_resolves_writable() {
        let mut bootstrap = SessionBootstrap::begin(LocalSession, Duration::from_secs(1));
        assert_eq!(poll_until_resolved(&mut bootstrap), Ok(()));
    }

    #[test]
    fn test_failure_degrades_to_read_only() {
        let mut bootstrap = SessionBootstrap::begin(FailingProvider, Duration::from_secs(1));
        assert!(matches!(
            poll_until_resolved(&mut bootstrap),
            Err(SessionError::Unavailable(_))
        ));
    }

    #[test]
    fn test_slow_provider_times_out() {
        let mut bootstrap = SessionBootstrap::begin(
            SlowProvider(Duration::from_secs(5)),
            Duration::from_millis(30),
        );
        assert!(matches!(
            poll_until_resolved(&mut bootstrap),
            Err(SessionError::Timeout(_))
        ));
    }

    #[test]
    fn test_result_is_sticky() {
        let mut bootstrap = SessionBootstrap::begin(LocalSession, Duration::from_secs(1));
        let first = poll_until_resolved(&mut bootstrap);
        let second = bootstrap.poll().cloned().unwrap();
        assert_eq!(first, second);
    }
}
