use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crate::config::AppConfig;
use crate::models::day::Day;
use crate::models::grid::TimeGrid;
use crate::services::schedule::indexer::GridIndex;
use crate::services::schedule::store::BlockStore;
use crate::services::session::{SessionBootstrap, SessionError, SessionProvider};
use crate::services::sync::{Snapshot, SyncAdapter, SyncError, WriteIntent};

/// Everything the frame loop reads and the snapshot handler writes: the
/// selected day, the block store and its index, the sync adapter, and the
/// session mode. Owned by the app; components borrow what they need instead
/// of reaching for ambient state.
pub struct AppContext {
    config: AppConfig,
    grid: TimeGrid,
    adapter: Box<dyn SyncAdapter>,
    snapshots: Receiver<Snapshot>,
    store: BlockStore,
    index: GridIndex,
    day: Day,
    /// None until the first snapshot lands.
    from_cache: Option<bool>,
    bootstrap: Option<SessionBootstrap>,
    read_only: bool,
}

/// Session mode transitions the app should announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Writable,
    ReadOnly(SessionError),
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        mut adapter: Box<dyn SyncAdapter>,
        provider: impl SessionProvider,
    ) -> Self {
        let grid = config.grid();
        let day = *config
            .days
            .iter()
            .find(|d| **d == Day::today())
            .unwrap_or(&config.days[0]);
        let snapshots = adapter.subscribe(day);
        let timeout = Duration::from_millis(config.session_timeout_ms);

        Self {
            config,
            grid,
            adapter,
            snapshots,
            store: BlockStore::new(),
            index: GridIndex::default(),
            day,
            from_cache: None,
            bootstrap: Some(SessionBootstrap::begin(provider, timeout)),
            // Read-only until the bootstrap resolves writable
            read_only: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Connection status for the status bar, mirroring the last snapshot's
    /// cache flag.
    pub fn status_text(&self) -> String {
        let source = match self.from_cache {
            None => return "connecting…".to_string(),
            Some(true) => "cache",
            Some(false) => "server",
        };
        if self.read_only {
            format!("read-only ({})", source)
        } else {
            format!("connected ({})", source)
        }
    }

    /// Switch the subscription to another day. The store empties until that
    /// day's first snapshot arrives; nothing is carried over.
    pub fn select_day(&mut self, day: Day) {
        if day == self.day {
            return;
        }
        log::info!("Switching schedule day to {}", day);
        self.day = day;
        self.snapshots = self.adapter.subscribe(day);
        self.store.replace_all(Vec::new());
        self.index = GridIndex::build(&self.store, &self.grid, day);
        self.from_cache = None;
    }

    /// Drain inbound snapshots, applying each as a wholesale replacement.
    /// This is the single `replace_all` call site. Returns true when the
    /// store changed this frame.
    pub fn poll_snapshots(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.snapshots.try_recv() {
                Ok(snapshot) => {
                    log::info!(
                        "Applying snapshot: {} block(s), from_cache={}",
                        snapshot.blocks.len(),
                        snapshot.from_cache
                    );
                    self.from_cache = Some(snapshot.from_cache);
                    self.store.replace_all(snapshot.blocks);
                    self.index = GridIndex::build(&self.store, &self.grid, self.day);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Poll the session bootstrap once per frame until it resolves.
    pub fn poll_session(&mut self) -> Option<SessionEvent> {
        let bootstrap = self.bootstrap.as_mut()?;
        let result = bootstrap.poll()?.clone();
        self.bootstrap = None;
        match result {
            Ok(()) => {
                self.read_only = false;
                log::info!("Writable session established");
                Some(SessionEvent::Writable)
            }
            Err(error) => {
                self.read_only = true;
                log::warn!("Running read-only: {}", error);
                Some(SessionEvent::ReadOnly(error))
            }
        }
    }

    /// Forward a validated intent to the store. Local state is untouched
    /// either way; the next snapshot carries the result.
    pub fn apply_intent(&mut self, intent: WriteIntent) -> Result<(), SyncError> {
        if self.read_only {
            return Err(SyncError::PermissionDenied);
        }
        self.adapter.apply(intent)
    }
}
