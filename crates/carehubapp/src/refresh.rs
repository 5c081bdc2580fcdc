//! # Periodic Refresh
//!
//! Lead views reload themselves while open. All of them share one
//! [`Scheduler`] thread instead of owning a timer each:
//!
//! - [`Scheduler::every`] registers a job and returns a [`JobHandle`]; the job
//!   stops when the handle is cancelled or dropped.
//! - A job may carry a change probe (see [`RevisionProbe`]) which is checked
//!   on every tick; a detected change runs the job early.
//! - [`ViewGuard`] hands out tickets so a result that arrives after a newer
//!   request was started (or after the view closed) is discarded.
//!
//! | View | Interval | Also runs on |
//! |------|----------|--------------|
//! | tours | 10 s | |
//! | enquiries | 10 s | |
//! | applications | 5 s | lead log writes |
//!
//! Jobs run on the scheduler thread, one at a time. A job must not block on
//! the scheduler itself.

use crate::error::{CareError, Result};
use crate::store::{AppendLog, LogKey};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How often change probes are checked.
pub const DEFAULT_TICK: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshView {
    Tours,
    Enquiries,
    Applications,
}

impl RefreshView {
    pub fn interval(&self) -> Duration {
        match self {
            RefreshView::Tours | RefreshView::Enquiries => Duration::from_secs(10),
            RefreshView::Applications => Duration::from_secs(5),
        }
    }

    /// The lead log key whose writes should trigger an early refresh.
    pub fn watched_key(&self) -> Option<LogKey> {
        match self {
            RefreshView::Applications => Some(LogKey::CareerApplications),
            RefreshView::Tours | RefreshView::Enquiries => None,
        }
    }
}

impl FromStr for RefreshView {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tours" => Ok(RefreshView::Tours),
            "enquiries" => Ok(RefreshView::Enquiries),
            "applications" => Ok(RefreshView::Applications),
            other => Err(CareError::validation(format!("Unknown view: {}", other))),
        }
    }
}

impl fmt::Display for RefreshView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefreshView::Tours => "tours",
            RefreshView::Enquiries => "enquiries",
            RefreshView::Applications => "applications",
        };
        f.write_str(name)
    }
}

type Task = Box<dyn FnMut() + Send>;
type Probe = Box<dyn FnMut() -> bool + Send>;

struct Job {
    interval: Duration,
    next_due: Instant,
    task: Task,
    probe: Option<Probe>,
    active: Arc<AtomicBool>,
}

struct Shared {
    jobs: Mutex<Vec<Job>>,
    wake: Condvar,
    shutdown: AtomicBool,
    live: Arc<AtomicUsize>,
    tick: Duration,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Vec<Job>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cancels its job when cancelled or dropped.
#[derive(Debug)]
pub struct JobHandle {
    active: Arc<AtomicBool>,
    live: Arc<AtomicUsize>,
}

impl JobHandle {
    pub fn cancel(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The shared refresh thread.
pub struct Scheduler {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new() -> Result<Self> {
        Self::with_tick(DEFAULT_TICK)
    }

    pub fn with_tick(tick: Duration) -> Result<Self> {
        let shared = Arc::new(Shared {
            jobs: Mutex::new(Vec::new()),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            live: Arc::new(AtomicUsize::new(0)),
            tick,
        });
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("carehub-refresh".to_string())
            .spawn(move || run(worker_shared))?;
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Runs `task` now and then every `interval`.
    pub fn every<F>(&self, interval: Duration, task: F) -> JobHandle
    where
        F: FnMut() + Send + 'static,
    {
        self.register(interval, None, Box::new(task))
    }

    /// Like [`Scheduler::every`], but also runs `task` whenever `changed`
    /// returns true on a tick.
    pub fn every_or_when<F, C>(&self, interval: Duration, changed: C, task: F) -> JobHandle
    where
        F: FnMut() + Send + 'static,
        C: FnMut() -> bool + Send + 'static,
    {
        self.register(interval, Some(Box::new(changed)), Box::new(task))
    }

    /// Registers the refresh job for `view`, watching `log` for writes when
    /// the view asks for it.
    pub fn watch_view<L, F>(&self, view: RefreshView, log: L, task: F) -> JobHandle
    where
        L: AppendLog + Send + 'static,
        F: FnMut() + Send + 'static,
    {
        match view.watched_key() {
            Some(key) => {
                let mut probe = RevisionProbe::new(log, key);
                self.every_or_when(view.interval(), move || probe.changed(), task)
            }
            None => self.every(view.interval(), task),
        }
    }

    /// Number of jobs not yet cancelled.
    pub fn active_jobs(&self) -> usize {
        self.shared.live.load(Ordering::SeqCst)
    }

    fn register(&self, interval: Duration, probe: Option<Probe>, task: Task) -> JobHandle {
        let active = Arc::new(AtomicBool::new(true));
        self.shared.lock().push(Job {
            interval,
            next_due: Instant::now(),
            task,
            probe,
            active: Arc::clone(&active),
        });
        self.shared.live.fetch_add(1, Ordering::SeqCst);
        self.shared.wake.notify_all();
        JobHandle {
            active,
            live: Arc::clone(&self.shared.live),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shared.shutdown.store(true, Ordering::SeqCst);
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run(shared: Arc<Shared>) {
    loop {
        if shared.shutdown.load(Ordering::SeqCst) {
            return;
        }

        // Jobs run without the lock held so they can register or cancel.
        let mut batch = std::mem::take(&mut *shared.lock());
        batch.retain(|job| job.active.load(Ordering::SeqCst));

        for job in batch.iter_mut() {
            let changed = job.probe.as_mut().is_some_and(|probe| probe());
            if !changed && Instant::now() < job.next_due {
                continue;
            }
            if job.active.load(Ordering::SeqCst) {
                (job.task)();
                job.next_due = Instant::now() + job.interval;
            }
        }

        let mut jobs = shared.lock();
        let registered = std::mem::take(&mut *jobs);
        batch.extend(registered);
        *jobs = batch;

        if shared.shutdown.load(Ordering::SeqCst) {
            return;
        }

        let now = Instant::now();
        let wait = jobs
            .iter()
            .map(|job| job.next_due.saturating_duration_since(now))
            .min()
            .unwrap_or(shared.tick)
            .min(shared.tick);
        if wait.is_zero() {
            continue;
        }
        let _ = shared
            .wake
            .wait_timeout(jobs, wait)
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Detects writes to one lead log key by watching its revision.
pub struct RevisionProbe<L: AppendLog> {
    log: L,
    key: LogKey,
    last: Option<u64>,
}

impl<L: AppendLog> RevisionProbe<L> {
    pub fn new(log: L, key: LogKey) -> Self {
        let last = log.revision(key).ok();
        Self { log, key, last }
    }

    /// True when the revision differs from the one last seen.
    pub fn changed(&mut self) -> bool {
        match self.log.revision(self.key) {
            Ok(current) if Some(current) != self.last => {
                self.last = Some(current);
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(key = %self.key, error = %e, "revision check failed");
                false
            }
        }
    }
}

/// Identifies one fetch started through a [`ViewGuard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Discards results from superseded fetches.
///
/// Each fetch takes a ticket with [`ViewGuard::begin`]; starting a newer fetch
/// or calling [`ViewGuard::invalidate`] (the view closed) makes older tickets
/// stale.
#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    generation: Arc<AtomicU64>,
}

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` if `ticket` is still current.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(ticket = ticket.0, "discarding stale refresh result");
            None
        }
    }
}
