//! Background-thread scheduler for `std` targets.
//!
//! A [`ThreadScheduler`] owns one thread that sleeps until the earliest
//! pending invocation is due and runs callbacks one at a time. Each blinker
//! gets its own [`Task`] handle; a task has at most one pending invocation.
//!
//! [`default_scheduler`] returns a process-wide instance whose thread is
//! spawned on first use and runs for the rest of the process.

use crate::blinker::Blinker;
use crate::led::Led;
use crate::scheduler::{Priority, Scheduler};
use crate::time::{STD_CLOCK, StdClock, StdDuration, StdInstant};
use crate::value::Value;
use core::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError, Weak};
use std::thread;
use std::time::Instant;

/// Settings for the scheduler thread.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Name given to the scheduler thread.
    pub thread_name: String,
    /// Stack size of the scheduler thread, in bytes.
    pub stack_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            thread_name: String::from("blinker"),
            stack_size: 16 * 1024,
        }
    }
}

/// Errors that can occur when starting a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler thread could not be spawned.
    Spawn(std::io::ErrorKind),
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::Spawn(kind) => {
                write!(f, "failed to spawn scheduler thread: {}", kind)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

type Callback = Box<dyn Fn() + Send + Sync>;

struct TaskEntry {
    scheduled: AtomicBool,
    callback: Callback,
}

struct Pending {
    due: Instant,
    priority: Priority,
    seq: u64,
    task: Arc<TaskEntry>,
}

#[derive(Default)]
struct Queue {
    pending: Vec<Pending>,
    next_seq: u64,
}

impl Queue {
    fn remove(&mut self, task: &Arc<TaskEntry>) {
        self.pending.retain(|p| !Arc::ptr_eq(&p.task, task));
    }

    /// Index of the invocation to run next. Among invocations already due the
    /// highest priority wins; otherwise the earliest deadline. Ties go to the
    /// first request.
    fn next_index(&self, now: Instant) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let (a_due, b_due) = (a.due <= now, b.due <= now);
                b_due
                    .cmp(&a_due)
                    .then_with(|| {
                        if a_due && b_due {
                            b.priority.cmp(&a.priority)
                        } else {
                            Ordering::Equal
                        }
                    })
                    .then(a.due.cmp(&b.due))
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|(index, _)| index)
    }
}

struct Shared {
    queue: Mutex<Queue>,
    wakeup: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn run(&self) {
        let mut queue = self.lock();
        loop {
            let now = Instant::now();
            let next = queue.next_index(now).map(|index| (index, queue.pending[index].due));
            queue = match next {
                Some((index, due)) if due <= now => {
                    let task = queue.pending.swap_remove(index).task;
                    task.scheduled.store(false, atomic::Ordering::Release);
                    drop(queue);
                    (task.callback)();
                    self.lock()
                }
                Some((_, due)) => {
                    self.wakeup
                        .wait_timeout(queue, due - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self.wakeup.wait(queue).unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}

/// Runs scheduled callbacks on a dedicated thread.
///
/// Cloning yields another handle to the same thread.
#[derive(Clone)]
pub struct ThreadScheduler {
    shared: Arc<Shared>,
}

impl ThreadScheduler {
    /// Spawns the scheduler thread.
    ///
    /// The thread runs for the rest of the process.
    pub fn spawn(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue::default()),
            wakeup: Condvar::new(),
        });

        let worker = Arc::clone(&shared);
        thread::Builder::new()
            .name(config.thread_name)
            .stack_size(config.stack_size)
            .spawn(move || worker.run())
            .map_err(|err| SchedulerError::Spawn(err.kind()))?;

        Ok(Self { shared })
    }

    /// Registers a callback and returns the handle that schedules it.
    pub fn task(&self, callback: impl Fn() + Send + Sync + 'static) -> Task {
        Task {
            entry: Arc::new(TaskEntry {
                scheduled: AtomicBool::new(false),
                callback: Box::new(callback),
            }),
            shared: Arc::clone(&self.shared),
        }
    }

    /// Returns the number of pending invocations across all tasks.
    pub fn pending_count(&self) -> usize {
        self.shared.lock().pending.len()
    }
}

/// Returns the process-wide scheduler, spawning its thread on first use.
///
/// # Panics
/// Panics if the scheduler thread cannot be spawned.
pub fn default_scheduler() -> &'static ThreadScheduler {
    static DEFAULT: OnceLock<ThreadScheduler> = OnceLock::new();
    DEFAULT.get_or_init(|| match ThreadScheduler::spawn(SchedulerConfig::default()) {
        Ok(scheduler) => scheduler,
        Err(err) => panic!("{}", err),
    })
}

/// Handle scheduling one callback on a [`ThreadScheduler`].
///
/// A new request on a task that already has a pending invocation replaces
/// it, so at most one invocation per task is ever queued. Dropping the task
/// discards its pending invocation.
pub struct Task {
    entry: Arc<TaskEntry>,
    shared: Arc<Shared>,
}

impl Task {
    fn schedule_at(&self, due: Instant, priority: Priority) {
        let mut queue = self.shared.lock();
        if self.entry.scheduled.swap(true, atomic::Ordering::AcqRel) {
            queue.remove(&self.entry);
        }
        let seq = queue.next_seq;
        queue.next_seq += 1;
        queue.pending.push(Pending {
            due,
            priority,
            seq,
            task: Arc::clone(&self.entry),
        });
        drop(queue);
        self.shared.wakeup.notify_one();
    }
}

impl Scheduler<StdDuration> for Task {
    fn is_scheduled(&self) -> bool {
        self.entry.scheduled.load(atomic::Ordering::Acquire)
    }

    fn schedule_now(&self, priority: Priority) {
        self.schedule_at(Instant::now(), priority);
    }

    fn schedule_after(&self, delay: StdDuration, priority: Priority) {
        self.schedule_at(Instant::now() + delay.0, priority);
    }
}

impl Drop for Task {
    fn drop(&mut self) {
        let mut queue = self.shared.lock();
        queue.remove(&self.entry);
        self.entry.scheduled.store(false, atomic::Ordering::Release);
    }
}

/// A blinker driven by a [`ThreadScheduler`] and the `std` clock.
pub type StdBlinker<V, L, const N: usize> = Blinker<'static, V, StdInstant, L, Task, StdClock, N>;

impl<V, L, const N: usize> Blinker<'static, V, StdInstant, L, Task, StdClock, N>
where
    V: Value + Send + 'static,
    L: Led<V> + Send + 'static,
{
    /// Creates a blinker driven by the process-wide [`default_scheduler`].
    pub fn with_default_scheduler(led: L) -> Arc<Self> {
        Self::with_scheduler(led, default_scheduler())
    }

    /// Creates a blinker driven by `scheduler`.
    ///
    /// The scheduler only holds a weak reference; once the returned `Arc` is
    /// dropped, pending invocations are discarded.
    pub fn with_scheduler(led: L, scheduler: &ThreadScheduler) -> Arc<Self> {
        Arc::new_cyclic(|this: &Weak<Self>| {
            let this = Weak::clone(this);
            let task = scheduler.task(move || {
                if let Some(blinker) = this.upgrade() {
                    blinker.advance();
                }
            });
            Blinker::new(led, task, &STD_CLOCK)
        })
    }
}
