//! Cancelable one-shot scheduler for deferred effects.
//!
//! Tasks are keyed by a monotonically increasing handle and fire once the
//! engine's simulated clock passes their due time. `cancel_all` drops every
//! pending task so a reset cannot be undone by a stale effect.

use std::collections::BTreeMap;

/// Effects that run after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledEffect {
    /// End the game-over cinematic and commit GAME_OVER.
    CommitGameOver,
    ClearWeather,
    ExpireUltimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub handle: TaskHandle,
    pub due_ms: u64,
    pub effect: ScheduledEffect,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tasks: BTreeMap<TaskHandle, ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u64, effect: ScheduledEffect) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            handle,
            ScheduledTask {
                handle,
                due_ms: self.now_ms + delay_ms,
                effect,
            },
        );
        handle
    }

    /// Returns false if the task already fired or was canceled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.tasks.remove(&handle).is_some()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle)
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Move the clock forward and take every task now due, earliest first.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ScheduledTask> {
        self.now_ms += elapsed_ms;
        let now = self.now_ms;
        let mut due: Vec<ScheduledTask> = self
            .tasks
            .values()
            .filter(|t| t.due_ms <= now)
            .copied()
            .collect();
        due.sort_by_key(|t| (t.due_ms, t.handle));
        for task in &due {
            self.tasks.remove(&task.handle);
        }
        due
    }
}
