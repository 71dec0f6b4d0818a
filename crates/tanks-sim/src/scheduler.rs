//! One-shot deferred tasks on the simulation clock.
//!
//! Tasks are plain values. The simulation executes them at the start of the
//! first tick at or after their deadline, and every task body re-checks the
//! current state before acting. There is no cancellation.

use serde::{Deserialize, Serialize};

use tanks_core::constants::TICK_RATE;
use tanks_core::enums::MatchOutcome;
use tanks_core::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeferredTask {
    /// Spawn a started enemy tank at `x` and re-arm.
    SpawnEnemy { x: f64 },
    /// Stop everything and settle the score.
    FinalizeMatch { outcome: MatchOutcome },
    /// End a convoy cooldown if the tank is still paused.
    ResumeTank { id: EntityId },
}

#[derive(Debug, Clone)]
struct Scheduled {
    due_tick: u64,
    seq: u64,
    task: DeferredTask,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once, `delay_secs` after tick `now`. Delays round to whole
    /// ticks and are at least one tick.
    pub fn schedule_once(&mut self, now: u64, delay_secs: f64, task: DeferredTask) {
        let delay_ticks = (delay_secs.max(0.0) * f64::from(TICK_RATE)).round() as u64;
        let due_tick = now + delay_ticks.max(1);
        self.tasks.push(Scheduled {
            due_tick,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
    }

    /// Remove and return every task due at or before `now`, earliest first.
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredTask> {
        let mut due: Vec<Scheduled> = Vec::new();
        let mut i = 0;
        while i < self.tasks.len() {
            if self.tasks[i].due_tick <= now {
                due.push(self.tasks.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| (s.due_tick, s.seq));
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_after_delay() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(10, 1.0, DeferredTask::ResumeTank { id: EntityId(1) });

        assert!(scheduler.take_due(69).is_empty());
        let due = scheduler.take_due(70);
        assert_eq!(due, vec![DeferredTask::ResumeTank { id: EntityId(1) }]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_due_order_is_deadline_then_insertion() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(0, 2.0, DeferredTask::SpawnEnemy { x: 2.0 });
        scheduler.schedule_once(0, 1.0, DeferredTask::SpawnEnemy { x: 1.0 });
        scheduler.schedule_once(0, 1.0, DeferredTask::SpawnEnemy { x: 1.5 });

        let due = scheduler.take_due(500);
        assert_eq!(
            due,
            vec![
                DeferredTask::SpawnEnemy { x: 1.0 },
                DeferredTask::SpawnEnemy { x: 1.5 },
                DeferredTask::SpawnEnemy { x: 2.0 },
            ]
        );
    }

    #[test]
    fn test_zero_delay_waits_one_tick() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(5, 0.0, DeferredTask::ResumeTank { id: EntityId(2) });
        assert!(scheduler.take_due(5).is_empty());
        assert_eq!(scheduler.take_due(6).len(), 1);
    }
}
