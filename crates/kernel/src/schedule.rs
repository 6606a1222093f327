use std::collections::BTreeMap;
use std::time::Duration;

/// Handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(u64);

/// Logical clock with one-shot tasks.
///
/// Time only moves when the host calls [`Scheduler::advance`], so tests can
/// step through delays without sleeping.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TaskId), T>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `task` once, `delay` after the current logical time.
    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), task);
        id
    }

    pub fn cancel(&mut self, id: TaskId) -> Option<T> {
        let key = self.pending.keys().find(|(_, k)| *k == id).copied()?;
        self.pending.remove(&key)
    }

    /// Move the clock forward and return every task now due, earliest first.
    /// Ties run in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        self.now += elapsed;
        let mut due = Vec::new();
        while let Some(entry) = self.pending.first_entry() {
            if entry.key().0 > self.now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_fires_at_deadline() {
        let mut s = Scheduler::new();
        s.schedule_once(Duration::from_millis(2000), "unlock");
        assert!(s.advance(Duration::from_millis(1999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)), vec!["unlock"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn fires_only_once() {
        let mut s = Scheduler::new();
        s.schedule_once(Duration::from_millis(10), 1);
        assert_eq!(s.advance(Duration::from_millis(50)), vec![1]);
        assert!(s.advance(Duration::from_millis(50)).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_order() {
        let mut s = Scheduler::new();
        s.schedule_once(Duration::from_millis(30), 'c');
        s.schedule_once(Duration::from_millis(10), 'a');
        s.schedule_once(Duration::from_millis(10), 'b');
        assert_eq!(s.advance(Duration::from_millis(100)), vec!['a', 'b', 'c']);
    }

    #[test]
    fn delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance(Duration::from_secs(5));
        s.schedule_once(Duration::from_secs(1), ());
        assert!(s.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(s.advance(Duration::from_millis(1)).len(), 1);
        assert_eq!(s.now(), Duration::from_secs(6));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let id = s.schedule_once(Duration::from_millis(10), 7);
        assert_eq!(s.cancel(id), Some(7));
        assert!(s.advance(Duration::from_secs(1)).is_empty());
    }
}
