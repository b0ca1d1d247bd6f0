use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Cancel-and-reschedule timer.
///
/// Each [`schedule`](Debouncer::schedule) call supersedes the previous pending
/// one, so only the last task scheduled within a quiet period runs. Once the
/// delay elapses the task is handed to its own tokio task; cancelling after that
/// point no longer affects it.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            trace!("Superseded pending debounced task");
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Drop the pending task, if any. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> Arc<Mutex<Vec<&'static str>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn push(log: &Arc<Mutex<Vec<&'static str>>>, value: &'static str) -> impl Future<Output = ()> + Send + 'static {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(value);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_after_delay() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        debouncer.schedule(push(&log, "a"));

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(log.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(*log.lock().unwrap(), vec!["a"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_schedules_keep_only_last() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(1000));
        debouncer.schedule(push(&log, "d"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.schedule(push(&log, "du"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.schedule(push(&log, "dune"));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(*log.lock().unwrap(), vec!["dune"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        debouncer.schedule(push(&log, "x"));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fired_task_survives_reschedule() {
        let log = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));
        let slow = {
            let log = log.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(1000)).await;
                log.lock().unwrap().push("slow");
            }
        };
        debouncer.schedule(slow);
        tokio::time::sleep(Duration::from_millis(200)).await;

        // The first task is already in flight; a new schedule must not abort it
        debouncer.schedule(push(&log, "fast"));
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(*log.lock().unwrap(), vec!["fast", "slow"]);
    }
}
