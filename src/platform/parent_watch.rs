// Sidelog - platform/parent_watch.rs
//
// Parent-process liveness watcher for helper-process self-termination.
//
// A helper launched by the host must not outlive it. The watcher polls the
// parent PID on an interval; when the helper is reparented (the original
// parent exited), it invokes the caller-supplied exit action exactly once
// and stops. The action is typically `std::process::exit`, injected by the
// caller so the trigger logic stays testable.

use crate::util::constants;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Handle to a running watcher thread. Dropping it stops the watcher.
pub struct ParentWatcher {
    stop: Arc<AtomicBool>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ParentWatcher {
    /// Start watching the current parent process. `on_parent_exit` runs on
    /// the watcher thread when the parent goes away.
    ///
    /// On platforms without a parent-PID source no thread is started and the
    /// action will never fire.
    pub fn spawn<F>(on_parent_exit: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));

        let Some(initial) = current_parent_pid() else {
            tracing::warn!("No parent-PID source on this platform; watcher inactive");
            return Self { stop, thread: None };
        };

        let stop_flag = Arc::clone(&stop);
        let interval = Duration::from_millis(constants::PARENT_POLL_INTERVAL_MS);
        let thread = std::thread::Builder::new()
            .name("sidelog-parent-watch".to_string())
            .spawn(move || {
                watch_loop(
                    initial,
                    current_parent_pid,
                    &stop_flag,
                    interval,
                    on_parent_exit,
                );
            })
            .ok();

        if thread.is_none() {
            tracing::error!("Failed to start parent watcher thread");
        }
        Self { stop, thread }
    }

    /// Stop the watcher and wait for its thread to finish.
    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ParentWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// True when the observed parent PID means the original parent has exited.
/// Reparenting (to init/launchd, PID 1, or to any other reaper) changes the
/// reported parent.
fn parent_exited(initial: u32, current: u32) -> bool {
    current != initial || current == 1
}

/// Poll `source` until the parent exits or `stop` is set. Fires `on_exit`
/// at most once. A source returning None ends the loop without firing.
fn watch_loop<S, F>(initial: u32, source: S, stop: &AtomicBool, interval: Duration, on_exit: F)
where
    S: Fn() -> Option<u32>,
    F: FnOnce(),
{
    tracing::debug!(parent_pid = initial, "Parent watcher started");
    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::debug!("Parent watcher stopped");
            return;
        }
        match source() {
            Some(current) if parent_exited(initial, current) => {
                tracing::info!(
                    parent_pid = initial,
                    reparented_to = current,
                    "Parent process exited"
                );
                on_exit();
                return;
            }
            Some(_) => {}
            None => {
                tracing::warn!("Parent-PID source unavailable; watcher exiting");
                return;
            }
        }
        std::thread::sleep(interval);
    }
}

/// Current parent PID, if the platform exposes one.
#[cfg(unix)]
fn current_parent_pid() -> Option<u32> {
    Some(nix::unistd::getppid().as_raw() as u32)
}

#[cfg(not(unix))]
fn current_parent_pid() -> Option<u32> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    #[test]
    fn parent_exited_on_reparent_or_init() {
        assert!(!parent_exited(4321, 4321));
        assert!(parent_exited(4321, 1));
        assert!(parent_exited(4321, 999));
        // A helper adopted directly by init.
        assert!(parent_exited(1, 1));
    }

    #[test]
    fn loop_fires_once_when_parent_changes() {
        let ppid = Arc::new(AtomicU32::new(4321));
        let fired = Arc::new(AtomicBool::new(false));
        let stop = Arc::new(AtomicBool::new(false));

        let source_ppid = Arc::clone(&ppid);
        let fired_flag = Arc::clone(&fired);
        let stop_flag = Arc::clone(&stop);
        let handle = std::thread::spawn(move || {
            watch_loop(
                4321,
                move || Some(source_ppid.load(Ordering::Relaxed)),
                &stop_flag,
                Duration::from_millis(1),
                move || fired_flag.store(true, Ordering::Relaxed),
            );
        });

        // Stable parent: no fire.
        std::thread::sleep(Duration::from_millis(20));
        assert!(!fired.load(Ordering::Relaxed));

        // Reparent: fires and the loop ends on its own.
        ppid.store(1, Ordering::Relaxed);
        handle.join().unwrap();
        assert!(fired.load(Ordering::Relaxed));
    }

    #[test]
    fn loop_stops_without_firing_when_asked() {
        let stop = Arc::new(AtomicBool::new(false));
        let fired = Arc::new(AtomicBool::new(false));

        let stop_flag = Arc::clone(&stop);
        let fired_flag = Arc::clone(&fired);
        let handle = std::thread::spawn(move || {
            watch_loop(
                4321,
                || Some(4321),
                &stop_flag,
                Duration::from_millis(1),
                move || fired_flag.store(true, Ordering::Relaxed),
            );
        });

        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();
        assert!(!fired.load(Ordering::Relaxed));
    }

    #[cfg(unix)]
    #[test]
    fn spawn_and_stop_against_live_parent() {
        let watcher = ParentWatcher::spawn(|| {
            panic!("parent is alive; exit action must not fire");
        });
        std::thread::sleep(Duration::from_millis(10));
        watcher.stop();
    }
}
