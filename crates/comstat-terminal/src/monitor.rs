//! Continuous CPU/memory load monitor.

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use comstat_platform::{LoadService, SystemTime, TimeService};
use comstat_types::error::Result;

use crate::sinks;

/// Cross-thread stop signal whose wait doubles as the polling sleep.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    state: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (flag, signal) = &*self.state;
        if let Ok(mut cancelled) = flag.lock() {
            *cancelled = true;
        }
        signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (flag, _) = &*self.state;
        flag.lock().map(|c| *c).unwrap_or(true)
    }

    /// Sleep up to `timeout`, waking early on cancellation. Returns whether
    /// the token is cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, signal) = &*self.state;
        let Ok(guard) = flag.lock() else {
            return true;
        };
        match signal.wait_timeout_while(guard, timeout, |cancelled| !*cancelled) {
            Ok((cancelled, _)) => *cancelled,
            Err(_) => true,
        }
    }
}

fn load_line(heading: &str, at: SystemTime, cpu: f32, memory: f32) -> String {
    format!("\n{heading} time: {at}\nCPU load: {cpu:.1}%, Memory load: {memory:.1}%\n")
}

/// Sample, print and log load every `interval` until `token` is cancelled.
/// Returns the number of samples taken.
pub fn run_monitor<L, T>(
    load: &L,
    time: &T,
    log_path: &Path,
    out: &mut dyn Write,
    token: &CancelToken,
    interval: Duration,
) -> Result<u64>
where
    L: LoadService + ?Sized,
    T: TimeService + ?Sized,
{
    let mut samples = 0u64;
    while !token.is_cancelled() {
        let now = time.now()?;
        let cpu = load.cpu_load()?;
        let memory = load.memory_load()?;

        out.write_all(load_line("Current", now, cpu, memory).as_bytes())?;
        out.flush()?;
        sinks::append(log_path, &load_line("Saved", now, cpu, memory))?;
        samples += 1;

        if token.wait_timeout(interval) {
            break;
        }
    }
    log::info!("Monitor stopped after {samples} sample(s)");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::thread;
    use std::time::Instant;

    use comstat_platform::services::system_time_from_unix;

    /// Cancels `token` on the `stop_after`-th CPU sample.
    struct ScriptedLoad {
        token: CancelToken,
        stop_after: u32,
        calls: Cell<u32>,
    }

    impl LoadService for ScriptedLoad {
        fn cpu_load(&self) -> Result<f32> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == self.stop_after {
                self.token.cancel();
            }
            Ok(12.5)
        }

        fn memory_load(&self) -> Result<f32> {
            Ok(40.0)
        }
    }

    struct FixedTime;

    impl TimeService for FixedTime {
        fn now(&self) -> Result<SystemTime> {
            Ok(system_time_from_unix(1_709_210_096))
        }
    }

    #[test]
    fn one_line_per_sample_until_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("logs/log.csv");
        let token = CancelToken::new();
        let load = ScriptedLoad {
            token: token.clone(),
            stop_after: 3,
            calls: Cell::new(0),
        };
        let mut out = Vec::new();

        let samples = run_monitor(
            &load,
            &FixedTime,
            &log_path,
            &mut out,
            &token,
            Duration::from_millis(5),
        )
        .unwrap();

        assert_eq!(samples, 3);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("Current time: 2024-02-29 12:34:56").count(), 3);
        assert!(printed.contains("CPU load: 12.5%, Memory load: 40.0%"));

        let logged = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(logged.matches("Saved time: ").count(), 3);
        assert_eq!(logged.matches("CPU load: ").count(), 3);
    }

    #[test]
    fn cancelled_token_takes_no_samples() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.csv");
        let token = CancelToken::new();
        token.cancel();
        let load = ScriptedLoad {
            token: token.clone(),
            stop_after: 0,
            calls: Cell::new(0),
        };
        let mut out = Vec::new();

        let samples = run_monitor(
            &load,
            &FixedTime,
            &log_path,
            &mut out,
            &token,
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(samples, 0);
        assert!(out.is_empty());
        assert!(!log_path.exists());
    }

    #[test]
    fn cancel_wakes_a_waiting_thread() {
        let token = CancelToken::new();
        let waiter = {
            let token = token.clone();
            thread::spawn(move || {
                let started = Instant::now();
                let cancelled = token.wait_timeout(Duration::from_secs(30));
                (cancelled, started.elapsed())
            })
        };
        thread::sleep(Duration::from_millis(20));
        token.cancel();
        let (cancelled, waited) = waiter.join().unwrap();
        assert!(cancelled);
        assert!(waited < Duration::from_secs(30));
    }

    #[test]
    fn wait_times_out_when_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.wait_timeout(Duration::from_millis(5)));
        assert!(!token.is_cancelled());
    }
}
