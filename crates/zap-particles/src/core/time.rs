/// Stopwatch driven by host timestamps (milliseconds).
/// Time only accumulates while running, so a stop/start pair leaves no gap.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    /// Host timestamp of the last start, while running.
    started_at: Option<f64>,
    /// Time accumulated over previous running spans.
    accumulated_ms: f64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or continue) measuring from `now_ms`. No-op if already running.
    pub fn start(&mut self, now_ms: f64) {
        if self.started_at.is_none() {
            self.started_at = Some(now_ms);
        }
    }

    /// Freeze the elapsed time. No-op if already stopped.
    pub fn stop(&mut self, now_ms: f64) {
        if let Some(start) = self.started_at.take() {
            self.accumulated_ms += (now_ms - start).max(0.0);
        }
    }

    /// Stop and zero.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.accumulated_ms = 0.0;
    }

    /// Zero and start again from `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        self.reset();
        self.start(now_ms);
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Whole milliseconds elapsed while running.
    pub fn elapsed_ms(&self, now_ms: f64) -> u64 {
        let running = self
            .started_at
            .map(|start| (now_ms - start).max(0.0))
            .unwrap_or(0.0);
        (self.accumulated_ms + running) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_while_running() {
        let mut sw = Stopwatch::new();
        sw.start(1_000.0);
        assert_eq!(sw.elapsed_ms(1_250.0), 250);
    }

    #[test]
    fn stop_freezes_and_start_continues() {
        let mut sw = Stopwatch::new();
        sw.start(0.0);
        sw.stop(400.0);
        assert_eq!(sw.elapsed_ms(10_000.0), 400);
        sw.start(10_000.0);
        assert_eq!(sw.elapsed_ms(10_100.0), 500);
    }

    #[test]
    fn restart_zeroes() {
        let mut sw = Stopwatch::new();
        sw.start(0.0);
        sw.restart(900.0);
        assert_eq!(sw.elapsed_ms(950.0), 50);
        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(2_000.0), 0);
    }

    #[test]
    fn clock_going_backwards_is_clamped() {
        let mut sw = Stopwatch::new();
        sw.start(500.0);
        assert_eq!(sw.elapsed_ms(100.0), 0);
    }
}
