/*
 * Test utilities and mock helpers for Envdash
 *
 * This module provides fake sensor sources, snapshot fixtures and helper
 * functions shared by the unit test modules.
 */

#[cfg(test)]
pub mod test_utils {
    use crate::error::{DashError, Result};
    use crate::history::HistoryRecord;
    use crate::source::{SensorSnapshot, SensorSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Condvar, Mutex};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Snapshot with every reading present
    pub fn connected_snapshot(temperature: f64, humidity: f64, light: f64, time: &str) -> SensorSnapshot {
        SensorSnapshot {
            connected: true,
            temperature: Some(temperature),
            humidity: Some(humidity),
            light: Some(light),
            time: time.to_string(),
        }
    }

    pub fn create_mock_history() -> Vec<HistoryRecord> {
        vec![
            HistoryRecord::new("2025-01-15 09:00:00", 19.5, 45.0, 120.0),
            HistoryRecord::new("2025-01-15 09:03:00", 26.4, 61.2, 520.0),
        ]
    }

    /// Poll `cond` until it holds or `timeout` elapses
    pub fn wait_until<F: FnMut() -> bool>(timeout: Duration, mut cond: F) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if cond() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Sensor source with a fixed answer that records how it is called.
    ///
    /// It can be slowed down with a delay, or gated so every request blocks
    /// until `release()` is called.
    pub struct ScriptedSource {
        answer: Mutex<Result<SensorSnapshot>>,
        delay: Option<Duration>,
        gate: Option<(Mutex<bool>, Condvar)>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl ScriptedSource {
        fn with_answer(answer: Result<SensorSnapshot>) -> Self {
            Self {
                answer: Mutex::new(answer),
                delay: None,
                gate: None,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }

        pub fn connected(temperature: f64, humidity: f64, light: f64) -> Self {
            Self::with_answer(Ok(connected_snapshot(temperature, humidity, light, "12:00:00")))
        }

        pub fn disconnected() -> Self {
            Self::with_answer(Ok(SensorSnapshot::disconnected()))
        }

        pub fn failing(status: u16) -> Self {
            Self::with_answer(Err(DashError::Status { status }))
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn gated(mut self) -> Self {
            self.gate = Some((Mutex::new(false), Condvar::new()));
            self
        }

        /// Change what later requests return
        pub fn set_answer(&self, answer: Result<SensorSnapshot>) {
            *self.answer.lock().unwrap() = answer;
        }

        pub fn release(&self) {
            if let Some((open, cv)) = &self.gate {
                *open.lock().unwrap() = true;
                cv.notify_all();
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn in_flight(&self) -> usize {
            self.in_flight.load(Ordering::SeqCst)
        }

        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }
    }

    impl SensorSource for ScriptedSource {
        fn fetch(&self) -> Result<SensorSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                thread::sleep(delay);
            }
            if let Some((open, cv)) = &self.gate {
                let mut guard = open.lock().unwrap();
                while !*guard {
                    guard = cv.wait(guard).unwrap();
                }
            }

            let answer = match &*self.answer.lock().unwrap() {
                Ok(snapshot) => Ok(snapshot.clone()),
                Err(DashError::Status { status }) => Err(DashError::Status { status: *status }),
                Err(e) => Err(DashError::Decode(e.to_string())),
            };
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            answer
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    #[test]
    fn test_scripted_source_counts_calls() {
        let source = ScriptedSource::connected(20.0, 50.0, 100.0);
        assert!(source.fetch().is_ok());
        assert!(source.fetch().is_ok());
        assert_eq!(source.calls(), 2);
        assert_eq!(source.in_flight(), 0);
        assert_eq!(source.max_in_flight(), 1);
    }

    #[test]
    fn test_scripted_source_answers() {
        let source = ScriptedSource::failing(500);
        assert!(matches!(source.fetch(), Err(DashError::Status { status: 500 })));

        source.set_answer(Ok(SensorSnapshot::disconnected()));
        assert!(!source.fetch().unwrap().connected);

        let source = ScriptedSource::disconnected();
        assert!(!source.fetch().unwrap().connected);
    }

    #[test]
    fn test_wait_until_times_out() {
        assert!(!wait_until(Duration::from_millis(20), || false));
        assert!(wait_until(Duration::from_millis(20), || true));
    }
}
