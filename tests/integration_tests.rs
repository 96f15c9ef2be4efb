/*
 * Integration tests for Envdash
 *
 * These tests drive the controller through its public API, and the HTTP
 * source against a throwaway local server.
 */

use envdash::app::{ConnectivityStatus, Section, PLACEHOLDER};
use envdash::config::DashConfig;
use envdash::controller::ViewController;
use envdash::error::{DashError, Result};
use envdash::history::HistoryRow;
use envdash::source::{HttpSensorSource, SensorSnapshot, SensorSource};
use envdash::thresholds::{Metric, WarningState};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

// Test utilities
struct SwitchableSource {
    answer: Mutex<Option<SensorSnapshot>>,
}

impl SwitchableSource {
    fn new(answer: Option<SensorSnapshot>) -> Self {
        Self { answer: Mutex::new(answer) }
    }

    fn set(&self, answer: Option<SensorSnapshot>) {
        *self.answer.lock().unwrap() = answer;
    }
}

impl SensorSource for SwitchableSource {
    fn fetch(&self) -> Result<SensorSnapshot> {
        self.answer
            .lock()
            .unwrap()
            .clone()
            .ok_or(DashError::Status { status: 503 })
    }

    fn describe(&self) -> String {
        "switchable".to_string()
    }
}

fn snapshot(t: f64, h: f64, l: f64) -> SensorSnapshot {
    SensorSnapshot {
        connected: true,
        temperature: Some(t),
        humidity: Some(h),
        light: Some(l),
        time: "12:00:00".to_string(),
    }
}

fn pump_until<F: Fn(&ViewController) -> bool>(vc: &mut ViewController, cond: F) -> bool {
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        vc.pump();
        if cond(vc) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

/// Serve one canned HTTP response and return the URL to hit
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).map(|n| n > 0).unwrap_or(false) {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });
    format!("http://{}/data.php", addr)
}

#[test]
fn test_full_dashboard_session() {
    let source = Arc::new(SwitchableSource::new(Some(snapshot(30.2, 50.0, 300.0))));
    let mut vc = ViewController::with_source(source.clone(), Duration::from_millis(20));

    assert!(matches!(vc.navigate(Section::History), Err(DashError::NotEntered)));
    vc.enter_dashboard().unwrap();

    assert!(pump_until(&mut vc, |vc| vc.app().status.is_connected()));
    assert_eq!(vc.app().panel(Metric::Temperature).value_text, "30.2");
    assert_eq!(vc.app().panel(Metric::Temperature).warning, WarningState::Above(30.2));

    // Endpoint goes down: values stay, warnings go
    source.set(None);
    assert!(pump_until(&mut vc, |vc| matches!(&vc.app().status, ConnectivityStatus::Error(m) if m.contains("connection error"))));
    assert_eq!(vc.app().panel(Metric::Temperature).value_text, "30.2");
    assert!(!vc.app().any_warning());

    // Sensor unplugged: values blanked
    source.set(Some(SensorSnapshot::disconnected()));
    assert!(pump_until(&mut vc, |vc| matches!(&vc.app().status, ConnectivityStatus::Error(m) if m.contains("sensor not connected"))));
    for metric in Metric::ALL {
        assert_eq!(vc.app().panel(metric).value_text, PLACEHOLDER);
    }

    vc.navigate(Section::History).unwrap();
    assert!(!vc.is_polling());
    assert_eq!(vc.app().history_rows.len(), 3);
    assert!(vc.app().history_rows.iter().all(|r| matches!(r, HistoryRow::Record(_))));
}

#[test]
fn test_repeated_dashboard_navigation_single_loop() {
    let source = Arc::new(SwitchableSource::new(Some(snapshot(21.0, 50.0, 300.0))));
    let mut vc = ViewController::with_source(source, Duration::from_millis(20));
    vc.enter_dashboard().unwrap();
    for _ in 0..5 {
        vc.navigate(Section::Dashboard).unwrap();
    }
    assert!(pump_until(&mut vc, |vc| vc.live_poll_loops() == 1));
    vc.shutdown();
    assert!(pump_until(&mut vc, |vc| vc.live_poll_loops() == 0));
}

#[test]
fn test_polling_follows_active_section() {
    let source = Arc::new(SwitchableSource::new(Some(snapshot(21.0, 50.0, 300.0))));
    let mut vc = ViewController::with_source(source, Duration::from_millis(20));
    vc.enter_dashboard().unwrap();
    assert!(vc.is_polling());

    vc.navigate(Section::History).unwrap();
    assert_eq!(vc.app().section, Some(Section::History));
    assert!(!vc.is_polling());

    // Form edits and menu movement never switch sections or start polling
    vc.navigate(Section::Registration).unwrap();
    vc.registration_input('a');
    vc.registration_next_field();
    vc.toggle_menu();
    vc.menu_down();
    assert_eq!(vc.app().section, Some(Section::Registration));
    assert!(!vc.is_polling());

    vc.navigate(Section::Dashboard).unwrap();
    assert!(vc.is_polling());
    assert!(pump_until(&mut vc, |vc| vc.live_poll_loops() == 1));
}

#[test]
fn test_controller_rejects_bad_config() {
    let cfg = DashConfig { api_url: "ftp://sensor/data".to_string(), poll_interval_ms: 3000 };
    assert!(ViewController::new(&cfg).is_err());
}

#[test]
fn test_http_source_reads_snapshot() {
    let url = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"connected": true, "temperature": 17.25, "humidity": 41, "light": 499.6, "time": "08:15:00"}"#,
    );
    let source = HttpSensorSource::new(url).unwrap();
    let snap = source.fetch().unwrap();
    assert!(snap.connected);
    assert_eq!(snap.temperature, Some(17.25));
    assert_eq!(snap.time, "08:15:00");
}

#[test]
fn test_http_source_non_success_status() {
    let url = serve_once("HTTP/1.1 500 Internal Server Error", r#"{"error": "boom"}"#);
    let source = HttpSensorSource::new(url).unwrap();
    assert!(matches!(source.fetch(), Err(DashError::Status { status: 500 })));
}

#[test]
fn test_http_source_malformed_body() {
    let url = serve_once("HTTP/1.1 200 OK", "not json");
    let source = HttpSensorSource::new(url).unwrap();
    assert!(matches!(source.fetch(), Err(DashError::Decode(_))));
}

#[test]
fn test_http_source_unreachable() {
    // Bind then drop to get a port nobody listens on
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let source = HttpSensorSource::new(format!("http://127.0.0.1:{}/data.php", port)).unwrap();
    assert!(matches!(source.fetch(), Err(DashError::Http(_))));
}
