use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use chrono;
use parking_lot::Mutex;

/// Diagnostic logger. Messages are timestamped, mirrored to stderr, and
/// retained in the shared buffer the caller hands in.
pub struct Logger {
    sender: mpsc::Sender<String>,
}

impl Logger {
    pub fn new(log_messages: Arc<Mutex<Vec<String>>>) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            for message in receiver {
                eprintln!("{}", message);
                log_messages.lock().push(message);
            }
        });

        Logger { sender }
    }

    pub fn log(&self, message: String) {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        let log_message = format!("[{}] {}", timestamp, message);
        self.sender.send(log_message).unwrap_or_default();
    }
}

pub fn measure_time<F, T>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    let duration = start.elapsed();
    (result, duration)
}

pub fn get_memory_usage() -> String {
    if let Ok(mem_info) = sys_info::mem_info() {
        format!(
            "Memory: Total: {} MB, Free: {} MB, Used: {} MB",
            mem_info.total / 1024,
            mem_info.free / 1024,
            (mem_info.total - mem_info.free) / 1024
        )
    } else {
        "Unable to get memory info".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_time_returns_closure_result() {
        let (value, duration) = measure_time(|| 2 + 2);
        assert_eq!(value, 4);
        assert!(duration <= Duration::from_secs(1));
    }

    #[test]
    fn logger_retains_timestamped_messages() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new(buffer.clone());
        logger.log("hello".to_string());

        // The drain thread is asynchronous; give it a moment.
        for _ in 0..100 {
            if !buffer.lock().is_empty() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }

        let messages = buffer.lock();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].ends_with("hello"));
        assert!(messages[0].starts_with('['));
    }

    #[test]
    fn memory_usage_is_printable() {
        let report = get_memory_usage();
        assert!(report.starts_with("Memory:") || report.starts_with("Unable"));
    }
}
