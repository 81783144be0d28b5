//! Log capture for unit tests.
//!
//! Records are kept per thread so parallel tests do not see each other's output.

use std::cell::RefCell;
use std::sync::Once;

use log::{LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| records.borrow_mut().push(record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

fn install() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed in tests");
        log::set_max_level(LevelFilter::Trace);
    });
}

/// Start capturing on this thread, discarding anything recorded so far.
pub fn clear_logs() {
    install();
    RECORDS.with(|records| records.borrow_mut().clear());
}

pub fn captured_logs() -> Vec<String> {
    RECORDS.with(|records| records.borrow().clone())
}
