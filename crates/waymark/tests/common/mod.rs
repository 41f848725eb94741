//! Shared test doubles for integration tests.

use std::sync::{Arc, Mutex};

use waymark::Navigator;

/// Navigator double that records every navigation call and tracks the
/// current location the way a history-backed implementation would.
pub struct RecordingNavigator {
    current: Mutex<String>,
    pushes: Mutex<Vec<String>>,
    replaces: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(path: &str) -> Arc<Self> {
        Arc::new(Self {
            current: Mutex::new(path.to_string()),
            pushes: Mutex::new(Vec::new()),
            replaces: Mutex::new(Vec::new()),
        })
    }

    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }

    pub fn replaces(&self) -> Vec<String> {
        self.replaces.lock().unwrap().clone()
    }

    pub fn navigation_count(&self) -> usize {
        self.pushes.lock().unwrap().len() + self.replaces.lock().unwrap().len()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn push(&self, path: &str) {
        self.pushes.lock().unwrap().push(path.to_string());
        *self.current.lock().unwrap() = path.to_string();
    }

    fn replace(&self, path: &str) {
        self.replaces.lock().unwrap().push(path.to_string());
        *self.current.lock().unwrap() = path.to_string();
    }
}
