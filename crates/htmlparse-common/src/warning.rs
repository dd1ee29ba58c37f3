//! Parser warnings with colored terminal output.
//!
//! Provides deduplication so a document full of the same unknown entity
//! reports it once. Used by the scanner and tree builder for input that is
//! accepted but not represented faithfully (discarded comments, unknown
//! character references, duplicate attributes).

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about lossy or ignored input (prints once per unique message).
///
/// # Example
/// ```
/// use htmlparse_common::warning::warn_once;
///
/// warn_once("HTML Scanner", "unknown character reference '&bogus;'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[htmlparse {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call before parsing an unrelated document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
