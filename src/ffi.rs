//! FFI bindings for LoveLog
//!
//! This module provides C-compatible functions so a rendering layer written in another
//! language can drive the engine. All functions take null-terminated C strings and return
//! allocated memory that must be freed by the caller using `lovelog_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::calendar::parse_day;
use crate::error::Result;
use crate::heatmap::project_month;
use crate::import::{parse_import, parse_record};
use crate::pipeline::{records_to_report, Journal};
use crate::stats::compute_stats;
use crate::store::{export_json, upsert, MemoryStore};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Hand a computed string to C, or record the error and return NULL
fn deliver(result: Result<String>) -> *mut c_char {
    match result {
        Ok(s) => string_to_cstr(&s),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

macro_rules! arg {
    ($ptr:expr, $name:literal) => {
        match cstr_to_string($ptr) {
            Some(s) => s,
            None => {
                set_last_error(concat!("Invalid ", $name, " string pointer"));
                return ptr::null_mut();
            }
        }
    };
}

// ============================================================================
// Stateless API
// ============================================================================

/// Build a dashboard report JSON from a records JSON array.
///
/// # Safety
/// - `records_json` and `as_of` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
/// - Returns NULL on error; call `lovelog_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lovelog_report(
    records_json: *const c_char,
    as_of: *const c_char,
) -> *mut c_char {
    clear_last_error();
    let json = arg!(records_json, "records JSON");
    let as_of = arg!(as_of, "as_of");
    deliver(records_to_report(&json, &as_of))
}

/// Compute aggregate stats JSON from a records JSON array.
///
/// # Safety
/// - `records_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
/// - Returns NULL on error; call `lovelog_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lovelog_stats(records_json: *const c_char) -> *mut c_char {
    clear_last_error();
    let json = arg!(records_json, "records JSON");
    deliver(parse_import(&json).and_then(|records| {
        Ok(serde_json::to_string(&compute_stats(&records))?)
    }))
}

/// Compute month heatmap cells JSON (1-based month).
///
/// # Safety
/// - `records_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
/// - Returns NULL on error; call `lovelog_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lovelog_month_heatmap(
    records_json: *const c_char,
    year: i32,
    month: u32,
) -> *mut c_char {
    clear_last_error();
    let json = arg!(records_json, "records JSON");
    deliver(parse_import(&json).and_then(|records| {
        let cells = project_month(&records, year, month)?;
        Ok(serde_json::to_string(&cells)?)
    }))
}

/// Upsert one record into a collection and return the new collection JSON.
///
/// # Safety
/// - `collection_json` and `record_json` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
/// - Returns NULL on error; call `lovelog_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn lovelog_upsert(
    collection_json: *const c_char,
    record_json: *const c_char,
) -> *mut c_char {
    clear_last_error();
    let collection = arg!(collection_json, "collection JSON");
    let record = arg!(record_json, "record JSON");
    deliver(parse_import(&collection).and_then(|records| {
        let next = upsert(&records, parse_record(&record)?);
        export_json(&next)
    }))
}

// ============================================================================
// Stateful Journal API
// ============================================================================

/// Opaque handle to an in-memory Journal
pub struct JournalHandle {
    journal: Journal<MemoryStore>,
}

/// Create a journal seeded with a records JSON array (NULL for empty).
///
/// # Safety
/// - `records_json` must be NULL or a valid null-terminated C string.
/// - Must be freed with `lovelog_journal_free`.
/// - Returns NULL on error.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_new(records_json: *const c_char) -> *mut JournalHandle {
    clear_last_error();

    let records = if records_json.is_null() {
        Vec::new()
    } else {
        let json = arg!(records_json, "records JSON");
        match parse_import(&json) {
            Ok(records) => records,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    match Journal::open(MemoryStore::new(records)) {
        Ok(journal) => Box::into_raw(Box::new(JournalHandle { journal })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a journal.
///
/// # Safety
/// - `handle` must be a valid pointer returned by `lovelog_journal_new`, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_free(handle: *mut JournalHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Upsert one record object. Returns 0 on success, -1 on error.
///
/// # Safety
/// - `handle` must be a valid journal pointer.
/// - `record_json` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_add(
    handle: *mut JournalHandle,
    record_json: *const c_char,
) -> i32 {
    clear_last_error();

    let Some(handle) = handle.as_mut() else {
        set_last_error("Null journal handle");
        return -1;
    };
    let Some(json) = cstr_to_string(record_json) else {
        set_last_error("Invalid record JSON string pointer");
        return -1;
    };

    match parse_record(&json).and_then(|record| handle.journal.add(record)) {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Replace the journal collection with a bulk payload.
/// Returns the imported record count, or -1 on error.
///
/// # Safety
/// - `handle` must be a valid journal pointer.
/// - `records_json` must be a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_import(
    handle: *mut JournalHandle,
    records_json: *const c_char,
) -> i64 {
    clear_last_error();

    let Some(handle) = handle.as_mut() else {
        set_last_error("Null journal handle");
        return -1;
    };
    let Some(json) = cstr_to_string(records_json) else {
        set_last_error("Invalid records JSON string pointer");
        return -1;
    };

    match handle.journal.import_json(&json) {
        Ok(count) => count as i64,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

/// Export the journal collection JSON.
///
/// # Safety
/// - `handle` must be a valid journal pointer.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_export(handle: *const JournalHandle) -> *mut c_char {
    clear_last_error();
    let Some(handle) = handle.as_ref() else {
        set_last_error("Null journal handle");
        return ptr::null_mut();
    };
    deliver(handle.journal.export_json())
}

/// Dashboard report for the journal as of a `YYYY-MM-DD` day.
///
/// # Safety
/// - `handle` must be a valid journal pointer.
/// - `as_of` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `lovelog_free_string`.
#[no_mangle]
pub unsafe extern "C" fn lovelog_journal_report(
    handle: *const JournalHandle,
    as_of: *const c_char,
) -> *mut c_char {
    clear_last_error();
    let Some(handle) = handle.as_ref() else {
        set_last_error("Null journal handle");
        return ptr::null_mut();
    };
    let as_of = arg!(as_of, "as_of");
    deliver(parse_day(&as_of).and_then(|day| {
        Ok(serde_json::to_string(&handle.journal.report(day))?)
    }))
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by LoveLog functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a LoveLog function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn lovelog_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next LoveLog function call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn lovelog_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the LoveLog library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn lovelog_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> CString {
        CString::new(
            r#"[
                {"date": "2024-01-01", "voiceMinutes": 30, "messageCount": 100},
                {"date": "2024-01-02", "voiceMinutes": 0, "messageCount": 0},
                {"date": "2024-01-03", "voiceMinutes": 45, "messageCount": 150}
            ]"#,
        )
        .unwrap()
    }

    unsafe fn take(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let s = CStr::from_ptr(ptr).to_str().unwrap().to_string();
        lovelog_free_string(ptr);
        s
    }

    #[test]
    fn test_ffi_report() {
        let records = sample_records();
        let as_of = CString::new("2024-01-03").unwrap();
        unsafe {
            let report = take(lovelog_report(records.as_ptr(), as_of.as_ptr()));
            let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
            assert_eq!(parsed["stats"]["maxActivityDate"], "2024-01-03");
            assert_eq!(parsed["heatmap"].as_array().unwrap().len(), 365);
        }
    }

    #[test]
    fn test_ffi_stats_and_month() {
        let records = sample_records();
        unsafe {
            let stats = take(lovelog_stats(records.as_ptr()));
            assert!(stats.contains(r#""totalMessages":250"#));

            let month = take(lovelog_month_heatmap(records.as_ptr(), 2024, 2));
            let cells: serde_json::Value = serde_json::from_str(&month).unwrap();
            assert_eq!(cells.as_array().unwrap().len(), 29);

            assert!(lovelog_month_heatmap(records.as_ptr(), 2024, 13).is_null());
        }
    }

    #[test]
    fn test_ffi_upsert() {
        let records = sample_records();
        let record = CString::new(r#"{"date": "2024-01-02", "voiceMinutes": 5}"#).unwrap();
        unsafe {
            let next = take(lovelog_upsert(records.as_ptr(), record.as_ptr()));
            let parsed: serde_json::Value = serde_json::from_str(&next).unwrap();
            assert_eq!(parsed.as_array().unwrap().len(), 3);
            assert_eq!(parsed[1]["voiceMinutes"], 5);
        }
    }

    #[test]
    fn test_ffi_journal_lifecycle() {
        unsafe {
            let journal = lovelog_journal_new(ptr::null());
            assert!(!journal.is_null());

            let record = CString::new(r#"{"date": "2024-01-05", "voiceMinutes": 20}"#).unwrap();
            assert_eq!(lovelog_journal_add(journal, record.as_ptr()), 0);

            let records = sample_records();
            assert_eq!(lovelog_journal_import(journal, records.as_ptr()), 3);

            let exported = take(lovelog_journal_export(journal));
            assert!(!exported.contains("2024-01-05"));

            let as_of = CString::new("2024-01-03").unwrap();
            let report = take(lovelog_journal_report(journal, as_of.as_ptr()));
            assert!(report.contains("\"radar\""));

            lovelog_journal_free(journal);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        let invalid = CString::new("not json").unwrap();
        let as_of = CString::new("2024-01-03").unwrap();
        unsafe {
            assert!(lovelog_report(invalid.as_ptr(), as_of.as_ptr()).is_null());
            let error = lovelog_last_error();
            assert!(!error.is_null());
            assert!(!CStr::from_ptr(error).to_str().unwrap().is_empty());

            assert!(lovelog_journal_new(invalid.as_ptr()).is_null());

            let not_utf8 =
                CString::new(b"[{\"date\": \"2024-01-01\", \"voiceMinutes\": 5}, \xff]".to_vec())
                    .unwrap();
            assert!(lovelog_journal_new(not_utf8.as_ptr()).is_null());
            assert!(!lovelog_last_error().is_null());

            assert_eq!(lovelog_journal_add(ptr::null_mut(), invalid.as_ptr()), -1);
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = CStr::from_ptr(lovelog_version()).to_str().unwrap();
            assert!(!version.is_empty());
        }
    }
}
