// String marshaling between Rust and the Hunspell C API.
//
// Rules:
// - Words and paths go in as null-terminated C strings owned by the caller
//   for the duration of the call.
// - Lists come back as `char**` with an element count; they are copied into
//   owned `String`s before the list is handed back to Hunspell for freeing.

use std::ffi::{CStr, CString, c_char, c_int};
use std::path::Path;

use spellgate_core::EngineError;

/// Encode a word as a C string.
pub(crate) fn word_to_c(word: &str) -> Result<CString, EngineError> {
    CString::new(word).map_err(|_| EngineError::InteriorNul {
        word: word.to_string(),
    })
}

/// Encode a filesystem path as a C string, or `None` if it contains NUL.
pub(crate) fn path_to_c(path: &Path) -> Option<CString> {
    CString::new(path.to_string_lossy().as_bytes()).ok()
}

/// Copy `count` C strings out of `list`.
///
/// A null list or a non-positive count yields an empty vector. Invalid UTF-8
/// is replaced rather than rejected (dictionaries are not always UTF-8).
///
/// # Safety
/// `list` must be null or point to at least `count` valid pointers, each
/// null or pointing to a null-terminated string, all alive for this call.
pub(crate) unsafe fn decode_list(list: *const *mut c_char, count: c_int) -> Vec<String> {
    if list.is_null() || count <= 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let p = unsafe { *list.add(i) };
        if p.is_null() {
            continue;
        }
        out.push(unsafe { CStr::from_ptr(p) }.to_string_lossy().into_owned());
    }
    out
}
