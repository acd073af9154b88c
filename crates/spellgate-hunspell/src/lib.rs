// spellgate-hunspell: `SpellEngine` backed by the system Hunspell library.
//
// Lifecycle:
// - `Hunspell::open` loads libhunspell and calls `Hunspell_create` once.
// - Dropping the value calls `Hunspell_destroy` once.
// - All string encoding for the C API lives in `marshal`; nothing outside this
//   crate sees a raw pointer.

mod ffi;
mod marshal;

use std::ffi::c_char;
use std::path::{Path, PathBuf};
use std::ptr;

use spellgate_core::{EngineError, SpellEngine};

pub use ffi::DEFAULT_LIBRARY_NAMES;

use ffi::{Hunhandle, HunspellApi, ListFn};

/// Errors raised while loading the engine.
#[derive(Debug, thiserror::Error)]
pub enum HunspellError {
    /// The affix or dictionary file does not exist.
    #[error("{kind} file not found: {}", path.display())]
    MissingFile { kind: &'static str, path: PathBuf },

    /// No candidate library could be opened.
    #[error("could not load libhunspell, tried:\n  {}", tried.join("\n  "))]
    Library { tried: Vec<String> },

    /// The library lacks a required entry point.
    #[error("libhunspell is missing symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    /// A path could not be encoded as a C string.
    #[error("path contains a NUL byte: {}", .0.display())]
    PathEncoding(PathBuf),

    /// `Hunspell_create` returned null.
    #[error("Hunspell_create failed for {} / {}", affix.display(), dictionary.display())]
    Create { affix: PathBuf, dictionary: PathBuf },
}

/// A loaded Hunspell dictionary.
///
/// Hunspell keeps per-call scratch state inside the handle, so it must never
/// be entered from two threads at once; every method here takes `&mut self`.
pub struct Hunspell {
    handle: *mut Hunhandle,
    api: HunspellApi,
}

// SAFETY: the handle is only ever used through `&mut self`, so moving the
// owner to another thread cannot create concurrent access.
unsafe impl Send for Hunspell {}

impl Hunspell {
    /// Load the dictionary described by `affix` and `dictionary`.
    ///
    /// `library` overrides the shared library to load; when `None`, the names
    /// in [`DEFAULT_LIBRARY_NAMES`] are tried in order.
    pub fn open(
        library: Option<&Path>,
        affix: &Path,
        dictionary: &Path,
    ) -> Result<Self, HunspellError> {
        // Hunspell_create succeeds even for missing files and then rejects
        // every word, so check up front.
        for (kind, path) in [("affix", affix), ("dictionary", dictionary)] {
            if !path.is_file() {
                return Err(HunspellError::MissingFile {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }

        let api = HunspellApi::load(library)?;

        let c_affix = marshal::path_to_c(affix)
            .ok_or_else(|| HunspellError::PathEncoding(affix.to_path_buf()))?;
        let c_dictionary = marshal::path_to_c(dictionary)
            .ok_or_else(|| HunspellError::PathEncoding(dictionary.to_path_buf()))?;

        let handle = unsafe { (api.create)(c_affix.as_ptr(), c_dictionary.as_ptr()) };
        if handle.is_null() {
            return Err(HunspellError::Create {
                affix: affix.to_path_buf(),
                dictionary: dictionary.to_path_buf(),
            });
        }

        tracing::info!(
            affix = %affix.display(),
            dictionary = %dictionary.display(),
            "hunspell dictionary loaded"
        );

        Ok(Self { handle, api })
    }

    fn list_call(
        &mut self,
        call: ListFn,
        word: &str,
    ) -> Result<Vec<String>, EngineError> {
        let word = marshal::word_to_c(word)?;
        let mut list: *mut *mut c_char = ptr::null_mut();
        let count = unsafe { call(self.handle, &mut list, word.as_ptr()) };
        let out = unsafe { marshal::decode_list(list, count) };
        if !list.is_null() {
            unsafe { (self.api.free_list)(self.handle, &mut list, count.max(0)) };
        }
        if count < 0 {
            return Err(EngineError::Fault(format!("hunspell returned {count}")));
        }
        Ok(out)
    }
}

impl SpellEngine for Hunspell {
    fn check(&mut self, word: &str) -> Result<bool, EngineError> {
        let word = marshal::word_to_c(word)?;
        Ok(unsafe { (self.api.spell)(self.handle, word.as_ptr()) } != 0)
    }

    fn suggest(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
        let call = self.api.suggest;
        self.list_call(call, word)
    }

    fn analyze(&mut self, word: &str) -> Result<Vec<String>, EngineError> {
        let call = self.api.analyze;
        self.list_call(call, word)
    }
}

impl Drop for Hunspell {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { (self.api.destroy)(self.handle) };
            self.handle = ptr::null_mut();
            tracing::debug!("hunspell dictionary released");
        }
    }
}
