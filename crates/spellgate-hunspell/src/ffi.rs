// Runtime binding to the libhunspell C API.
//
// The library is opened with `dlopen` semantics so that the service builds
// without Hunspell headers or import libraries; only the six entry points
// below are used.

use std::ffi::{c_char, c_int};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::HunspellError;

/// Opaque `Hunhandle` from `hunspell.h`.
#[repr(C)]
pub(crate) struct Hunhandle {
    _private: [u8; 0],
}

pub(crate) type CreateFn = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut Hunhandle;
pub(crate) type DestroyFn = unsafe extern "C" fn(*mut Hunhandle);
pub(crate) type SpellFn = unsafe extern "C" fn(*mut Hunhandle, *const c_char) -> c_int;
pub(crate) type ListFn = unsafe extern "C" fn(*mut Hunhandle, *mut *mut *mut c_char, *const c_char) -> c_int;
pub(crate) type FreeListFn = unsafe extern "C" fn(*mut Hunhandle, *mut *mut *mut c_char, c_int);

/// Library names tried, in order, when no explicit path is configured.
pub const DEFAULT_LIBRARY_NAMES: &[&str] = &[
    "libhunspell-1.7.so.0",
    "libhunspell-1.7.so",
    "/usr/lib/libhunspell-1.7.so",
    "libhunspell.so",
    "libhunspell-1.7.0.dylib",
    "libhunspell.dylib",
];

/// Resolved entry points. The `Library` is kept alive alongside them so the
/// function pointers stay valid.
pub(crate) struct HunspellApi {
    pub create: CreateFn,
    pub destroy: DestroyFn,
    pub spell: SpellFn,
    pub suggest: ListFn,
    pub analyze: ListFn,
    pub free_list: FreeListFn,
    _library: Library,
}

impl HunspellApi {
    /// Load libhunspell from `explicit` if given, otherwise from the first of
    /// `DEFAULT_LIBRARY_NAMES` that opens.
    pub fn load(explicit: Option<&Path>) -> Result<Self, HunspellError> {
        let candidates: Vec<PathBuf> = match explicit {
            Some(path) => vec![path.to_path_buf()],
            None => DEFAULT_LIBRARY_NAMES.iter().map(PathBuf::from).collect(),
        };

        let mut tried = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            // SAFETY: libhunspell runs no initialisation code with preconditions.
            match unsafe { Library::new(candidate) } {
                Ok(library) => {
                    tracing::debug!(library = %candidate.display(), "loaded libhunspell");
                    return Self::resolve(library);
                }
                Err(e) => tried.push(format!("{}: {e}", candidate.display())),
            }
        }

        Err(HunspellError::Library { tried })
    }

    fn resolve(library: Library) -> Result<Self, HunspellError> {
        // SAFETY: the signatures match hunspell.h for the 1.x C API.
        unsafe {
            let create = symbol::<CreateFn>(&library, "Hunspell_create")?;
            let destroy = symbol::<DestroyFn>(&library, "Hunspell_destroy")?;
            let spell = symbol::<SpellFn>(&library, "Hunspell_spell")?;
            let suggest = symbol::<ListFn>(&library, "Hunspell_suggest")?;
            let analyze = symbol::<ListFn>(&library, "Hunspell_analyze")?;
            let free_list = symbol::<FreeListFn>(&library, "Hunspell_free_list")?;
            Ok(Self {
                create,
                destroy,
                spell,
                suggest,
                analyze,
                free_list,
                _library: library,
            })
        }
    }
}

unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, HunspellError> {
    let mut bytes = Vec::with_capacity(name.len() + 1);
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(0);
    let sym = unsafe { library.get::<T>(&bytes) }
        .map_err(|source| HunspellError::Symbol { name, source })?;
    Ok(*sym)
}
