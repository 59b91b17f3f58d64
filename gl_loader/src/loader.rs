////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{
    ffi::{c_void, OsStr},
    ptr::NonNull,
};

use libloading::Library;

use crate::LoaderError;

/// A non-null native entry point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryPoint(NonNull<c_void>);

// code addresses stay valid for the lifetime of the library that provided them, on every thread
unsafe impl Send for EntryPoint {}
unsafe impl Sync for EntryPoint {}

impl EntryPoint {
    /// Returns `None` for a null pointer, which is how loaders report a missing symbol.
    pub fn new(ptr: *const c_void) -> Option<EntryPoint> {
        NonNull::new(ptr as *mut c_void).map(EntryPoint)
    }

    pub fn as_ptr(self) -> *const c_void {
        self.0.as_ptr()
    }
}

/// Looks up native symbols for one execution context.
pub trait SymbolLoader {
    fn resolve(&self, symbol: &str) -> Option<EntryPoint>;
}

/// Any `load_with` style closure, e.g. `|s| window.get_proc_address(s)`.
impl<F> SymbolLoader for F
where F: Fn(&str) -> *const c_void
{
    fn resolve(&self, symbol: &str) -> Option<EntryPoint> {
        EntryPoint::new(self(symbol))
    }
}

/// Resolves symbols exported by a shared library, e.g. `libGL.so.1` or `opengl32.dll`.
#[derive(Debug)]
pub struct LibraryLoader {
    library: Library,
}

impl LibraryLoader {
    /// Opens the library at `path`.
    ///
    /// # Safety
    ///
    /// Loading a library runs its initialisers; see `libloading::Library::new`.
    pub unsafe fn open<P: AsRef<OsStr>>(path: P) -> Result<LibraryLoader, LoaderError> {
        let path = path.as_ref();
        let library = Library::new(path)
            .map_err(|source| LoaderError::Open { path: path.to_string_lossy().into_owned(), source })?;
        Ok(LibraryLoader { library })
    }
}

impl SymbolLoader for LibraryLoader {
    fn resolve(&self, symbol: &str) -> Option<EntryPoint> {
        let mut name = Vec::with_capacity(symbol.len() + 1);
        name.extend_from_slice(symbol.as_bytes());
        name.push(0);

        let ptr = unsafe { self.library.get::<*const c_void>(&name) }.ok()?;
        EntryPoint::new(*ptr)
    }
}
