////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Binds registry commands to native entry points, one dispatch table per context.
//!
//! Each command gets a fallback chain (its own name, then its aliases in preference order). On a
//! context, the first name the loader resolves is bound and remembered, so callers can tell which
//! vendor variant actually runs.
//!
//! ```ignore
//! let table = Arc::new(DispatchTable::for_availability(&registry, &available, Fallbacks::All));
//! let gl = DispatchContext::load_with(table, |s| window.get_proc_address(s));
//!
//! let clear = gl.table().id("glClear").unwrap();
//! gl.invoke(clear, |cmd| unsafe { cmd.cast::<extern "system" fn(u32)>()(mask) })?;
//! ```

#[macro_use]
extern crate log;

mod chain;
mod context;
mod error;
mod loader;
mod pin;

pub use chain::{Binding, FallbackChain};
pub use context::{BoundCommand, CommandId, DispatchContext, DispatchTable};
pub use error::{DispatchError, LoaderError};
pub use loader::{EntryPoint, LibraryLoader, SymbolLoader};
pub use pin::{PinTracker, PinnedBuffer};
