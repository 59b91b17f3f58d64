////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! An OpenGL registry model and typed bindings resolver.
//!
//! A registry parser hands over plain records; `Registry::from_records` turns them into an
//! immutable model. From there:
//!
//! - `linearize` folds the versioned feature deltas and enabled extensions of a `Target` into the
//!   set of available symbols,
//! - `resolve_group` turns an enumerant group into a deduplicated, typed enumeration,
//! - the `gl_loader` crate binds commands to native entry points per context.
//!
//! # Example
//!
//! ```no_run
//! use gl_typed_generator::{linearize, Api, Profile, Registry, Target, TypedEnumGenerator};
//! use std::fs;
//!
//! let json = fs::read_to_string("gl_registry.json").unwrap();
//! let registry = Registry::from_json(&json).unwrap();
//!
//! let target = Target::new(Api::Gl, (4, 6))
//!     .with_profile(Profile::Core)
//!     .with_extension("GL_EXT_texture_filter_anisotropic");
//! let available = linearize(&registry, &target);
//!
//! let mut out = Vec::new();
//! registry.write_bindings(Some(&available), TypedEnumGenerator, &mut out).unwrap();
//! ```

#[macro_use]
extern crate log;

#[cfg(feature = "unstable_generator_utils")]
pub mod generators;
#[cfg(not(feature = "unstable_generator_utils"))]
mod generators;

mod features;
mod groups;
pub mod naming;
mod registry;

pub use features::{linearize, Availability, Provenance, Symbol, SymbolKind, Target};
pub use generators::{typed_enum_gen::TypedEnumGenerator, Generator};
pub use groups::{parse_value, resolve_group, resolve_group_in, resolve_groups, Repr, TypedEnum, TypedMember};

pub use registry::*;
