////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use crate::{
    features::Availability,
    groups::{parse_value, Repr, TypedMember},
    registry::Registry,
};

pub mod typed_enum_gen;

/// Trait for a bindings generator.
pub trait Generator {
    /// Builds the bindings, restricted to `availability` when one is given.
    fn write<W>(&self, registry: &Registry, availability: Option<&Availability>, dest: &mut W) -> io::Result<()>
    where W: io::Write;
}

/// Rust literal for a registry value stored as `repr`.
///
/// Registry suffixes (`u`, `ull`) are dropped and the Rust type suffix is appended instead; values
/// that do not parse are written as they are.
pub fn gen_value_literal(value: &str, repr: Repr) -> String {
    match parse_value(value) {
        Some(v) if v < 0 => format!("{}{}", v, repr.rust_type()),
        Some(v) => format!("0x{:X}{}", v, repr.rust_type()),
        None => value.to_owned(),
    }
}

/// Doc comment lines for a typed member.
///
/// Example result: `/// Strongly typed for value GL_TEXTURE_3D, GL_TEXTURE_3D_EXT.`
pub fn gen_member_doc(member: &TypedMember) -> String {
    if member.synonyms.is_empty() {
        format!("/// Strongly typed for value {}.", member.binding_name)
    } else {
        format!("/// Strongly typed for value {}.", member.synonyms.join(", "))
    }
}
