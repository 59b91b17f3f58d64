////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use crate::{
    features::Availability,
    groups::{resolve_groups, TypedEnum},
    registry::Registry,
};

#[allow(missing_copy_implementations)]
pub struct TypedEnumGenerator;

impl super::Generator for TypedEnumGenerator {
    fn write<W>(&self, registry: &Registry, availability: Option<&Availability>, dest: &mut W) -> io::Result<()>
    where W: io::Write {
        write_header(dest)?;
        for typed in resolve_groups(registry, availability) {
            if typed.is_empty() {
                warn!("group {} has no members left, not writing it", typed.name);
                continue;
            }
            if typed.is_flags {
                write_flags(&typed, dest)?;
            } else {
                write_enum(&typed, dest)?;
            }
        }
        Ok(())
    }
}

fn write_header<W>(dest: &mut W) -> io::Result<()>
where W: io::Write {
    writeln!(dest, "#![allow(non_upper_case_globals, dead_code)]")
}

fn write_comment<W>(typed: &TypedEnum, dest: &mut W) -> io::Result<()>
where W: io::Write {
    writeln!(dest, "\n/// Strongly typed enumeration {}.", typed.name)?;
    if let Some(comment) = &typed.comment {
        writeln!(dest, "///\n/// {}", comment)?;
    }
    Ok(())
}

/// Writes a plain group as a `#[repr]` enum.
fn write_enum<W>(typed: &TypedEnum, dest: &mut W) -> io::Result<()>
where W: io::Write {
    write_comment(typed, dest)?;
    writeln!(
        dest,
        "#[repr({repr})]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum {name} {{",
        repr = typed.repr.rust_type(),
        name = typed.name,
    )?;

    for member in &typed.members {
        writeln!(
            dest,
            "    {doc}
    {ident} = {value},",
            doc = super::gen_member_doc(member),
            ident = member.ident,
            value = super::gen_value_literal(&member.value, typed.repr),
        )?;
    }

    writeln!(dest, "}}")
}

/// Writes a bitmask group as a newtype whose members can be OR-combined.
fn write_flags<W>(typed: &TypedEnum, dest: &mut W) -> io::Result<()>
where W: io::Write {
    write_comment(typed, dest)?;
    writeln!(
        dest,
        "#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct {name}(pub {repr});

impl {name} {{",
        repr = typed.repr.rust_type(),
        name = typed.name,
    )?;

    for member in &typed.members {
        writeln!(
            dest,
            "    {doc}
    pub const {ident}: {name} = {name}({value});",
            doc = super::gen_member_doc(member),
            ident = member.ident,
            name = typed.name,
            value = super::gen_value_literal(&member.value, typed.repr),
        )?;
    }

    writeln!(
        dest,
        "
    pub fn contains(self, other: {name}) -> bool {{
        self.0 & other.0 == other.0
    }}
}}

impl std::ops::BitOr for {name} {{
    type Output = {name};

    fn bitor(self, rhs: {name}) -> {name} {{
        {name}(self.0 | rhs.0)
    }}
}}",
        name = typed.name,
    )
}
