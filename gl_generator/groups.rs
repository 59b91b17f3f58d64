////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Resolution of enumerant groups into strongly typed enumerations.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::{
    features::Availability,
    naming,
    registry::{BlockKind, Enumerant, EnumerantGroup, Registry},
};

/// Storage type of a typed enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Repr {
    U32,
    U64,
    I32,
    I64,
}

impl Repr {
    pub fn rust_type(self) -> &'static str {
        match self {
            Repr::U32 => "u32",
            Repr::U64 => "u64",
            Repr::I32 => "i32",
            Repr::I64 => "i64",
        }
    }

    fn bitmask_for(values: &[i128]) -> Repr {
        if values.iter().all(|&v| v <= u32::MAX as i128) {
            Repr::U32
        } else {
            Repr::U64
        }
    }

    fn plain_for(values: &[i128]) -> Repr {
        let fits = |lo: i128, hi: i128| values.iter().all(|&v| v >= lo && v <= hi);

        if fits(i32::MIN as i128, i32::MAX as i128) {
            Repr::I32
        } else if fits(0, u32::MAX as i128) {
            Repr::U32
        } else if fits(i64::MIN as i128, i64::MAX as i128) {
            Repr::I64
        } else {
            Repr::U64
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedMember {
    /// Mixed-case identifier, e.g. `Texture2d`.
    pub ident: String,
    /// Registry name the identifier was derived from; the alias target when there is one.
    pub binding_name: String,
    /// Value literal of the representative enumerant.
    pub value: String,
    /// Every registry name sharing this value, in group order. Empty when there was only one.
    pub synonyms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedEnum {
    pub name: String,
    pub is_flags: bool,
    pub repr: Repr,
    pub members: Vec<TypedMember>,
    pub comment: Option<String>,
}

impl TypedEnum {
    /// `(member name, value, is flags, synonyms)` for each member, in output order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, bool, &[String])> + '_ {
        let is_flags = self.is_flags;
        self.members
            .iter()
            .map(move |m| (m.ident.as_str(), m.value.as_str(), is_flags, m.synonyms.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Parses a registry value literal: decimal or `0x` hex, optionally negative, with an optional
/// `u`/`ull` style suffix.
pub fn parse_value(literal: &str) -> Option<i128> {
    let literal = literal.trim();
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };

    let (radix, digits) = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, digits),
    };
    let digits = digits.trim_end_matches(|c: char| c == 'u' || c == 'U' || c == 'l' || c == 'L');

    let magnitude = u64::from_str_radix(digits, radix).ok()? as i128;
    Some(if negative { -magnitude } else { magnitude })
}

/// Resolves `group` against every enumerant of the registry.
pub fn resolve_group(registry: &Registry, group: &EnumerantGroup) -> TypedEnum {
    resolve_with(registry, group, |_| true)
}

/// Resolves `group`, keeping only members available in `availability`.
pub fn resolve_group_in(registry: &Registry, group: &EnumerantGroup, availability: &Availability) -> TypedEnum {
    resolve_with(registry, group, |name| availability.contains(name))
}

/// Resolves every group of the registry, in declaration order.
pub fn resolve_groups(registry: &Registry, availability: Option<&Availability>) -> Vec<TypedEnum> {
    registry
        .groups()
        .map(|group| match availability {
            Some(availability) => resolve_group_in(registry, group, availability),
            None => resolve_group(registry, group),
        })
        .collect()
}

fn resolve_with<F>(registry: &Registry, group: &EnumerantGroup, mut keep: F) -> TypedEnum
where F: FnMut(&str) -> bool {
    let mut seen = IndexSet::new();
    let resolved: Vec<&Enumerant> = group
        .members
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .filter(|name| keep(name))
        .filter_map(|name| {
            let enm = registry.enumerant(name);
            if enm.is_none() {
                debug!("group {}: dropping unresolved member {}", group.name, name);
            }
            enm
        })
        .collect();

    let is_flags = !resolved.is_empty() && resolved.iter().all(|enm| registry.block_of(enm).kind == BlockKind::Bitmask);

    // the same constant is often declared once in core and again per vendor
    let mut buckets: IndexMap<&str, Vec<&Enumerant>> = IndexMap::new();
    for enm in &resolved {
        buckets.entry(enm.value.as_str()).or_default().push(enm);
    }

    let mut idents = HashSet::new();
    let mut members = Vec::with_capacity(buckets.len());
    for bucket in buckets.values() {
        let representative = shortest_name(bucket);

        let (ident, binding_name) = match canonical_name(registry, group, representative, &idents) {
            Some(named) => named,
            None => {
                warn!(
                    "group {}: dropping {} ({}), its identifier is already taken",
                    group.name, representative.name, representative.value
                );
                continue;
            },
        };
        idents.insert(ident.clone());

        members.push(TypedMember {
            ident,
            binding_name,
            value: representative.value.clone(),
            synonyms: if bucket.len() > 1 { bucket.iter().map(|enm| enm.name.clone()).collect() } else { Vec::new() },
        });
    }

    let values: Vec<i128> = members.iter().filter_map(|m| parse_value(&m.value)).collect();
    let repr = if is_flags { Repr::bitmask_for(&values) } else { Repr::plain_for(&values) };

    TypedEnum { name: group.name.clone(), is_flags, repr, members, comment: group.comment.clone() }
}

/// Shortest name wins; among equally long names the first declared one does.
fn shortest_name<'a>(bucket: &[&'a Enumerant]) -> &'a Enumerant {
    let mut best = bucket[0];
    for &enm in &bucket[1..] {
        if enm.name.len() < best.name.len() {
            best = enm;
        }
    }
    best
}

/// Picks `(ident, binding name)` for a representative, preferring its alias target.
///
/// Falls back to the representative's own name when the alias identifier is taken.
fn canonical_name(
    registry: &Registry,
    group: &EnumerantGroup,
    representative: &Enumerant,
    taken: &HashSet<String>,
) -> Option<(String, String)> {
    let alias = representative.alias.as_deref().and_then(|alias| match registry.enumerant(alias) {
        Some(target) => Some(target.name.as_str()),
        None => {
            warn!("group {}: alias {} of {} is not in the registry", group.name, alias, representative.name);
            None
        },
    });

    alias
        .into_iter()
        .chain(std::iter::once(representative.name.as_str()))
        .map(|binding| (naming::binding_ident(naming::implementation_name(binding)), binding.to_owned()))
        .find(|(ident, _)| !taken.contains(ident))
}
