////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Folds versioned require/remove deltas and extensions into the symbol set of one
//! configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::registry::{Api, Delta, Feature, Profile, Registry, Version};

/// The configuration bindings are generated for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub api: Api,
    pub version: Version,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub extensions: BTreeSet<String>,
}

impl Target {
    pub fn new<V: Into<Version>>(api: Api, version: V) -> Target {
        Target { api, version: version.into(), profile: None, extensions: BTreeSet::new() }
    }

    pub fn with_profile(mut self, profile: Profile) -> Target {
        self.profile = Some(profile);
        self
    }

    pub fn with_extension<S: Into<String>>(mut self, name: S) -> Target {
        self.extensions.insert(name.into());
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Enum,
    Command,
}

/// What made a symbol available.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Provenance {
    Feature { name: String, api: Api, version: Version },
    Extension(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub provenance: Provenance,
}

/// The symbols available for one `Target`, with where each came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Availability {
    target: Target,
    symbols: BTreeMap<String, Symbol>,
}

impl Availability {
    fn empty(target: &Target) -> Availability {
        Availability { target: target.clone(), symbols: BTreeMap::new() }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn provenance(&self, name: &str) -> Option<&Provenance> {
        self.symbols.get(name).map(|s| &s.provenance)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All available names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn enumerants(&self) -> impl Iterator<Item = &str> {
        self.of_kind(SymbolKind::Enum)
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.of_kind(SymbolKind::Command)
    }

    fn of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &str> {
        self.symbols.iter().filter(move |(_, s)| s.kind == kind).map(|(name, _)| name.as_str())
    }

    fn require(&mut self, delta: &Delta, provenance: &Provenance) {
        for (kind, name) in symbols_of(delta) {
            self.symbols
                .entry(name.clone())
                .or_insert_with(|| Symbol { kind, provenance: provenance.clone() });
        }
    }

    fn remove(&mut self, delta: &Delta) {
        for (_, name) in symbols_of(delta) {
            self.symbols.remove(name);
        }
    }
}

fn symbols_of(delta: &Delta) -> impl Iterator<Item = (SymbolKind, &String)> {
    let enums = delta.enums.iter().map(|name| (SymbolKind::Enum, name));
    let commands = delta.commands.iter().map(|name| (SymbolKind::Command, name));
    enums.chain(commands)
}

/// Computes the symbols available for `target`.
///
/// Core features of the target API are folded lowest version first. Within one version every
/// require is applied before any remove, so a symbol removed at version V stays gone for every
/// later version unless a later feature requires it again. Features sharing a version are visited
/// by name, which settles provenance when several of them require the same symbol. Enabled
/// extensions are unioned in last and never lose symbols to a core remove. A target with no core
/// feature at or below its version yields an empty set.
pub fn linearize(registry: &Registry, target: &Target) -> Availability {
    let mut availability = Availability::empty(target);

    // features sharing a version fold as one step, so their declaration order is irrelevant
    let mut by_version: BTreeMap<Version, Vec<&Feature>> = BTreeMap::new();
    for feature in registry
        .features(target.api)
        .filter(|f| f.version <= target.version && Profile::applies(f.profile, target.profile))
    {
        by_version.entry(feature.version).or_default().push(feature);
    }

    if by_version.is_empty() {
        debug!("no {} feature at or below {}, nothing is available", target.api, target.version);
        return availability;
    }

    for (version, mut features) in by_version {
        features.sort_by(|a, b| a.name.cmp(&b.name));

        for feature in &features {
            let provenance = Provenance::Feature { name: feature.name.clone(), api: feature.api, version };
            for delta in feature.requires.iter().filter(|d| Profile::applies(d.profile, target.profile)) {
                availability.require(delta, &provenance);
            }
        }
        for feature in &features {
            for delta in feature.removes.iter().filter(|d| Profile::applies(d.profile, target.profile)) {
                availability.remove(delta);
            }
        }

        debug!("folded {} feature(s) of {}: {} symbols", features.len(), version, availability.len());
    }

    for name in &target.extensions {
        let ext = match registry.extension(name) {
            Some(ext) => ext,
            None => {
                warn!("extension {} is not in the registry, skipping it", name);
                continue;
            },
        };
        if !ext.supports(target.api) {
            warn!("extension {} does not support {}, skipping it", name, target.api);
            continue;
        }

        let provenance = Provenance::Extension(ext.name.clone());
        for delta in &ext.requires {
            availability.require(delta, &provenance);
        }
    }

    availability
}
