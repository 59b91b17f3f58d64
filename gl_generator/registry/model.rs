////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use indexmap::{map::Entry, IndexMap};
use serde::{Deserialize, Serialize};

use super::{
    Api, CommandRecord, DeltaRecord, EnumerantBlockRecord, ExtensionRecord, FeatureRecord, Profile,
    RegistryError, RegistryRecord, RegistrySnapshot, Version,
};
use crate::{features::Availability, generators::Generator};

/// Index of an `EnumerantBlock` inside its `Registry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockId(usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Values are meant to be OR-combined.
    Bitmask,
    Plain,
}

impl BlockKind {
    pub fn from_type_tag(tag: Option<&str>) -> BlockKind {
        match tag {
            Some("bitmask") => BlockKind::Bitmask,
            _ => BlockKind::Plain,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enumerant {
    pub name: String,
    pub value: String,
    /// Canonical synonym, by name. May point at an enumerant the registry does not hold.
    pub alias: Option<String>,
    pub block: BlockId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerantBlock {
    pub namespace: String,
    pub kind: BlockKind,
    pub comment: Option<String>,
    /// Names of the enumerants defined here, in declaration order.
    pub enumerants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerantGroup {
    pub name: String,
    /// Member references by name, resolved only when the group is.
    pub members: Vec<String>,
    pub comment: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Scalar,
    Pointer,
    Array(usize),
    Handle,
}

impl Default for ParamKind {
    fn default() -> ParamKind {
        ParamKind::Scalar
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDesc {
    pub ty: String,
    pub kind: ParamKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeDesc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub ret: TypeDesc,
    pub params: Vec<Param>,
    /// Other entry points for the same operation, most preferred first.
    pub aliases: Vec<String>,
    /// Names of the features and extensions requiring this command.
    pub required_by: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delta {
    pub profile: Option<Profile>,
    pub enums: Vec<String>,
    pub commands: Vec<String>,
}

impl From<DeltaRecord> for Delta {
    fn from(record: DeltaRecord) -> Delta {
        Delta { profile: record.profile, enums: record.enums, commands: record.commands }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub api: Api,
    pub version: Version,
    pub profile: Option<Profile>,
    pub requires: Vec<Delta>,
    pub removes: Vec<Delta>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub supported: Vec<Api>,
    pub requires: Vec<Delta>,
}

impl Extension {
    /// An extension listing no API at all is taken to support every API.
    pub fn supports(&self, api: Api) -> bool {
        self.supported.is_empty() || self.supported.contains(&api)
    }
}

/// The immutable in-memory registry.
///
/// Built once from parsed records; every engine only reads it, so a shared reference can be
/// handed to any number of threads.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    blocks: Vec<EnumerantBlock>,
    enumerants: IndexMap<String, Enumerant>,
    groups: Vec<EnumerantGroup>,
    commands: IndexMap<String, Command>,
    /// Sorted by api, then version; declaration order breaks ties.
    features: Vec<Feature>,
    extensions: IndexMap<String, Extension>,
}

impl Registry {
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> Result<Registry, RegistryError> {
        if snapshot.schema_version != super::SCHEMA_VERSION {
            return Err(RegistryError::UnsupportedSchema {
                found: snapshot.schema_version,
                expected: super::SCHEMA_VERSION,
            });
        }
        Registry::from_records(snapshot.records)
    }

    pub fn from_json(json: &str) -> Result<Registry, RegistryError> {
        Registry::from_snapshot(RegistrySnapshot::from_json(json)?)
    }

    pub fn from_records<I>(records: I) -> Result<Registry, RegistryError>
    where I: IntoIterator<Item = RegistryRecord> {
        let mut registry = Registry::default();

        for record in records {
            match record {
                RegistryRecord::Block(block) => registry.add_block(block)?,
                RegistryRecord::Group(group) => registry.groups.push(EnumerantGroup {
                    name: group.name,
                    members: group.members,
                    comment: group.comment,
                }),
                RegistryRecord::Command(cmd) => registry.add_command(cmd)?,
                RegistryRecord::Feature(feature) => registry.add_feature(feature)?,
                RegistryRecord::Extension(ext) => registry.add_extension(ext)?,
            }
        }

        // stable, so features sharing a version keep their declaration order
        registry.features.sort_by_key(|f| (f.api, f.version));
        registry.link_required_by();

        debug!(
            "registry loaded: {} enumerants in {} blocks, {} groups, {} commands, {} features, {} extensions",
            registry.enumerants.len(),
            registry.blocks.len(),
            registry.groups.len(),
            registry.commands.len(),
            registry.features.len(),
            registry.extensions.len()
        );

        Ok(registry)
    }

    fn add_block(&mut self, record: EnumerantBlockRecord) -> Result<(), RegistryError> {
        let id = BlockId(self.blocks.len());
        let mut block = EnumerantBlock {
            namespace: record.namespace,
            kind: BlockKind::from_type_tag(record.ty.as_deref()),
            comment: record.comment,
            enumerants: Vec::with_capacity(record.enums.len()),
        };

        for enm in record.enums {
            match self.enumerants.entry(enm.name) {
                Entry::Occupied(e) => return Err(RegistryError::DuplicateEnumerant(e.key().clone())),
                Entry::Vacant(e) => {
                    block.enumerants.push(e.key().clone());
                    let name = e.key().clone();
                    e.insert(Enumerant { name, value: enm.value, alias: enm.alias, block: id });
                },
            }
        }

        self.blocks.push(block);
        Ok(())
    }

    fn add_command(&mut self, record: CommandRecord) -> Result<(), RegistryError> {
        match self.commands.entry(record.name) {
            Entry::Occupied(e) => Err(RegistryError::DuplicateCommand(e.key().clone())),
            Entry::Vacant(e) => {
                let name = e.key().clone();
                e.insert(Command {
                    name,
                    ret: TypeDesc { ty: record.ret.ty, kind: record.ret.kind },
                    params: record
                        .params
                        .into_iter()
                        .map(|p| Param { name: p.name, ty: TypeDesc { ty: p.ty, kind: p.kind } })
                        .collect(),
                    aliases: record.aliases,
                    required_by: Vec::new(),
                });
                Ok(())
            },
        }
    }

    fn add_feature(&mut self, record: FeatureRecord) -> Result<(), RegistryError> {
        if self.features.iter().any(|f| f.name == record.name) {
            return Err(RegistryError::DuplicateFeature(record.name));
        }
        self.features.push(Feature {
            name: record.name,
            api: record.api,
            version: record.version,
            profile: record.profile,
            requires: record.requires.into_iter().map(Delta::from).collect(),
            removes: record.removes.into_iter().map(Delta::from).collect(),
        });
        Ok(())
    }

    fn add_extension(&mut self, record: ExtensionRecord) -> Result<(), RegistryError> {
        match self.extensions.entry(record.name) {
            Entry::Occupied(e) => Err(RegistryError::DuplicateExtension(e.key().clone())),
            Entry::Vacant(e) => {
                let name = e.key().clone();
                e.insert(Extension {
                    name,
                    supported: record.supported,
                    requires: record.requires.into_iter().map(Delta::from).collect(),
                });
                Ok(())
            },
        }
    }

    /// Fills `Command::required_by` from every feature and extension require delta.
    fn link_required_by(&mut self) {
        let features = self.features.iter().map(|f| (&f.name, &f.requires));
        let extensions = self.extensions.values().map(|e| (&e.name, &e.requires));
        let commands = &mut self.commands;

        for (owner, requires) in features.chain(extensions) {
            for name in requires.iter().flat_map(|d| d.commands.iter()) {
                if let Some(cmd) = commands.get_mut(name) {
                    if !cmd.required_by.contains(owner) {
                        cmd.required_by.push(owner.clone());
                    }
                }
            }
        }
    }

    pub fn enumerant(&self, name: &str) -> Option<&Enumerant> {
        self.enumerants.get(name)
    }

    pub fn enumerants(&self) -> impl Iterator<Item = &Enumerant> {
        self.enumerants.values()
    }

    pub fn block(&self, id: BlockId) -> &EnumerantBlock {
        &self.blocks[id.0]
    }

    pub fn block_of(&self, enm: &Enumerant) -> &EnumerantBlock {
        self.block(enm.block)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &EnumerantBlock> {
        self.blocks.iter()
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn group(&self, name: &str) -> Option<&EnumerantGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &EnumerantGroup> {
        self.groups.iter()
    }

    /// Features of `api`, lowest version first.
    pub fn features(&self, api: Api) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(move |f| f.api == api)
    }

    pub fn extension(&self, name: &str) -> Option<&Extension> {
        self.extensions.get(name)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.values()
    }

    /// Writes bindings for this registry with the given generator.
    ///
    /// With an `Availability`, only symbols available in that configuration are written.
    pub fn write_bindings<G, W>(&self, availability: Option<&Availability>, generator: G, output: &mut W) -> io::Result<()>
    where
        G: Generator,
        W: io::Write,
    {
        generator.write(self, availability, output)
    }
}
