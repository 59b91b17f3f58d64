////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Parsed registry records, as handed over by a registry parser.
//!
//! These are plain data; `Registry::from_records` turns them into the immutable model.

use serde::{Deserialize, Serialize};

use super::{Api, ParamKind, Profile, RegistryError, Version};

/// The only snapshot layout this crate reads.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub schema_version: u32,
    #[serde(default)]
    pub records: Vec<RegistryRecord>,
}

impl RegistrySnapshot {
    pub fn new(records: Vec<RegistryRecord>) -> RegistrySnapshot {
        RegistrySnapshot { schema_version: SCHEMA_VERSION, records }
    }

    pub fn from_json(json: &str) -> Result<RegistrySnapshot, RegistryError> {
        let snapshot: RegistrySnapshot = serde_json::from_str(json)?;
        if snapshot.schema_version != SCHEMA_VERSION {
            return Err(RegistryError::UnsupportedSchema { found: snapshot.schema_version, expected: SCHEMA_VERSION });
        }
        Ok(snapshot)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryRecord {
    Block(EnumerantBlockRecord),
    Group(EnumerantGroupRecord),
    Command(CommandRecord),
    Feature(FeatureRecord),
    Extension(ExtensionRecord),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerantRecord {
    pub name: String,
    /// Literal as written in the registry, e.g. `0x0DE1` or `0xFFFFFFFFu`.
    pub value: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerantBlockRecord {
    pub namespace: String,
    /// `"bitmask"` for OR-able values; anything else (usually absent) is a plain block.
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub enums: Vec<EnumerantRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerantGroupRecord {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub ty: String,
    #[serde(default)]
    pub kind: ParamKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamRecord {
    pub name: String,
    pub ty: String,
    #[serde(default)]
    pub kind: ParamKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub name: String,
    #[serde(default = "void_return")]
    pub ret: TypeRecord,
    #[serde(default)]
    pub params: Vec<ParamRecord>,
    /// Alternative entry points, most preferred first.
    #[serde(default)]
    pub aliases: Vec<String>,
}

fn void_return() -> TypeRecord {
    TypeRecord { ty: "void".to_owned(), kind: ParamKind::Scalar }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaRecord {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub enums: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub name: String,
    pub api: Api,
    pub version: Version,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub requires: Vec<DeltaRecord>,
    #[serde(default)]
    pub removes: Vec<DeltaRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    pub name: String,
    #[serde(default)]
    pub supported: Vec<Api>,
    #[serde(default)]
    pub requires: Vec<DeltaRecord>,
}
