////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use thiserror::Error;

/// Errors raised while building a `Registry` from parsed records.
///
/// Dangling references (group members, aliases) are not errors: vendor data routinely points at
/// extensions missing from a snapshot, so those are dropped when the registry is used.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("enumerant `{0}` is defined more than once")]
    DuplicateEnumerant(String),
    #[error("command `{0}` is defined more than once")]
    DuplicateCommand(String),
    #[error("feature `{0}` is defined more than once")]
    DuplicateFeature(String),
    #[error("extension `{0}` is defined more than once")]
    DuplicateExtension(String),
    #[error("unsupported registry schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
    #[error("malformed registry snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown api `{0}`")]
    UnknownApi(String),
    #[error("unknown profile `{0}`")]
    UnknownProfile(String),
    #[error("invalid version `{0}`, expected `major.minor`")]
    InvalidVersion(String),
}
