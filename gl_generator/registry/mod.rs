////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{convert::TryFrom, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod error;
mod model;
mod records;

pub use self::{error::*, model::*, records::*};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Api {
    Gl,
    Glx,
    Wgl,
    Egl,
    GlCore,
    Gles1,
    Gles2,
    Glsc2,
}

impl fmt::Display for Api {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Api::Gl => write!(fmt, "gl"),
            Api::Glx => write!(fmt, "glx"),
            Api::Wgl => write!(fmt, "wgl"),
            Api::Egl => write!(fmt, "egl"),
            Api::GlCore => write!(fmt, "glcore"),
            Api::Gles1 => write!(fmt, "gles1"),
            Api::Gles2 => write!(fmt, "gles2"),
            Api::Glsc2 => write!(fmt, "glsc2"),
        }
    }
}

impl FromStr for Api {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Api, ParseError> {
        match s {
            "gl" => Ok(Api::Gl),
            "glx" => Ok(Api::Glx),
            "wgl" => Ok(Api::Wgl),
            "egl" => Ok(Api::Egl),
            "glcore" => Ok(Api::GlCore),
            "gles1" => Ok(Api::Gles1),
            "gles2" => Ok(Api::Gles2),
            "glsc2" => Ok(Api::Glsc2),
            _ => Err(ParseError::UnknownApi(s.to_owned())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Core,
    Compatibility,
}

impl Profile {
    /// Whether a delta tagged with `tag` applies when `requested` was asked for.
    ///
    /// Untagged deltas apply to every configuration, tagged ones only to their own profile.
    pub fn applies(tag: Option<Profile>, requested: Option<Profile>) -> bool {
        match tag {
            None => true,
            Some(tag) => requested == Some(tag),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Profile::Core => write!(fmt, "core"),
            Profile::Compatibility => write!(fmt, "compatibility"),
        }
    }
}

impl FromStr for Profile {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Profile, ParseError> {
        match s {
            "core" => Ok(Profile::Core),
            "compatibility" => Ok(Profile::Compatibility),
            _ => Err(ParseError::UnknownProfile(s.to_owned())),
        }
    }
}

/// A `major.minor` API version. Ordering is numeric, so `4.10 > 4.6`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version::new(major, minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Version, ParseError> {
        let invalid = || ParseError::InvalidVersion(s.to_owned());
        let mut parts = s.trim().splitn(2, '.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => p.parse().map_err(|_| invalid())?,
            None => 0,
        };
        Ok(Version::new(major, minor))
    }
}

impl TryFrom<String> for Version {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Version, ParseError> {
        s.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> String {
        version.to_string()
    }
}

/// Whether dispatch chains include a command's alias names after its primary name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fallbacks {
    All,
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugPrints {
    None,
    FunctionCalls,
}

/// Whether an error-query command runs after every dispatched call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorChecks {
    None,
    AfterEachCall,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ordering_is_numeric() {
        let v4_6: Version = "4.6".parse().unwrap();
        let v4_10: Version = "4.10".parse().unwrap();
        assert!(v4_6 < v4_10);
        assert_eq!("3".parse::<Version>().unwrap(), Version::new(3, 0));
        assert!("x.1".parse::<Version>().is_err());
        assert!("4.".parse::<Version>().is_err());
    }

    #[test]
    fn api_round_trips_registry_spelling() {
        for api in &[Api::Gl, Api::GlCore, Api::Gles2, Api::Wgl] {
            assert_eq!(api.to_string().parse::<Api>().unwrap(), *api);
        }
        assert!("vulkan".parse::<Api>().is_err());
    }

    #[test]
    fn untagged_profile_applies_everywhere() {
        assert!(Profile::applies(None, None));
        assert!(Profile::applies(None, Some(Profile::Core)));
        assert!(Profile::applies(Some(Profile::Core), Some(Profile::Core)));
        assert!(!Profile::applies(Some(Profile::Core), Some(Profile::Compatibility)));
        assert!(!Profile::applies(Some(Profile::Core), None));
    }
}
