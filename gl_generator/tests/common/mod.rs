#![allow(dead_code)]

use gl_typed_generator::{
    Api, CommandRecord, DeltaRecord, EnumerantBlockRecord, EnumerantGroupRecord, EnumerantRecord, ExtensionRecord,
    FeatureRecord, ParamKind, Profile, RegistryRecord, TypeRecord, Version,
};

pub fn enm(name: &str, value: &str) -> EnumerantRecord {
    EnumerantRecord { name: name.to_owned(), value: value.to_owned(), alias: None }
}

pub fn aliased(name: &str, value: &str, alias: &str) -> EnumerantRecord {
    EnumerantRecord { alias: Some(alias.to_owned()), ..enm(name, value) }
}

pub fn block(ty: Option<&str>, enums: Vec<EnumerantRecord>) -> RegistryRecord {
    RegistryRecord::Block(EnumerantBlockRecord {
        namespace: "GL".to_owned(),
        ty: ty.map(str::to_owned),
        comment: None,
        enums,
    })
}

pub fn bitmask(enums: Vec<EnumerantRecord>) -> RegistryRecord {
    block(Some("bitmask"), enums)
}

pub fn plain(enums: Vec<EnumerantRecord>) -> RegistryRecord {
    block(None, enums)
}

pub fn group(name: &str, members: &[&str]) -> RegistryRecord {
    RegistryRecord::Group(EnumerantGroupRecord {
        name: name.to_owned(),
        members: members.iter().map(|m| m.to_string()).collect(),
        comment: None,
    })
}

pub fn command(name: &str, aliases: &[&str]) -> RegistryRecord {
    RegistryRecord::Command(CommandRecord {
        name: name.to_owned(),
        ret: TypeRecord { ty: "void".to_owned(), kind: ParamKind::Scalar },
        params: Vec::new(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
    })
}

pub fn delta(enums: &[&str], commands: &[&str]) -> DeltaRecord {
    DeltaRecord {
        profile: None,
        enums: enums.iter().map(|e| e.to_string()).collect(),
        commands: commands.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn profiled(profile: Profile, delta: DeltaRecord) -> DeltaRecord {
    DeltaRecord { profile: Some(profile), ..delta }
}

pub fn feature(name: &str, version: (u8, u8), requires: Vec<DeltaRecord>, removes: Vec<DeltaRecord>) -> RegistryRecord {
    RegistryRecord::Feature(FeatureRecord {
        name: name.to_owned(),
        api: Api::Gl,
        version: Version::from(version),
        profile: None,
        requires,
        removes,
    })
}

pub fn extension(name: &str, supported: &[Api], requires: Vec<DeltaRecord>) -> RegistryRecord {
    RegistryRecord::Extension(ExtensionRecord { name: name.to_owned(), supported: supported.to_vec(), requires })
}
