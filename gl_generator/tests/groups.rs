mod common;

use common::*;
use gl_typed_generator::{
    linearize, resolve_group, resolve_group_in, resolve_groups, Api, Registry, Repr, Target,
};
use proptest::prelude::*;

fn resolve(registry: &Registry, name: &str) -> gl_typed_generator::TypedEnum {
    resolve_group(registry, registry.group(name).unwrap())
}

#[test]
fn duplicate_values_keep_the_shortest_name() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("FOO_X", "0x10"), enm("BAR_X_LONG", "0x10")]),
        group("Dup", &["BAR_X_LONG", "FOO_X"]),
    ])
    .unwrap();

    let typed = resolve(&registry, "Dup");
    assert_eq!(typed.members.len(), 1);
    assert_eq!(typed.members[0].binding_name, "FOO_X");
    assert_eq!(typed.members[0].ident, "FooX");
    assert_eq!(typed.members[0].value, "0x10");
    assert_eq!(typed.members[0].synonyms, vec!["BAR_X_LONG", "FOO_X"]);
}

#[test]
fn equally_short_names_keep_declaration_order() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_AAA", "1"), enm("GL_BBB", "1"), enm("GL_CC", "2")]),
        group("Tie", &["GL_BBB", "GL_AAA", "GL_CC"]),
    ])
    .unwrap();

    let typed = resolve(&registry, "Tie");
    let names: Vec<_> = typed.members.iter().map(|m| m.binding_name.as_str()).collect();
    assert_eq!(names, vec!["GL_BBB", "GL_CC"]);
    assert!(typed.members[1].synonyms.is_empty());
}

#[test]
fn bitmask_only_when_every_member_is_from_a_bitmask_block() {
    let registry = Registry::from_records(vec![
        bitmask(vec![
            enm("GL_DEPTH_BUFFER_BIT", "0x00000100"),
            enm("GL_STENCIL_BUFFER_BIT", "0x00000400"),
            enm("GL_COLOR_BUFFER_BIT", "0x00004000"),
        ]),
        plain(vec![enm("GL_NONE", "0")]),
        group("ClearBufferMask", &["GL_DEPTH_BUFFER_BIT", "GL_STENCIL_BUFFER_BIT", "GL_COLOR_BUFFER_BIT"]),
        group("Mixed", &["GL_DEPTH_BUFFER_BIT", "GL_STENCIL_BUFFER_BIT", "GL_COLOR_BUFFER_BIT", "GL_NONE"]),
        group("Nothing", &["GL_MISSING"]),
    ])
    .unwrap();

    let mask = resolve(&registry, "ClearBufferMask");
    assert!(mask.is_flags);
    assert_eq!(mask.repr, Repr::U32);

    let mixed = resolve(&registry, "Mixed");
    assert!(!mixed.is_flags);
    assert_eq!(mixed.repr, Repr::I32);

    let nothing = resolve(&registry, "Nothing");
    assert!(!nothing.is_flags);
    assert!(nothing.is_empty());
}

#[test]
fn unresolved_members_are_dropped() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_TEXTURE_2D", "0x0DE1")]),
        group("TextureTarget", &["GL_TEXTURE_1D", "GL_TEXTURE_2D", "GL_TEXTURE_2D_MULTISAMPLE_EXT"]),
    ])
    .unwrap();

    let typed = resolve(&registry, "TextureTarget");
    let entries: Vec<_> = typed.entries().map(|(name, value, flags, _)| (name, value, flags)).collect();
    assert_eq!(entries, vec![("Texture2d", "0x0DE1", false)]);
}

#[test]
fn aliases_name_the_member() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_TEXTURE_3D", "0x806F"), enm("GL_TEXTURE_BINDING_3D", "0x806A")]),
        plain(vec![
            aliased("GL_TEXTURE_3D_EXT", "0x806F", "GL_TEXTURE_3D"),
            aliased("GL_TEXTURE_BINDING_3D_OES", "0x806A", "GL_TEXTURE_BINDING_3D"),
            aliased("GL_PROXY_TEXTURE_3D_EXT", "0x8070", "GL_PROXY_TEXTURE_3D"),
        ]),
        group("Texture3d", &["GL_TEXTURE_BINDING_3D_OES", "GL_TEXTURE_3D_EXT", "GL_PROXY_TEXTURE_3D_EXT"]),
    ])
    .unwrap();

    let typed = resolve(&registry, "Texture3d");
    let named: Vec<_> = typed.members.iter().map(|m| (m.ident.as_str(), m.binding_name.as_str())).collect();
    assert_eq!(
        named,
        vec![
            ("TextureBinding3d", "GL_TEXTURE_BINDING_3D"),
            ("Texture3d", "GL_TEXTURE_3D"),
            // dangling alias, keeps its own name
            ("ProxyTexture3dEXT", "GL_PROXY_TEXTURE_3D_EXT"),
        ]
    );
}

#[test]
fn colliding_identifiers_fall_back_to_own_name() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_FOG", "0x0B60")]),
        plain(vec![aliased("GL_FOG_EXT", "0x0B61", "GL_FOG")]),
        group("Fog", &["GL_FOG", "GL_FOG_EXT"]),
    ])
    .unwrap();

    let typed = resolve(&registry, "Fog");
    let idents: Vec<_> = typed.members.iter().map(|m| m.ident.as_str()).collect();
    assert_eq!(idents, vec!["Fog", "FogEXT"]);
}

#[test]
fn storage_widens_with_values() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_INVALID_INDEX", "0xFFFFFFFFu"), enm("GL_ZERO", "0")]),
        bitmask(vec![enm("GL_ALL_BITS", "0xFFFFFFFFFFFFFFFFull"), enm("GL_ONE_BIT", "0x1")]),
        group("Index", &["GL_ZERO", "GL_INVALID_INDEX"]),
        group("Wide", &["GL_ONE_BIT", "GL_ALL_BITS"]),
    ])
    .unwrap();

    assert_eq!(resolve(&registry, "Index").repr, Repr::U32);
    assert_eq!(resolve(&registry, "Wide").repr, Repr::U64);
}

#[test]
fn availability_filters_members() {
    let registry = Registry::from_records(vec![
        plain(vec![enm("GL_TEXTURE_2D", "0x0DE1"), enm("GL_TEXTURE_3D", "0x806F")]),
        plain(vec![aliased("GL_TEXTURE_3D_EXT", "0x806F", "GL_TEXTURE_3D")]),
        group("TextureTarget", &["GL_TEXTURE_2D", "GL_TEXTURE_3D", "GL_TEXTURE_3D_EXT"]),
        feature("GL_VERSION_1_0", (1, 0), vec![delta(&["GL_TEXTURE_2D"], &[])], vec![]),
        feature("GL_VERSION_1_2", (1, 2), vec![delta(&["GL_TEXTURE_3D"], &[])], vec![]),
        extension("GL_EXT_texture3D", &[Api::Gl], vec![delta(&["GL_TEXTURE_3D_EXT"], &[])]),
    ])
    .unwrap();
    let group = registry.group("TextureTarget").unwrap();

    let gl10 = linearize(&registry, &Target::new(Api::Gl, (1, 0)));
    let typed = resolve_group_in(&registry, group, &gl10);
    assert_eq!(typed.members.len(), 1);

    let gl10_ext = linearize(&registry, &Target::new(Api::Gl, (1, 0)).with_extension("GL_EXT_texture3D"));
    let typed = resolve_group_in(&registry, group, &gl10_ext);
    let idents: Vec<_> = typed.members.iter().map(|m| m.ident.as_str()).collect();
    assert_eq!(idents, vec!["Texture2d", "Texture3d"]);

    let gl12 = linearize(&registry, &Target::new(Api::Gl, (1, 2)));
    assert_eq!(resolve_groups(&registry, Some(&gl12))[0].members.len(), 2);
}

proptest! {
    #[test]
    fn resolution_is_deterministic_and_shortest(values in prop::collection::vec(0u8..4, 1..12)) {
        let enums: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| enm(&format!("GL_{}{}", "N".repeat(i % 3 + 1), i), &v.to_string()))
            .collect();
        let names: Vec<String> = enums.iter().map(|e| e.name.clone()).collect();
        let members: Vec<&str> = names.iter().map(String::as_str).collect();
        let registry = Registry::from_records(vec![plain(enums.clone()), group("G", &members)]).unwrap();

        let first = resolve(&registry, "G");
        prop_assert_eq!(&first, &resolve(&registry, "G"));

        for member in &first.members {
            let bucket: Vec<_> = enums.iter().filter(|e| e.value == member.value).collect();
            let shortest = bucket.iter().map(|e| e.name.len()).min().unwrap();
            let expected = bucket.iter().find(|e| e.name.len() == shortest).unwrap();
            prop_assert_eq!(&member.binding_name, &expected.name);
        }
        let distinct: std::collections::BTreeSet<_> = values.iter().collect();
        prop_assert_eq!(first.members.len(), distinct.len());
    }
}
