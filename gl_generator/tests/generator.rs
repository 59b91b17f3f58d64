mod common;

use common::*;
use gl_typed_generator::{linearize, Api, Registry, Target, TypedEnumGenerator};

fn registry() -> Registry {
    Registry::from_records(vec![
        bitmask(vec![enm("GL_DEPTH_BUFFER_BIT", "0x00000100"), enm("GL_COLOR_BUFFER_BIT", "0x00004000")]),
        plain(vec![enm("GL_TEXTURE_3D", "0x806F"), enm("GL_NONE", "0")]),
        plain(vec![aliased("GL_TEXTURE_3D_EXT", "0x806F", "GL_TEXTURE_3D")]),
        group("ClearBufferMask", &["GL_DEPTH_BUFFER_BIT", "GL_COLOR_BUFFER_BIT"]),
        group("TextureTarget", &["GL_TEXTURE_3D", "GL_TEXTURE_3D_EXT"]),
        group("Unused", &["GL_UNKNOWN"]),
        feature("GL_VERSION_1_0", (1, 0), vec![delta(&["GL_DEPTH_BUFFER_BIT", "GL_COLOR_BUFFER_BIT"], &[])], vec![]),
    ])
    .unwrap()
}

fn generate(registry: &Registry, target: Option<&Target>) -> String {
    let available = target.map(|t| linearize(registry, t));
    let mut out = Vec::new();
    registry.write_bindings(available.as_ref(), TypedEnumGenerator, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn writes_enums_and_flags() {
    let source = generate(&registry(), None);

    assert!(source.starts_with("#![allow(non_upper_case_globals, dead_code)]"));
    assert!(source.contains("pub struct ClearBufferMask(pub u32);"));
    assert!(source.contains("pub const ColorBufferBit: ClearBufferMask = ClearBufferMask(0x4000u32);"));
    assert!(source.contains("impl std::ops::BitOr for ClearBufferMask"));

    assert!(source.contains("#[repr(i32)]"));
    assert!(source.contains("pub enum TextureTarget {"));
    assert!(source.contains("/// Strongly typed for value GL_TEXTURE_3D, GL_TEXTURE_3D_EXT."));
    assert!(source.contains("Texture3d = 0x806Fi32,"));

    assert!(!source.contains("Unused"));
}

#[test]
fn output_follows_the_configuration() {
    let registry = registry();
    let source = generate(&registry, Some(&Target::new(Api::Gl, (1, 0))));

    assert!(source.contains("pub struct ClearBufferMask(pub u32);"));
    assert!(!source.contains("TextureTarget"));
    assert_eq!(source, generate(&registry, Some(&Target::new(Api::Gl, (1, 0)))));
}
