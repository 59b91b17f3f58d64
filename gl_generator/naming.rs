////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2020 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Turns registry names like `GL_TEXTURE_RECTANGLE_ARB` into binding identifiers like
//! `TextureRectangleARB`.

use std::collections::HashSet;

use heck::ToUpperCamelCase;
use lazy_static::*;

const API_PREFIXES: &[&str] = &["GL_", "GLX_", "WGL_", "EGL_"];

lazy_static! {
    // author ids from the registry, kept uppercase when they end a name
    static ref VENDOR_SUFFIXES: HashSet<&'static str> = [
        "3DFX", "AMD", "ANDROID", "ANGLE", "APPLE", "ARB", "ARM", "ATI", "EXT", "FJ", "GREMEDY", "HP",
        "IBM", "IMG", "INGR", "INTEL", "KHR", "MESA", "MESAX", "NV", "NVX", "OES", "OML", "OVR", "PGI",
        "QCOM", "REND", "S3", "SGI", "SGIS", "SGIX", "SUN", "SUNX", "VIV", "WIN",
    ]
    .iter()
    .copied()
    .collect();
}

/// Strips the API prefix: `GL_TEXTURE_2D` -> `TEXTURE_2D`.
pub fn implementation_name(name: &str) -> &str {
    API_PREFIXES
        .iter()
        .filter_map(|prefix| name.strip_prefix(prefix))
        .find(|rest| !rest.is_empty())
        .unwrap_or(name)
}

/// The trailing vendor tag of a name, if it has one: `TEXTURE_3D_EXT` -> `EXT`.
pub fn vendor_suffix(name: &str) -> Option<&str> {
    let (_, suffix) = name.rsplit_once('_')?;
    if VENDOR_SUFFIXES.contains(suffix) {
        Some(suffix)
    } else {
        None
    }
}

/// Mixed-case identifier for an implementation name.
pub fn binding_ident(implementation_name: &str) -> String {
    let mut ident = match vendor_suffix(implementation_name) {
        Some(suffix) => {
            let stem = &implementation_name[..implementation_name.len() - suffix.len() - 1];
            format!("{}{}", stem.to_upper_camel_case(), suffix)
        },
        None => implementation_name.to_upper_camel_case(),
    };

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_known_api_prefixes() {
        assert_eq!(implementation_name("GL_TEXTURE_2D"), "TEXTURE_2D");
        assert_eq!(implementation_name("WGL_CONTEXT_MAJOR_VERSION_ARB"), "CONTEXT_MAJOR_VERSION_ARB");
        assert_eq!(implementation_name("GL_"), "GL_");
        assert_eq!(implementation_name("FOO_X"), "FOO_X");
    }

    #[test]
    fn camel_cases_and_keeps_vendor_tags() {
        assert_eq!(binding_ident("COLOR_BUFFER_BIT"), "ColorBufferBit");
        assert_eq!(binding_ident("TEXTURE_RECTANGLE_ARB"), "TextureRectangleARB");
        assert_eq!(binding_ident("COVERAGE_BUFFER_BIT_NV"), "CoverageBufferBitNV");
        assert_eq!(binding_ident("FOO_X"), "FooX");
    }

    #[test]
    fn leading_digits_get_an_underscore() {
        assert!(binding_ident("2_BYTES").starts_with('_'));
    }
}
