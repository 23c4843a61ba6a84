use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use crate::api::game::ConfigError;

/// Directory every texture file is resolved under.
pub const TEXTURE_DIR: &str = "textures";

/// Reference to a texture by file name, e.g. `earth.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureRef {
    file: String,
}

impl TextureRef {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    /// Asset path following the `textures/<file>` convention.
    pub fn path(&self) -> String {
        format!("{}/{}", TEXTURE_DIR, self.file)
    }
}

/// Index of a loaded texture, as seen by the browser renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Texture manifest: which texture files the host managed to load.
/// Loaded from JSON at runtime, order defines texture ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureManifest {
    /// File names relative to `textures/`.
    #[serde(default)]
    pub textures: Vec<String>,
}

impl TextureManifest {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Lookup from texture reference to texture id.
///
/// Unknown textures resolve to `None`; the mesh then renders untextured.
/// Each unknown file is reported once.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    ids: HashMap<String, TextureId>,
    reported: RefCell<HashSet<String>>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: &TextureManifest) -> Self {
        let ids = manifest
            .textures
            .iter()
            .enumerate()
            .map(|(i, file)| (file.clone(), TextureId(i as u32)))
            .collect();
        Self {
            ids,
            reported: RefCell::new(HashSet::new()),
        }
    }

    pub fn resolve(&self, texture: &TextureRef) -> Option<TextureId> {
        let id = self.ids.get(texture.file()).copied();
        if id.is_none() && self.reported.borrow_mut().insert(texture.file().to_string()) {
            log::warn!("texture {} not loaded, rendering untextured", texture.path());
        }
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_path_convention() {
        assert_eq!(TextureRef::new("earth.jpg").path(), "textures/earth.jpg");
    }

    #[test]
    fn registry_assigns_ids_in_manifest_order() {
        let manifest = TextureManifest::from_json(r#"{ "textures": ["sun.jpg", "earth.jpg"] }"#).unwrap();
        let reg = TextureRegistry::from_manifest(&manifest);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.resolve(&TextureRef::new("sun.jpg")), Some(TextureId(0)));
        assert_eq!(reg.resolve(&TextureRef::new("earth.jpg")), Some(TextureId(1)));
    }

    #[test]
    fn missing_texture_resolves_to_none() {
        let reg = TextureRegistry::new();
        assert!(reg.resolve(&TextureRef::new("pluto.jpg")).is_none());
        // Second lookup stays None and does not panic on the report set.
        assert!(reg.resolve(&TextureRef::new("pluto.jpg")).is_none());
    }

    #[test]
    fn empty_manifest_and_bad_json() {
        let manifest = TextureManifest::from_json("{}").unwrap();
        assert!(manifest.textures.is_empty());
        assert!(TextureManifest::from_json("not json").is_err());
    }
}
