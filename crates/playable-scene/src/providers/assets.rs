use std::collections::HashMap;
use std::path::PathBuf;

use playable_config::AssetsConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Handle to a loaded image. Pixel data lives with the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Texture {
    pub key: String,
    /// Image file the renderer loads the pixels from.
    pub source: PathBuf,
    pub width: f32,
    pub height: f32,
}

impl Texture {
    pub fn new(key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            key: key.into(),
            source: PathBuf::new(),
            width,
            height,
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Zero-sized placeholder used when a key is missing.
    pub fn empty() -> Self {
        Self::new(String::new(), 0.0, 0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// Source of preloaded textures.
pub trait AssetProvider: Send {
    fn get(&self, key: &str) -> Option<Texture>;
}

/// Look up `key`, falling back to an empty texture with a warning.
pub fn texture_or_empty(provider: &dyn AssetProvider, key: &str) -> Texture {
    match provider.get(key) {
        Some(texture) => texture,
        None => {
            warn!(key, "texture not found, using empty placeholder");
            Texture::empty()
        }
    }
}

/// In-memory texture table.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    textures: HashMap<String, Texture>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from the image section of the asset manifest.
    pub fn from_config(config: &AssetsConfig) -> Self {
        let mut catalog = Self::new();
        for (key, image) in &config.images {
            catalog.insert(
                Texture::new(key.clone(), image.width, image.height)
                    .with_source(image.path.clone()),
            );
        }
        catalog
    }

    pub fn insert(&mut self, texture: Texture) {
        self.textures.insert(texture.key.clone(), texture);
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl AssetProvider for AssetCatalog {
    fn get(&self, key: &str) -> Option<Texture> {
        self.textures.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_from_default_manifest() {
        let catalog = AssetCatalog::from_config(&AssetsConfig::default());
        let hand = catalog.get("hand").unwrap();
        assert_eq!(hand.key, "hand");
        assert_eq!((hand.width, hand.height), (128.0, 128.0));
        assert_eq!(hand.source, PathBuf::from("assets/hand.png"));
    }

    #[test]
    fn test_missing_texture_falls_back_to_empty() {
        let catalog = AssetCatalog::new();
        let texture = texture_or_empty(&catalog, "nope");
        assert!(texture.is_empty());
        assert_eq!(texture, Texture::empty());
    }
}
