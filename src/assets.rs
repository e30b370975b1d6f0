//! Texture and skeleton lookup
//!
//! `AssetCatalog` is built once at startup and queried for the rest of the
//! session. Textures are handles only; decoding and upload belong to the
//! renderer.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::audio::SoundKey;
use crate::symbols::{ImageKey, SymbolKey};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("skeleton {0:?} was not loaded")]
    MissingSpine(SpineKey),
}

/// Skeletal animation assets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpineKey {
    /// One-shot win overlay
    Win,
    /// Machine frame
    Frame,
}

/// File names of every asset, relative to their kind's folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub images: BTreeMap<ImageKey, String>,
    pub spines: BTreeMap<SpineKey, String>,
    pub sounds: BTreeMap<SoundKey, String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        let images = [
            (ImageKey::Symbol1, "symbol1.png"),
            (ImageKey::Symbol2, "symbol2.png"),
            (ImageKey::Symbol3, "symbol3.png"),
            (ImageKey::Symbol4, "symbol4.png"),
            (ImageKey::Symbol5, "symbol5.png"),
            (ImageKey::Background, "background.png"),
            (ImageKey::SpinButtonActive, "button_spin.png"),
            (ImageKey::SpinButtonInactive, "button_spin_disabled.png"),
        ];
        let spines = [
            (SpineKey::Win, "big-boom-h.json"),
            (SpineKey::Frame, "base-feature-frame.json"),
        ];
        let sounds = [
            (SoundKey::Spin, "Reel spin.webm"),
            (SoundKey::Win, "win.webm"),
            (SoundKey::SpinButton, "Spin button.webm"),
        ];

        Self {
            images: images.iter().map(|(k, f)| (*k, f.to_string())).collect(),
            spines: spines.iter().map(|(k, f)| (*k, f.to_string())).collect(),
            sounds: sounds.iter().map(|(k, f)| (*k, f.to_string())).collect(),
        }
    }
}

/// A renderable image handle
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub key: ImageKey,
    pub path: PathBuf,
}

pub type TextureRef = Rc<Texture>;

/// Symbol image lookup used by reels on every slot creation and recycle
pub trait SymbolTextures {
    fn symbol_texture(&self, key: SymbolKey) -> TextureRef;
}

/// Parsed skeleton header
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonData {
    pub name: String,
    /// Setup-pose bounds
    pub size: Vec2,
    /// Animation names, sorted
    pub animations: Vec<String>,
}

#[derive(Deserialize)]
struct SpineFile {
    #[serde(default)]
    skeleton: SpineHeader,
    #[serde(default)]
    animations: BTreeMap<String, serde_json::Value>,
}

#[derive(Default, Deserialize)]
struct SpineHeader {
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

impl SkeletonData {
    /// Parse the header and animation list of a spine JSON export
    pub fn from_json(name: &str, json: &str) -> Result<Self, serde_json::Error> {
        let file: SpineFile = serde_json::from_str(json)?;
        Ok(Self {
            name: name.to_string(),
            size: Vec2::new(file.skeleton.width, file.skeleton.height),
            animations: file.animations.into_keys().collect(),
        })
    }

    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.iter().any(|a| a == name)
    }
}

/// Loaded asset handles
#[derive(Debug, Default)]
pub struct AssetCatalog {
    textures: HashMap<ImageKey, TextureRef>,
    spines: HashMap<SpineKey, SkeletonData>,
}

impl AssetCatalog {
    /// Register images and parse skeletons under `root`.
    ///
    /// Images resolve to `root/images/*`, skeletons to `root/spines/*`. A
    /// skeleton that fails to load is logged and skipped.
    pub fn load(manifest: &AssetManifest, root: &Path) -> Self {
        let mut catalog = Self::default();

        let images_dir = root.join("images");
        for (key, file) in &manifest.images {
            catalog.textures.insert(
                *key,
                Rc::new(Texture {
                    key: *key,
                    path: images_dir.join(file),
                }),
            );
        }
        log::info!("Registered {} images", catalog.textures.len());

        let spines_dir = root.join("spines");
        for (key, file) in &manifest.spines {
            match Self::read_spine(*key, &spines_dir.join(file)) {
                Ok(data) => {
                    log::info!("Loaded skeleton {:?} ({} animations)", key, data.animations.len());
                    catalog.spines.insert(*key, data);
                }
                Err(e) => log::error!("Error loading skeleton {:?}: {}", key, e),
            }
        }

        catalog
    }

    fn read_spine(key: SpineKey, path: &Path) -> Result<SkeletonData, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        SkeletonData::from_json(&format!("{:?}", key), &json).map_err(|source| AssetError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn texture(&self, key: ImageKey) -> Option<TextureRef> {
        self.textures.get(&key).cloned()
    }

    pub fn spine(&self, key: SpineKey) -> Result<&SkeletonData, AssetError> {
        self.spines.get(&key).ok_or(AssetError::MissingSpine(key))
    }

    /// Register a parsed skeleton directly
    pub fn insert_spine(&mut self, key: SpineKey, data: SkeletonData) {
        self.spines.insert(key, data);
    }
}

impl SymbolTextures for AssetCatalog {
    fn symbol_texture(&self, key: SymbolKey) -> TextureRef {
        let image = key.image();
        self.texture(image).unwrap_or_else(|| {
            log::warn!("Texture {:?} was never registered", image);
            Rc::new(Texture {
                key: image,
                path: PathBuf::new(),
            })
        })
    }
}
