//! External collaborators the presentation core consumes: textures and audio.

pub mod assets;
pub mod audio;

pub use assets::{AssetCatalog, AssetProvider, Texture, texture_or_empty};
pub use audio::{AudioBackend, AudioError, PlayOptions, SilentAudio, SoundBoard};
