//! Presentation and animation core of a playable ad.
//!
//! The crate owns the scene graph of a small interactive advertisement: one
//! visible scene at a time with cross-fades between them, at most one modal
//! overlay with an animated reveal and dismiss, and per-frame feedback on
//! interactive controls. Everything advances from a single cooperative tick:
//!
//! ```
//! use playable_config::PlayableConfig;
//! use playable_scene::{Playable, SceneKind};
//!
//! let mut playable = Playable::with_defaults(PlayableConfig::default());
//! playable.start().unwrap();
//! for _ in 0..30 {
//!     playable.tick(1.0 / 60.0);
//! }
//! assert_eq!(playable.current_scene_kind(), Some(SceneKind::Main));
//! ```
//!
//! Rendering, windowing, asset decoding and audio output stay outside: the
//! shell hands out a backend-agnostic [`DisplayList`] and talks to
//! [`AudioBackend`] and [`AssetProvider`] implementations.

pub mod animation;
pub mod context;
pub mod display;
pub mod elements;
pub mod error;
pub mod layout;
pub mod playable;
pub mod popup_manager;
pub mod providers;
pub mod scene;
pub mod scene_host;
pub mod scenes;
pub mod viewport;

pub use context::Context;
pub use display::{Color, DisplayList, DrawCommand, Transform};
pub use error::{Result, SceneError};
pub use layout::{FitOptions, ScaleMode, fit_to_screen};
pub use playable::{Playable, ShellEvent};
pub use popup_manager::{OverlayPhase, PopupManager};
pub use providers::{AssetCatalog, AssetProvider, AudioBackend, AudioError, SilentAudio, SoundBoard, Texture};
pub use scene::{PointerEvent, Scene, SceneEvent, SceneKind, SceneResult};
pub use scene_host::{SceneHost, SceneHostState, SceneRegistry};
pub use viewport::{DeviceClass, Orientation, Viewport};
