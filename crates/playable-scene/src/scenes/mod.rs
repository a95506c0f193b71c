//! Concrete scene content.

pub mod final_scene;
pub mod main_scene;

pub use final_scene::FinalScene;
pub use main_scene::MainScene;
