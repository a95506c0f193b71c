//! Viewport dimensions and their classification.
//!
//! The shell is the only writer; every other component reads the viewport
//! through `Context::viewport`.

use playable_config::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Coarse device size bucket derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

/// Viewport orientation. A square viewport counts as portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Current viewport size plus the breakpoints used to classify it.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
    breakpoints: LayoutConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    /// Create a viewport with the default breakpoints.
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_breakpoints(width, height, LayoutConfig::default())
    }

    /// Create a viewport with custom breakpoints.
    pub fn with_breakpoints(width: f32, height: f32, breakpoints: LayoutConfig) -> Self {
        Self {
            width,
            height,
            breakpoints,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Record new dimensions after a layout change.
    pub fn update_dimensions(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_mobile(&self) -> bool {
        self.width < self.breakpoints.tablet_min_width
    }

    pub fn is_mobile_xs(&self) -> bool {
        self.width <= self.breakpoints.mobile_xs_max_width
    }

    pub fn is_tablet(&self) -> bool {
        self.width >= self.breakpoints.tablet_min_width
            && self.width < self.breakpoints.desktop_min_width
    }

    pub fn is_desktop(&self) -> bool {
        self.width >= self.breakpoints.desktop_min_width
    }

    /// Width over height; zero while the height is unknown.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }

    pub fn device_class(&self) -> DeviceClass {
        if self.is_mobile() {
            DeviceClass::Mobile
        } else if self.is_tablet() {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.is_landscape() {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation() {
        assert_eq!(Viewport::new(1280.0, 720.0).orientation(), Orientation::Landscape);
        assert_eq!(Viewport::new(720.0, 1280.0).orientation(), Orientation::Portrait);

        let square = Viewport::new(500.0, 500.0);
        assert!(!square.is_landscape());
        assert!(!square.is_portrait());
        assert_eq!(square.orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_device_class_breakpoints() {
        assert_eq!(Viewport::new(360.0, 640.0).device_class(), DeviceClass::Mobile);
        assert!(Viewport::new(360.0, 640.0).is_mobile_xs());
        assert!(!Viewport::new(361.0, 640.0).is_mobile_xs());
        assert_eq!(Viewport::new(767.0, 640.0).device_class(), DeviceClass::Mobile);
        assert_eq!(Viewport::new(768.0, 640.0).device_class(), DeviceClass::Tablet);
        assert_eq!(Viewport::new(1023.0, 640.0).device_class(), DeviceClass::Tablet);
        assert_eq!(Viewport::new(1024.0, 640.0).device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn test_custom_breakpoints() {
        let breakpoints = LayoutConfig {
            mobile_xs_max_width: 320.0,
            tablet_min_width: 600.0,
            desktop_min_width: 900.0,
        };
        let viewport = Viewport::with_breakpoints(700.0, 400.0, breakpoints);
        assert_eq!(viewport.device_class(), DeviceClass::Tablet);
    }

    #[test]
    fn test_update_and_aspect_ratio() {
        let mut viewport = Viewport::default();
        assert_eq!(viewport.aspect_ratio(), 0.0);

        viewport.update_dimensions(1600.0, 800.0);
        assert_eq!(viewport.width(), 1600.0);
        assert_eq!(viewport.aspect_ratio(), 2.0);
    }
}
