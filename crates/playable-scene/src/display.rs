//! Backend-agnostic draw output.
//!
//! Elements emit `DrawCommand`s with their effective (composed) transform
//! into a `DisplayList`; a renderer outside this crate consumes the list.

use palette::{FromColor, LinSrgba, Srgb, Srgba};

use crate::providers::Texture;

/// sRGB color with 8-bit channels.
pub type Color = Srgb<u8>;

/// Build a color from a `0xRRGGBB` literal.
#[inline]
pub fn color_from_hex(hex: u32) -> Color {
    Srgb::new(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Multiply every channel by `factor`, flooring each result.
#[inline]
pub fn darken(color: Color, factor: f32) -> Color {
    let scale = |c: u8| (c as f32 * factor).floor().clamp(0.0, 255.0) as u8;
    Srgb::new(scale(color.red), scale(color.green), scale(color.blue))
}

/// Linear premultiplied RGBA for GPU consumption.
#[inline]
pub fn to_linear_premul(color: Color, alpha: f32) -> [f32; 4] {
    let s = Srgba::new(
        color.red as f32 / 255.0,
        color.green as f32 / 255.0,
        color.blue as f32 / 255.0,
        alpha.clamp(0.0, 1.0),
    );
    let lin: LinSrgba = LinSrgba::from_color(s);
    [
        lin.red * lin.alpha,
        lin.green * lin.alpha,
        lin.blue * lin.alpha,
        lin.alpha,
    ]
}

/// Uniform-scale 2D transform with an opacity multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: [f32; 2],
    pub scale: f32,
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0],
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn new(translation: [f32; 2], scale: f32, opacity: f32) -> Self {
        Self {
            translation,
            scale,
            opacity,
        }
    }

    /// Compose a child transform expressed in this transform's space.
    pub fn then(&self, local: Transform) -> Transform {
        Transform {
            translation: self.apply(local.translation),
            scale: self.scale * local.scale,
            opacity: self.opacity * local.opacity,
        }
    }

    /// Map a local point into the parent space.
    pub fn apply(&self, point: [f32; 2]) -> [f32; 2] {
        [
            self.translation[0] + point[0] * self.scale,
            self.translation[1] + point[1] * self.scale,
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Rounded rectangle centered on `transform.translation`; `size` is unscaled.
    Rect {
        size: [f32; 2],
        radius: f32,
        color: Color,
        transform: Transform,
    },
    /// Centered text run.
    Text {
        text: String,
        font_size: f32,
        color: Color,
        transform: Transform,
    },
    /// Textured quad; `anchor` is the normalized pivot inside the texture.
    Sprite {
        texture: Texture,
        anchor: [f32; 2],
        transform: Transform,
    },
}

impl DrawCommand {
    pub fn transform(&self) -> &Transform {
        match self {
            Self::Rect { transform, .. }
            | Self::Text { transform, .. }
            | Self::Sprite { transform, .. } => transform,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DisplayList {
    pub size: [f32; 2],
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            commands: Vec::new(),
        }
    }

    /// Append a command. Fully transparent commands are dropped.
    pub fn push(&mut self, command: DrawCommand) {
        if command.transform().opacity <= 0.0 {
            return;
        }
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Text runs in draw order; handy for asserting what is on screen.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}
