//! Pose output
//!
//! A pose is recomputed from scratch for every tick or query and handed to
//! the renderer; the engine never stores one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// RGBA color, components in 0.0..=1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Hex string like `#ff4040`, alpha omitted when opaque
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(self.r),
                channel(self.g),
                channel(self.b),
                channel(self.a)
            )
        }
    }
}

/// A fading afterimage drawn behind a fast-moving actor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailGhost {
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

/// Trail storage; dodges produce three ghosts, so they stay inline
pub type Trail = SmallVec<[TrailGhost; 3]>;

fn trail_is_empty(trail: &Trail) -> bool {
    trail.is_empty()
}

/// Visual transform of one actor at one instant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Offset from the anchor in pixels
    pub x: f32,
    /// Offset from the baseline in pixels; negative is up
    pub y: f32,
    /// Radians, clockwise
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub opacity: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "trail_is_empty")]
    pub trail: Trail,
    pub flipped: bool,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// The neutral pose: no offset, no rotation, unit scale, fully opaque
    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            opacity: 1.0,
            color: None,
            trail: SmallVec::new(),
            flipped: false,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Builder: set offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Builder: set rotation in radians
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Builder: set scale x and y separately
    pub fn with_scale_xy(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Builder: set override color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Builder: set the horizontal flip flag
    pub fn with_flipped(mut self, flipped: bool) -> Self {
        self.flipped = flipped;
        self
    }

    /// Layer `overlay` on top of this pose.
    ///
    /// Offsets and rotation add, scale and opacity multiply, the overlay's
    /// color wins when it has one, trails are shifted into this pose's
    /// frame and appended, and flips cancel.
    pub fn compose(&self, overlay: &Pose) -> Pose {
        let mut trail = self.trail.clone();
        trail.extend(overlay.trail.iter().map(|ghost| TrailGhost {
            x: ghost.x + self.x,
            y: ghost.y + self.y,
            opacity: ghost.opacity * self.opacity,
        }));
        Pose {
            x: self.x + overlay.x,
            y: self.y + overlay.y,
            rotation: self.rotation + overlay.rotation,
            scale_x: self.scale_x * overlay.scale_x,
            scale_y: self.scale_y * overlay.scale_y,
            opacity: self.opacity * overlay.opacity,
            color: overlay.color.or(self.color),
            trail,
            flipped: self.flipped ^ overlay.flipped,
        }
    }
}
