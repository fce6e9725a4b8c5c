use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::{fibonacci_ratio, MAX_WHORL_INDEX};

pub mod generation;
pub mod leaf;

pub const MIN_STEM_SIDES: u32 = 3;

/// Proportions and leaf arrangement of one plant species.
///
/// Lengths are in world units, angles in degrees. Values are only made
/// valid by [`SpeciesParameters::clamp_values`], which every generation
/// pass calls on its own copy.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeciesParameters {
    pub stem_sides: u32,
    pub segment_length: f32,
    pub segment_radius: f32,
    /// exponent of the growth curve, `size = growth^scale_exponent`
    pub scale_exponent: f32,
    /// remaining growth of a segment at or below which no leaves emerge
    pub leaf_threshold: f32,
    pub leaves_per_segment: u32,
    pub leaf_vertical_angle: f32,
    /// divergence between whorls is `F(i) / F(i + 1)` of a half turn
    pub whorl_index: u32,

    pub petiole_length: f32,
    pub petiole_width: f32,
    pub petiole_depth: f32,

    /// fraction of the petiole length where the blade starts
    pub blade_position: f32,
    pub blade_length: f32,
    pub blade_width: f32,
    pub blade_fold_angle: f32,
}

impl Default for SpeciesParameters {
    fn default() -> Self {
        Self {
            stem_sides: 6,
            segment_length: 1.,
            segment_radius: 0.1,
            scale_exponent: 0.33,
            leaf_threshold: 0.5,
            leaves_per_segment: 2,
            leaf_vertical_angle: 30.,
            whorl_index: 10,
            petiole_length: 0.4,
            petiole_width: 0.05,
            petiole_depth: 0.03,
            blade_position: 0.9,
            blade_length: 0.6,
            blade_width: 0.3,
            blade_fold_angle: 20.,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SpeciesError {
    #[error("cannot read species file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid species description: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot write species description: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SpeciesParameters {
    pub fn from_toml_str(content: &str) -> Result<Self, SpeciesError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SpeciesError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, SpeciesError> {
        Ok(toml::to_string(self)?)
    }

    /// Silently brings every field back into its valid range.
    /// Non-finite values become zero, lengths are never negative.
    pub fn clamp_values(&mut self) {
        self.stem_sides = self.stem_sides.max(MIN_STEM_SIDES);
        self.whorl_index = self.whorl_index.min(MAX_WHORL_INDEX as u32);

        for value in [
            &mut self.leaf_threshold,
            &mut self.leaf_vertical_angle,
            &mut self.blade_position,
            &mut self.blade_fold_angle,
        ] {
            *value = finite_or_zero(*value);
        }

        for value in [
            &mut self.segment_length,
            &mut self.segment_radius,
            &mut self.scale_exponent,
            &mut self.petiole_length,
            &mut self.petiole_width,
            &mut self.petiole_depth,
            &mut self.blade_length,
            &mut self.blade_width,
        ] {
            *value = finite_or_zero(*value).max(0.);
        }
    }

    pub fn clamped(mut self) -> Self {
        self.clamp_values();
        self
    }

    /// Rotation of the leaf whorl of `segment_index` around the stem,
    /// relative to the whorl of the first segment.
    pub fn whorl_rotation_degrees(&self, segment_index: usize) -> f32 {
        let whorl = (self.whorl_index as usize).min(MAX_WHORL_INDEX);
        segment_index as f32 * 180. * fibonacci_ratio(whorl)
    }

    /// Angle between two consecutive leaves of the same whorl.
    pub fn leaf_spacing_degrees(&self) -> f32 {
        360. / self.leaves_per_segment.max(1) as f32
    }

    pub fn leaves_emerge(&self, segment_index: usize, remaining_growth: f32) -> bool {
        segment_index > 0 && remaining_growth > self.leaf_threshold && self.leaves_per_segment > 0
    }

    /// Growth handed to the leaves of a segment: leaves reach full size once
    /// the segment has grown one unit past the threshold.
    pub fn leaf_growth(&self, remaining_growth: f32) -> f32 {
        (remaining_growth - self.leaf_threshold).clamp(0., 1.)
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.
    }
}

/// Overall development of a plant. The whole part counts the full stem
/// segments, the fractional part shapes the terminal cone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Growth(pub f32);

impl Growth {
    /// Negative and non-finite values mean "not grown yet".
    pub fn sanitized(self) -> Self {
        if self.0.is_finite() {
            Growth(self.0.max(0.))
        } else {
            Growth(0.)
        }
    }

    /// Number of tube segments a stem with this growth is made of.
    pub fn tube_count(self) -> usize {
        self.sanitized().0.floor() as usize
    }

    /// `true` when the stem ends with a cone instead of a tube.
    pub fn has_terminal_cone(self) -> bool {
        let g = self.sanitized().0;
        g < 1. || g.fract() > 0.
    }

    /// Number of stem levels, tubes and terminal cone included.
    pub fn level_count(self) -> usize {
        self.tube_count() + self.has_terminal_cone() as usize
    }
}

impl From<f32> for Growth {
    fn from(value: f32) -> Self {
        Growth(value)
    }
}
