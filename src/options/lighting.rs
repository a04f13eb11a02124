use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::model::ModelParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Starting material and light parameters for the model.
pub struct LightingOptions {
    /// Base surface colour (RGB, 0..1).
    pub color: [f32; 3],
    /// Light colour (RGB, 0..1).
    pub light_color: [f32; 3],
    /// Direction towards the light; normalised in the shader.
    pub light_direction: [f32; 3],
    /// Ambient contribution, 0..1.
    pub ambient_size: f32,
    /// Specular exponent, 1..256.
    pub specular: f32,
    /// Specular contribution, 0..100.
    pub specular_size: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        let params = ModelParams::default();
        Self {
            color: params.color.to_array(),
            light_color: params.light_color.to_array(),
            light_direction: params.light_direction.to_array(),
            ambient_size: params.ambient_size,
            specular: params.specular,
            specular_size: params.specular_size,
        }
    }
}

impl LightingOptions {
    /// The model parameters these options describe.
    #[must_use]
    pub fn to_params(&self) -> ModelParams {
        ModelParams {
            color: Vec3::from_array(self.color),
            light_color: Vec3::from_array(self.light_color),
            light_direction: Vec3::from_array(self.light_direction),
            ambient_size: self.ambient_size,
            specular: self.specular,
            specular_size: self.specular_size,
        }
    }
}
