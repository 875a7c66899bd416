//! Configuration types for the soft-body world and the simulation loop.

use crate::color::Color;
use crate::error::JellyError;
use crate::float::Float;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Configuration for the soft-body world.
///
/// # Builder Pattern
/// ```
/// use jelly_canvas::config::WorldConfig;
/// use jelly_canvas::vec::Vec2;
///
/// let config: WorldConfig<f64> = WorldConfig::new()
///     .with_gravity(Vec2::new(0.0, 9.8))
///     .with_elasticity(0.3)
///     .with_friction(0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig<F: Float> {
    /// Gravity acceleration. The world is y-down like the canvas, so the
    /// default points along +y. Default: (0, 9.8).
    pub gravity: Vec2<F>,
    /// Fraction of closing speed kept after a contact. Default: 0.2.
    pub elasticity: F,
    /// Fraction of tangential speed removed by a contact. Default: 0.4.
    pub friction: F,
    /// Penetrations deeper than this are ignored rather than resolved.
    /// Default: 0.3.
    pub penetration_threshold: F,
    /// Force and integration passes per step, each advancing an equal
    /// share of `dt`. Contacts and velocity damping still run once per
    /// step. Default: 2.
    pub integration_steps: usize,
}

impl<F: Float> WorldConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec2::new(F::zero(), F::from_f32(9.8)),
            elasticity: F::from_f32(0.2),
            friction: F::from_f32(0.4),
            penetration_threshold: F::from_f32(0.3),
            integration_steps: 2,
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec2<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the contact elasticity.
    pub fn with_elasticity(mut self, elasticity: F) -> Self {
        self.elasticity = elasticity;
        self
    }

    /// Set the contact friction.
    pub fn with_friction(mut self, friction: F) -> Self {
        self.friction = friction;
        self
    }

    /// Set the deepest penetration that still gets resolved.
    pub fn with_penetration_threshold(mut self, threshold: F) -> Self {
        self.penetration_threshold = threshold;
        self
    }

    /// Set the integration passes per step. Clamped to at least 1.
    pub fn with_integration_steps(mut self, steps: usize) -> Self {
        self.integration_steps = steps.max(1);
        self
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for [`SimulationLoop`](crate::simulation::SimulationLoop).
#[derive(Clone, Debug, PartialEq)]
pub struct LoopConfig {
    /// World steps per tick. Default: 5.
    pub sub_steps: usize,
    /// Simulated time per tick spread over the interval; each sub-step
    /// advances `time_scale / iteration_interval_ms`. Default: 0.1.
    pub time_scale: f64,
    /// Radius of the vertex markers, in world units. Default: 0.1.
    pub marker_radius: f64,
    /// Initial zoom applied by the transforming surface. Default: 32.
    pub initial_zoom: f64,
    /// Background painted every frame. Default: white.
    pub background: Color,
    /// Painted once when the loop starts. Default: black.
    pub start_fill: Color,
    /// Stroke restored after each body. Default: black.
    pub default_stroke: Color,
    iteration_interval_ms: u32,
    palette: AllocVec<Color>,
}

impl LoopConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        LoopConfig {
            iteration_interval_ms: 10,
            sub_steps: 5,
            time_scale: 0.1,
            marker_radius: 0.1,
            initial_zoom: 32.0,
            background: Color::WHITE,
            start_fill: Color::BLACK,
            default_stroke: Color::BLACK,
            palette: alloc::vec![
                Color::BLUE,
                Color::GRAY,
                Color::GREEN,
                Color::RED,
                Color::MAGENTA,
                Color::ORANGE,
            ],
        }
    }

    /// Set the tick interval. Clamped to at least 1 ms.
    pub fn with_iteration_interval(mut self, interval_ms: u32) -> Self {
        self.iteration_interval_ms = interval_ms.max(1);
        self
    }

    /// Real-world milliseconds between ticks. Default: 10.
    pub fn iteration_interval_ms(&self) -> u32 {
        self.iteration_interval_ms
    }

    /// Set the number of world steps per tick.
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Set the starting zoom. Must be finite and positive.
    pub fn with_initial_zoom(mut self, zoom: f64) -> Result<Self, JellyError> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(JellyError::InvalidZoom(zoom));
        }
        self.initial_zoom = zoom;
        Ok(self)
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Replace the stroke palette bodies cycle through. Must not be empty.
    pub fn with_palette(mut self, palette: AllocVec<Color>) -> Result<Self, JellyError> {
        if palette.is_empty() {
            return Err(JellyError::InvalidPalette);
        }
        self.palette = palette;
        Ok(self)
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Stroke color for the body at `index` in the world's body list.
    pub fn stroke_for(&self, index: usize) -> &Color {
        &self.palette[index % self.palette.len()]
    }

    /// Fixed world timestep of one sub-step.
    pub fn timestep(&self) -> f64 {
        self.time_scale / self.iteration_interval_ms as f64
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timestep_is_a_hundredth() {
        let config = LoopConfig::new();
        assert_eq!(config.sub_steps, 5);
        assert!((config.timestep() - 0.01).abs() < 1e-15);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let config = LoopConfig::new().with_iteration_interval(0);
        assert_eq!(config.iteration_interval_ms(), 1);
        assert!(config.timestep().is_finite());
        assert!((config.timestep() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn world_integration_steps_are_at_least_one() {
        let config: WorldConfig<f64> = WorldConfig::new().with_integration_steps(0);
        assert_eq!(config.integration_steps, 1);
        assert_eq!(WorldConfig::<f32>::new().integration_steps, 2);
    }

    #[test]
    fn stroke_cycles_through_palette() {
        let config = LoopConfig::new();
        assert_eq!(config.palette().len(), 6);
        assert_eq!(config.stroke_for(7), &config.palette()[1]);
        assert_eq!(config.stroke_for(0), &Color::BLUE);
    }

    #[test]
    fn empty_palette_is_rejected() {
        let result = LoopConfig::new().with_palette(AllocVec::new());
        assert_eq!(result.unwrap_err(), JellyError::InvalidPalette);
    }

    #[test]
    fn nonpositive_zoom_is_rejected() {
        assert_eq!(
            LoopConfig::new().with_initial_zoom(0.0).unwrap_err(),
            JellyError::InvalidZoom(0.0)
        );
        assert!(LoopConfig::new().with_initial_zoom(f64::NAN).is_err());
    }
}
