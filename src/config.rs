//! Editor configuration.

/// Tunables shared by the store helpers and the WASM facade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Hit-test radius for picking a point from a click (default: 12.0).
    pub pick_radius: f64,
    /// Map units per unit of weight for geometric edges (default: 10.0).
    pub distance_scale: f64,
    /// Round geometric weights to whole numbers (default: true).
    pub round_weights: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pick_radius: 12.0,
            distance_scale: 10.0,
            round_weights: true,
        }
    }
}
