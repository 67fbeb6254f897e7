//! Route Map - WASM Module
//!
//! This module provides the graph store and shortest-path engine behind the
//! Route Map editor. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; drawing, route animation and
//! input forms live on the JS side.
//!
//! # Architecture
//!
//! - `graph`: Named points and weighted undirected edges on petgraph's StableGraph
//! - `route`: Dijkstra shortest path with path reconstruction
//! - `spatial`: R-tree spatial indexing for picking points from clicks
//! - `presets`: The built-in demo map
//! - `config`: Editor tunables

use js_sys::Float64Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod config;
mod console;
pub mod graph;
pub mod presets;
pub mod route;
pub mod spatial;

use config::EditorConfig;
use graph::{GraphError, GraphSnapshot, GraphStore};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log a rejected operation and turn it into a JS `Error`.
fn rejected(operation: &str, err: GraphError) -> JsError {
    console::warn(&format!("{operation} rejected: {err}"));
    JsError::from(err)
}

/// Serialize with maps as plain JS objects, matching `graph[u][v]` access.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true))
        .map_err(JsValue::from)
}

/// Main entry point for the editor.
///
/// This struct owns a GraphStore and the editor configuration, and provides
/// the public API exposed to JavaScript.
#[wasm_bindgen]
pub struct RouteMapWasm {
    store: GraphStore,
    config: EditorConfig,
}

#[wasm_bindgen]
impl RouteMapWasm {
    /// Create an empty map with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: GraphStore::new(),
            config: EditorConfig::default(),
        }
    }

    /// Create an empty map with custom tunables.
    ///
    /// # Arguments
    ///
    /// * `pick_radius` - Hit-test radius for `findPointNear`
    /// * `distance_scale` - Map units per unit of weight for `addEdgeByDistance`
    /// * `round_weights` - Round geometric weights to whole numbers
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(
        pick_radius: f64,
        distance_scale: f64,
        round_weights: bool,
    ) -> Result<RouteMapWasm, JsError> {
        if !(distance_scale.is_finite() && distance_scale > 0.0) {
            return Err(JsError::new("distanceScale must be a positive finite number"));
        }
        if !(pick_radius.is_finite() && pick_radius >= 0.0) {
            return Err(JsError::new("pickRadius must be a non-negative finite number"));
        }
        Ok(Self {
            store: GraphStore::new(),
            config: EditorConfig {
                pick_radius,
                distance_scale,
                round_weights,
            },
        })
    }

    /// Create a map preloaded with the demo city network.
    pub fn demo() -> Result<RouteMapWasm, JsError> {
        let config = EditorConfig::default();
        let store = presets::demo_map(&config).map_err(|e| rejected("demo", e))?;
        console::debug(&format!(
            "demo map loaded: {} points, {} edges",
            store.point_count(),
            store.edge_count()
        ));
        Ok(Self { store, config })
    }

    /// Default route source for the demo map.
    #[wasm_bindgen(js_name = demoSource)]
    pub fn demo_source() -> String {
        presets::DEMO_SOURCE.to_string()
    }

    /// Default route destination for the demo map.
    #[wasm_bindgen(js_name = demoDestination)]
    pub fn demo_destination() -> String {
        presets::DEMO_DESTINATION.to_string()
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Add a named point. Throws on an empty or duplicate name, or a NaN or
    /// infinite coordinate.
    #[wasm_bindgen(js_name = addPoint)]
    pub fn add_point(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsError> {
        self.store
            .add_point(id, x, y)
            .map_err(|e| rejected("addPoint", e))?;
        console::debug(&format!("point added: {} at ({x}, {y})", id.trim()));
        Ok(())
    }

    /// Remove a point along with all its edges.
    #[wasm_bindgen(js_name = removePoint)]
    pub fn remove_point(&mut self, id: &str) -> Result<(), JsError> {
        self.store
            .remove_point(id)
            .map_err(|e| rejected("removePoint", e))?;
        console::debug(&format!("point removed: {}", id.trim()));
        Ok(())
    }

    /// Move a point. Existing edge weights are kept.
    #[wasm_bindgen(js_name = movePoint)]
    pub fn move_point(&mut self, id: &str, x: f64, y: f64) -> Result<(), JsError> {
        self.store
            .move_point(id, x, y)
            .map_err(|e| rejected("movePoint", e))?;
        console::debug(&format!("point moved: {} to ({x}, {y})", id.trim()));
        Ok(())
    }

    #[wasm_bindgen(js_name = getPointX)]
    pub fn get_point_x(&self, id: &str) -> Option<f64> {
        self.store.position(id).map(|(x, _)| x)
    }

    #[wasm_bindgen(js_name = getPointY)]
    pub fn get_point_y(&self, id: &str) -> Option<f64> {
        self.store.position(id).map(|(_, y)| y)
    }

    /// All point names, sorted (for the source/destination dropdowns).
    #[wasm_bindgen(js_name = allPointIds)]
    pub fn all_point_ids(&self) -> Vec<String> {
        self.store.all_point_ids().into_iter().collect()
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> u32 {
        self.store.point_count() as u32
    }

    // =========================================================================
    // Edge Operations
    // =========================================================================

    /// Connect two points, replacing any existing edge between them.
    #[wasm_bindgen(js_name = addEdge)]
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<(), JsError> {
        self.store
            .add_edge(u, v, weight)
            .map_err(|e| rejected("addEdge", e))?;
        console::debug(&format!("connected {} ↔ {} ({weight})", u.trim(), v.trim()));
        Ok(())
    }

    /// Connect two points with a weight taken from their positions.
    ///
    /// Returns the stored weight.
    #[wasm_bindgen(js_name = addEdgeByDistance)]
    pub fn add_edge_by_distance(&mut self, u: &str, v: &str) -> Result<f64, JsError> {
        let weight = self
            .store
            .add_edge_by_distance(u, v, &self.config)
            .map_err(|e| rejected("addEdgeByDistance", e))?;
        console::debug(&format!("connected {} ↔ {} ({weight})", u.trim(), v.trim()));
        Ok(weight)
    }

    /// Disconnect two points. Returns true if they were connected.
    #[wasm_bindgen(js_name = removeEdge)]
    pub fn remove_edge(&mut self, u: &str, v: &str) -> Result<bool, JsError> {
        let removed = self
            .store
            .remove_edge(u, v)
            .map_err(|e| rejected("removeEdge", e))?;
        if removed {
            console::debug(&format!("disconnected {} ↔ {}", u.trim(), v.trim()));
        }
        Ok(removed)
    }

    /// Neighbors of a point as a plain object `{ name: weight }`.
    pub fn neighbors(&self, id: &str) -> Result<JsValue, JsValue> {
        let neighbors = self
            .store
            .neighbors(id)
            .map_err(|e| rejected("neighbors", e))?;
        to_js(&neighbors)
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.store.edge_count() as u32
    }

    // =========================================================================
    // Routing
    // =========================================================================

    /// Shortest route between two points.
    ///
    /// Returns `{ totalDistance, path }`. An unreachable destination gives
    /// `totalDistance: Infinity` and an empty path; unknown names throw.
    #[wasm_bindgen(js_name = shortestPath)]
    pub fn shortest_path(&self, source: &str, destination: &str) -> Result<JsValue, JsValue> {
        let result = route::shortest_path(&self.store, source, destination)
            .map_err(|e| rejected("shortestPath", e))?;
        console::debug(&format!("route {} → {}: {result}", source.trim(), destination.trim()));
        to_js(&result)
    }

    /// Positions along the shortest route as `[x0, y0, x1, y1, ...]`.
    ///
    /// Empty when the destination is unreachable.
    #[wasm_bindgen(js_name = routePolyline)]
    pub fn route_polyline(&self, source: &str, destination: &str) -> Result<Float64Array, JsError> {
        let result = route::shortest_path(&self.store, source, destination)
            .map_err(|e| rejected("routePolyline", e))?;
        let coords: Vec<f64> = self
            .store
            .route_polyline(&result.path)
            .map_err(|e| rejected("routePolyline", e))?
            .into_iter()
            .flat_map(|(x, y)| [x, y])
            .collect();
        Ok(Float64Array::from(&coords[..]))
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// The point under a click, within the configured pick radius.
    #[wasm_bindgen(js_name = findPointNear)]
    pub fn find_point_near(&self, x: f64, y: f64) -> Option<String> {
        self.store
            .point_near(x, y, self.config.pick_radius)
            .map(str::to_string)
    }

    /// Names of all points inside a rectangle.
    #[wasm_bindgen(js_name = findPointsInRect)]
    pub fn find_points_in_rect(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Vec<String> {
        self.store.points_in_rect(x1, y1, x2, y2)
    }

    // =========================================================================
    // Graph Utilities
    // =========================================================================

    /// Bounding box of all points as [min_x, min_y, max_x, max_y].
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f64>> {
        self.store
            .bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }

    /// Everything needed to draw the map:
    /// `{ points: [{id, x, y}], edges: [{u, v, weight}] }` with `u < v`.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.store.snapshot())
    }

    /// Replace the whole map. On any invalid record the current map is kept.
    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&mut self, value: JsValue) -> Result<(), JsValue> {
        let snapshot: GraphSnapshot = serde_wasm_bindgen::from_value(value)?;
        self.store = GraphStore::from_snapshot(&snapshot).map_err(|e| rejected("loadSnapshot", e))?;
        console::debug(&format!(
            "snapshot loaded: {} points, {} edges",
            self.store.point_count(),
            self.store.edge_count()
        ));
        Ok(())
    }

    /// Clear all points and edges.
    pub fn clear(&mut self) {
        self.store.clear();
        console::debug("map cleared");
    }
}

impl Default for RouteMapWasm {
    fn default() -> Self {
        Self::new()
    }
}
