//! Built-in maps.
//!
//! The demo map is a dense twelve-station city network. Edge weights come
//! from the straight-line distance between stations via
//! [`geometric_weight`], so they follow whatever `EditorConfig` is passed in.

use crate::config::EditorConfig;
use crate::graph::{EdgeRecord, GraphSnapshot, GraphStore, Point, Result, geometric_weight};

/// Route endpoints the demo map opens with.
pub const DEMO_SOURCE: &str = "Howrah";
pub const DEMO_DESTINATION: &str = "Airport";

const DEMO_STATIONS: [(&str, f64, f64); 12] = [
    ("Howrah", 80.0, 280.0),
    ("Esplanade", 260.0, 230.0),
    ("Victoria", 200.0, 260.0),
    ("Maidan", 240.0, 300.0),
    ("ParkStreet", 310.0, 270.0),
    ("Sealdah", 330.0, 210.0),
    ("CollegeStreet", 300.0, 180.0),
    ("ScienceCity", 420.0, 300.0),
    ("SaltLake", 520.0, 240.0),
    ("NewTown", 620.0, 190.0),
    ("EcoPark", 650.0, 240.0),
    ("Airport", 700.0, 140.0),
];

const DEMO_CONNECTIONS: [(&str, &str); 17] = [
    ("Howrah", "Esplanade"),
    ("Howrah", "Victoria"),
    ("Esplanade", "Victoria"),
    ("Esplanade", "Sealdah"),
    ("Esplanade", "ParkStreet"),
    ("Victoria", "Maidan"),
    ("Maidan", "ParkStreet"),
    ("ParkStreet", "ScienceCity"),
    ("Sealdah", "CollegeStreet"),
    ("Sealdah", "ScienceCity"),
    ("Sealdah", "NewTown"),
    ("ScienceCity", "SaltLake"),
    ("SaltLake", "NewTown"),
    ("SaltLake", "EcoPark"),
    ("NewTown", "EcoPark"),
    ("NewTown", "Airport"),
    ("EcoPark", "Airport"),
];

/// The demo map as a snapshot.
pub fn demo_snapshot(config: &EditorConfig) -> GraphSnapshot {
    let points: Vec<Point> = DEMO_STATIONS
        .iter()
        .map(|&(id, x, y)| Point::new(id, x, y))
        .collect();

    let position = |id: &str| points.iter().find(|p| p.id == id);
    let edges = DEMO_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| {
            let weight = geometric_weight(position(a)?, position(b)?, config);
            Some(EdgeRecord::new(a, b, weight))
        })
        .collect();

    GraphSnapshot { points, edges }
}

/// A store loaded with the demo map.
pub fn demo_map(config: &EditorConfig) -> Result<GraphStore> {
    GraphStore::from_snapshot(&demo_snapshot(config))
}
