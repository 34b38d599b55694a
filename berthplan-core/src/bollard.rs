use serde::Deserialize;
use std::collections::HashMap;

/// Physical layout of the quay.
///
/// Indices are linear positions along the berth, expressed in the same unit as vessel lengths.
/// Bollards are numbered downwards from `last_bollard_number`, which sits at `end_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerminalGeometry {
    pub start_index: i64,
    pub end_index: i64,
    pub last_bollard_number: i64,
    pub bollard_spacing: i64,
}

impl Default for TerminalGeometry {
    fn default() -> Self {
        Self {
            start_index: 0,
            end_index: 1585,
            last_bollard_number: 81,
            bollard_spacing: 20,
        }
    }
}

impl TerminalGeometry {
    /// Number of bollards that fit between the start and end index.
    ///
    /// Degenerate geometries (an empty range or a non-positive spacing) have no bollards.
    pub fn bollard_count(&self) -> i64 {
        if self.end_index <= self.start_index || self.bollard_spacing <= 0 {
            0
        } else {
            (self.end_index - self.start_index) / self.bollard_spacing
        }
    }
}

/// Lookup from bollard label (`B<n>`) to its position on the quay.
#[derive(Debug, Clone)]
pub struct BollardMap {
    positions: HashMap<String, i64>,
}

impl BollardMap {
    pub fn new(geometry: &TerminalGeometry) -> BollardMap {
        let positions = (0..geometry.bollard_count())
            .map(|step| {
                (
                    format!("B{}", geometry.last_bollard_number - step),
                    geometry.end_index - step * geometry.bollard_spacing,
                )
            })
            .collect();

        BollardMap { positions }
    }

    /// Expects an uppercased label such as `B42`.
    pub fn position(&self, label: &str) -> Option<i64> {
        self.positions.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.positions.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for BollardMap {
    fn default() -> Self {
        Self::new(&TerminalGeometry::default())
    }
}
