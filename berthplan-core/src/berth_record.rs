use serde::Deserialize;
use serde_with::serde_as;

use crate::deserialize_utils::{LenientFloat, LenientInt, LenientString, OneFlag};

/// A planned vessel call as delivered by the terminal's berth plan API.
///
/// The source is known to omit fields and to mix value types between records, every field
/// therefore defaults instead of failing deserialization.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BerthRecord {
    #[serde_as(as = "LenientString")]
    pub planned_bollard: Option<String>,
    #[serde(rename = "vesselLOA")]
    #[serde_as(as = "LenientFloat")]
    pub vessel_loa: Option<f64>,
    #[serde_as(as = "OneFlag")]
    pub is_starboard_berth: bool,
    #[serde_as(as = "LenientString")]
    pub arrival_voyage: Option<String>,
    #[serde_as(as = "LenientString")]
    pub vessel_name: Option<String>,
    #[serde_as(as = "LenientString")]
    pub vessel_code: Option<String>,
    #[serde_as(as = "LenientString")]
    pub imo_code: Option<String>,
    #[serde_as(as = "LenientString")]
    pub etb: Option<String>,
    #[serde_as(as = "LenientString")]
    pub etd: Option<String>,
    #[serde_as(as = "LenientString")]
    pub etc: Option<String>,
    #[serde_as(as = "LenientString")]
    pub operator_code: Option<String>,
    #[serde(rename = "service_Route")]
    #[serde_as(as = "LenientString")]
    pub service_route: Option<String>,
    #[serde_as(as = "LenientString")]
    pub service_name: Option<String>,
    #[serde_as(as = "LenientInt")]
    pub planned_load_moves: Option<i64>,
    #[serde_as(as = "LenientInt")]
    pub planned_discharge_moves: Option<i64>,
    #[serde_as(as = "LenientInt")]
    pub planned_shifting_moves: Option<i64>,
    #[serde_as(as = "LenientFloat")]
    pub average_cranes: Option<f64>,
}

impl BerthRecord {
    pub fn load_moves(&self) -> i64 {
        self.planned_load_moves.unwrap_or_default()
    }

    pub fn discharge_moves(&self) -> i64 {
        self.planned_discharge_moves.unwrap_or_default()
    }

    pub fn shifting_moves(&self) -> i64 {
        self.planned_shifting_moves.unwrap_or_default()
    }

    /// Sum of all planned moves, saturating at the `i64` bounds.
    pub fn total_moves(&self) -> i64 {
        self.load_moves()
            .saturating_add(self.discharge_moves())
            .saturating_add(self.shifting_moves())
    }

    pub fn loa(&self) -> f64 {
        self.vessel_loa.unwrap_or_default()
    }
}
