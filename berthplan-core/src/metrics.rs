use snafu::ResultExt;
use tracing::{debug, error};

use crate::{
    BollardMap, TerminalGeometry,
    bollard_error::{InvalidSubOffsetSnafu, SubOffsetOverflowSnafu, UnknownBollardSnafu},
    error::BollardError,
};

/// Where a set of metric points came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MetricKind {
    /// Derived from a planned bollard reference.
    Real,
    /// Synthesized from the quay end because the call has no bollard reference yet.
    Mock,
}

/// Fore and aft mooring points of a single vessel call, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricResult {
    pub fore: f64,
    pub aft: f64,
    pub kind: MetricKind,
}

impl MetricResult {
    fn new(fore: f64, aft: f64, kind: MetricKind) -> MetricResult {
        MetricResult {
            fore: round_two_decimals(fore),
            aft: round_two_decimals(aft),
            kind,
        }
    }

    pub fn is_real(&self) -> bool {
        self.kind == MetricKind::Real
    }
}

#[derive(Debug, Clone)]
pub struct BerthMetricCalculator {
    geometry: TerminalGeometry,
    bollards: BollardMap,
}

impl BerthMetricCalculator {
    pub fn new(geometry: TerminalGeometry) -> BerthMetricCalculator {
        BerthMetricCalculator {
            bollards: BollardMap::new(&geometry),
            geometry,
        }
    }

    pub fn geometry(&self) -> &TerminalGeometry {
        &self.geometry
    }

    pub fn bollards(&self) -> &BollardMap {
        &self.bollards
    }

    /// Computes the mooring points of a vessel with length `loa`.
    ///
    /// A reference starting with `B` (case-insensitive, surrounding whitespace ignored) is
    /// resolved as `B<n>[.<sub-offset>]` against the bollard map and fails if the bollard is
    /// unknown. Anything else, including an empty reference, produces mock metrics anchored at
    /// the end of the quay.
    pub fn get_metrics(
        &self,
        planned_bollard: &str,
        loa: f64,
        is_starboard: bool,
    ) -> Result<MetricResult, BollardError> {
        let result = if planned_bollard.trim().to_uppercase().starts_with('B') {
            self.real_metrics(planned_bollard, loa, is_starboard)?
        } else {
            self.mock_metrics(loa, is_starboard)
        };

        debug!(
            planned_bollard,
            loa,
            is_starboard,
            fore = result.fore,
            aft = result.aft,
            kind = %result.kind,
            "computed berth metrics"
        );

        Ok(result)
    }

    fn real_metrics(
        &self,
        planned_bollard: &str,
        loa: f64,
        is_starboard: bool,
    ) -> Result<MetricResult, BollardError> {
        let mut parts = planned_bollard.split('.');
        let base = parts.next().unwrap_or_default().trim().to_uppercase();

        let sub_offset = parts.next().map(str::trim);
        let offset = match sub_offset {
            Some(sub_offset) => sub_offset
                .parse::<i64>()
                .context(InvalidSubOffsetSnafu {
                    reference: planned_bollard,
                    sub_offset,
                })?
                .checked_mul(2),
            None => Some(0),
        };

        let Some(position) = self.bollards.position(&base) else {
            error!("unknown bollard: {base}");
            return UnknownBollardSnafu { bollard: base }.fail();
        };

        let Some(fore) = offset.and_then(|offset| position.checked_add(offset)) else {
            return SubOffsetOverflowSnafu {
                reference: planned_bollard,
                sub_offset: sub_offset.unwrap_or_default(),
            }
            .fail();
        };

        let fore = fore as f64;
        let aft = if is_starboard { fore + loa } else { fore - loa };

        Ok(MetricResult::new(fore, aft, MetricKind::Real))
    }

    fn mock_metrics(&self, loa: f64, is_starboard: bool) -> MetricResult {
        let end = self.geometry.end_index as f64;
        let (fore, aft) = if is_starboard {
            (end - loa, end)
        } else {
            (end, end - loa)
        };

        MetricResult::new(fore, aft, MetricKind::Mock)
    }
}

impl Default for BerthMetricCalculator {
    fn default() -> Self {
        Self::new(TerminalGeometry::default())
    }
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
