use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::capping::CategoryTotal;

/// Decimal places exposed to callers.
pub const POINT_SCALE: u32 = 2;

/// Round a point value for display. Sums stay exact until this boundary.
pub fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(POINT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal places of [`completion_ratio`].
pub const RATIO_SCALE: u32 = 4;

/// Share of `max_total` reached, clamped to `[0, 1]`. Zero when nothing is capped.
pub fn completion_ratio(total_capped: Decimal, max_total: Decimal) -> Decimal {
    if max_total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (total_capped / max_total)
        .min(Decimal::ONE)
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Semester totals before and after per-category caps. Values are exact; call
/// [`PointTotals::rounded`] only when copying them into output records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PointTotals {
    pub total_raw: Decimal,
    pub total_capped: Decimal,
}

impl PointTotals {
    pub fn rounded(self) -> Self {
        Self {
            total_raw: round_points(self.total_raw),
            total_capped: round_points(self.total_capped),
        }
    }
}

pub fn aggregate(category_totals: &[CategoryTotal]) -> PointTotals {
    let (raw, capped) = category_totals
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(raw, capped), total| {
            (raw + total.raw_sum, capped + total.capped_sum)
        });

    PointTotals {
        total_raw: raw,
        total_capped: capped,
    }
}
