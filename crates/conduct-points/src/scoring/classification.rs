use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ScoringError;

/// Performance tier (xếp loại) derived from the capped semester total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Yeu,
    TrungBinh,
    Kha,
    Gioi,
    XuatSac,
}

impl Tier {
    pub const fn ordered() -> [Tier; 5] {
        [
            Tier::Yeu,
            Tier::TrungBinh,
            Tier::Kha,
            Tier::Gioi,
            Tier::XuatSac,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Tier::Yeu => "Yếu",
            Tier::TrungBinh => "Trung bình",
            Tier::Kha => "Khá",
            Tier::Gioi => "Giỏi",
            Tier::XuatSac => "Xuất sắc",
        }
    }

    /// Inclusive lower bound of the tier.
    pub fn lower_bound(self) -> Decimal {
        match self {
            Tier::Yeu => Decimal::ZERO,
            Tier::TrungBinh => Decimal::from(50),
            Tier::Kha => Decimal::from(70),
            Tier::Gioi => Decimal::from(80),
            Tier::XuatSac => Decimal::from(90),
        }
    }

    pub const fn next(self) -> Option<Tier> {
        match self {
            Tier::Yeu => Some(Tier::TrungBinh),
            Tier::TrungBinh => Some(Tier::Kha),
            Tier::Kha => Some(Tier::Gioi),
            Tier::Gioi => Some(Tier::XuatSac),
            Tier::XuatSac => None,
        }
    }
}

/// Map a capped total onto its tier. Negative totals are a caller bug and are rejected.
pub fn classify(total_capped: Decimal) -> Result<Tier, ScoringError> {
    if total_capped < Decimal::ZERO {
        return Err(ScoringError::NegativeTotal(total_capped));
    }

    let tier = Tier::ordered()
        .into_iter()
        .rev()
        .find(|tier| total_capped >= tier.lower_bound())
        .unwrap_or(Tier::Yeu);
    Ok(tier)
}

/// Points still needed to reach the next tier; `None` once at the top tier.
pub fn points_to_next_tier(total_capped: Decimal) -> Result<Option<Decimal>, ScoringError> {
    let tier = classify(total_capped)?;
    Ok(tier.next().map(|next| next.lower_bound() - total_capped))
}
