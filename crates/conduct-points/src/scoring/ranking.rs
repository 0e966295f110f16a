use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::round_points;
use super::classification::{classify, Tier};
use super::domain::{ClassId, StudentId};
use super::error::ScoringError;
use super::semester::SemesterKey;

/// Exact capped semester total of one student, the input to ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentTotal {
    pub student_id: StudentId,
    pub mssv: String,
    pub total_capped: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry {
    pub student_id: StudentId,
    pub mssv: String,
    pub total_capped: Decimal,
    pub tier: Tier,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassRanking {
    pub class_id: ClassId,
    pub semester: SemesterKey,
    pub class_size: usize,
    pub entries: Vec<RankEntry>,
}

impl ClassRanking {
    pub fn rank_of(&self, student_id: &StudentId) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.student_id == *student_id)
            .map(|entry| entry.rank)
    }

    /// Number of students per tier, lowest tier first. Every tier is listed.
    pub fn tier_distribution(&self) -> Vec<TierCount> {
        Tier::ordered()
            .into_iter()
            .map(|tier| TierCount {
                tier,
                label: tier.label(),
                count: self
                    .entries
                    .iter()
                    .filter(|entry| entry.tier == tier)
                    .count(),
            })
            .collect()
    }
}

/// Highest total first; equal totals by ascending MSSV, then student id.
fn standing(left: &StudentTotal, right: &StudentTotal) -> Ordering {
    right
        .total_capped
        .cmp(&left.total_capped)
        .then_with(|| left.mssv.cmp(&right.mssv))
        .then_with(|| left.student_id.cmp(&right.student_id))
}

/// Rank is the 1-based position in the sorted order, so tied students receive
/// distinct consecutive ranks decided by the tie-break. Ordering and tiers use the
/// exact totals; entries carry the rounded value.
pub fn rank_students(mut totals: Vec<StudentTotal>) -> Result<Vec<RankEntry>, ScoringError> {
    totals.sort_by(standing);

    totals
        .into_iter()
        .zip(1u32..)
        .map(|(total, rank)| {
            Ok(RankEntry {
                tier: classify(total.total_capped)?,
                student_id: total.student_id,
                mssv: total.mssv,
                total_capped: round_points(total.total_capped),
                rank,
            })
        })
        .collect()
}
