use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{ActivityCategory, CategoryId, StudentId};
use super::error::ScoringError;
use super::participation::CountedParticipation;

/// Categories keyed by id for lookups during validation and capping.
pub type CategoryIndex = BTreeMap<CategoryId, ActivityCategory>;

/// Rejects negative caps; they are configuration errors, not a request for zero credit.
pub fn index_categories(
    categories: impl IntoIterator<Item = ActivityCategory>,
) -> Result<CategoryIndex, ScoringError> {
    let mut index = CategoryIndex::new();
    for category in categories {
        if let Some(max_points) = category.max_points {
            if max_points < Decimal::ZERO {
                return Err(ScoringError::NegativeCap {
                    category_id: category.id,
                    max_points,
                });
            }
        }
        index.insert(category.id.clone(), category);
    }
    Ok(index)
}

/// Best achievable capped total: the sum of every category cap. Uncapped
/// categories add nothing.
pub fn max_total_points(categories: &CategoryIndex) -> Decimal {
    categories
        .values()
        .filter_map(|category| category.max_points)
        .sum()
}

/// Per-category points for one student in one semester, before and after the cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub student_id: StudentId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub activity_count: usize,
    pub max_points: Option<Decimal>,
    pub raw_sum: Decimal,
    pub capped_sum: Decimal,
}

impl CategoryTotal {
    /// Points lost to the cap.
    pub fn excess(&self) -> Decimal {
        self.raw_sum - self.capped_sum
    }

    pub fn is_capped(&self) -> bool {
        self.capped_sum < self.raw_sum
    }
}

/// Group counted participations by category and apply each category's cap.
///
/// Output is ordered by category id. Participations whose category is not in
/// `categories` form an uncapped group named after the id.
pub fn cap_by_category(
    participations: &[CountedParticipation],
    categories: &CategoryIndex,
) -> Result<Vec<CategoryTotal>, ScoringError> {
    let mut groups: BTreeMap<&CategoryId, Vec<&CountedParticipation>> = BTreeMap::new();
    for participation in participations {
        groups
            .entry(&participation.category_id)
            .or_default()
            .push(participation);
    }

    let mut totals = Vec::with_capacity(groups.len());
    for (category_id, members) in groups {
        let category = categories.get(category_id);
        let max_points = category.and_then(|category| category.max_points);
        if let Some(cap) = max_points {
            if cap < Decimal::ZERO {
                return Err(ScoringError::NegativeCap {
                    category_id: category_id.clone(),
                    max_points: cap,
                });
            }
        }

        let raw_sum: Decimal = members.iter().map(|member| member.points).sum();
        let capped_sum = match max_points {
            Some(cap) => raw_sum.min(cap),
            None => raw_sum,
        };

        // Groups are created on first push, so never empty.
        totals.push(CategoryTotal {
            student_id: members[0].student_id.clone(),
            category_id: category_id.clone(),
            category_name: category
                .map(|category| category.name.clone())
                .unwrap_or_else(|| category_id.to_string()),
            activity_count: members.len(),
            max_points,
            raw_sum,
            capped_sum,
        });
    }

    Ok(totals)
}
