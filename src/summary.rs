//! Summary figures derived from fetched lists or grouped counts

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Equipment, OperabilityStatus};

/// Equipment readiness overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentSummary {
    pub total: usize,
    pub operable: usize,
    pub not_operable: usize,
    /// Share of operable units, one decimal (0 when there is no equipment)
    pub operable_percent: f64,
    /// Mean condition over units that have one recorded
    pub average_condition: Option<f64>,
}

/// Count of records carrying one status / category label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

pub fn equipment_summary(items: &[Equipment]) -> EquipmentSummary {
    let total = items.len();
    let operable = items
        .iter()
        .filter(|e| e.status == OperabilityStatus::Operable)
        .count();

    let conditions: Vec<i32> = items.iter().filter_map(|e| e.condition_percent).collect();
    let average_condition = if conditions.is_empty() {
        None
    } else {
        let sum: i64 = conditions.iter().map(|c| *c as i64).sum();
        Some(round1(sum as f64 / conditions.len() as f64))
    };

    EquipmentSummary {
        total,
        operable,
        not_operable: total - operable,
        operable_percent: percent(operable, total),
        average_condition,
    }
}

/// Count records per label, listing every label of `all` (zero counts included)
/// in declaration order
pub fn status_breakdown<T, S>(items: &[T], all: &[S], status_of: impl Fn(&T) -> S) -> Vec<StatusCount>
where
    S: Copy + PartialEq + std::fmt::Display,
{
    all.iter()
        .map(|label| StatusCount {
            status: label.to_string(),
            count: items.iter().filter(|item| status_of(*item) == *label).count(),
        })
        .collect()
}

/// Same shape as [`status_breakdown`], from counts already grouped by the database
pub fn grouped_breakdown<S>(all: &[S], grouped: &[(S, i64)]) -> Vec<StatusCount>
where
    S: Copy + PartialEq + std::fmt::Display,
{
    all.iter()
        .map(|label| StatusCount {
            status: label.to_string(),
            count: grouped
                .iter()
                .filter(|(status, _)| status == label)
                .map(|(_, n)| (*n).max(0) as usize)
                .sum(),
        })
        .collect()
}

/// `part / total` as a percentage rounded to one decimal
pub fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 * 100.0 / total as f64)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalStatus, ComplaintStatus};
    use chrono::Utc;

    fn equipment(status: OperabilityStatus, condition: Option<i32>) -> Equipment {
        Equipment {
            id: 1,
            name: "Walk Through Metal Detector".to_string(),
            equipment_type: "Security".to_string(),
            brand: None,
            certificate_number: None,
            install_year: Some(2018),
            condition_percent: condition,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_equipment_summary() {
        let items = vec![
            equipment(OperabilityStatus::Operable, Some(90)),
            equipment(OperabilityStatus::Operable, Some(75)),
            equipment(OperabilityStatus::NotOperable, None),
        ];
        let summary = equipment_summary(&items);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.operable, 2);
        assert_eq!(summary.not_operable, 1);
        assert_eq!(summary.operable_percent, 66.7);
        assert_eq!(summary.average_condition, Some(82.5));
    }

    #[test]
    fn test_empty_summary_has_zero_percent() {
        let summary = equipment_summary(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.operable_percent, 0.0);
        assert_eq!(summary.average_condition, None);
    }

    #[test]
    fn test_breakdown_lists_every_status() {
        let statuses = [ComplaintStatus::New, ComplaintStatus::New, ComplaintStatus::Done];
        let counts = status_breakdown(&statuses, ComplaintStatus::ALL, |s| *s);
        assert_eq!(
            counts,
            vec![
                StatusCount { status: "Baru".to_string(), count: 2 },
                StatusCount { status: "Diproses".to_string(), count: 0 },
                StatusCount { status: "Selesai".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_grouped_breakdown_fills_missing_statuses() {
        let grouped = [(ApprovalStatus::Rejected, 1), (ApprovalStatus::Pending, 4)];
        assert_eq!(
            grouped_breakdown(ApprovalStatus::ALL, &grouped),
            vec![
                StatusCount { status: "pending".to_string(), count: 4 },
                StatusCount { status: "approved".to_string(), count: 0 },
                StatusCount { status: "rejected".to_string(), count: 1 },
            ]
        );
        assert!(grouped_breakdown::<ApprovalStatus>(ApprovalStatus::ALL, &[])
            .iter()
            .all(|c| c.count == 0));
    }
}
