//! Goal and progress analytics for the reports screens

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::{Category, Consultation, Goal, GoalStatus};

/// Aggregate over a set of goals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Share of completed goals, 0.0..=1.0 (0 when empty)
    pub completion_rate: f64,
    /// Mean progress percentage (0 when empty)
    pub average_progress: f64,
}

impl GoalStats {
    pub fn compute<'a>(goals: impl IntoIterator<Item = &'a Goal>, today: NaiveDate) -> Self {
        let mut stats = Self::default();
        let mut progress_sum = 0u64;

        for goal in goals {
            stats.total += 1;
            match goal.status {
                GoalStatus::Pending => stats.pending += 1,
                GoalStatus::InProgress => stats.in_progress += 1,
                GoalStatus::Completed => stats.completed += 1,
            }
            if goal.is_overdue(today) {
                stats.overdue += 1;
            }
            progress_sum += u64::from(goal.progress.min(100));
        }

        if stats.total > 0 {
            stats.completion_rate = stats.completed as f64 / stats.total as f64;
            stats.average_progress = progress_sum as f64 / stats.total as f64;
        }
        stats
    }
}

/// Goal stats of one category (`None` = uncategorized)
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category_id: Option<i64>,
    pub name: String,
    pub stats: GoalStats,
}

/// Per-category breakdown, by category name, uncategorized last.
/// Categories without goals are omitted.
pub fn by_category(
    goals: &[Goal],
    categories: &[Category],
    today: NaiveDate,
    uncategorized_label: &str,
) -> Vec<CategoryStats> {
    let mut groups: HashMap<Option<i64>, Vec<&Goal>> = HashMap::new();
    for goal in goals {
        groups.entry(goal.category_id).or_default().push(goal);
    }

    let name_of = |id: Option<i64>| -> String {
        id.and_then(|id| categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone())
            .or_else(|| {
                id.and_then(|id| {
                    goals
                        .iter()
                        .find_map(|g| g.category.as_ref().filter(|c| c.id == id))
                        .map(|c| c.name.clone())
                })
            })
            .unwrap_or_else(|| match id {
                Some(id) => format!("#{id}"),
                None => uncategorized_label.to_string(),
            })
    };

    let mut rows: Vec<CategoryStats> = groups
        .into_iter()
        .map(|(category_id, goals)| CategoryStats {
            category_id,
            name: name_of(category_id),
            stats: GoalStats::compute(goals, today),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.category_id
            .is_none()
            .cmp(&b.category_id.is_none())
            .then_with(|| a.name.cmp(&b.name))
    });
    rows
}

/// Average goal progress per child, through each goal's consultation
pub fn progress_by_child(goals: &[Goal], consultations: &[Consultation]) -> HashMap<i64, f64> {
    let child_of: HashMap<i64, i64> = consultations.iter().map(|c| (c.id, c.child_id)).collect();

    let mut sums: HashMap<i64, (u64, u64)> = HashMap::new();
    for goal in goals {
        if let Some(child_id) = child_of.get(&goal.consultation_id) {
            let entry = sums.entry(*child_id).or_default();
            entry.0 += u64::from(goal.progress.min(100));
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(child, (sum, count))| (child, sum as f64 / count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(id: i64, status: GoalStatus, progress: u8, category_id: Option<i64>) -> Goal {
        Goal {
            id,
            title: format!("g{id}"),
            description: None,
            status,
            due_date: Some(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            consultation_id: id % 2 + 1,
            category_id,
            progress,
            category: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_stats() {
        let goals = vec![
            goal(1, GoalStatus::Completed, 100, Some(1)),
            goal(2, GoalStatus::InProgress, 50, Some(1)),
            goal(3, GoalStatus::Pending, 0, None),
            goal(4, GoalStatus::Completed, 100, Some(2)),
        ];
        let stats = GoalStats::compute(&goals, today());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.overdue, 2);
        assert!((stats.completion_rate - 0.5).abs() < f64::EPSILON);
        assert!((stats.average_progress - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        let stats = GoalStats::compute(&[], today());
        assert_eq!(stats, GoalStats::default());
    }

    #[test]
    fn test_by_category_order() {
        let goals = vec![
            goal(1, GoalStatus::Completed, 100, Some(2)),
            goal(2, GoalStatus::Pending, 0, None),
            goal(3, GoalStatus::InProgress, 30, Some(1)),
            goal(4, GoalStatus::InProgress, 70, Some(7)),
        ];
        let categories = vec![
            Category { id: 1, name: "Social".into(), color: None },
            Category { id: 2, name: "Comunicação".into(), color: None },
        ];
        let rows = by_category(&goals, &categories, today(), "Sem categoria");
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["#7", "Comunicação", "Social", "Sem categoria"]);
    }

    #[test]
    fn test_progress_by_child() {
        let consultation = |id: i64, child_id: i64| -> Consultation {
            serde_json::from_value(serde_json::json!({
                "id": id, "date": "2024-01-01", "time": "10:00", "reason": "r",
                "childId": child_id, "psychologistId": 9
            }))
            .unwrap()
        };
        let consultations = vec![consultation(1, 10), consultation(2, 20)];
        let goals = vec![
            goal(2, GoalStatus::InProgress, 40, None), // consultation 1
            goal(4, GoalStatus::InProgress, 60, None), // consultation 1
            goal(3, GoalStatus::Completed, 100, None), // consultation 2
        ];
        let progress = progress_by_child(&goals, &consultations);
        assert_eq!(progress.get(&10), Some(&50.0));
        assert_eq!(progress.get(&20), Some(&100.0));
    }
}
