use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::lenient;
use crate::error::PlanError;

/// A single step of a generated plan.
///
/// Tasks are treated as values: post-processing never edits one in place, it
/// builds a replacement with [`Task::with_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Stable identifier used for dependencies
    #[serde(deserialize_with = "lenient::task_id")]
    pub id: String,
    /// Short, action-oriented summary
    pub title: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub description: Option<String>,
    /// Suggested owner role
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub owner: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub due_date: Option<NaiveDate>,
    /// Planned duration when explicit dates are unavailable
    #[serde(default, deserialize_with = "lenient::optional_duration")]
    #[schema(minimum = 1)]
    pub duration_days: Option<u32>,
    /// IDs of tasks that must finish first
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub depends_on: Vec<String>,
    /// Model confidence in the task placement, 0.0 to 1.0
    #[serde(default, deserialize_with = "lenient::optional_confidence")]
    #[schema(minimum = 0.0, maximum = 1.0)]
    pub confidence: Option<f64>,
    /// Tutorials, documentation or tools that help complete the task
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub reference_links: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            owner: None,
            start_date: None,
            due_date: None,
            duration_days: None,
            depends_on: Vec::new(),
            confidence: None,
            reference_links: Vec::new(),
        }
    }

    pub fn depending_on<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = Some(days);
        self
    }

    /// Copy of this task with both dates replaced; every other field is kept.
    pub fn with_schedule(&self, start_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            due_date: Some(due_date),
            ..self.clone()
        }
    }

    /// True when both the start and the due date are known.
    pub fn is_scheduled(&self) -> bool {
        self.start_date.is_some() && self.due_date.is_some()
    }

    /// Decode one element of a model-produced `tasks` array.
    pub fn from_value(value: &Value, index: usize) -> Result<Self, PlanError> {
        if !value.is_object() {
            return Err(PlanError::MalformedTask {
                index,
                reason: format!("expected a task object, got {}", value),
            });
        }
        serde_json::from_value(value.clone()).map_err(|e| PlanError::MalformedTask {
            index,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_task_creation() {
        let task = Task::new("T1", "Clarify goal").depending_on(["T0"]);

        assert_eq!(task.id, "T1");
        assert_eq!(task.title, "Clarify goal");
        assert_eq!(task.depends_on, vec!["T0".to_string()]);
        assert!(!task.is_scheduled());
    }

    #[test]
    fn test_with_schedule_only_overrides_dates() {
        let original = Task::new("T1", "Draft roadmap")
            .with_duration(3)
            .depending_on(["T0"]);
        let scheduled = original.with_schedule(date(2025, 1, 1), date(2025, 1, 4));

        assert_eq!(scheduled.start_date, Some(date(2025, 1, 1)));
        assert_eq!(scheduled.due_date, Some(date(2025, 1, 4)));
        assert_eq!(scheduled.duration_days, Some(3));
        assert_eq!(scheduled.depends_on, original.depends_on);
        assert!(original.start_date.is_none());
    }

    #[test]
    fn test_from_value_full_task() {
        let value = json!({
            "id": "T1",
            "title": "Set up repository",
            "description": "Create the project skeleton",
            "owner": "Engineer",
            "start_date": "2025-10-13",
            "due_date": "2025-10-15",
            "duration_days": 2,
            "depends_on": [],
            "confidence": 0.85,
            "reference_links": ["https://docs.github.com"]
        });

        let task = Task::from_value(&value, 0).unwrap();
        assert_eq!(task.owner.as_deref(), Some("Engineer"));
        assert_eq!(task.start_date, Some(date(2025, 10, 13)));
        assert_eq!(task.due_date, Some(date(2025, 10, 15)));
        assert_eq!(task.duration_days, Some(2));
        assert_eq!(task.confidence, Some(0.85));
        assert_eq!(task.reference_links.len(), 1);
    }

    #[test]
    fn test_from_value_coerces_loose_fields() {
        let value = json!({
            "id": 3,
            "title": "Write docs",
            "description": null,
            "start_date": "",
            "due_date": "2025-10-20T17:00:00Z",
            "duration_days": "4",
            "depends_on": "T2",
            "confidence": "0.5",
            "reference_links": null,
            "priority": "high"
        });

        let task = Task::from_value(&value, 2).unwrap();
        assert_eq!(task.id, "3");
        assert!(task.description.is_none());
        assert!(task.start_date.is_none());
        assert_eq!(task.due_date, Some(date(2025, 10, 20)));
        assert_eq!(task.duration_days, Some(4));
        assert_eq!(task.depends_on, vec!["T2".to_string()]);
        assert_eq!(task.confidence, Some(0.5));
        assert!(task.reference_links.is_empty());
    }

    #[test]
    fn test_from_value_integer_dependencies() {
        let value = json!({"id": "2", "title": "Second", "depends_on": [1, " "]});
        let task = Task::from_value(&value, 1).unwrap();
        assert_eq!(task.depends_on, vec!["1".to_string()]);
    }

    #[test]
    fn test_from_value_rejects_malformed() {
        let cases = [
            json!({"title": "No id"}),
            json!({"id": "", "title": "Blank id"}),
            json!({"id": "T1"}),
            json!({"id": "T1", "title": "x", "duration_days": 0}),
            json!({"id": "T1", "title": "x", "duration_days": -2}),
            json!({"id": "T1", "title": "x", "confidence": 1.5}),
            json!({"id": "T1", "title": "x", "start_date": "soon"}),
            json!({"id": "T1", "title": "x", "depends_on": {"T0": true}}),
            json!("T1"),
        ];

        for (index, value) in cases.iter().enumerate() {
            match Task::from_value(value, index) {
                Err(PlanError::MalformedTask { index: reported, .. }) => {
                    assert_eq!(reported, index)
                }
                other => panic!("case {} should be malformed, got {:?}", index, other),
            }
        }
    }

    #[test]
    fn test_task_serialization_uses_iso_dates() {
        let task = Task::new("T1", "Kickoff").with_schedule(date(2025, 1, 6), date(2025, 1, 7));
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["start_date"], "2025-01-06");
        assert_eq!(json["due_date"], "2025-01-07");
        assert_eq!(json["depends_on"], json!([]));
    }
}
