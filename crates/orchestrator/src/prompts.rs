use chrono::{Days, NaiveDate};
use planner_core::PlanRequest;
use serde_json::{json, Value};

pub struct PlanPrompts;

impl PlanPrompts {
    /// Prompt asking the model for a dependency-aware plan as strict JSON.
    pub fn plan(request: &PlanRequest, horizon_days: u32, today: NaiveDate) -> String {
        let target_clause = request
            .target_date
            .map(|date| format!("The user needs this done by {}.", date))
            .unwrap_or_default();
        let horizon_clause = format!("Assume a planning horizon of {} days.", horizon_days);
        let guidance_clause = request
            .guidance
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(|g| format!("Additional context: {}.", g.trim_end_matches('.')))
            .unwrap_or_default();

        let example_start = today;
        let example_due = today.checked_add_days(Days::new(2)).unwrap_or(today);

        format!(
            r#"You are an expert execution strategist AI. Break down the following goal into a realistic, dependency-aware action plan.

Goal: {goal}
{target_clause}
{horizon_clause}
{guidance_clause}

Return ONLY valid JSON with this exact structure:
{{
  "metadata": {{
    "planning_strategy": "brief description of your planning approach",
    "assumptions": ["assumption 1", "assumption 2"]
  }},
  "tasks": [
    {{
      "id": "T1",
      "title": "Task title",
      "description": "Detailed description",
      "owner": "Role (optional)",
      "start_date": "{example_start}",
      "due_date": "{example_due}",
      "duration_days": 2,
      "depends_on": [],
      "confidence": 0.85,
      "reference_links": ["https://example.com/tutorial", "https://example.com/docs"]
    }}
  ]
}}

Requirements:
- Use ISO format (YYYY-MM-DD) for all dates
- Task IDs must be unique and sequential (T1, T2, T3, etc.)
- Dependencies must reference valid task IDs that come before
- Confidence is a float between 0.0 and 1.0
- Ensure logical task ordering and realistic timelines
- Include 5-10 meaningful tasks that cover the complete goal
- For each task, provide 1-3 helpful reference_links to tutorials, documentation, guides, or tools that would help someone complete that task
- Reference links should be real, publicly accessible URLs
- Prioritize official documentation, popular tutorials, and widely-used resources"#,
            goal = request.goal.trim(),
        )
    }

    /// Minimal shape hint passed to providers alongside the prompt.
    pub fn target_schema() -> Value {
        json!({
            "metadata": "object",
            "tasks": "array",
        })
    }
}
