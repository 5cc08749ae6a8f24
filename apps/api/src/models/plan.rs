//! Execution plan — the costed task breakdown produced by the translator
//! agent and refined by the costing loop.

use serde::{Deserialize, Serialize};

/// Task priority classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Mandatory,
    Optional,
    NiceToHave,
}

/// Individual task in the execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPlan {
    pub task: String,
    pub description: String,
    /// Data Scientist, ML Engineer, etc.
    pub role: String,
    pub hours: f64,
    pub rate: f64,
    pub priority: Priority,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskPlan {
    pub fn cost(&self) -> f64 {
        self.hours * self.rate
    }
}

/// Complete execution plan with tasks and costing aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub tasks: Vec<TaskPlan>,
    pub total_hours: f64,
    pub total_cost: f64,
    pub mandatory_cost: f64,
    pub optional_cost: f64,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ExecutionPlan {
    /// Builds a plan from tasks with all aggregates computed.
    pub fn from_tasks(tasks: Vec<TaskPlan>, notes: Vec<String>) -> Self {
        let mut plan = ExecutionPlan {
            tasks,
            total_hours: 0.0,
            total_cost: 0.0,
            mandatory_cost: 0.0,
            optional_cost: 0.0,
            notes,
        };
        plan.recalculate_totals();
        plan
    }

    /// Recomputes all cost/hour aggregates from the current task list.
    pub fn recalculate_totals(&mut self) {
        self.total_hours = self.tasks.iter().map(|t| t.hours).sum();
        self.total_cost = self.tasks.iter().map(|t| t.cost()).sum();
        self.mandatory_cost = self
            .tasks
            .iter()
            .filter(|t| t.priority == Priority::Mandatory)
            .map(|t| t.cost())
            .sum();
        self.optional_cost = self.total_cost - self.mandatory_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn task(name: &str, hours: f64, rate: f64, priority: Priority) -> TaskPlan {
        TaskPlan {
            task: name.to_string(),
            description: format!("{name} description"),
            role: "Data Scientist".to_string(),
            hours,
            rate,
            priority,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_priority_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Priority::NiceToHave).unwrap(),
            r#""nice_to_have""#
        );
        let p: Priority = serde_json::from_str(r#""mandatory""#).unwrap();
        assert_eq!(p, Priority::Mandatory);
    }

    #[test]
    fn test_task_cost_is_hours_times_rate() {
        let t = task("EDA", 8.0, 75.0, Priority::Mandatory);
        assert!((t.cost() - 600.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recalculate_totals_splits_mandatory_and_optional() {
        let plan = ExecutionPlan::from_tasks(
            vec![
                task("EDA", 10.0, 50.0, Priority::Mandatory),
                task("Model training", 20.0, 50.0, Priority::Mandatory),
                task("Dashboard polish", 4.0, 50.0, Priority::Optional),
            ],
            vec![],
        );
        assert!((plan.total_hours - 34.0).abs() < f64::EPSILON);
        assert!((plan.total_cost - 1700.0).abs() < f64::EPSILON);
        assert!((plan.mandatory_cost - 1500.0).abs() < f64::EPSILON);
        assert!((plan.optional_cost - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_plan_totals_are_zero() {
        let plan = ExecutionPlan::from_tasks(vec![], vec![]);
        assert_eq!(plan.total_cost, 0.0);
        assert_eq!(plan.total_hours, 0.0);
    }

    #[test]
    fn test_task_dependencies_default_to_empty() {
        let json = r#"{
            "task": "EDA",
            "description": "Explore the data",
            "role": "Data Scientist",
            "hours": 8.0,
            "rate": 75.0,
            "priority": "mandatory"
        }"#;
        let t: TaskPlan = serde_json::from_str(json).unwrap();
        assert!(t.dependencies.is_empty());
    }
}
