//! Plain-text rendering of an extracted path.

use crate::core::search::FoundPath;

const RULE_WIDTH: usize = 60;

/// Render the human-readable report for a found path.
///
/// Output is a pure function of `path`, so identical inputs give
/// byte-identical reports.
pub fn render_report(path: &FoundPath) -> String {
    let mut out = String::from("Optimal Path (Maximum Probability Path via Induced Strategy)\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str(&format!("\nTotal steps: {}\n", path.steps.len()));
    out.push_str(&format!("Initial state: {}\n", path.initial_state));
    out.push_str(&format!("Final state: {}\n", path.final_state));
    out.push_str("Goal reached: YES\n");
    out.push_str(&format!("Path probability: {:.6}\n", path.probability));
    out.push_str("Note: This path MAXIMIZES success probability\n");
    out.push_str("      Failed states are excluded\n");
    out.push_str("\nPath:\n");
    out.push_str(&"-".repeat(RULE_WIDTH));

    for step in &path.steps {
        let labels = if step.labels.is_empty() {
            "none".to_string()
        } else {
            step.labels.join(", ")
        };
        out.push_str(&format!("\n\nStep {}: State {}\n", step.step, step.state_id));
        out.push_str(&format!("  Labels: {labels}\n"));
        out.push_str("  Variables:");
        for (var, value) in step.state.iter() {
            out.push_str(&format!("\n    {var} = {value}"));
        }
        // Unnamed actions get no line, like the final step.
        let action = step.action.as_deref().filter(|action| !action.is_empty());
        if let (Some(action), Some(prob)) = (action, step.transition_prob) {
            out.push_str(&format!("\n  Action: {action} (prob={prob:.4})"));
        }
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Assignment, PathStep, Value};

    fn step(step: usize, state_id: u64, action: Option<(&str, f64)>) -> PathStep {
        let state: Assignment = [("loc".to_string(), Value::Integer(state_id as i64))]
            .into_iter()
            .collect();
        PathStep {
            step,
            state_id,
            state,
            labels: Vec::new(),
            cumulative_prob: 1.0,
            action: action.map(|(name, _)| name.to_string()),
            transition_prob: action.map(|(_, prob)| prob),
        }
    }

    #[test]
    fn renders_header_and_step_blocks() {
        let mut first = step(0, 0, Some(("move1", 0.6)));
        first.labels = vec!["init".to_string()];
        let path = FoundPath {
            steps: vec![first, step(1, 1, None)],
            initial_state: 0,
            final_state: 1,
            probability: 0.6,
        };
        let report = render_report(&path);
        assert!(report.contains("Total steps: 2\n"));
        assert!(report.contains("Goal reached: YES\n"));
        assert!(report.contains("Path probability: 0.600000\n"));
        assert!(report.contains(
            "Step 0: State 0\n  Labels: init\n  Variables:\n    loc = 0\n  Action: move1 (prob=0.6000)"
        ));
        assert!(report.contains("Step 1: State 1\n  Labels: none\n  Variables:\n    loc = 1\n"));
        assert_eq!(report.matches("Action:").count(), 1);
    }

    #[test]
    fn unnamed_action_has_no_action_line() {
        let mut first = step(0, 0, None);
        first.transition_prob = Some(0.6);
        let path = FoundPath {
            steps: vec![first, step(1, 1, None)],
            initial_state: 0,
            final_state: 1,
            probability: 0.6,
        };
        let report = render_report(&path);
        assert!(!report.contains("Action:"));
        assert!(report.contains("Path probability: 0.600000\n"));
        assert!(report.ends_with("    loc = 1\n"));
    }
}
