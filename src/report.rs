//! Plain-text rendering for the CLI.
//!
//! Renderers return strings so the binary decides where they go.

use crate::design::{ComponentSelection, DesignResult};
use serde_json::Value;
use std::fmt::Write;

/// Optional columns shown by `list`, when the first row carries them.
pub const LIST_EXTRA_COLUMNS: [&str; 5] = ["type", "mass_kg", "power_w", "capacity_wh", "thrust_kg"];

/// Columns for `list <category>`: id, name, then extras present on the first row.
pub fn list_columns(rows: &[Value]) -> Vec<&'static str> {
    let mut columns = vec!["id", "name"];
    if let Some(sample) = rows.first() {
        columns.extend(
            LIST_EXTRA_COLUMNS
                .iter()
                .copied()
                .filter(|key| sample.get(key).is_some()),
        );
    }
    columns
}

/// Left-aligned table with a header and a `-+-` rule.
pub fn render_table(rows: &[Value], columns: &[&str]) -> String {
    if rows.is_empty() {
        return "(no entries)\n".to_string();
    }
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|col| cell(row.get(col))).collect())
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, col)| {
            cells
                .iter()
                .map(|row| row[idx].chars().count())
                .chain([col.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(col, &width)| format!("{col:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | "));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{text:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | "));
    }
    out
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Human-readable evaluation report.
pub fn render_evaluation(selection: &ComponentSelection, result: &DesignResult) -> String {
    let payloads = if selection.payloads.is_empty() {
        "none".to_string()
    } else {
        selection.payloads.join(", ")
    };
    let env = &result.environment;

    let mut out = String::new();
    let _ = writeln!(out, "Frame: {}", selection.frame);
    let _ = writeln!(out, "Propulsion: {}", selection.propulsion);
    let _ = writeln!(out, "Battery: {}", selection.battery);
    let _ = writeln!(out, "Compute: {}", selection.compute);
    let _ = writeln!(out, "Radio: {}", selection.radio);
    let _ = writeln!(out, "Payloads: {payloads}");
    if !selection.mounted_nodes.is_empty() {
        let _ = writeln!(out, "Mounted nodes: {}", selection.mounted_nodes.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "All-up weight: {:.2} kg", result.mass_kg);
    let _ = writeln!(out, "Payload margin: {:.2} kg", result.payload_margin_kg);
    let _ = writeln!(
        out,
        "Thrust-to-weight: {:.2} (adjusted: {:.2})",
        result.thrust_to_weight, result.adjusted_thrust_to_weight
    );
    let _ = writeln!(out, "Power budget: {:.1} W", result.power_budget_w);
    let _ = writeln!(
        out,
        "Est. endurance: {:.1} min nominal / {:.1} min env-adjusted",
        result.estimated_endurance_min, result.adjusted_endurance_min
    );
    let _ = writeln!(
        out,
        "Environment: {}, {}",
        env.altitude().label,
        env.temperature().label
    );
    let _ = writeln!(out, "Role tags: {}", result.role_tags.join(", "));
    if result.has_warnings() {
        let _ = writeln!(out, "\nWarnings:");
        for warning in &result.warnings {
            let _ = writeln!(out, "- {warning}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use serde_json::json;

    #[test]
    fn columns_follow_first_row() {
        let rows = vec![
            json!({"id": "b1", "name": "Pack", "mass_kg": 1.1, "capacity_wh": 222}),
            json!({"id": "b2", "name": "Pack 2", "thrust_kg": 9}),
        ];
        assert_eq!(
            list_columns(&rows),
            vec!["id", "name", "mass_kg", "capacity_wh"]
        );
        assert_eq!(list_columns(&[]), vec!["id", "name"]);
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let rows = vec![
            json!({"id": "eo", "name": "EO camera", "role_tags": ["isr", "recon"]}),
            json!({"id": "sigint-pod", "name": "Pod"}),
        ];
        let table = render_table(&rows, &["id", "name", "role_tags"]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "id         | name      | role_tags ");
        assert_eq!(lines[1], "-----------+-----------+-----------");
        assert_eq!(lines[2], "eo         | EO camera | isr, recon");
        assert_eq!(lines[3], "sigint-pod | Pod       |           ");
        assert_eq!(render_table(&[], &["id"]), "(no entries)\n");
    }

    #[test]
    fn report_lists_warnings_last() {
        let selection = ComponentSelection::new("quad-x", "prop-a", "batt-a", "cpu-a", "radio-a");
        let result = DesignResult {
            mass_kg: 2.5,
            payload_margin_kg: 1.0,
            thrust_to_weight: 2.4,
            adjusted_thrust_to_weight: 2.4,
            estimated_endurance_min: 13.1,
            adjusted_endurance_min: 13.1,
            power_budget_w: 420.0,
            role_tags: vec!["recon".to_string()],
            warnings: vec!["Propulsion does not list this frame as compatible".to_string()],
            environment: Environment::default(),
        };
        let text = render_evaluation(&selection, &result);
        assert!(text.contains("Payloads: none\n"));
        assert!(text.contains("All-up weight: 2.50 kg\n"));
        assert!(text.contains("Environment: Sea level (0-500 m), Standard (10-35 C)\n"));
        assert!(text.ends_with("Warnings:\n- Propulsion does not list this frame as compatible\n"));
    }
}
