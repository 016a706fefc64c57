use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::corpus::Phase;
use crate::roi::{PhaseEvidence, RoiResult, ScenarioKind, ScenarioSet};
use crate::stats::{EraComparison, PhaseStats, PhaseTrend};

pub fn render_stats_table(stats: &[PhaseStats]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Phase", "Min", "Q1", "Median", "Q3", "Max", "Mean", "N", "Sources",
    ]);

    for s in stats {
        table.add_row(Row::from(vec![
            Cell::new(s.phase.to_string()),
            pct_cell(s.min, s.count),
            pct_cell(s.q1, s.count),
            pct_cell(s.median, s.count),
            pct_cell(s.q3, s.count),
            pct_cell(s.max, s.count),
            pct_cell(s.mean, s.count),
            Cell::new(s.count.to_string()),
            Cell::new(s.source_count.to_string()),
        ]));
    }
    table.to_string()
}

fn pct_cell(value: f64, count: usize) -> Cell {
    if count == 0 {
        return Cell::new("-");
    }
    let cell = Cell::new(format!("{value:+.1}%"));
    if value < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn render_trends_table(trends: &[PhaseTrend]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Phase", "Year", "Mean", "N"]);
    for trend in trends {
        for point in &trend.points {
            table.add_row(vec![
                trend.phase.to_string(),
                point.year.to_string(),
                format!("{:+.1}%", point.mean),
                point.count.to_string(),
            ]);
        }
    }
    table.to_string()
}

pub fn render_eras_table(comparisons: &[EraComparison]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Phase", "Early mean", "Agentic mean", "Delta"]);
    for c in comparisons {
        let delta_cell = if c.delta < 0.0 {
            Cell::new(format!("{:+.1}%", c.delta)).fg(Color::Red)
        } else {
            Cell::new(format!("{:+.1}%", c.delta)).fg(Color::Green)
        };
        table.add_row(Row::from(vec![
            Cell::new(c.phase.to_string()),
            Cell::new(format!("{:+.1}%", c.early_mean)),
            Cell::new(format!("{:+.1}%", c.agentic_mean)),
            delta_cell,
        ]));
    }
    table.to_string()
}

pub fn render_weights_table(weights: &[(Phase, f64)]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Phase", "Weight"]);
    for (phase, weight) in weights {
        table.add_row(vec![phase.to_string(), format!("{weight:.3}")]);
    }
    table.to_string()
}

pub fn render_roi_table(result: &RoiResult) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Phase",
        "Included",
        "Weight",
        "Impact",
        "Hours saved",
        "Savings (EUR)",
    ]);

    for p in &result.phase_breakdown {
        let included = if p.included { "YES" } else { "NO" };
        let included_cell = if p.included {
            Cell::new(included).fg(Color::Green)
        } else {
            Cell::new(included).fg(Color::DarkGrey)
        };
        table.add_row(Row::from(vec![
            Cell::new(p.phase.to_string()),
            included_cell,
            Cell::new(format!("{:.3}", p.weight)),
            Cell::new(format!("{:+.1}%", p.impact_pct)),
            Cell::new(format!("{:.0}", p.hours_saved)),
            Cell::new(format!("{:.0}", p.cost_savings)),
        ]));
    }

    let mut out = table.to_string();
    out.push_str(&format!(
        "\nSavings: {:.0} EUR ({:.0} h) | Investment: {:.0} EUR (tooling {:.0}, consulting {:.0}, training {:.0}, internal {:.0}) | Net: {:+.0} EUR | Ratio: {:.1}x",
        result.total_cost_savings,
        result.total_hours_saved,
        result.total_investment,
        result.tooling_cost,
        result.consulting_cost,
        result.training_cost,
        result.internal_cost,
        result.net_roi,
        result.roi_ratio,
    ));
    out
}

pub fn render_scenarios_table(scenarios: &ScenarioSet) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Scenario",
        "Hours saved",
        "Savings (EUR)",
        "Investment (EUR)",
        "Net ROI (EUR)",
        "Ratio",
    ]);

    for kind in ScenarioKind::ALL {
        let result = scenarios.get(kind);
        let net_cell = if result.net_roi < 0.0 {
            Cell::new(format!("{:+.0}", result.net_roi)).fg(Color::Red)
        } else {
            Cell::new(format!("{:+.0}", result.net_roi)).fg(Color::Green)
        };
        table.add_row(Row::from(vec![
            Cell::new(kind.to_string()),
            Cell::new(format!("{:.0}", result.total_hours_saved)),
            Cell::new(format!("{:.0}", result.total_cost_savings)),
            Cell::new(format!("{:.0}", result.total_investment)),
            net_cell,
            Cell::new(format!("{:.1}x", result.roi_ratio)),
        ]));
    }
    table.to_string()
}

pub fn render_evidence_table(kind: ScenarioKind, evidence: &[PhaseEvidence]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Phase", "Impact used", "Year", "Type", "Source", "Reported"]);

    for group in evidence {
        if group.observations.is_empty() {
            continue;
        }
        for obs in &group.observations {
            table.add_row(vec![
                group.phase.to_string(),
                format!("{:+.1}%", group.impact_pct),
                obs.year.to_string(),
                obs.data_type.to_string(),
                obs.source.clone(),
                format!("{:+.1}%", obs.impact_pct),
            ]);
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Scenario: {kind}\n"));
    out.push_str(&table.to_string());
    out
}
