use anyhow::Result;

use crate::roi::{RoiResult, ScenarioKind, ScenarioSet};
use crate::stats::{PhaseStats, PhaseTrend};

pub fn stats_to_csv(stats: &[PhaseStats]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "phase", "min", "q1", "median", "q3", "max", "mean", "count", "source_count",
    ])?;
    for s in stats {
        writer.write_record([
            s.phase.as_slug().to_string(),
            format!("{:.2}", s.min),
            format!("{:.2}", s.q1),
            format!("{:.2}", s.median),
            format!("{:.2}", s.q3),
            format!("{:.2}", s.max),
            format!("{:.2}", s.mean),
            s.count.to_string(),
            s.source_count.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn trends_to_csv(trends: &[PhaseTrend]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["phase", "year", "mean", "count"])?;
    for trend in trends {
        for point in &trend.points {
            writer.write_record([
                trend.phase.as_slug().to_string(),
                point.year.to_string(),
                format!("{:.1}", point.mean),
                point.count.to_string(),
            ])?;
        }
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn roi_to_csv(result: &RoiResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "phase",
        "included",
        "weight",
        "impact_pct",
        "hours_saved",
        "cost_savings",
    ])?;
    for p in &result.phase_breakdown {
        writer.write_record([
            p.phase.as_slug().to_string(),
            p.included.to_string(),
            format!("{:.4}", p.weight),
            format!("{:.1}", p.impact_pct),
            format!("{:.0}", p.hours_saved),
            format!("{:.0}", p.cost_savings),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn scenarios_to_csv(scenarios: &ScenarioSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "scenario",
        "total_hours_saved",
        "total_cost_savings",
        "total_investment",
        "net_roi",
        "roi_ratio",
    ])?;
    for kind in ScenarioKind::ALL {
        let result = scenarios.get(kind);
        writer.write_record([
            kind.as_slug().to_string(),
            format!("{:.0}", result.total_hours_saved),
            format!("{:.0}", result.total_cost_savings),
            format!("{:.0}", result.total_investment),
            format!("{:.0}", result.net_roi),
            format!("{:.1}", result.roi_ratio),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use crate::corpus::store::sample_corpus;
    use crate::output::csv::stats_to_csv;
    use crate::stats::summary::phase_stats;

    #[test]
    fn stats_csv_has_one_row_per_phase_plus_header() {
        let corpus = sample_corpus();
        let stats = phase_stats(&corpus.observations);
        let rendered = stats_to_csv(&stats).expect("csv");
        assert_eq!(rendered.trim().lines().count(), stats.len() + 1);
        assert!(rendered.starts_with("phase,min,q1,median"));
    }
}
