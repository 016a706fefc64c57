use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use impact_oracle::config::{Config, ConfigOverrides};
use impact_oracle::corpus::filter::FilterSelection;
use impact_oracle::corpus::store::load_or_sample;
use impact_oracle::corpus::{Corpus, DataType, Phase, TemporalEra};
use impact_oracle::output::csv::{roi_to_csv, scenarios_to_csv, stats_to_csv, trends_to_csv};
use impact_oracle::output::json::render_json;
use impact_oracle::output::table::{
    render_eras_table, render_evidence_table, render_roi_table, render_scenarios_table,
    render_stats_table, render_trends_table, render_weights_table,
};
use impact_oracle::roi::scenario::{configured_scenarios, quartile_scenarios};
use impact_oracle::roi::weights::weights_from_corpus;
use impact_oracle::roi::{ScenarioKind, ScenarioProjection, ScenarioSet};
use impact_oracle::stats::summary::phase_stats;
use impact_oracle::stats::trends::{era_comparison, trend_series};
use impact_oracle::stats::{EraComparison, PhaseStats, PhaseTrend};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "impact-oracle",
    about = "Impact evidence statistics and adoption ROI projections"
)]
struct Cli {
    /// JSON corpus file; the built-in sample corpus is used when omitted
    #[arg(short = 'f', long)]
    corpus: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Comma-separated year filter, e.g. 2024,2025
    #[arg(long)]
    years: Option<String>,
    /// Comma-separated data-type filter, e.g. empirical,survey
    #[arg(long = "data-types")]
    data_types: Option<String>,
    /// Comma-separated phase filter, e.g. dev,qa
    #[arg(long)]
    phases: Option<String>,
    /// Era filter: all, early or agentic
    #[arg(long)]
    era: Option<String>,
    #[command(flatten)]
    inputs: InputArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct InputArgs {
    #[arg(long = "team-size")]
    team_size: Option<u32>,
    #[arg(long = "avg-salary")]
    avg_salary: Option<f64>,
    #[arg(long = "hours-per-year")]
    hours_per_year: Option<f64>,
    #[arg(long = "timeframe-years")]
    timeframe_years: Option<f64>,
    #[arg(long)]
    consulting: Option<f64>,
    #[arg(long)]
    training: Option<f64>,
    #[arg(long)]
    internal: Option<f64>,
    /// Comma-separated phases to include in the projection
    #[arg(long)]
    include: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Five-number summary and mean per phase
    Stats,
    /// Yearly mean series per phase
    Trends,
    /// Early vs agentic era means per phase
    Eras,
    /// Effective projection weights
    Weights {
        /// Derive weights from observation counts instead of the config
        #[arg(long = "from-data")]
        from_data: bool,
    },
    /// Quartile scenario projection over the selected dataset
    Roi {
        /// Which scenario's phase breakdown to render
        #[arg(long, default_value = "realistic")]
        scenario: String,
    },
    /// Configured scenarios with per-scenario corpus slices
    Scenarios {
        /// Show the observations behind each scenario
        #[arg(long)]
        evidence: bool,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(build_overrides(&cli.inputs)?);

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    config.validate()?;

    let corpus = load_or_sample(cli.corpus.as_deref())?;
    let selection = build_selection(&cli)?;

    match &cli.command {
        Commands::Stats => {
            let observations = selection.apply(&corpus.observations);
            print_stats(&phase_stats(&observations), cli.output)?;
        }
        Commands::Trends => {
            let observations = selection.apply(&corpus.observations);
            print_trends(&trend_series(&observations), cli.output)?;
        }
        Commands::Eras => {
            let observations = selection.apply(&corpus.observations);
            print_eras(&era_comparison(&observations), cli.output)?;
        }
        Commands::Weights { from_data } => {
            let weights = if *from_data {
                let observations = selection.apply(&corpus.observations);
                weights_from_corpus(&observations, &config.phases.weights)
            } else {
                config.calculator_inputs().phase_weights
            };
            let ordered: Vec<(Phase, f64)> = weights.into_iter().collect();
            print_weights(&ordered, cli.output)?;
        }
        Commands::Roi { scenario } => {
            let kind = ScenarioKind::from_str(scenario)?;
            let observations = selection.apply(&corpus.observations);
            info!(
                selected = observations.len(),
                total = corpus.len(),
                "projecting quartile scenarios"
            );
            let inputs = config.calculator_inputs();
            let scenarios = quartile_scenarios(&inputs, &phase_stats(&observations));
            print_roi(&scenarios, kind, cli.output)?;
        }
        Commands::Scenarios { evidence } => {
            warn_unused_selection(&cli);
            let inputs = config.calculator_inputs();
            let projection = configured_scenarios(&inputs, &corpus.observations);
            log_projection(&corpus, &projection);
            print_scenarios(&projection, *evidence, cli.output)?;
        }
        Commands::Config { .. } => unreachable!("config command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn build_overrides(args: &InputArgs) -> Result<ConfigOverrides> {
    Ok(ConfigOverrides {
        team_size: args.team_size,
        avg_salary: args.avg_salary,
        hours_per_year: args.hours_per_year,
        timeframe_years: args.timeframe_years,
        consulting: args.consulting,
        training: args.training,
        internal: args.internal,
        included_phases: args
            .include
            .as_deref()
            .map(parse_list::<Phase>)
            .transpose()?,
    })
}

fn build_selection(cli: &Cli) -> Result<FilterSelection> {
    Ok(FilterSelection {
        years: cli.years.as_deref().map(parse_list::<i32>).transpose()?,
        data_types: cli
            .data_types
            .as_deref()
            .map(parse_list::<DataType>)
            .transpose()?,
        phases: cli.phases.as_deref().map(parse_list::<Phase>).transpose()?,
        era: cli
            .era
            .as_deref()
            .map(|raw| TemporalEra::from_str(raw).map_err(|e| anyhow!(e)))
            .transpose()?
            .unwrap_or_default(),
    })
}

fn warn_unused_selection(cli: &Cli) {
    if cli.years.is_some() || cli.data_types.is_some() || cli.phases.is_some() || cli.era.is_some()
    {
        warn!("scenario projections use the per-scenario filters from the config; --years/--data-types/--phases/--era are ignored here");
    }
}

fn parse_list<T>(raw: &str) -> Result<Vec<T>>
where
    T: FromStr + Ord,
    T::Err: std::fmt::Display,
{
    let mut out = Vec::new();
    for piece in raw.split(',') {
        let trimmed = piece.trim();
        if trimmed.is_empty() {
            continue;
        }
        out.push(
            T::from_str(trimmed).map_err(|e| anyhow!("invalid filter entry {trimmed:?}: {e}"))?,
        );
    }
    if out.is_empty() {
        return Err(anyhow!("filter list is empty"));
    }
    out.sort();
    out.dedup();
    Ok(out)
}

fn log_projection(corpus: &Corpus, projection: &ScenarioProjection) {
    for kind in ScenarioKind::ALL {
        let used: usize = projection
            .evidence
            .get(kind)
            .iter()
            .map(|e| e.observations.len())
            .sum();
        info!(
            scenario = kind.as_slug(),
            observations = used,
            corpus = corpus.len(),
            "scenario dataset"
        );
    }
}

fn print_stats(stats: &[PhaseStats], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_stats_table(stats)),
        OutputFormat::Json => println!("{}", render_json(stats)?),
        OutputFormat::Csv => println!("{}", stats_to_csv(stats)?),
    }
    Ok(())
}

fn print_trends(trends: &[PhaseTrend], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_trends_table(trends)),
        OutputFormat::Json => println!("{}", render_json(trends)?),
        OutputFormat::Csv => println!("{}", trends_to_csv(trends)?),
    }
    Ok(())
}

fn print_eras(comparisons: &[EraComparison], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_eras_table(comparisons)),
        OutputFormat::Json => println!("{}", render_json(comparisons)?),
        OutputFormat::Csv => {
            warn!("CSV output for eras not implemented, using JSON");
            println!("{}", render_json(comparisons)?);
        }
    }
    Ok(())
}

fn print_weights(weights: &[(Phase, f64)], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_weights_table(weights)),
        OutputFormat::Json => println!("{}", render_json(weights)?),
        OutputFormat::Csv => {
            warn!("CSV output for weights not implemented, using JSON");
            println!("{}", render_json(weights)?);
        }
    }
    Ok(())
}

fn print_roi(scenarios: &ScenarioSet, kind: ScenarioKind, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_scenarios_table(scenarios));
            println!();
            println!("{}", render_roi_table(scenarios.get(kind)));
        }
        OutputFormat::Json => println!("{}", render_json(scenarios)?),
        OutputFormat::Csv => println!("{}", roi_to_csv(scenarios.get(kind))?),
    }
    Ok(())
}

fn print_scenarios(
    projection: &ScenarioProjection,
    evidence: bool,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_scenarios_table(&projection.scenarios));
            if evidence {
                for kind in ScenarioKind::ALL {
                    println!();
                    println!(
                        "{}",
                        render_evidence_table(kind, projection.evidence.get(kind))
                    );
                }
            }
        }
        OutputFormat::Json => {
            if evidence {
                println!("{}", render_json(projection)?);
            } else {
                println!("{}", render_json(&projection.scenarios)?);
            }
        }
        OutputFormat::Csv => {
            if evidence {
                warn!("CSV output for evidence not implemented, using summary CSV");
            }
            println!("{}", scenarios_to_csv(&projection.scenarios)?);
        }
    }
    Ok(())
}
