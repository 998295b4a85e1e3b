//! HoopsEdge CLI Binary
//!
//! Entry point for the HoopsEdge application. It provides commands for
//! initializing and validating configuration, and for pricing game and
//! player prop markets for a single matchup.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use cli::{parse_assignment, Cli, Commands, GameMarket, OutputFormat, RunArgs};
use common::Matchup;
use config::{
    generate_default_config, load_config, save_config, validate_config, MasterConfig,
};
use edge_engine::{
    EdgeEngine, GameContext, GameReport, MarketKind, MarketQuery, MarketSide, PropRequest,
    RosterPropsReport,
};
use observability::{init_logging, init_metrics, LogFormat};
use odds::fair_american_odds;
use projection::{InMemoryRatingsStore, InjuryDesignation, ProjectionModel, StatKind};
use serde::Serialize;
use simulation::SimulationConfig;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Init { ref output } => {
            start_observability(&cli, None)?;
            info!("Executing 'init' command");
            init_command(output)
        }
        Commands::Validate { ref config } => {
            start_observability(&cli, None)?;
            info!("Executing 'validate' command");
            validate_command(config)
        }
        Commands::Game {
            ref run,
            market,
            ref side,
            line,
            odds,
            opposite_odds,
        } => {
            let config = load_checked_config(&run.config)?;
            start_observability(&cli, Some(&config))?;
            info!("Executing 'game' command");
            let side = side.as_deref().unwrap_or(market.default_side());
            game_command(&config, run, market, side, line, odds, opposite_odds).await
        }
        Commands::Props {
            ref run,
            ref stat,
            ref out,
            ref limited,
            ref lines,
            ref back_to_back,
            ref last_games,
            ref date,
            odds,
        } => {
            let config = load_checked_config(&run.config)?;
            start_observability(&cli, Some(&config))?;
            info!("Executing 'props' command");
            let matchup = parse_matchup(&run.matchup)?;
            let injuries = parse_injuries(out, limited, config.markets.limited_reduction_pct)?;
            let game_date = match date {
                Some(raw) => parse_date(raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let context = build_context(&matchup, injuries, back_to_back, last_games, game_date)?;
            let request = build_prop_request(stat, lines, odds.unwrap_or(config.markets.odds))?;
            props_command(&config, run, &matchup, &context, request).await
        }
    }
}

/// Install logging and, when requested, the metrics exporter.
///
/// The `--log-format` flag wins over the config file.
fn start_observability(cli: &Cli, config: Option<&MasterConfig>) -> Result<()> {
    let format_name = cli
        .log_format
        .as_deref()
        .or(config.map(|c| c.logging.format.as_str()))
        .unwrap_or("pretty");
    let format: LogFormat = format_name.parse().map_err(anyhow::Error::msg)?;

    init_logging("hoopsedge", format, cli.verbose)?;
    debug!(?cli, "CLI arguments parsed");

    if let Some(port) = cli.metrics_port {
        init_metrics(port)?;
    }
    Ok(())
}

/// Load a config and refuse to run on validation errors.
fn load_checked_config(path: &Path) -> Result<MasterConfig> {
    let config = load_config(path)?;
    let report = validate_config(&config);

    // Logging is not installed yet; report straight to stderr
    for warning in &report.warnings {
        eprintln!("[warn] [{}] {}", warning.field, warning.message);
    }
    if !report.is_valid() {
        for err in &report.errors {
            eprintln!("[error] {}", err);
        }
        anyhow::bail!(
            "Configuration has {} error(s); run 'hoopsedge validate --config {:?}'",
            report.errors.len(),
            path
        );
    }

    Ok(config)
}

fn build_engine(config: &MasterConfig, run: &RunArgs) -> Result<EdgeEngine> {
    let store = InMemoryRatingsStore::load_json_files(
        &config.ratings.team_ratings,
        &config.ratings.player_ratings,
        config.ratings.default_team.into(),
    )
    .context("Failed to load ratings")?;

    let mut simulation = SimulationConfig::try_from(&config.simulation)?;
    if let Some(draws) = run.draws {
        simulation.n_draws = draws;
    }
    if let Some(seed) = run.seed {
        simulation.seed = Some(seed);
    }
    simulation.validate()?;

    info!(
        n_draws = simulation.n_draws,
        correlation = simulation.correlation,
        seeded = simulation.seed.is_some(),
        "Engine ready"
    );

    Ok(EdgeEngine::new(
        Arc::new(store),
        ProjectionModel::new(config.model),
        simulation,
    ))
}

fn parse_matchup(raw: &str) -> Result<Matchup> {
    raw.parse::<Matchup>()
        .with_context(|| format!("Invalid matchup '{}'", raw))
}

/// Outs first, then limited players, each in the order given.
fn parse_injuries(
    out: &[String],
    limited: &[String],
    default_reduction: f64,
) -> Result<Vec<InjuryDesignation>> {
    let mut designations: Vec<InjuryDesignation> =
        out.iter().map(|name| InjuryDesignation::out(name.trim())).collect();

    for raw in limited {
        let (name, pct) = parse_assignment(raw).map_err(anyhow::Error::msg)?;
        let pct = pct.unwrap_or(default_reduction);
        if !(0.0..=100.0).contains(&pct) {
            anyhow::bail!("Reduction for {} must be between 0 and 100, got {}", name, pct);
        }
        designations.push(InjuryDesignation::limited(name, pct));
    }

    Ok(designations)
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'; expected YYYY-MM-DD", raw))
}

/// Injuries plus back-to-back teams, named directly or found from last-game dates.
fn build_context(
    matchup: &Matchup,
    injuries: Vec<InjuryDesignation>,
    back_to_back: &[String],
    last_games: &[String],
    game_date: NaiveDate,
) -> Result<GameContext> {
    let mut context = GameContext {
        designations: injuries,
        ..GameContext::default()
    };
    for team in back_to_back {
        context = context.with_back_to_back(team.trim());
    }
    for raw in last_games {
        let (team, previous) = raw
            .rsplit_once('=')
            .with_context(|| format!("Expected TEAM=YYYY-MM-DD, got '{}'", raw))?;
        context = context.with_last_game(team.trim(), Some(parse_date(previous)?), game_date);
    }

    for team in &context.back_to_back {
        if matchup.side_of(team).is_none() {
            warn!(team = %team, matchup = %matchup, "Back-to-back team is not in this game");
        }
    }
    debug!(teams = ?context.back_to_back, %game_date, "Back-to-back teams");

    Ok(context)
}

fn build_prop_request(stat: &str, lines: &[String], odds: i32) -> Result<PropRequest> {
    let stat: StatKind = stat.parse()?;
    let mut request = PropRequest::new(stat, odds);

    for raw in lines {
        match parse_assignment(raw).map_err(anyhow::Error::msg)? {
            (name, Some(line)) => request = request.with_line(name, line),
            (name, None) => anyhow::bail!("Missing line for {}; expected NAME=LINE", name),
        }
    }

    Ok(request)
}

async fn game_command(
    config: &MasterConfig,
    run: &RunArgs,
    market: GameMarket,
    side: &str,
    line: Option<f64>,
    odds: Option<i32>,
    opposite_odds: Option<i32>,
) -> Result<()> {
    let matchup = parse_matchup(&run.matchup)?;
    let engine = build_engine(config, run)?;

    let projection = engine.project_matchup(&matchup).await?;
    let samples = engine.simulate(&projection).await?;

    let side: MarketSide = side.parse().map_err(anyhow::Error::msg)?;
    let odds = odds.unwrap_or(config.markets.odds);
    let query = match market {
        GameMarket::Moneyline => MarketQuery::new(MarketKind::Moneyline, 0.0, side, odds)?,
        GameMarket::Spread => MarketQuery::new(
            MarketKind::Spread,
            line.unwrap_or(config.markets.spread_line),
            side,
            odds,
        )?,
        GameMarket::Total => MarketQuery::new(
            MarketKind::Total,
            line.unwrap_or_else(|| samples.suggested_total_line()),
            side,
            odds,
        )?,
    };
    debug!(market = market.as_str(), %query, "Pricing market");

    let both = engine.evaluate_both(&samples, &query, opposite_odds)?;
    let report = GameReport::new(projection, &samples, vec![both]);

    match run.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_game_report(&report);
            Ok(())
        }
    }
}

async fn props_command(
    config: &MasterConfig,
    run: &RunArgs,
    matchup: &Matchup,
    context: &GameContext,
    request: PropRequest,
) -> Result<()> {
    let engine = build_engine(config, run)?;

    let report = match engine.evaluate_roster_props(matchup, context, &request).await {
        Ok(report) => report,
        Err(e) => {
            error!(%e, "Prop evaluation failed");
            return Err(e.into());
        }
    };

    match run.format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_props_report(&report);
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_game_report(report: &GameReport) {
    let projection = &report.projection;
    println!("\n=== {} ===\n", projection.matchup);
    println!(
        "Projected: {} {:.1} (sd {:.1})  |  {} {:.1} (sd {:.1})",
        projection.matchup.away,
        projection.away.mean_points,
        projection.away.score_sd,
        projection.matchup.home,
        projection.home.mean_points,
        projection.home.score_sd,
    );
    println!(
        "Simulated ({} draws): home {:.1}, away {:.1}, margin {:+.1}, total {:.1}",
        report.n_draws, report.mean_home, report.mean_away, report.mean_margin, report.mean_total
    );
    println!(
        "Home win {:.1}%  |  suggested total {:.1}",
        report.home_win_probability * 100.0,
        report.suggested_total_line
    );
    println!();

    for market in &report.markets {
        for evaluation in [&market.queried, &market.opposite] {
            let r = &evaluation.result;
            println!(
                "  {:<28} prob {:>5.1}% fair {:>6} implied {:>5.1}% edge {:>+6.2}% EV {:>+.3}{}",
                evaluation.query.to_string(),
                r.probability * 100.0,
                fair_odds_label(r.probability),
                r.implied_probability * 100.0,
                r.edge * 100.0,
                r.expected_value,
                if r.is_positive() { "  [+EV]" } else { "" }
            );
        }
    }
    println!();
}

/// No-vig American price for a probability, or "-" when there is none.
fn fair_odds_label(probability: f64) -> String {
    fair_american_odds(probability)
        .map(|odds| format!("{:+}", odds))
        .unwrap_or_else(|| "-".to_string())
}

fn print_props_report(report: &RosterPropsReport) {
    println!("\n=== {} : {} ===\n", report.matchup, report.stat);

    println!("Usage adjustments (original -> adjusted):");
    for row in &report.usage {
        let marker = if (row.original - row.adjusted).abs() > 1e-9 { "*" } else { " " };
        println!(
            " {} {:<24} {:<12} {:.3} -> {:.3}",
            marker,
            row.player.as_str(),
            row.team.as_str(),
            row.original,
            row.adjusted
        );
    }
    println!();

    println!(
        "  {:<24} {:>6} {:>6} {:>6} {:>13} {:>7} {:>8}",
        "Player", "Proj", "Line", "SimAvg", "P10-P90", "Over%", "Best"
    );
    for prop in &report.props {
        let (side, best) = prop.best_side();
        println!(
            "  {:<24} {:>6.1} {:>6.1} {:>6.1} {:>6.1}-{:<6.1} {:>7.1} {:>5} {:+.2}%{}",
            prop.player.as_str(),
            prop.projection.mean,
            prop.line,
            prop.simulated_mean,
            prop.p10,
            prop.p90,
            prop.over.probability * 100.0,
            side,
            best.edge * 100.0,
            if best.is_positive() { " [+EV]" } else { "" }
        );
    }
    println!();
}

fn validate_command(config_path: &Path) -> Result<()> {
    info!(path = ?config_path, "Validating configuration");

    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(%e, "Failed to load configuration");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.defaults_applied.is_empty() {
        println!("Defaults Applied ({}):", report.defaults_applied.len());
        for default in &report.defaults_applied {
            println!("  [info] {} = {}", default.field, default.value);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Team ratings: {}", config.ratings.team_ratings);
    println!("Player ratings: {}", config.ratings.player_ratings);
    println!(
        "Simulation: {} draws, correlation {}",
        config.simulation.n_draws, config.simulation.correlation
    );
    println!(
        "Markets: odds {:+}, spread line {}, limited reduction {}%",
        config.markets.odds, config.markets.spread_line, config.markets.limited_reduction_pct
    );

    Ok(())
}

fn init_command(output_path: &Path) -> Result<()> {
    info!(?output_path, "Initializing new configuration file");

    let config = generate_default_config();

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Point ratings.team_ratings and ratings.player_ratings at your JSON files");
    println!(
        "  2. Run 'hoopsedge validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'hoopsedge game --config {:?} \"Away @ Home\"' to price a game",
        output_path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{PlayerId, TeamId};

    #[test]
    fn test_parse_injuries_order_and_defaults() {
        let designations = parse_injuries(
            &["Jayson Tatum".to_string()],
            &["LeBron James=25".to_string(), "Anthony Davis".to_string()],
            15.0,
        )
        .unwrap();

        assert_eq!(designations.len(), 3);
        assert_eq!(designations[0], InjuryDesignation::out("Jayson Tatum"));
        assert_eq!(designations[1], InjuryDesignation::limited("LeBron James", 25.0));
        assert_eq!(designations[2], InjuryDesignation::limited("Anthony Davis", 15.0));

        assert!(parse_injuries(&[], &["Star=150".to_string()], 15.0).is_err());
    }

    #[test]
    fn test_build_prop_request() {
        let request =
            build_prop_request("pra", &["Jayson Tatum=38.5".to_string()], -115).unwrap();
        assert_eq!(request.stat, StatKind::PointsReboundsAssists);
        assert_eq!(request.odds, -115);
        assert_eq!(request.lines.get(&PlayerId::from("Jayson Tatum")), Some(&38.5));

        assert!(build_prop_request("steals", &[], -110).is_err());
        assert!(build_prop_request("points", &["Jayson Tatum".to_string()], -110).is_err());
    }

    #[test]
    fn test_build_context_back_to_back() {
        let matchup = Matchup::new("Lakers", "Celtics");
        let game_date = parse_date("2025-01-15").unwrap();

        let context = build_context(
            &matchup,
            vec![InjuryDesignation::out("Jayson Tatum")],
            &["Celtics".to_string()],
            &["Lakers=2025-01-14".to_string(), "Knicks=2025-01-10".to_string()],
            game_date,
        )
        .unwrap();

        assert_eq!(context.designations.len(), 1);
        assert!(context.back_to_back.contains(&TeamId::from("Celtics")));
        assert!(context.back_to_back.contains(&TeamId::from("Lakers")));
        assert!(!context.back_to_back.contains(&TeamId::from("Knicks")));

        assert!(build_context(&matchup, vec![], &[], &["Lakers".to_string()], game_date).is_err());
        assert!(parse_date("15/01/2025").is_err());
    }

    #[test]
    fn test_fair_odds_label() {
        assert_eq!(fair_odds_label(0.6), "-150");
        assert_eq!(fair_odds_label(0.4), "+150");
        assert_eq!(fair_odds_label(1.0), "-");
    }
}
