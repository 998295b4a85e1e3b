use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hoopsedge")]
#[command(about = "HoopsEdge - Monte Carlo pricing for basketball game and player prop markets")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Log format override (pretty, json, compact); defaults to the config file's
    #[arg(long, global = true, env = "HOOPSEDGE_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Debug-level logging when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Expose Prometheus metrics on this port while running
    #[arg(long, global = true)]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "hoopsedge.yaml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "master_config/hoopsedge.yaml")]
        config: PathBuf,
    },

    /// Project and simulate a game, then price a market
    Game {
        #[command(flatten)]
        run: RunArgs,

        /// Market to price
        #[arg(short, long, value_enum, default_value = "moneyline")]
        market: GameMarket,

        /// Side to price: home/away for moneyline and spread, over/under for totals
        #[arg(short, long)]
        side: Option<String>,

        /// Spread margin threshold or total line; defaults come from the config
        /// (spread) or the simulated mean total (total)
        #[arg(short, long, allow_hyphen_values = true)]
        line: Option<f64>,

        /// American odds for the priced side
        #[arg(long, allow_hyphen_values = true)]
        odds: Option<i32>,

        /// American odds for the opposite side; defaults to --odds
        #[arg(long, allow_hyphen_values = true)]
        opposite_odds: Option<i32>,
    },

    /// Redistribute usage for injuries and price a player prop for every active player
    Props {
        #[command(flatten)]
        run: RunArgs,

        /// Stat line: points, rebounds, assists, threes, pra
        #[arg(long, default_value = "points")]
        stat: String,

        /// Player ruled out (repeatable)
        #[arg(long = "out", value_name = "NAME")]
        out: Vec<String>,

        /// Player limited, with optional usage reduction percent (repeatable)
        #[arg(long = "limited", value_name = "NAME[=PCT]")]
        limited: Vec<String>,

        /// Prop line for a player (repeatable); others get the nearest half point
        #[arg(long = "line", value_name = "NAME=LINE")]
        lines: Vec<String>,

        /// Team on the second night of a back-to-back (repeatable)
        #[arg(long = "b2b", value_name = "TEAM")]
        back_to_back: Vec<String>,

        /// Team's previous game date; one the day before --date marks a back-to-back (repeatable)
        #[arg(long = "last-game", value_name = "TEAM=YYYY-MM-DD")]
        last_games: Vec<String>,

        /// Game date used with --last-game; defaults to today
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,

        /// American odds for both sides
        #[arg(long, allow_hyphen_values = true)]
        odds: Option<i32>,
    },
}

/// Options shared by the commands that run simulations
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Path to the configuration file
    #[arg(short, long, default_value = "master_config/hoopsedge.yaml")]
    pub config: PathBuf,

    /// Game as "Away @ Home"
    #[arg(value_name = "AWAY @ HOME")]
    pub matchup: String,

    /// Override simulation.n_draws
    #[arg(short = 'n', long)]
    pub draws: Option<usize>,

    /// Override simulation.seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMarket {
    Moneyline,
    Spread,
    Total,
}

impl GameMarket {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMarket::Moneyline => "moneyline",
            GameMarket::Spread => "spread",
            GameMarket::Total => "total",
        }
    }

    /// Side priced when none is given
    pub fn default_side(&self) -> &'static str {
        match self {
            GameMarket::Moneyline | GameMarket::Spread => "home",
            GameMarket::Total => "over",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Split `NAME=VALUE`; a bare `NAME` yields `None` for the value.
pub fn parse_assignment(raw: &str) -> Result<(String, Option<f64>), String> {
    match raw.rsplit_once('=') {
        Some((name, value)) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("missing name in '{}'", raw));
            }
            let value = value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid number in '{}'", raw))?;
            Ok((name.to_string(), Some(value)))
        }
        None if raw.trim().is_empty() => Err("empty assignment".to_string()),
        None => Ok((raw.trim().to_string(), None)),
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_game() {
        let cli = Cli::try_parse_from([
            "hoopsedge",
            "game",
            "Lakers @ Celtics",
            "--market",
            "spread",
            "--line",
            "-5.5",
            "--odds",
            "-110",
        ])
        .unwrap();

        match cli.command {
            Commands::Game {
                run, market, line, odds, ..
            } => {
                assert_eq!(run.matchup, "Lakers @ Celtics");
                assert_eq!(market, GameMarket::Spread);
                assert_eq!(line, Some(-5.5));
                assert_eq!(odds, Some(-110));
                assert_eq!(run.format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_props() {
        let cli = Cli::try_parse_from([
            "hoopsedge",
            "props",
            "Lakers @ Celtics",
            "--out",
            "Jayson Tatum",
            "--limited",
            "LeBron James=25",
            "--limited",
            "Anthony Davis",
            "--format",
            "json",
            "--seed",
            "7",
            "--last-game",
            "Lakers=2025-01-14",
            "--date",
            "2025-01-15",
        ])
        .unwrap();

        match cli.command {
            Commands::Props {
                run,
                out,
                limited,
                last_games,
                date,
                ..
            } => {
                assert_eq!(out, vec!["Jayson Tatum"]);
                assert_eq!(limited.len(), 2);
                assert_eq!(last_games, vec!["Lakers=2025-01-14"]);
                assert_eq!(date.as_deref(), Some("2025-01-15"));
                assert_eq!(run.seed, Some(7));
                assert_eq!(run.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("LeBron James=25"),
            Ok(("LeBron James".to_string(), Some(25.0)))
        );
        assert_eq!(parse_assignment("Anthony Davis"), Ok(("Anthony Davis".to_string(), None)));
        assert!(parse_assignment("=5").is_err());
        assert!(parse_assignment("Star=lots").is_err());
        assert!(parse_assignment("").is_err());
    }
}
