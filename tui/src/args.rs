//! Parsing command-line arguments.

use cagrid_lib::{rules, Config};
use clap::{command, error::ErrorKind, value_parser, Arg, ArgAction, ArgMatches, Command, Error};
use std::{ffi::OsString, fs, path::Path};

fn parse_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err(String::from("must be a positive integer")),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(String::from("density must be between 0 and 1"))
    }
}

fn parse_rule(s: &str) -> Result<String, String> {
    rules::parse_rule(s)
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

/// Reads a configuration file. The format is chosen by the file extension.
fn load_config(path: &Path) -> Result<Config, Error> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::raw(
            ErrorKind::Io,
            format!("cannot read {}: {}\n", path.display(), e),
        )
    })?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    let config = match extension {
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
        _ => Err(String::from(
            "unknown config format, expected .json, .yaml, .yml or .toml",
        )),
    };
    config.map_err(|e| {
        Error::raw(
            ErrorKind::InvalidValue,
            format!("invalid config {}: {}\n", path.display(), e),
        )
    })
}

fn app() -> Command {
    let app = command!()
        .long_about(
            "Runs two-dimensional cellular automata in the terminal.\n\
             \n\
             The grid is displayed in Plaintext format:\n\
             * Cells in the first state (dead) are represented by `.`;\n\
             * Living cells are represented by `o` for rules with 2 states, \
             `A` for rules with more states;\n\
             * Dying cells are represented by uppercase letters starting from `B`;\n\
             * Cells without a state are represented by `?`.\n",
        )
        .arg(
            Arg::new("ROWS")
                .help("Number of rows [default: 16]")
                .index(1)
                .value_parser(parse_positive),
        )
        .arg(
            Arg::new("COLS")
                .help("Number of columns [default: 16]")
                .index(2)
                .value_parser(parse_positive),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton [default: B3/S23]")
                .long_help(
                    "Rule of the cellular automaton [default: B3/S23]\n\
                     Supports Life-like rules and their corresponding Generations rules.\n",
                )
                .short('r')
                .long("rule")
                .value_parser(parse_rule),
        )
        .arg(
            Arg::new("DENSITY")
                .help("Density of the initial random soup [default: 0.5]")
                .long_help(
                    "Density of the initial random soup [default: 0.5]\n\
                     The probability for a cell not to start in the first state.\n",
                )
                .short('d')
                .long("density")
                .value_parser(parse_density),
        )
        .arg(
            Arg::new("INTERVAL")
                .help("Delay between automatic steps in milliseconds [default: 500]")
                .short('i')
                .long("interval")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Loads the configuration from a file")
                .long_help(
                    "Loads the configuration from a file\n\
                     Supports JSON, YAML and TOML, according to the file extension. \
                     Other arguments override the values in the file.\n",
                )
                .short('c')
                .long("config"),
        )
        .arg(
            Arg::new("VERBOSE")
                .help("Prints debug logs")
                .long("verbose")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "tui")]
    let app = app
        .arg(
            Arg::new("NOTUI")
                .help("Prints the generations without entering the TUI")
                .short('n')
                .long("no-tui")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to print [default: 10]")
                .long_help(
                    "Number of generations to print [default: 10]\n\
                     Only useful when --no-tui is set.\n",
                )
                .short('g')
                .long("generations")
                .value_parser(value_parser!(u64))
                .requires("NOTUI"),
        );

    #[cfg(not(feature = "tui"))]
    let app = app.arg(
        Arg::new("GENERATIONS")
            .help("Number of generations to print [default: 10]")
            .short('g')
            .long("generations")
            .value_parser(value_parser!(u64)),
    );

    app
}

/// A struct to store the parse results.
#[derive(Debug)]
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) generations: u64,
    pub(crate) verbose: bool,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Self::parse_from(std::env::args_os())
    }

    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, Error> {
        let mut config = match matches.get_one::<String>("CONFIG") {
            Some(path) => load_config(Path::new(path))?,
            None => Config::default(),
        };

        if let Some(&rows) = matches.get_one::<usize>("ROWS") {
            config.rows = rows;
        }
        if let Some(&cols) = matches.get_one::<usize>("COLS") {
            config.cols = cols;
        }
        if let Some(rule_string) = matches.get_one::<String>("RULE") {
            config.rule_string = rule_string.clone();
        }
        if let Some(&density) = matches.get_one::<f64>("DENSITY") {
            config.density = density;
        }
        if let Some(&interval) = matches.get_one::<u64>("INTERVAL") {
            config.auto_step_interval_ms = interval;
        }

        let generations = matches.get_one::<u64>("GENERATIONS").copied().unwrap_or(10);
        let verbose = matches.get_flag("VERBOSE");
        #[cfg(feature = "tui")]
        let no_tui = matches.get_flag("NOTUI");

        Ok(Args {
            config,
            generations,
            verbose,
            #[cfg(feature = "tui")]
            no_tui,
        })
    }
}
