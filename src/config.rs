use std::{default, time::Duration};

use clap::{App, Arg};
use log::{info, LevelFilter};

pub const DEFAULT_REFRESH_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub turn_order: Option<String>,
    pub refresh_interval: Duration,
    pub headless: bool,
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Self {
        let args = App::new("Parchis")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::with_name("ORDER")
                    .short("o")
                    .long("order")
                    .takes_value(true)
                    .help("Turn order as team letters, e.g. RBGY. Asked on the console if missing"),
            )
            .arg(
                Arg::with_name("REFRESH_MS")
                    .short("r")
                    .long("refresh")
                    .takes_value(true)
                    .help("Milliseconds between board redraws"),
            )
            .arg(
                Arg::with_name("HEADLESS")
                    .long("headless")
                    .help("If specified, the game is played on the console only, without a board window"),
            )
            .arg(
                Arg::with_name("VERBOSE")
                    .short("v")
                    .long("verbose")
                    .help("If specified, the board is logged before every turn"),
            )
            .get_matches();

        let refresh_ms = args
            .value_of("REFRESH_MS")
            .and_then(|ms| ms.parse().ok())
            .unwrap_or(DEFAULT_REFRESH_MS);

        Self {
            turn_order: args.value_of("ORDER").map(str::to_owned),
            refresh_interval: Duration::from_millis(refresh_ms),
            headless: args.is_present("HEADLESS"),
            verbose: args.is_present("VERBOSE"),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn log(&self) {
        info!("[Config]");
        info!("Default: {}", self == &Config::default());
        info!("| ORDER: {}", self.turn_order.as_deref().unwrap_or("(ask)"));
        info!("| REFRESH_MS: {}", self.refresh_interval.as_millis());
        info!("| HEADLESS: {}", self.headless);
        info!("| VERBOSE: {}", self.verbose);
    }
}

impl default::Default for Config {
    fn default() -> Self {
        Self {
            turn_order: None,
            refresh_interval: Duration::from_millis(DEFAULT_REFRESH_MS),
            headless: false,
            verbose: false,
        }
    }
}
