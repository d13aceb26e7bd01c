use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;
use serde::Deserialize;

use crate::quiz::QuizPolicy;
use handle_errors::Error;

/// Command line flags. Anything given here wins over the setup file and the
/// environment.
#[derive(Parser, Debug, Clone, PartialEq)]
#[clap(author, version, about)]
pub struct Args {
    /// Setup file to read, without extension
    #[clap(short, long, default_value = "setup")]
    pub config: String,
    /// Address to bind
    #[clap(long)]
    pub host: Option<IpAddr>,
    /// Port to listen on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Log level for the service's own targets
    #[clap(short, long)]
    pub log_level: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub search: SearchConfig,
    /// Scoring rules handed to [`Quiz::load`](crate::quiz::Quiz::load). The
    /// REST API serves quiz content only, so this is read by library callers
    /// that run quizzes themselves.
    pub quiz: QuizPolicy,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Shorter queries return no results.
    pub min_query_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3030,
            log_level: "info".to_string(),
            search: SearchConfig { min_query_len: 2 },
            quiz: QuizPolicy::default(),
        }
    }
}

impl Config {
    /// Reads `.env`, the command line, the setup file and `DRIVE_PREP_*`
    /// environment variables.
    pub fn new() -> Result<Config, Error> {
        dotenv::dotenv().ok();
        Config::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Config, Error> {
        let defaults = Config::default();

        let mut builder = config::Config::builder()
            .set_default("host", defaults.host.to_string())?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("search.min_query_len", defaults.search.min_query_len as i64)?
            .set_default("quiz.pass_percent", i64::from(defaults.quiz.pass_percent))?
            .set_default(
                "quiz.submit_threshold",
                defaults.quiz.submit_threshold as i64,
            )?
            .add_source(config::File::with_name(&args.config).required(false))
            .add_source(
                config::Environment::with_prefix("DRIVE_PREP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Some(host) = args.host {
            builder = builder.set_override("host", host.to_string())?;
        }
        if let Some(port) = args.port {
            builder = builder.set_override("port", i64::from(port))?;
        }
        if let Some(log_level) = args.log_level {
            builder = builder.set_override("log_level", log_level)?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.quiz.pass_percent == 0 || self.quiz.pass_percent > 100 {
            return Err(Error::InvalidConfig("quiz.pass_percent must be within 1..=100"));
        }
        if self.search.min_query_len == 0 {
            return Err(Error::InvalidConfig("search.min_query_len must be at least 1"));
        }
        Ok(())
    }

    /// Tracing filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        format!(
            "drive_prep={level},handle_errors={level},warp=error",
            level = self.log_level
        )
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
