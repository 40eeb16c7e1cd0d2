use std::{env, path::Path};

use log::LevelFilter;
use pso_tsp_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Error, Result,
    constants::{
        DEFAULT_CITIES, DEFAULT_COGNITIVE, DEFAULT_FINAL_INERTIA, DEFAULT_GAUSSIAN_STDDEV,
        DEFAULT_INITIAL_INERTIA, DEFAULT_ITERATIONS, DEFAULT_MUTATION_RATE, DEFAULT_PARTICLES,
        DEFAULT_PROGRESS_INTERVAL, DEFAULT_PRUNE_PERCENTAGE, DEFAULT_SOCIAL, MIN_CITIES,
    },
};

/// Runtime options for a swarm run. Every value is read-only once the run starts.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SwarmOptions {
    /// Number of random cities to generate when no `--input` is given.
    #[cli(long = "cities")]
    pub cities: usize,
    /// Swarm population size.
    #[cli(long = "particles")]
    pub particles: usize,
    /// Number of generations to run.
    #[cli(long = "iterations")]
    pub iterations: usize,
    /// Inertia weight at the first iteration.
    #[cli(long = "initial-inertia")]
    pub initial_inertia: f64,
    /// Inertia weight approached at the last iteration.
    #[cli(long = "final-inertia")]
    pub final_inertia: f64,
    /// Probability of the swap toward the particle's own best, per position.
    #[cli(long = "cognitive")]
    pub cognitive: f64,
    /// Probability of the swap toward the global best, per position.
    #[cli(long = "social")]
    pub social: f64,
    /// Probability of a single random swap per particle per iteration.
    #[cli(long = "mutation-rate")]
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian driving position-wise swaps.
    #[cli(long = "gaussian-stddev")]
    pub gaussian_stddev: f64,
    /// Share of the swarm, in percent, reseeded after every iteration.
    #[cli(long = "prune-percentage")]
    pub prune_percentage: usize,
    /// Seed for city generation and the optimizer.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Log progress every N iterations. Zero disables progress lines.
    #[cli(long = "progress-interval")]
    pub progress_interval: usize,
    /// Structured logging level.
    #[cli(
        long = "log-level",
        parse_with = "LogLevel::parse",
        value = "error|warn|info|debug|trace|off"
    )]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse", value = "compact|pretty")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output", value = "path")]
    pub log_output: String,
    /// City list as whitespace-separated `x,y` tokens. `-` reads stdin, empty generates.
    #[cli(long = "input", value = "path")]
    pub input: String,
    /// Optional output file path for the best route. Empty means stdout.
    #[cli(long = "output", value = "path")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

/// Where the city set comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CitySource<'a> {
    Random(usize),
    Stdin,
    File(&'a Path),
}

impl Default for SwarmOptions {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES,
            particles: DEFAULT_PARTICLES,
            iterations: DEFAULT_ITERATIONS,
            initial_inertia: DEFAULT_INITIAL_INERTIA,
            final_inertia: DEFAULT_FINAL_INERTIA,
            cognitive: DEFAULT_COGNITIVE,
            social: DEFAULT_SOCIAL,
            mutation_rate: DEFAULT_MUTATION_RATE,
            gaussian_stddev: DEFAULT_GAUSSIAN_STDDEV,
            prune_percentage: DEFAULT_PRUNE_PERCENTAGE,
            seed: rand::random(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SwarmOptions {
    pub fn from_args() -> Result<Self> {
        let options = Self::parse_from_iter(env::args().skip(1))?;
        options.validate()?;
        Ok(options)
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    /// Rejects settings the optimizer cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.particles == 0 {
            return Err(Error::invalid_input("--particles must be at least 1"));
        }
        if self.input_source_is_random() && self.cities < MIN_CITIES {
            return Err(Error::invalid_input(format!(
                "--cities must be at least {MIN_CITIES}, got {}",
                self.cities
            )));
        }
        if self.prune_percentage > 100 {
            return Err(Error::invalid_input(format!(
                "--prune-percentage must be between 0 and 100, got {}",
                self.prune_percentage
            )));
        }
        for (name, value) in [
            ("initial-inertia", self.initial_inertia),
            ("final-inertia", self.final_inertia),
        ] {
            if !value.is_finite() {
                return Err(Error::invalid_input(format!(
                    "--{name} must be finite, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("cognitive", self.cognitive),
            ("social", self.social),
            ("mutation-rate", self.mutation_rate),
            ("gaussian-stddev", self.gaussian_stddev),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_input(format!(
                    "--{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn usage() -> String {
        let mut usage = String::from(concat!(
            "Usage:\n",
            "  pso-tsp [options]\n",
            "  pso-tsp [options] --input cities.txt\n",
            "  pso-tsp [options] --input - < cities.txt\n\n",
            "Options:\n",
        ));
        for line in Self::cli_usage_lines() {
            usage.push_str(line);
            usage.push('\n');
        }
        usage.push_str(concat!(
            "  --help\n",
            "\n",
            "Examples:\n",
            "  pso-tsp --cities 30 --seed 7 --log-level info\n",
            "  pso-tsp --particles 200 --iterations 500 --output route.txt\n",
            "  pso-tsp --input cities.txt --prune-percentage 20 --log-format=pretty\n",
            "  pso-tsp --cognitive 0.6 --social 0.8 --log-level=debug --log-output run.log\n",
        ));
        usage
    }

    pub fn city_source(&self) -> CitySource<'_> {
        let input = self.input.trim();
        if input.is_empty() {
            CitySource::Random(self.cities)
        } else if input == "-" {
            CitySource::Stdin
        } else {
            CitySource::File(Path::new(input))
        }
    }

    fn input_source_is_random(&self) -> bool {
        matches!(self.city_source(), CitySource::Random(_))
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
