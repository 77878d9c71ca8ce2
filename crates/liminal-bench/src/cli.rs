use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: walk-runner [OPTIONS]
  --baseline <path>              Load baseline JSON for comparison
  --output <path>                Save current results as JSON baseline
  --config <path>                Maze config as RON (default: built-in)
  --regression-threshold <pct>   Regression threshold percentage (default: 10)
  --ticks <n>                    Ticks per route (default: 2000)
  --step <units>                 Observer step per tick (default: 0.25)
  --seed <n>                     Chunk seed source (default: 42)
  --overlays                     Build debug overlays every tick";

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub baseline_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub regression_threshold: f64,
    pub tick_count: u32,
    pub step: f32,
    pub seed: u64,
    pub overlays: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            baseline_path: None,
            output_path: None,
            config_path: None,
            regression_threshold: 10.0,
            tick_count: 2000,
            step: 0.25,
            seed: 42,
            overlays: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Options),
    Help,
}

/// Parse the arguments after the program name.
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = || {
            iter.next()
                .map(String::as_str)
                .ok_or_else(|| format!("Missing value for {flag}"))
        };
        match flag {
            "--baseline" => options.baseline_path = Some(PathBuf::from(value()?)),
            "--output" => options.output_path = Some(PathBuf::from(value()?)),
            "--config" => options.config_path = Some(PathBuf::from(value()?)),
            "--regression-threshold" => {
                options.regression_threshold = parse_number(flag, value()?)?
            }
            "--ticks" => options.tick_count = parse_number(flag, value()?)?,
            "--step" => options.step = parse_number(flag, value()?)?,
            "--seed" => options.seed = parse_number(flag, value()?)?,
            "--overlays" => options.overlays = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {other}")),
        }
    }
    Ok(Command::Run(options))
}

fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("Invalid {flag} value: {raw}"))
}
