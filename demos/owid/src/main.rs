//! owid — run the bucketed population model over Our World In Data series.
//!
//! Reads the daily `new_cases` / `new_deaths` / `new_vaccinations` columns of
//! one location from `owid-covid-data.csv`, starts a population of the
//! location's size in which everyone is alive, healthy and unvaccinated, and
//! applies one day of deltas per row.  The full Poland series (~38 M people,
//! several hundred days) runs in seconds because the population is stored as
//! a few hundred buckets, not 38 M records.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info};
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use pop_core::{SamplingMode, ShortfallPolicy, SimConfig};
use pop_data::{CountryData, DailyRecord, load_country_csv};
use pop_output::{CsvWriter, ReportObserver};
use pop_sim::{
    DailyReport, Mortality, Outbreak, Scenario, ScenarioKind, SimBuilder, SimObserver, replicate,
    run_batch,
};


// ── Constants ─────────────────────────────────────────────────────────────────

// ISO 8601 timestamp and colour-coded level tag.
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

// ── Command line ──────────────────────────────────────────────────────────────

/// Simulate a country's population day by day from OWID case, death and
/// vaccination counts.
#[derive(Parser, Debug)]
#[command(name = "owid")]
struct Args {
    /// Path to the OWID CSV export
    #[arg(short, long, default_value = "owid-covid-data.csv")]
    data: PathBuf,

    /// Location to simulate, as spelled in the `location` column
    #[arg(short, long, default_value = "Poland")]
    location: String,

    /// Scenario: outbreak | mortality
    #[arg(long, default_value = "outbreak")]
    scenario: ScenarioKind,

    /// Optional JSON file with a `SimConfig`; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sampling mode: snapshot | exact | proportional | proportional-truncate
    #[arg(long)]
    sampling: Option<SamplingMode>,

    /// What to do when data asks for more people than are eligible: abort | clamp
    #[arg(long)]
    shortfall: Option<ShortfallPolicy>,

    /// Days after vaccination before protection starts
    #[arg(long)]
    immunity_days: Option<u32>,

    /// Background deaths per day (mortality scenario)
    #[arg(long)]
    daily_deaths: Option<u64>,

    /// Number of independently seeded runs; prints the final day of each
    #[arg(long, default_value_t = 1)]
    replicates: usize,

    /// Directory for `daily_reports.csv`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write `output.db` to the output directory (needs the `sqlite` feature)
    #[arg(long)]
    sqlite: bool,

    /// Print only the last report
    #[arg(short, long)]
    quiet: bool,

    /// Log level: off | error | warn | info | debug | trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

// ── Console observer ──────────────────────────────────────────────────────────

/// Prints reports and forwards every callback to the attached sinks.
struct Console<'a> {
    quiet: bool,
    last:  Option<DailyReport>,
    sinks: Vec<&'a mut dyn SimObserver>,
}

impl SimObserver for Console<'_> {
    fn on_day_start(&mut self, day: &DailyRecord) {
        for sink in self.sinks.iter_mut() {
            sink.on_day_start(day);
        }
    }

    fn on_day_end(&mut self, report: &DailyReport) {
        if self.quiet {
            eprint!(".");
        } else {
            println!("{report}");
        }
        for sink in self.sinks.iter_mut() {
            sink.on_day_end(report);
        }
        self.last = Some(report.clone());
    }

    fn on_sim_end(&mut self, days: usize) {
        if self.quiet {
            eprintln!();
            if let Some(report) = &self.last {
                println!("{report}");
            }
        }
        for sink in self.sinks.iter_mut() {
            sink.on_sim_end(days);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    check_replicate_flags(&args)?;
    init_logging(args.log_level)?;

    let data = load_country_csv(&args.data, &args.location)
        .with_context(|| format!("loading {} from {}", args.location, args.data.display()))?;
    if let Some((first, last)) = data.span() {
        info!("{}: {} days from {first} to {last}", data.location, data.days.len());
    }

    let config = build_config(&args, &data)?;

    match args.scenario {
        ScenarioKind::Outbreak => run(&args, config, &data, Outbreak),
        ScenarioKind::Mortality => run(&args, config, &data, Mortality),
    }
}

fn init_logging(level: LevelFilter) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// JSON file (if any), then command-line flags, then the data's population.
fn build_config(args: &Args, data: &CountryData) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if config.population == 0 {
        config.population = data.population;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(sampling) = args.sampling {
        config.sampling = sampling;
    }
    if let Some(shortfall) = args.shortfall {
        config.shortfall = shortfall;
    }
    if let Some(days) = args.immunity_days {
        config.immunity_days = days;
    }
    if let Some(deaths) = args.daily_deaths {
        config.daily_deaths = deaths;
    }

    config.validate()?;
    Ok(config)
}

/// Flags that only apply to a single run.
fn check_replicate_flags(args: &Args) -> Result<()> {
    if args.replicates <= 1 {
        return Ok(());
    }
    if args.output.is_some() || args.sqlite {
        bail!("--output and --sqlite cannot be combined with --replicates");
    }
    if args.quiet {
        bail!("--quiet cannot be combined with --replicates, which already prints one line per run");
    }
    Ok(())
}

fn run<S: Scenario + Clone>(args: &Args, config: SimConfig, data: &CountryData, scenario: S) -> Result<()> {
    if args.replicates > 1 {
        return run_replicates(args, &config, data, &scenario);
    }

    let t_run = Instant::now();
    let mut sim = SimBuilder::new(config, scenario).build()?;

    #[cfg(not(feature = "sqlite"))]
    if args.sqlite {
        bail!("--sqlite requires building with the `sqlite` feature");
    }
    if args.sqlite && args.output.is_none() {
        bail!("--sqlite needs an --output directory");
    }

    let mut csv = args.output.as_deref().map(open_csv).transpose()?;
    #[cfg(feature = "sqlite")]
    let mut sqlite = match (&args.output, args.sqlite) {
        (Some(dir), true) => Some(ReportObserver::new(pop_output::SqliteWriter::new(dir)?)),
        _ => None,
    };

    {
        let mut console = Console { quiet: args.quiet, last: None, sinks: Vec::new() };
        if let Some(obs) = csv.as_mut() {
            console.sinks.push(obs);
        }
        #[cfg(feature = "sqlite")]
        if let Some(obs) = sqlite.as_mut() {
            console.sinks.push(obs);
        }
        sim.run(&data.days, &mut console)?;
    }

    if let Some(e) = csv.as_mut().and_then(ReportObserver::take_error) {
        bail!("CSV output error: {e}");
    }
    #[cfg(feature = "sqlite")]
    if let Some(e) = sqlite.as_mut().and_then(ReportObserver::take_error) {
        bail!("SQLite output error: {e}");
    }

    info!(
        "simulation complete in {:.3} s ({} buckets)",
        t_run.elapsed().as_secs_f64(),
        sim.population.distinct()
    );
    Ok(())
}

fn open_csv(dir: &Path) -> Result<ReportObserver<CsvWriter>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(ReportObserver::new(CsvWriter::new(dir)?))
}

fn run_replicates<S: Scenario + Clone>(
    args:     &Args,
    config:   &SimConfig,
    data:     &CountryData,
    scenario: &S,
) -> Result<()> {
    let configs = replicate(config, args.replicates);
    let t_run = Instant::now();
    let results = run_batch(&configs, &data.days, scenario);

    let mut out = std::io::stdout().lock();
    for (cfg, result) in configs.iter().zip(results) {
        let reports = result.with_context(|| format!("replicate with seed {}", cfg.seed))?;
        match reports.last() {
            Some(last) => writeln!(out, "seed={} {last}", cfg.seed)?,
            None => writeln!(out, "seed={} (no days)", cfg.seed)?,
        }
    }
    info!(
        "{} replicates complete in {:.3} s",
        configs.len(),
        t_run.elapsed().as_secs_f64()
    );
    Ok(())
}
