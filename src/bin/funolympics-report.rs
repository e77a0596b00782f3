use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use funolympics::analytics::{AggregateKind, Dashboard};
use funolympics::config::Config;
use funolympics::filter::FilterCriteria;
use funolympics::store::{CsvFileSource, RecordSource, RecordStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "funolympics-report")]
#[command(about = "Offline reports over the FunOlympics web log", long_about = None)]
struct Cli {
    /// Dataset to read instead of DATA_PATH
    #[arg(long, global = true)]
    data: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the date range, countries and sports available for filtering
    Filters,
    /// Print the headline metrics for a filter selection
    Summary(FilterArgs),
    /// Write one aggregate as CSV
    Export {
        /// Aggregate to export (popular-sports, content-types, hourly-traffic,
        /// country-visits, time-spent, http-status)
        kind: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file; defaults to stdout
        #[arg(long, short)]
        out: Option<String>,
    },
}

#[derive(Args)]
struct FilterArgs {
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,
    /// Country to include; repeat for several
    #[arg(long = "country")]
    countries: Vec<String>,
    /// Sport to include; repeat for several
    #[arg(long = "sport")]
    sports: Vec<String>,
}

impl FilterArgs {
    fn criteria(self, store: &RecordStore) -> FilterCriteria {
        let defaults = store.default_criteria();
        FilterCriteria::new(
            self.start_date.unwrap_or(defaults.start_date),
            self.end_date.unwrap_or(defaults.end_date),
        )
        .with_countries(self.countries)
        .with_sports(self.sports)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let path = cli.data.unwrap_or(config.data.path);

    let store = CsvFileSource::new(&path)
        .load()
        .await
        .with_context(|| format!("failed to load dataset {}", path))?;

    match cli.command {
        Commands::Filters => {
            match store.date_bounds() {
                Some((start, end)) => println!("Dates:     {} to {}", start, end),
                None => println!("Dates:     (no parseable dates)"),
            }
            println!("Countries: {}", store.countries().join(", "));
            println!("Sports:    {}", store.sports().join(", "));
        }
        Commands::Summary(filters) => {
            let criteria = filters.criteria(&store);
            let dashboard = Dashboard::compute(&store, &criteria);
            let metrics = &dashboard.metrics;

            println!("{:<22} {}", "Total Visits", metrics.total_visits);
            println!("{:<22} {}", "Total Females Visited", metrics.female_visits);
            println!("{:<22} {}", "Total Males Visited", metrics.male_visits);
            match metrics.avg_visits_per_day {
                Some(avg) => println!("{:<22} {:.2}", "Avg Visits per Day", avg),
                None => println!("{:<22} no data", "Avg Visits per Day"),
            }
        }
        Commands::Export { kind, filters, out } => {
            let kind = AggregateKind::from_slug(&kind)
                .ok_or_else(|| anyhow!("unknown aggregate '{}'", kind))?;
            let criteria = filters.criteria(&store);
            let csv = Dashboard::compute(&store, &criteria).export(kind)?;

            match out {
                Some(out) => {
                    std::fs::write(&out, csv).with_context(|| format!("failed to write {}", out))?;
                    println!("✓ Wrote {} to {}", kind.file_name(), out);
                }
                None => print!("{}", csv),
            }
        }
    }

    Ok(())
}
