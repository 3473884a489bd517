use anyhow::Context;
use aphrodite::chart::{BirthMoment, BirthPlace};
use chrono::{Datelike, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use soulmate::{recalculate_birth_year, Gender};

#[derive(Parser, Debug)]
#[command(author, version, about = "Soulmate chart search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for the best-matching partner chart and print it as JSON.
    Chart(ChartArgs),
    /// Partner birth year and age window for a gender pairing.
    AgeWindow(AgeWindowArgs),
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Birth date as YYYY-MM-DD.
    #[arg(long)]
    date: chrono::NaiveDate,

    /// Local birth time as HH:MM.
    #[arg(long, default_value = "12:00")]
    time: String,

    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// IANA timezone, e.g. Europe/London.
    #[arg(long)]
    timezone: String,

    /// User's gender (male, female, non-binary).
    #[arg(long)]
    gender: Option<Gender>,

    /// Desired partner sex (male, female, non-binary).
    #[arg(long)]
    seeking: Option<Gender>,

    /// Treat this as the current year.
    #[arg(long)]
    reference_year: Option<i32>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct AgeWindowArgs {
    #[arg(long)]
    birth_year: i32,

    #[arg(long)]
    gender: Option<Gender>,

    #[arg(long)]
    seeking: Option<Gender>,

    /// Defaults to the current year.
    #[arg(long)]
    current_year: Option<i32>,
}

#[derive(Serialize)]
struct AgeWindowOutput {
    birth_year: i32,
    min_age: i32,
    max_age: i32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Chart(args) => run_chart(args),
        Command::AgeWindow(args) => run_age_window(args),
    }
}

fn run_age_window(args: AgeWindowArgs) -> anyhow::Result<()> {
    let current_year = args.current_year.unwrap_or_else(|| Utc::now().year());
    let (birth_year, window) = recalculate_birth_year(
        args.birth_year,
        args.gender.unwrap_or_default(),
        args.seeking.unwrap_or_default(),
        current_year,
    );
    log::debug!("age window for {} as of {current_year}: {window:?}", args.birth_year);
    let output = AgeWindowOutput {
        birth_year,
        min_age: window.min_age,
        max_age: window.max_age,
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn parse_time(time: &str) -> anyhow::Result<(u32, u32)> {
    let (hour, minute) = time
        .split_once(':')
        .with_context(|| format!("time must be HH:MM, got {time}"))?;
    Ok((
        hour.parse().with_context(|| format!("bad hour in {time}"))?,
        minute.parse().with_context(|| format!("bad minute in {time}"))?,
    ))
}

fn birth_moment(args: &ChartArgs) -> anyhow::Result<BirthMoment> {
    let (hour, minute) = parse_time(&args.time)?;
    let place = BirthPlace {
        latitude: args.latitude,
        longitude: args.longitude,
        timezone: args.timezone.clone(),
    };
    Ok(BirthMoment::on_date(args.date, hour, minute, &place))
}

#[cfg(feature = "swisseph")]
fn run_chart(args: ChartArgs) -> anyhow::Result<()> {
    use aphrodite::SwissProvider;
    use soulmate::SoulmateSearch;

    let birth = birth_moment(&args)?;
    let settings = soulmate_config::load_settings()?;
    log::debug!("search settings: {:?}", settings.search);
    let provider = SwissProvider::new(settings.ephemeris.path.clone(), settings.ephemeris.settings.clone())
        .context("Failed to initialise the Swiss Ephemeris backend")?;

    let mut search = SoulmateSearch::new(provider).with_settings(settings.search);
    if let Some(year) = args.reference_year {
        search = search.with_reference_year(year);
    }

    let result = search
        .generate_soulmate(
            &birth,
            args.gender.unwrap_or_default(),
            args.seeking.unwrap_or_default(),
        )
        .context("Soulmate search failed")?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(not(feature = "swisseph"))]
fn run_chart(args: ChartArgs) -> anyhow::Result<()> {
    let birth = birth_moment(&args)?;
    birth.validate()?;
    anyhow::bail!("built without an ephemeris backend; rebuild with `--features swisseph`")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("14:30").unwrap(), (14, 30));
        assert!(parse_time("1430").is_err());
        assert!(parse_time("ab:30").is_err());
    }

    #[test]
    fn test_cli_parses_age_window() {
        let cli = Cli::try_parse_from([
            "soulmate",
            "age-window",
            "--birth-year",
            "1990",
            "--gender",
            "male",
            "--seeking",
            "female",
        ])
        .unwrap();
        match cli.command {
            Command::AgeWindow(args) => {
                assert_eq!(args.birth_year, 1990);
                assert_eq!(args.gender, Some(Gender::Male));
                assert_eq!(args.seeking, Some(Gender::Female));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_negative_longitude() {
        let cli = Cli::try_parse_from([
            "soulmate",
            "chart",
            "--date",
            "1990-06-15",
            "--time",
            "14:30",
            "--latitude",
            "51.5",
            "--longitude",
            "-0.13",
            "--timezone",
            "Europe/London",
        ])
        .unwrap();
        let Command::Chart(args) = cli.command else {
            panic!("expected chart");
        };
        let birth = birth_moment(&args).unwrap();
        assert_eq!(birth.longitude, -0.13);
        assert_eq!((birth.hour, birth.minute), (14, 30));
    }
}
