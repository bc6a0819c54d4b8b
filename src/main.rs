use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use streamed_sports_lib::api::{Match, StreamedClient};
use streamed_sports_lib::classify::SportKind;
use streamed_sports_lib::config::AppConfig;
use streamed_sports_lib::directory::{DirectoryOptions, Listing, SportsDirectory};
use streamed_sports_lib::format::parse_timezone;
use streamed_sports_lib::player::{self, PlaybackTarget, Player};
use streamed_sports_lib::render::{self, CardStyle};
use streamed_sports_lib::samples;

#[derive(Parser, Debug)]
#[command(version, about = "Live and upcoming F1, cricket and basketball streams", long_about = None)]
struct Cli {
    /// Print JSON instead of match cards
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the API root for this run
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Never fall back to built-in sample listings
    #[arg(long, global = true)]
    no_samples: bool,

    /// Display times in this IANA timezone
    #[arg(long, global = true)]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Live F1, cricket and Asia Cup plus upcoming races
    Home,
    /// Formula 1 races
    F1(ListingArgs),
    /// Cricket matches
    Cricket(ListingArgs),
    /// Basketball games
    Basketball(ListingArgs),
    /// Asia Cup matches (live and upcoming when no flag is given)
    AsiaCup(AsiaCupArgs),
    /// Cricket matches of one tournament or series
    Tournament { name: String },
    /// Streams of one source
    Streams { source: String, id: String },
    /// Open a stream in mpv or the browser
    Watch {
        source: String,
        id: String,
        /// 1-based stream number (default: first)
        #[arg(long)]
        stream: Option<usize>,
    },
    /// Sports known to the API
    Sports,
    /// Built-in sample listings, without touching the network
    Samples {
        /// f1, cricket, basketball or asia-cup; all when omitted
        sport: Option<String>,
    },
    /// Show or edit the configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        path: bool,
        /// Persist a display timezone
        #[arg(long)]
        set_timezone: Option<String>,
    },
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct ListingArgs {
    #[arg(long)]
    live: bool,
    #[arg(long)]
    upcoming: bool,
    /// Today's schedule (F1 only)
    #[arg(long)]
    today: bool,
    /// Most recent listings (F1 only)
    #[arg(long)]
    recent: bool,
}

impl ListingArgs {
    fn listing(&self) -> Listing {
        if self.live {
            Listing::Live
        } else if self.upcoming {
            Listing::Upcoming
        } else if self.today {
            Listing::Today
        } else if self.recent {
            Listing::Recent
        } else {
            Listing::All
        }
    }
}

#[derive(Args, Debug)]
#[group(multiple = false)]
struct AsiaCupArgs {
    #[arg(long)]
    live: bool,
    #[arg(long)]
    upcoming: bool,
}

/// `-q` and `-v` win; otherwise `RUST_LOG`, falling back to info.
fn log_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    // stdout carries listings and JSON; logs go to stderr.
    tracing_subscriber::registry()
        .with(log_filter(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .init();
    Ok(())
}

fn build_client(config: &AppConfig) -> Result<StreamedClient> {
    let client = if config.use_doh {
        StreamedClient::new_with_doh(
            &config.base_url,
            &config.user_agent,
            config.request_timeout_secs,
        )?
    } else {
        StreamedClient::new(
            &config.base_url,
            &config.user_agent,
            config.request_timeout_secs,
        )?
    };
    Ok(client)
}

fn heading(kind: SportKind, listing: Listing) -> String {
    let prefix = match listing {
        Listing::Live => "Live ",
        Listing::Upcoming => "Upcoming ",
        Listing::Today => "Today's ",
        Listing::Recent => "Recent ",
        Listing::All => "",
    };
    format!("{}{}", prefix, kind.display_name())
}

struct Output<'a> {
    json: bool,
    style: CardStyle<'a>,
}

impl Output<'_> {
    fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn matches(&self, heading: &str, matches: &[Match]) -> Result<()> {
        if self.json {
            return self.json(matches);
        }
        print!("{}", render::match_list(heading, matches, &self.style));
        Ok(())
    }
}

fn sample_listings(sport: Option<&str>) -> Result<Vec<(&'static str, Vec<Match>)>> {
    let now = Utc::now();
    let all = vec![
        ("Sample Formula 1", samples::f1(now)),
        ("Sample Cricket", samples::cricket(now)),
        ("Sample Basketball", samples::basketball()),
        ("Sample Asia Cup", samples::asia_cup(now)),
    ];
    let Some(sport) = sport else {
        return Ok(all);
    };
    if sport.eq_ignore_ascii_case("asia-cup") || sport.eq_ignore_ascii_case("asiacup") {
        return Ok(vec![("Sample Asia Cup", samples::asia_cup(now))]);
    }
    let listing = match sport.parse::<SportKind>() {
        Ok(SportKind::F1) => ("Sample Formula 1", samples::f1(now)),
        Ok(SportKind::Cricket) => ("Sample Cricket", samples::cricket(now)),
        Ok(SportKind::Basketball) => ("Sample Basketball", samples::basketball()),
        Err(e) => bail!(e),
    };
    Ok(vec![listing])
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet)?;

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read config, using defaults");
        AppConfig::default()
    });
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if cli.no_samples {
        config.fallback_to_samples = false;
    }
    if let Some(tz) = &cli.timezone {
        config.timezone = Some(tz.clone());
    }

    let command = cli.command.unwrap_or(Command::Home);

    // Commands that never build a client.
    match &command {
        Command::Config { path, set_timezone } => {
            if *path {
                match AppConfig::config_path() {
                    Some(p) => println!("{}", p.display()),
                    None => bail!("Cannot determine config directory"),
                }
                return Ok(());
            }
            if let Some(tz) = set_timezone {
                // Persist only the timezone, not this run's flag overrides.
                let mut stored = AppConfig::load()?;
                stored.set_timezone(tz)?;
                stored.save()?;
                config.timezone = stored.timezone;
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        Command::Samples { sport } => {
            let out = Output {
                json: cli.json,
                style: CardStyle {
                    tz: parse_timezone(&config.get_user_timezone()),
                    now: Utc::now(),
                    image_base: config.image_base(),
                },
            };
            for (heading, matches) in sample_listings(sport.as_deref())? {
                out.matches(heading, &matches)?;
            }
            return Ok(());
        }
        _ => {}
    }

    let client = build_client(&config)?;
    let directory = SportsDirectory::new(client, DirectoryOptions::from(&config));
    let out = Output {
        json: cli.json,
        style: CardStyle {
            tz: parse_timezone(&config.get_user_timezone()),
            now: Utc::now(),
            image_base: config.image_base(),
        },
    };

    match command {
        Command::Home => {
            let overview = directory.home_overview().await;
            if out.json {
                out.json(&overview)?;
            } else {
                print!("{}", render::home(&overview, &out.style));
            }
        }
        Command::F1(args) => list_sport(&directory, &out, SportKind::F1, &args).await?,
        Command::Cricket(args) => list_sport(&directory, &out, SportKind::Cricket, &args).await?,
        Command::Basketball(args) => {
            list_sport(&directory, &out, SportKind::Basketball, &args).await?
        }
        Command::AsiaCup(args) => {
            if args.live {
                let matches = directory.live_asia_cup_matches().await;
                out.matches("Live Asia Cup", &matches)?;
            } else if args.upcoming {
                let matches = directory.upcoming_asia_cup_matches().await;
                out.matches("Upcoming Asia Cup", &matches)?;
            } else {
                let matches = directory.all_asia_cup_matches().await;
                out.matches("Asia Cup", &matches)?;
            }
        }
        Command::Tournament { name } => {
            let matches = directory.cricket_matches_by_tournament(&name).await;
            out.matches(&name, &matches)?;
        }
        Command::Streams { source, id } => {
            let streams = directory.streams(&source, &id).await;
            if out.json {
                out.json(&streams)?;
            } else {
                print!("{}", render::stream_list(&streams));
            }
        }
        Command::Watch { source, id, stream } => {
            let (found, streams) =
                futures::join!(directory.find_match(&source, &id), directory.streams(&source, &id));
            if let Some(m) = &found {
                println!("{}", m.title);
            }
            let Some(chosen) = player::select_stream(&streams, stream) else {
                if streams.is_empty() {
                    bail!("No streams available for {}/{}", source, id);
                }
                bail!(
                    "Stream {} does not exist ({} available)",
                    stream.unwrap_or_default(),
                    streams.len()
                );
            };

            let player = Player::new();
            match player.open(chosen)? {
                PlaybackTarget::Mpv => {
                    println!("Playing stream {} in mpv", chosen.stream_no);
                    if !player.wait_for_playback(10_000).await {
                        bail!("mpv exited before playback started");
                    }
                    player.wait();
                }
                PlaybackTarget::Browser => {
                    println!("Opened stream {} in the browser", chosen.stream_no);
                }
            }
        }
        Command::Sports => {
            let sports = directory.sports().await;
            if out.json {
                out.json(&sports)?;
            } else {
                print!("{}", render::sports_list(&sports));
            }
        }
        Command::Config { .. } | Command::Samples { .. } => {}
    }

    Ok(())
}

async fn list_sport(
    directory: &SportsDirectory<StreamedClient>,
    out: &Output<'_>,
    kind: SportKind,
    args: &ListingArgs,
) -> Result<()> {
    let listing = args.listing();
    match directory.listing(kind, listing).await {
        Some(matches) => out.matches(&heading(kind, listing), &matches),
        None => bail!("{} has no {:?} listing", kind.display_name(), listing),
    }
}
