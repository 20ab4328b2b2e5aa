//! linkstats host driver
//!
//! Runs the account-link providers the way a host analytics platform would,
//! against a fixture file instead of a live service.
//!
//! Usage:
//!   linkstats describe --scope player
//!   linkstats evaluate --fixture state.toml --player 069a79f4-44e9-4726-a5be-fca90e38aaf5
//!   linkstats evaluate --fixture state.toml --server
//!   linkstats evaluate --fixture state.toml --trigger periodic
//!   linkstats replay --fixture state.toml --events events.json

use std::{fs, path::{Path, PathBuf}, sync::Arc};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use linkstats_extension::{
    account_link_registry, ChannelInvalidation, EventNormalizer, ExtensionConfig,
    InMemoryLinkService, LinkFixture, Target,
};
use linkstats_model::{Scope, Trigger};
use linkstats_types::{ExternalEvent, PlayerId};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "linkstats")]
#[command(about = "Account-link statistics for a host analytics platform")]
struct Args {
    /// Path to the extension config file
    #[arg(short, long, default_value = "linkstats.toml")]
    config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print provider descriptors as JSON
    Describe {
        #[arg(long, value_enum)]
        scope: Option<ScopeArg>,
    },

    /// Evaluate providers against a fixture
    Evaluate {
        /// Fixture describing the link service state
        #[arg(short, long)]
        fixture: PathBuf,

        /// Player UUID to evaluate
        #[arg(long, conflicts_with = "server")]
        player: Option<PlayerId>,

        /// Evaluate the server scope
        #[arg(long)]
        server: bool,

        /// Host trigger; evaluates the scope it maps to, if enabled in config
        #[arg(long, value_enum, conflicts_with = "server")]
        trigger: Option<TriggerArg>,
    },

    /// Normalize a JSON array of external events into player notifications
    Replay {
        #[arg(short, long)]
        fixture: PathBuf,

        #[arg(short, long)]
        events: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScopeArg {
    Player,
    Server,
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Player => Scope::Player,
            ScopeArg::Server => Scope::Server,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "snake_case")]
enum TriggerArg {
    PlayerJoin,
    PlayerLeave,
    Registration,
    Periodic,
}

impl From<TriggerArg> for Trigger {
    fn from(arg: TriggerArg) -> Self {
        match arg {
            TriggerArg::PlayerJoin => Trigger::PlayerJoin,
            TriggerArg::PlayerLeave => Trigger::PlayerLeave,
            TriggerArg::Registration => Trigger::Registration,
            TriggerArg::Periodic => Trigger::Periodic,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = ExtensionConfig::load_from(&args.config);
    let registry = account_link_registry(&config).context("Failed to build provider registry")?;

    match args.command {
        Command::Describe { scope } => {
            let scopes = match scope {
                Some(scope) => vec![Scope::from(scope)],
                None => vec![Scope::Player, Scope::Server],
            };
            let descriptors: Vec<_> = scopes
                .into_iter()
                .flat_map(|scope| registry.descriptors(scope))
                .collect();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }

        Command::Evaluate {
            fixture,
            player,
            server,
            trigger,
        } => {
            let service = load_fixture(&fixture)?;
            let result = match trigger.map(Trigger::from) {
                Some(trigger) => {
                    let outcome = registry
                        .evaluate_trigger(&service, &config, trigger, player)
                        .context("Evaluation failed")?;
                    match outcome {
                        Some(result) => result,
                        None => {
                            println!("Trigger {:?} is disabled in config, nothing evaluated", trigger);
                            return Ok(());
                        }
                    }
                }
                None => {
                    let target = match (player, server) {
                        (Some(player), false) => Target::Player(player),
                        (None, true) => Target::Server,
                        _ => bail!("Pass exactly one of --player, --server or --trigger"),
                    };
                    registry
                        .evaluate(&service, target)
                        .context("Evaluation failed")?
                }
            };
            println!("{}", result.to_json()?);
        }

        Command::Replay { fixture, events } => {
            let service = Arc::new(load_fixture(&fixture)?);
            let contents = fs::read_to_string(&events)
                .with_context(|| format!("Failed to read events from {:?}", events))?;
            let events = ExternalEvent::parse_batch(&contents).context("Invalid events file")?;

            let (sink, mut rx) = ChannelInvalidation::new();
            let normalizer = EventNormalizer::new(service.clone(), service, Arc::new(sink));
            let sent = normalizer.handle_all(&events);
            info!("Replayed {} events, {} notifications", events.len(), sent);

            while let Ok(change) = rx.try_recv() {
                println!("{}", serde_json::to_string(&change)?);
            }
        }
    }

    Ok(())
}

fn load_fixture(path: &Path) -> Result<InMemoryLinkService> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read fixture {:?}", path))?;
    let fixture = LinkFixture::parse(&contents)
        .with_context(|| format!("Failed to parse fixture {:?}", path))?;
    Ok(fixture.into_service())
}
