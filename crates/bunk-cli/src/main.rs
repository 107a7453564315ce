use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::Console;

#[derive(Parser)]
#[command(
    name = "bunk",
    about = "Bunkhouse: RSVP roster and room planner for a weekend at the house",
    version,
    propagate_version = true,
)]
struct Cli {
    /// House layout file. The built-in layout is used when it is missing.
    #[arg(long, global = true, default_value = "house.toml")]
    house: PathBuf,
    /// Directory holding the roster database.
    #[arg(long, global = true, default_value = ".bunkhouse")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a house.toml scaffold with the default rooms
    Init {
        /// Event name shown on the board
        #[arg(short, long, default_value = "Weekend at the House")]
        name: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Submit or list RSVPs
    Rsvp {
        #[command(subcommand)]
        action: RsvpAction,
    },
    /// Compute room assignments for confirmed and likely guests.
    ///
    /// The plan is skipped when nothing changed since the last one, so
    /// manual assignments survive. Use --force to recompute anyway.
    Plan {
        #[arg(long)]
        force: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Manually put a group in a room (or `none` to unassign)
    Assign {
        group: String,
        room: String,
    },
    /// Show who sleeps where, plus any conflicts
    Board {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Show headcounts and the maybe queue
    Summary {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Erase every RSVP and assignment
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum RsvpAction {
    /// Submit (or edit) an RSVP from a JSON file
    Submit {
        #[arg(short, long)]
        file: PathBuf,
        /// Store the RSVP without re-planning rooms
        #[arg(long)]
        no_plan: bool,
    },
    /// List every RSVP
    List {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bunk=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init { name, force } = &cli.command {
        return commands::init::init(&cli.house, name, *force);
    }

    let console = Console::open(&cli.house, &cli.data_dir)?;
    match cli.command {
        Commands::Init { .. } => Ok(()),
        Commands::Rsvp { action } => match action {
            RsvpAction::Submit { file, no_plan } => {
                commands::rsvp::submit(&console, &file, no_plan)
            }
            RsvpAction::List { format } => commands::rsvp::list(&console, &format),
        },
        Commands::Plan { force, format } => commands::plan::plan(&console, force, &format),
        Commands::Assign { group, room } => commands::assign::assign(&console, &group, &room),
        Commands::Board { format } => commands::board::board(&console, &format),
        Commands::Summary { format } => commands::board::summary(&console, &format),
        Commands::Reset { yes } => commands::reset::reset(&console, yes),
    }
}
