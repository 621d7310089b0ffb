use chrono::Local;
use clap::{Parser, Subcommand};

use backend_kit::dates::format_moment;
use backend_kit::hid::IdGenerator;
use backend_kit::util::split_by_limit;

#[derive(Parser)]
#[command(name = "kit-cli")]
#[command(about = "Command-line access to the backend-kit helpers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sortable identifiers
    Id {
        /// Use base 62 (digits, lower and upper case)
        #[arg(long)]
        caps: bool,

        /// Insert a separator every N characters
        #[arg(short, long, default_value_t = 0)]
        group: i32,

        /// Separator character
        #[arg(short, long)]
        separator: Option<char>,

        /// How many identifiers to print
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Print the current local time using a moment.js style format
    DateFormat {
        /// e.g. "YYYY-MM-DD HH:mm:ss"
        format: String,
    },
    /// Split a value into chunks of at most LIMIT characters
    Chunk { value: String, limit: usize },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Id {
            caps,
            group,
            separator,
            count,
        } => {
            let generator = IdGenerator::new();
            for _ in 0..count {
                println!("{}", generator.generate(caps, group, separator));
            }
        }
        Commands::DateFormat { format } => {
            println!("{}", format_moment(&Local::now(), &format));
        }
        Commands::Chunk { value, limit } => {
            let chunks = split_by_limit(&value, limit);
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
    }

    Ok(())
}
