use crate::application::similar::DEFAULT_TOP_K;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "affinity", about = "Find users with similar interests", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rebuild the in-memory index from the user store and report what was skipped
    Sync,
    /// Find users similar to a comma-separated list of interests
    Similar {
        /// Interests, e.g. "cooking, films"
        interests: String,
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
        /// Also register the query as a walk-up user after ranking
        #[arg(long)]
        register: bool,
    },
    /// Find users similar to an existing user
    Neighbors {
        /// User ID
        id: String,
        #[arg(short, long, default_value_t = DEFAULT_TOP_K)]
        k: usize,
    },
    /// Add a user to the user store
    UserAdd {
        /// JSON with name and interests (array of strings)
        json: String,
    },
    /// List users in the user store as stored
    Users,
    /// Show index statistics
    Stats,
}
