//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Server-less live poll: one shared state, many local contexts.
#[derive(Parser, Debug)]
#[command(name = "livepoll", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Explicit config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip config files, use built-in defaults
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the current poll state
    Show {
        /// Emit the raw state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move to the next question
    Next,
    /// Move to the previous question
    Prev,
    /// Add a new question
    Add {
        /// Question text
        text: String,
        /// Answer options (repeat; at least two)
        #[arg(short, long = "option", required = true)]
        options: Vec<String>,
    },
    /// Edit an existing question's text and options
    ///
    /// Passing new options replaces the old set; their tallies restart at
    /// zero, options are identified by id and these are fresh.
    Edit {
        /// Question id
        id: String,
        /// New question text (keeps the old text when omitted)
        #[arg(long)]
        text: Option<String>,
        /// Replacement options (omit to keep the old ones)
        #[arg(short, long = "option")]
        options: Vec<String>,
    },
    /// Delete a question
    Delete {
        /// Question id
        id: String,
    },
    /// Restore default questions and clear all votes
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
    /// Cast a vote on the current question
    Vote {
        /// Question id (must be the currently displayed question)
        question: String,
        /// Option id
        option: String,
    },
}
