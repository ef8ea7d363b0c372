//! CLI entrypoint for livepoll
//!
//! Wires the layers together with dependency injection: file store plus
//! notification hub into a synchronizer, then dispatches the command.
//! Each invocation is one context; cross-invocation sharing happens
//! through the file store, exactly like any other context joining the
//! storage domain.

mod commands;
mod output;

use anyhow::{Result, bail};
use clap::Parser;
use commands::{Cli, Command};
use livepoll_application::session::VotedSet;
use livepoll_application::sync::LiveState;
use livepoll_application::use_cases::{admin, vote};
use livepoll_domain::{AppState, Direction, OptionId, PollOption, Question, QuestionId};
use livepoll_infrastructure::{ChannelHub, ConfigLoader, JsonFileStore, SessionStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    info!("storage directory: {}", config.storage_dir.display());

    // === Dependency Injection ===
    let store = Arc::new(JsonFileStore::new(&config.storage_dir)?);
    let hub = ChannelHub::new();
    let (publisher, feed) = hub.register();
    let mut live = LiveState::initialize(
        config.state_key.clone(),
        AppState::initial(),
        store,
        Box::new(publisher),
        Box::new(feed),
    );

    match cli.command {
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(live.read())?);
            } else {
                print!("{}", output::render_state(live.read()));
            }
        }
        Command::Next => {
            admin::advance_question(&mut live, Direction::Forward);
            print!("{}", output::render_state(live.read()));
        }
        Command::Prev => {
            admin::advance_question(&mut live, Direction::Backward);
            print!("{}", output::render_state(live.read()));
        }
        Command::Add { text, options } => {
            let question = Question {
                id: QuestionId::generate(),
                text,
                options: options
                    .into_iter()
                    .map(|text| PollOption {
                        id: OptionId::generate(),
                        text,
                    })
                    .collect(),
            };
            let id = question.id.clone();
            admin::save_question(&mut live, question)?;
            println!("Added question {id}");
        }
        Command::Edit { id, text, options } => {
            let id = QuestionId::new(id);
            let Some(existing) = live.read().questions.iter().find(|q| q.id == id).cloned()
            else {
                bail!("no question with id {id}");
            };
            let question = Question {
                id: existing.id,
                text: text.unwrap_or(existing.text),
                options: if options.is_empty() {
                    existing.options
                } else {
                    options
                        .into_iter()
                        .map(|text| PollOption {
                            id: OptionId::generate(),
                            text,
                        })
                        .collect()
                },
            };
            admin::save_question(&mut live, question)?;
            println!("Saved question {id}");
        }
        Command::Delete { id } => {
            let id = QuestionId::new(id);
            admin::delete_question(&mut live, &id)?;
            println!("Deleted question {id}");
            print!("{}", output::render_state(live.read()));
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("reset clears every question and vote; pass --yes to confirm");
            }
            admin::reset_session(&mut live);
            println!("Session reset to defaults.");
        }
        Command::Vote { question, option } => {
            let session = Arc::new(SessionStore::new());
            let mut voted = VotedSet::load("voted-questions", session);
            let question = QuestionId::new(question);
            let option = OptionId::new(option);
            vote::cast_vote(&mut live, &mut voted, &question, &option)?;
            println!("Vote recorded for {option} on {question}");
        }
    }

    Ok(())
}
