use console::style;

use crate::cli::commands::{SuggestionAction, SuggestionsArgs};
use crate::config::Settings;
use crate::db::Database;
use crate::errors::{with_retry, HoundError, RetryConfig};
use crate::suggestions::SuggestionEngine;

pub async fn handle_suggestions(args: SuggestionsArgs, settings: Settings) -> Result<(), HoundError> {
    let db = Database::new(&settings.db_path)?;
    let retry = RetryConfig { max_retries: settings.write_retries };

    match args.action {
        SuggestionAction::List { json } => {
            let suggestions = SuggestionEngine::new(&db).list_suggestions()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
                return Ok(());
            }
            if suggestions.is_empty() {
                println!("{}", style("No suggestions stored").dim());
                return Ok(());
            }
            println!("\n{}\n", style("Suggestions:").white().bold());
            for s in &suggestions {
                let mode = if s.autoreplacement {
                    style("auto").green().to_string()
                } else {
                    style("hint").yellow().to_string()
                };
                println!(
                    "  {:>4}  {} -> {}  [{}]",
                    style(s.id).cyan(),
                    s.searched,
                    style(&s.suggestion).white().bold(),
                    mode
                );
            }
        }
        SuggestionAction::Add { searched, suggestion, auto } => {
            let (db, searched, suggestion) = (&db, &searched, &suggestion);
            let stored = with_retry("add_suggestion", &retry, || async move {
                SuggestionEngine::new(db).add_suggestion(searched, suggestion, usize::from(auto))
            })
            .await?;
            println!(
                "{} {} -> {} (id {})",
                style("Saved").green(),
                stored.searched,
                stored.suggestion,
                stored.id
            );
        }
        SuggestionAction::Delete { id } => {
            let db = &db;
            with_retry("delete_suggestion", &retry, || async move {
                SuggestionEngine::new(db).delete_suggestion(id)
            })
            .await?;
            println!("{} suggestion {}", style("Deleted").green(), id);
        }
    }
    Ok(())
}
