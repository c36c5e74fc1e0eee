use std::time::Instant;

use console::style;

use crate::api::models::SearchResponse;
use crate::cli::commands::{CollectionArg, OperatorArg, SearchArgs};
use crate::config::Settings;
use crate::db::Database;
use crate::errors::HoundError;
use crate::models::{Collection, Record, Vulnerability};
use crate::search::{
    is_date_range_valid, AdvancedQuery, FilterEnumeration, FilterEnumerations, FilterValue, Operator, SearchEngine,
};
use crate::suggestions::SuggestionEngine;
use crate::utils::formatting::{format_duration, pluralize};
use crate::utils::truncation::truncate_cell;

const DESCRIPTION_WIDTH: usize = 60;

pub async fn handle_search(args: SearchArgs, settings: Settings) -> Result<(), HoundError> {
    let db = Database::new(&settings.db_path)?;
    let started = Instant::now();

    let outcome = if args.raw {
        None
    } else {
        Some(SuggestionEngine::new(&db).annotate(&args.text)?)
    };
    let text = outcome.as_ref().map_or(args.text.as_str(), |o| o.search_text.as_str());

    let engine = SearchEngine::new(&db);
    let collections: &[Collection] = match args.collection {
        CollectionArg::Exploits => &[Collection::Exploits],
        CollectionArg::Shellcodes => &[Collection::Shellcodes],
        CollectionArg::All => &Collection::ALL,
    };

    let (mut exploits, mut shellcodes) = if args.is_advanced() {
        let snapshot = engine.snapshot()?;
        let query = build_query(&args, text, &snapshot.enumerations())?;
        snapshot.search_advanced(&query)
    } else {
        (
            engine.search_in_db(text, Collection::Exploits)?,
            engine.search_in_db(text, Collection::Shellcodes)?,
        )
    };
    match args.collection {
        CollectionArg::Exploits => shellcodes.clear(),
        CollectionArg::Shellcodes => exploits.clear(),
        CollectionArg::All => {}
    }
    let elapsed = started.elapsed().as_millis() as u64;

    if args.json {
        let mut response = SearchResponse::new(text.to_string(), &exploits, &shellcodes);
        response.suggested_search_text = outcome.map(|o| o.suggested_search_text);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if text != args.text.trim() {
        println!("{} {}", style("Searching for").dim(), style(text).cyan().bold());
    }
    if let Some(hint) = outcome.as_ref().map(|o| o.suggested_search_text.as_str()).filter(|s| !s.is_empty()) {
        println!("{} {}", style("Did you mean:").yellow(), style(hint).yellow().bold());
    }

    for &collection in collections {
        let results = match collection {
            Collection::Exploits => &exploits,
            Collection::Shellcodes => &shellcodes,
        };
        print_table(collection, results);
    }
    println!(
        "{}",
        style(format!(
            "{}, {} in {}",
            pluralize(exploits.len(), "exploit"),
            pluralize(shellcodes.len(), "shellcode"),
            format_duration(elapsed)
        ))
        .dim()
    );
    Ok(())
}

fn build_query(args: &SearchArgs, text: &str, enums: &FilterEnumerations) -> Result<AdvancedQuery, HoundError> {
    if !is_date_range_valid(args.from, args.to) {
        return Err(HoundError::InvalidDateRange);
    }
    let operator = match args.operator {
        OperatorArg::And => Operator::And,
        OperatorArg::Or => Operator::Or,
    };

    Ok(AdvancedQuery::new(text, operator)
        .with_type(pick_label(&enums.types, "type", args.vuln_type.as_deref())?)
        .with_platform(pick_label(&enums.platforms, "platform", args.platform.as_deref())?)
        .with_author(args.author.clone().unwrap_or_default())
        .with_port(args.port)
        .with_dates(args.from, args.to))
}

/// Map a label typed on the command line onto the current enumeration.
fn pick_label(enumeration: &FilterEnumeration, name: &str, label: Option<&str>) -> Result<FilterValue, HoundError> {
    let Some(label) = label else {
        return Ok(FilterValue::All);
    };
    let index = enumeration
        .labels()
        .iter()
        .position(|l| l.eq_ignore_ascii_case(label))
        .ok_or_else(|| {
            HoundError::Validation(format!(
                "Unknown {} '{}'. Known values: {}",
                name,
                label,
                enumeration.labels().join(", ")
            ))
        })?;
    Ok(enumeration.resolve(index)?)
}

fn print_table(collection: Collection, records: &[Record]) {
    println!("\n{} ({})", style(collection.as_str()).white().bold(), records.len());
    if records.is_empty() {
        println!("  {}", style("No results").dim());
        return;
    }
    for record in records {
        println!(
            "  {:>6}  {}  {:<width$}  {}",
            style(record.id()).cyan(),
            style(record.date()).dim(),
            truncate_cell(record.description(), DESCRIPTION_WIDTH),
            style(record.platform()).dim(),
            width = DESCRIPTION_WIDTH,
        );
    }
}
