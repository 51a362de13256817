//! Command dispatch for the rulebook binary. Every command emits JSON on
//! stdout so output can be piped; diagnostics go to stderr.

use std::env;
use std::io;
use std::path::PathBuf;

use crate::data::registry::SOURCES;
use crate::data::search;
use crate::data::validate::validate_sources;
use crate::render::render_cards;
use crate::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Sources,
    Browse,
    Search,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("sources") => Some(Command::Sources),
        Some("browse") => Some(Command::Browse),
        Some("search") => Some(Command::Search),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Sources) => handle_sources(),
        Some(Command::Browse) => handle_browse(args),
        Some(Command::Search) => handle_search(args),
        Some(Command::Validate) => handle_validate(),
        None => {
            eprintln!("usage: rulebook <serve|sources|browse|search|validate>");
            2
        }
    }
}

fn data_dir() -> PathBuf {
    PathBuf::from(env::var("RULEBOOK_DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("RULEBOOK_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    match runtime.block_on(server::run_server(&bind_addr, data_dir())) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

fn handle_sources() -> i32 {
    let list: Vec<serde_json::Value> = SOURCES
        .iter()
        .map(|source| serde_json::json!({ "id": source.id, "label": source.label }))
        .collect();
    match serde_json::to_string_pretty(&serde_json::json!({ "sources": list })) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize source list: {err}");
            1
        }
    }
}

fn handle_browse(args: &[String]) -> i32 {
    let Some(source_id) = args.get(2) else {
        eprintln!("usage: rulebook browse <source.csv>");
        return 2;
    };

    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    let records = match runtime.block_on(search::browse(&data_dir(), source_id)) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("browse failed: {err}");
            return 1;
        }
    };

    let cards = render_cards(&records, false);
    print_json(&serde_json::json!({
        "source": source_id,
        "count": cards.len(),
        "cards": cards
    }))
}

fn handle_search(args: &[String]) -> i32 {
    let Some(query) = args.get(2) else {
        eprintln!("usage: rulebook search <query>");
        return 2;
    };

    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    let records = runtime.block_on(search::search(&data_dir(), query));

    let cards = render_cards(&records, true);
    print_json(&serde_json::json!({
        "query": query.trim(),
        "count": cards.len(),
        "cards": cards
    }))
}

fn handle_validate() -> i32 {
    let runtime = match runtime() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("failed to start runtime: {err}");
            return 1;
        }
    };
    let report = runtime.block_on(validate_sources(&data_dir()));

    for diag in &report.diagnostics {
        println!("[{}] {}: {}", diag.severity, diag.source_id, diag.message);
    }
    if report.has_errors() {
        eprintln!(
            "validation failed: {} diagnostic(s)",
            report.diagnostics.len()
        );
        1
    } else {
        println!("validation passed");
        0
    }
}

fn print_json(payload: &serde_json::Value) -> i32 {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}
