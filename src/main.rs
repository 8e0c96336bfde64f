mod api;
mod cli;
mod engine;
mod error;
mod ledger;
mod logging;
mod rename;
mod scanner;
mod ui;

use api::TmdbClient;
use clap::Parser;
use cli::Args;
use engine::{Command, EngineView, WorkflowEngine};
use error::AppError;
use ledger::ProcessedLedger;
use scanner::scan_roots;
use std::io::{self, BufRead};
use tracing::{debug, error, info};
use ui::{parse_gesture, Gesture, Ui, UiConfig};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    debug!("Environment loaded, checking API configuration");

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let mut ui = Ui::new(UiConfig::new());
    ui.print_header(env!("CARGO_PKG_VERSION"));

    let ledger = ProcessedLedger::open(&args.ledger)?;
    info!(entries = ledger.len(), "Ledger ready");

    let tasks = scan_roots(&args.roots, &ledger);
    info!("Found {} folders to process", tasks.len());

    if tasks.is_empty() {
        ui.success("All folders have been processed.");
        return Ok(());
    }

    ui.info(&format!("{} folders queued.", tasks.len()));

    let client = TmdbClient::new(api::config_from_env())?;
    let mut engine = WorkflowEngine::new(tasks, client, ledger);

    ui.step("Searching TMDB");
    let mut view = engine.apply(Command::Next)?;
    ui.step_done();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let has_candidates = match &view {
            EngineView::Finished => {
                ui.success("All folders have been processed.");
                return Ok(());
            }
            EngineView::AwaitingSelection {
                folder,
                kind,
                candidates,
            } => {
                ui.folder_header(folder, *kind, engine.remaining());
                ui.candidate_list(candidates);
                true
            }
            EngineView::NoMatches { folder, kind } => {
                ui.folder_header(folder, *kind, engine.remaining());
                ui.no_matches(folder);
                false
            }
        };

        let command = match read_gesture(&mut ui, &mut lines, has_candidates) {
            Some(Gesture::Quit) | None => {
                ui.info("Stopping; unfinished folders stay queued for the next run.");
                return Ok(());
            }
            Some(Gesture::Select(n)) => match candidate_id_at(&view, n) {
                Some(id) => Command::Select(id),
                None => {
                    ui.warning("No candidate with that number.");
                    continue;
                }
            },
            Some(Gesture::MarkProcessed) => Command::MarkProcessed,
            Some(Gesture::Skip) => Command::Skip,
            Some(Gesture::ManualSearch(text)) => Command::ManualSearch(text),
        };

        ui.step("Searching TMDB");
        match engine.apply(command) {
            Ok(next_view) => {
                ui.step_done();
                view = next_view;
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                ui.step_done();
                ui.error(&e.to_string());
                view = engine.current_view();
            }
        }
    }
}

/// Prompt until the operator types a recognizable gesture. Returns `None`
/// on end of input.
fn read_gesture(
    ui: &mut Ui,
    lines: &mut impl Iterator<Item = io::Result<String>>,
    has_candidates: bool,
) -> Option<Gesture> {
    loop {
        ui.prompt(has_candidates);
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return None,
        };
        match parse_gesture(&line) {
            Some(gesture) => return Some(gesture),
            None => ui.warning("Unrecognized input."),
        }
    }
}

/// Map a 1-based list number to the candidate's TMDB id.
fn candidate_id_at(view: &EngineView, n: usize) -> Option<u64> {
    match view {
        EngineView::AwaitingSelection { candidates, .. } => {
            candidates.get(n.checked_sub(1)?).map(|c| c.id)
        }
        _ => None,
    }
}
