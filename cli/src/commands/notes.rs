//! `dayplan notes <query>`: run the configured lookup once and print hits.
use dayplan_core::api::{self as core_api, render_hits, CliError, NO_NOTES_CONFIGURED};
use dayplan_plugins::factory;

use crate::commands::cli::NotesArgs;
use crate::commands::run::apply_notes_overrides;

pub async fn handle_notes(args: NotesArgs, ctx: &core_api::AppContext) -> Result<(), CliError> {
    let mut cfg = ctx.cfg().clone();
    apply_notes_overrides(&mut cfg, &args.source);

    let Some(notes) = factory::build_notes(&cfg)
        .await
        .map_err(|e| CliError::Command(format!("note lookup setup failed: {e:#}")))?
    else {
        println!("{NO_NOTES_CONFIGURED}");
        return Ok(());
    };

    let limit = args.limit.unwrap_or(cfg.executor.notes_limit);
    let hits = notes
        .search(&args.query, limit)
        .await
        .map_err(|e| CliError::Command(format!("Search failed: {e:#}")))?;
    println!("{}", render_hits(&hits, cfg.executor.snippet_chars));
    Ok(())
}
