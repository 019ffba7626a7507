use super::AppContext;
use crate::output::{Output, OutputFormat};
use crate::render;
use crate::WatchedCommands;
use color_eyre::Result;
use popcorn_core::WatchedSummary;
use serde_json::json;

pub fn run_watched(ctx: &AppContext, cmd: WatchedCommands, output: &Output) -> Result<()> {
    let mut watched = ctx.open_watched()?;

    match cmd {
        WatchedCommands::List => render::print_watched(watched.entries(), output),
        WatchedCommands::Summary => render::print_summary(&WatchedSummary::from_entries(watched.entries()), output),
        WatchedCommands::Remove { id } => {
            let removed = watched.remove(&id)?;
            match output.format() {
                OutputFormat::Human if removed > 0 => output.success(format!("Removed {} from your watched list", id)),
                OutputFormat::Human => output.warn(format!("{} is not in your watched list", id)),
                _ => output.json(&json!({ "type": "removed", "id": id, "removed": removed })),
            }
        }
    }
    Ok(())
}
