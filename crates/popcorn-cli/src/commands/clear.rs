use super::prompts;
use super::AppContext;
use crate::output::Output;
use crate::progress::is_interactive;
use color_eyre::Result;

pub fn run_clear(ctx: &AppContext, watched: bool, yes: bool, output: &Output) -> Result<()> {
    if !watched {
        output.warn("No clear option specified. Use --watched");
        output.println("\nExample: popcorn clear --watched");
        return Ok(());
    }

    let mut list = ctx.open_watched()?;
    if list.is_empty() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    if !yes {
        if !is_interactive() {
            output.warn("Refusing to clear the watched list without --yes");
            return Ok(());
        }
        let prompt = format!("Remove all {} movies from your watched list?", list.len());
        if !prompts::prompt_yes_no_with_output(&prompt, Some(false), Some(output))? {
            output.info("Nothing cleared");
            return Ok(());
        }
    }

    let removed = list.clear()?;
    output.success(format!("Cleared {} movies from your watched list", removed));
    Ok(())
}
