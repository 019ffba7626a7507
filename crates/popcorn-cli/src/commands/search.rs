use super::AppContext;
use crate::output::Output;
use crate::progress::FetchSpinner;
use crate::render;
use color_eyre::Result;
use popcorn_core::{NullSurface, QueryOutcome};

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    let mut session = ctx.session(Box::new(NullSurface))?;

    if session.set_query(query) == QueryOutcome::TooShort {
        output.warn(format!(
            "Search needs at least {} characters",
            session.search().min_query_length()
        ));
        return Ok(());
    }

    let spinner = FetchSpinner::start(format!("Searching for {:?}...", query), output);
    session.settle_all().await;
    spinner.finish();

    render::print_search(session.search().state(), output);
    Ok(())
}
