use super::AppContext;
use crate::output::Output;
use crate::progress::FetchSpinner;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::NullSurface;
use popcorn_models::UserRating;
use serde_json::json;

pub async fn run_rate(ctx: &AppContext, id: &str, rating: u8, output: &Output) -> Result<()> {
    let rating = UserRating::new(rating)?;
    let mut session = ctx.session(Box::new(NullSurface))?;

    session.select(id);
    let spinner = FetchSpinner::start(format!("Loading {}...", id), output);
    session.settle_all().await;
    spinner.finish();

    if let Some(error) = session.details().error() {
        return Err(eyre!("{}", error));
    }

    if let Some(prior) = session.prior_user_rating() {
        output.warn(format!("{} is already in your watched list (rated {})", id, prior));
        return Ok(());
    }

    session.set_rating(rating)?;
    let entry = session.commit_rating()?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            output.success(format!("Added {} ({}) to your watched list, rated {}", entry.title, entry.year, entry.user_rating));
        }
        _ => output.json(&json!({ "type": "rated", "movie": entry })),
    }
    Ok(())
}
