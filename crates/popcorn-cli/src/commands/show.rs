use super::AppContext;
use crate::output::Output;
use crate::progress::FetchSpinner;
use crate::render;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_core::NullSurface;

pub async fn run_show(ctx: &AppContext, id: &str, output: &Output) -> Result<()> {
    let mut session = ctx.session(Box::new(NullSurface))?;

    session.select(id);
    let spinner = FetchSpinner::start(format!("Loading {}...", id), output);
    session.settle_all().await;
    spinner.finish();

    let details = session.details();
    match details.detail() {
        Some(detail) => {
            render::print_detail(detail, session.prior_user_rating(), None, output);
            Ok(())
        }
        None => Err(eyre!(
            "{}",
            details.error().unwrap_or("movie details did not load")
        )),
    }
}
