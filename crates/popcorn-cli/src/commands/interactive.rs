use super::AppContext;
use crate::output::Output;
use crate::render;
use crate::title::TerminalTitle;
use color_eyre::Result;
use owo_colors::OwoColorize;
use popcorn_core::{DisplaySurface, QueryOutcome, Session, DEFAULT_TITLE};
use popcorn_models::UserRating;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Type a movie title to search. Commands:
  :open N | :open ID   open result N (or an IMDb id); again to close it
  :back                close the open movie
  :rate N              rate the open movie 1-10
  :add                 add the open movie to your watched list
  :rm ID               remove a movie from your watched list
  :watched             list watched movies
  :summary             watched list averages
  :clear               clear the search
  :help                show this help
  :quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// 1-based position in the result list
    Index(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Search(String),
    Open(Target),
    Back,
    Rate(u8),
    Add,
    Remove(String),
    Watched,
    Summary,
    Clear,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ReplCommand::Nothing);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (name, arg) {
        ("open" | "o", Some(arg)) => Ok(ReplCommand::Open(match arg.parse::<usize>() {
            Ok(0) => return Err("Results are numbered from 1".to_string()),
            Ok(n) => Target::Index(n),
            Err(_) => Target::Id(arg.to_string()),
        })),
        ("open" | "o", None) => Err("Usage: :open N | :open ID".to_string()),
        ("back" | "b", _) => Ok(ReplCommand::Back),
        ("rate" | "r", Some(arg)) => arg
            .parse::<u8>()
            .map(ReplCommand::Rate)
            .map_err(|_| format!("Not a rating: {}", arg)),
        ("rate" | "r", None) => Err("Usage: :rate N (1-10)".to_string()),
        ("add" | "a", _) => Ok(ReplCommand::Add),
        ("rm", Some(id)) => Ok(ReplCommand::Remove(id.to_string())),
        ("rm", None) => Err("Usage: :rm ID".to_string()),
        ("watched" | "w", _) => Ok(ReplCommand::Watched),
        ("summary" | "s", _) => Ok(ReplCommand::Summary),
        ("clear" | "c", _) => Ok(ReplCommand::Clear),
        ("help" | "h" | "?", _) => Ok(ReplCommand::Help),
        ("quit" | "q" | "exit", _) => Ok(ReplCommand::Quit),
        _ => Err(format!("Unknown command :{} (try :help)", name)),
    }
}

pub async fn run_interactive(ctx: &AppContext, output: &Output) -> Result<()> {
    let mut title = TerminalTitle::new();
    title.set_title(DEFAULT_TITLE);
    let mut session = ctx.session(Box::new(title))?;

    if output.is_human() {
        output.println(format!("{}", "🍿 usePopcorn".bold()));
        output.println(format!("{}", "Type a title to search, :help for commands".bright_black()));
    }
    output.info(format!("{} movies in your watched list", session.watched().len()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(output)?;

    loop {
        let searching = session.search().is_pending();
        let loading_details = session.details().is_pending();

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        if handle(&mut session, command, output) == Flow::Quit {
                            break;
                        }
                    }
                    Err(message) => output.warn(message),
                }
                prompt(output)?;
            }
            changed = session.settle(), if searching || loading_details => {
                if changed {
                    output.println("");
                    if searching && !session.search().is_pending() {
                        render::print_search(session.search().state(), output);
                    }
                    if loading_details && !session.details().is_pending() {
                        print_open_movie(&session, output);
                    }
                    prompt(output)?;
                }
            }
        }
    }

    debug!("Interactive session ended");
    Ok(())
}

fn handle(session: &mut Session, command: ReplCommand, output: &Output) -> Flow {
    match command {
        ReplCommand::Nothing => {}
        ReplCommand::Search(query) => match session.set_query(query) {
            QueryOutcome::Fetching => render::print_search(session.search().state(), output),
            QueryOutcome::TooShort => output.warn(format!(
                "Type at least {} characters to search",
                session.search().min_query_length()
            )),
            QueryOutcome::Unchanged => render::print_search(session.search().state(), output),
        },
        ReplCommand::Open(target) => {
            match target {
                Target::Index(n) => {
                    if !session.select_result(n - 1) {
                        output.warn(format!("No result #{}", n));
                        return Flow::Continue;
                    }
                }
                Target::Id(id) => {
                    session.select(&id);
                }
            }
            if session.selection().is_some() {
                output.println(format!("{}", "Loading...".bright_black()));
            } else {
                output.info("Closed");
            }
        }
        ReplCommand::Back => {
            if session.selection().is_some() {
                session.close();
                output.info("Closed");
            } else {
                output.info("No movie is open");
            }
        }
        ReplCommand::Rate(value) => match UserRating::new(value) {
            Ok(rating) => match session.set_rating(rating) {
                Ok(_) => output.info(format!("Your rating: {} (use :add to save it)", rating)),
                Err(e) => output.warn(e.to_string()),
            },
            Err(e) => output.warn(e.to_string()),
        },
        ReplCommand::Add => match session.commit_rating() {
            Ok(entry) => output.success(format!(
                "Added {} to your watched list, rated {}",
                entry.title, entry.user_rating
            )),
            Err(e) => output.warn(e.to_string()),
        },
        ReplCommand::Remove(id) => match session.remove_watched(&id) {
            Ok(0) => output.warn(format!("{} is not in your watched list", id)),
            Ok(_) => output.success(format!("Removed {} from your watched list", id)),
            Err(e) => output.error(e.to_string()),
        },
        ReplCommand::Watched => render::print_watched(session.watched().entries(), output),
        ReplCommand::Summary => render::print_summary(&session.summary(), output),
        ReplCommand::Clear => {
            session.clear_query();
            output.info("Search cleared");
        }
        ReplCommand::Help => output.println(HELP),
        ReplCommand::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn print_open_movie(session: &Session, output: &Output) {
    let details = session.details();
    if let Some(detail) = details.detail() {
        render::print_detail(detail, session.prior_user_rating(), details.pending_rating(), output);
    } else if let Some(error) = details.error() {
        output.error(format!("⛔️ {}", error));
    }
}

fn prompt(output: &Output) -> Result<()> {
    output.print(format!("{} ", "popcorn>".bright_yellow()))?;
    Ok(())
}
