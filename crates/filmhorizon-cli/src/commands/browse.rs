use super::listing::print_listing;
use super::movie::print_detail;
use super::ui::FetchSpinner;
use super::watchlist::{print_watchlist, remove_by_id};
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use filmhorizon_core::{
    add_to_watchlist, load_detail, toggle_watchlist, Action, AppContext, Applied, Route,
};
use filmhorizon_models::{MovieDetail, WatchlistEntry};
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &[(&str, &str)] = &[
    ("<text>", "search by title (fires after the debounce)"),
    (":clear", "clear the search and show popular movies"),
    (":next / :more", "next page"),
    (":prev", "previous page"),
    (":page N", "jump to page N"),
    (":open ID", "show details and cast"),
    (":toggle", "add/remove the open movie to/from the watchlist"),
    (":add ID", "add a listed movie to the watchlist"),
    (":rm ID", "remove a movie from the watchlist"),
    (":watchlist", "show the watchlist"),
    (":go PATH", "navigate to /, /?search=..., /movie/ID or /watchlist"),
    (":help", "show this help"),
    (":quit", "leave"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BrowseCommand {
    Search(String),
    Clear,
    NextPage,
    PrevPage,
    Page(u32),
    Open(u64),
    Toggle,
    Add(u64),
    Remove(u64),
    Watchlist,
    Go(Route),
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

pub(crate) fn parse_command(line: &str) -> BrowseCommand {
    let line = line.trim();
    if line.is_empty() {
        return BrowseCommand::Refresh;
    }
    let Some(command) = line.strip_prefix(':') else {
        return BrowseCommand::Search(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    let id_arg = |make: fn(u64) -> BrowseCommand| match arg.parse::<u64>() {
        Ok(id) => make(id),
        Err(_) => BrowseCommand::Invalid(format!(":{} needs a movie id", name)),
    };

    match name {
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "h" | "help" => BrowseCommand::Help,
        "clear" => BrowseCommand::Clear,
        "n" | "next" | "more" => BrowseCommand::NextPage,
        "p" | "prev" => BrowseCommand::PrevPage,
        "page" => match arg.parse::<u32>() {
            Ok(page) if page >= 1 => BrowseCommand::Page(page),
            _ => BrowseCommand::Invalid(":page needs a page number of 1 or more".to_string()),
        },
        "open" => id_arg(BrowseCommand::Open),
        "add" => id_arg(BrowseCommand::Add),
        "rm" | "remove" => id_arg(BrowseCommand::Remove),
        "toggle" => BrowseCommand::Toggle,
        "w" | "watchlist" => BrowseCommand::Watchlist,
        "go" => match Route::parse(arg) {
            Some(route) => BrowseCommand::Go(route),
            None => BrowseCommand::Invalid(format!("Unknown location: {}", arg)),
        },
        other => BrowseCommand::Invalid(format!("Unknown command :{} (try :help)", other)),
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Interactive session state that lives outside the reducer.
struct Browser {
    route: Route,
    open_detail: Option<MovieDetail>,
    last_notification: u64,
}

pub async fn run_browse(output: &Output) -> Result<()> {
    if output.format() != OutputFormat::Human {
        return Err(color_eyre::eyre::eyre!("browse is interactive and only supports --output human"));
    }

    let mut ctx = super::load_context(output)?;
    let mut browser = Browser {
        route: Route::Listing { search: None },
        open_detail: None,
        last_notification: 0,
    };

    output.info(format!("{}", "Type to search, :help for commands".dimmed()));
    ctx.orchestrator.observe(ctx.session.state());
    print_prompt(&browser, output)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let flow = handle_command(&mut ctx, &mut browser, parse_command(&line), output).await?;
                show_new_notifications(&mut ctx, &mut browser, output);
                if let Flow::Quit = flow {
                    break;
                }
                print_prompt(&browser, output)?;
            }
            Some(outcome) = ctx.orchestrator.next_outcome() => {
                let applied = ctx.orchestrator.apply(outcome);
                if on_listing(&browser) && touches_active_listing(&ctx, applied) {
                    match applied {
                        Applied::Failed { .. } => output.error("Error fetching movies"),
                        _ => print_listing(&ctx, output),
                    }
                    print_prompt(&browser, output)?;
                }
            }
        }
    }

    output.println("");
    Ok(())
}

fn on_listing(browser: &Browser) -> bool {
    matches!(browser.route, Route::Listing { .. })
}

fn touches_active_listing(ctx: &AppContext, applied: Applied) -> bool {
    match applied {
        Applied::Merged { kind, .. } | Applied::Failed { kind } => kind == ctx.orchestrator.active_kind(),
        Applied::Cleared => false,
    }
}

fn print_prompt(browser: &Browser, output: &Output) -> Result<()> {
    output.print(format!("{} {} ", browser.route.to_string().dimmed(), "›".bright_cyan()))?;
    Ok(())
}

fn show_new_notifications(ctx: &mut AppContext, browser: &mut Browser, output: &Output) {
    for notification in ctx.notifier.active() {
        if notification.id > browser.last_notification {
            output.notification(notification);
            browser.last_notification = notification.id;
        }
    }
}

fn listing_route(ctx: &AppContext) -> Route {
    let state = ctx.session.state();
    Route::Listing {
        search: state.is_searching().then(|| state.search_query.clone()),
    }
}

/// Dispatch, then let the orchestrator react to the new state.
fn dispatch(ctx: &mut AppContext, action: Action) {
    ctx.session.dispatch(action);
    ctx.orchestrator.observe(ctx.session.state());
}

fn set_search(ctx: &mut AppContext, browser: &mut Browser, query: String, output: &Output) {
    let searching = !query.is_empty();
    dispatch(ctx, Action::SetSearchQuery(query));
    browser.route = listing_route(ctx);
    if !searching {
        print_listing(ctx, output);
    }
}

fn change_page(ctx: &mut AppContext, browser: &mut Browser, page: Option<u32>, output: &Output) {
    match page {
        Some(page) => {
            dispatch(ctx, Action::SetCurrentPage(page));
            browser.route = listing_route(ctx);
        }
        None => output.warn("No more pages in that direction"),
    }
}

async fn open_movie(ctx: &mut AppContext, browser: &mut Browser, id: u64, output: &Output) {
    let spinner = FetchSpinner::start(format!("Loading movie {}...", id), true);
    let result = load_detail(ctx.catalog.as_ref(), id).await;
    spinner.finish();

    match result {
        Ok(detail) => {
            print_detail(ctx, &detail, output);
            browser.route = Route::Detail { id };
            browser.open_detail = Some(detail);
        }
        Err(e) => {
            tracing::error!(movie_id = id, "Error fetching movie details: {}", e);
            output.error(format!("Error fetching movie details: {}", e));
        }
    }
}

async fn add_movie(ctx: &mut AppContext, browser: &Browser, id: u64, output: &Output) {
    if ctx.session.state().in_watchlist(id) {
        output.info(format!("Movie {} is already in your watchlist", id));
        return;
    }

    let known = ctx
        .orchestrator
        .displayed_movies()
        .iter()
        .find(|m| m.id == id)
        .map(WatchlistEntry::from)
        .or_else(|| {
            browser
                .open_detail
                .as_ref()
                .filter(|d| d.id == id)
                .map(WatchlistEntry::from)
        });

    let entry = match known {
        Some(entry) => entry,
        None => match load_detail(ctx.catalog.as_ref(), id).await {
            Ok(detail) => WatchlistEntry::from(&detail),
            Err(e) => {
                output.error(format!("Error fetching movie details: {}", e));
                return;
            }
        },
    };
    add_to_watchlist(&mut ctx.session, entry, &mut ctx.notifier);
}

async fn handle_command(
    ctx: &mut AppContext,
    browser: &mut Browser,
    command: BrowseCommand,
    output: &Output,
) -> Result<Flow> {
    match command {
        BrowseCommand::Search(query) => set_search(ctx, browser, query, output),
        BrowseCommand::Clear => set_search(ctx, browser, String::new(), output),
        BrowseCommand::NextPage => {
            let next = ctx.orchestrator.pagination().next_page();
            change_page(ctx, browser, next, output);
        }
        BrowseCommand::PrevPage => {
            let prev = ctx.orchestrator.pagination().prev_page();
            change_page(ctx, browser, prev, output);
        }
        BrowseCommand::Page(page) => change_page(ctx, browser, Some(page), output),
        BrowseCommand::Open(id) => open_movie(ctx, browser, id, output).await,
        BrowseCommand::Toggle => match &browser.open_detail {
            Some(detail) if matches!(browser.route, Route::Detail { .. }) => {
                toggle_watchlist(&mut ctx.session, detail, &mut ctx.notifier);
            }
            _ => output.warn("Open a movie first with :open ID"),
        },
        BrowseCommand::Add(id) => add_movie(ctx, browser, id, output).await,
        BrowseCommand::Remove(id) => {
            if remove_by_id(ctx, id, output) && browser.route == Route::Watchlist {
                print_watchlist(ctx, output);
            }
        }
        BrowseCommand::Watchlist => {
            browser.route = Route::Watchlist;
            print_watchlist(ctx, output);
        }
        BrowseCommand::Go(route) => match route {
            Route::Listing { search } => {
                let query = search.unwrap_or_default();
                if query != ctx.session.state().search_query {
                    set_search(ctx, browser, query, output);
                } else {
                    browser.route = listing_route(ctx);
                    print_listing(ctx, output);
                }
            }
            Route::Detail { id } => open_movie(ctx, browser, id, output).await,
            Route::Watchlist => {
                browser.route = Route::Watchlist;
                print_watchlist(ctx, output);
            }
        },
        BrowseCommand::Refresh => match &browser.route {
            Route::Listing { .. } => print_listing(ctx, output),
            Route::Detail { .. } => {
                if let Some(detail) = &browser.open_detail {
                    print_detail(ctx, detail, output);
                }
            }
            Route::Watchlist => print_watchlist(ctx, output),
        },
        BrowseCommand::Help => {
            for (usage, description) in HELP {
                output.println(format!("  {:<16} {}", usage.bright_cyan(), description));
            }
        }
        BrowseCommand::Quit => return Ok(Flow::Quit),
        BrowseCommand::Invalid(message) => output.warn(message),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_search() {
        assert_eq!(parse_command("  the matrix \n"), BrowseCommand::Search("the matrix".to_string()));
        assert_eq!(parse_command("   "), BrowseCommand::Refresh);
    }

    #[test]
    fn test_paging_commands() {
        assert_eq!(parse_command(":next"), BrowseCommand::NextPage);
        assert_eq!(parse_command(":more"), BrowseCommand::NextPage);
        assert_eq!(parse_command(":prev"), BrowseCommand::PrevPage);
        assert_eq!(parse_command(":page 4"), BrowseCommand::Page(4));
        assert!(matches!(parse_command(":page 0"), BrowseCommand::Invalid(_)));
        assert!(matches!(parse_command(":page x"), BrowseCommand::Invalid(_)));
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(parse_command(":open 603"), BrowseCommand::Open(603));
        assert_eq!(parse_command(":add 603"), BrowseCommand::Add(603));
        assert_eq!(parse_command(":rm 603"), BrowseCommand::Remove(603));
        assert_eq!(
            parse_command(":open"),
            BrowseCommand::Invalid(":open needs a movie id".to_string())
        );
    }

    #[test]
    fn test_go_parses_locations() {
        assert_eq!(
            parse_command(":go /?search=blade%20runner"),
            BrowseCommand::Go(Route::Listing { search: Some("blade runner".to_string()) })
        );
        assert_eq!(parse_command(":go /movie/42"), BrowseCommand::Go(Route::Detail { id: 42 }));
        assert_eq!(parse_command(":go /watchlist"), BrowseCommand::Go(Route::Watchlist));
        assert!(matches!(parse_command(":go /nowhere"), BrowseCommand::Invalid(_)));
    }

    #[test]
    fn test_quit_and_unknown() {
        assert_eq!(parse_command(":q"), BrowseCommand::Quit);
        assert_eq!(parse_command(":quit"), BrowseCommand::Quit);
        assert!(matches!(parse_command(":frobnicate"), BrowseCommand::Invalid(_)));
    }
}
