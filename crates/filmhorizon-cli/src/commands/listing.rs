use super::ui::FetchSpinner;
use crate::output::{Output, OutputFormat};
use crate::render;
use color_eyre::Result;
use filmhorizon_core::{Action, AppContext, Applied, ListingKind, Route};

pub async fn run_popular(page: Option<u32>, output: &Output) -> Result<()> {
    let mut ctx = super::load_context(output)?;
    if let Some(page) = page {
        ctx.session.dispatch(Action::SetCurrentPage(page));
    }
    let page = ctx.session.state().current_page;

    let spinner = FetchSpinner::start(format!("Loading popular movies (page {})...", page), show_progress(output));
    ctx.orchestrator.observe(ctx.session.state());
    let applied = wait_for_listing(&mut ctx, ListingKind::Popular).await;
    spinner.finish();

    if let Applied::Failed { .. } = applied? {
        return Err(color_eyre::eyre::eyre!("Failed to fetch popular movies"));
    }
    print_listing(&ctx, output);
    Ok(())
}

pub async fn run_search(query: String, page: u32, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Search query cannot be empty"));
    }

    let mut ctx = super::load_context(output)?;
    ctx.session.dispatch(Action::SetSearchQuery(query.clone()));
    if page > 1 {
        ctx.session.dispatch(Action::SetCurrentPage(page));
    }
    let page = ctx.session.state().current_page;

    let spinner = FetchSpinner::start(format!("Searching for \"{}\"...", query), show_progress(output));
    ctx.orchestrator.observe(ctx.session.state());
    // One-shot search: nothing else will be typed, so skip the debounce
    ctx.orchestrator.fetch_search_now(&query, page);
    let applied = wait_for_listing(&mut ctx, ListingKind::Search).await;
    spinner.finish();

    if let Applied::Failed { .. } = applied? {
        return Err(color_eyre::eyre::eyre!("Failed to search for \"{}\"", query));
    }
    print_listing(&ctx, output);
    Ok(())
}

pub(crate) fn show_progress(output: &Output) -> bool {
    output.format() == OutputFormat::Human && !output.is_quiet()
}

/// Apply outcomes until one lands in the `kind` listing.
pub(crate) async fn wait_for_listing(ctx: &mut AppContext, kind: ListingKind) -> Result<Applied> {
    while let Some(outcome) = ctx.orchestrator.next_outcome().await {
        let applied = ctx.orchestrator.apply(outcome);
        match applied {
            Applied::Merged { kind: landed, .. } | Applied::Failed { kind: landed } if landed == kind => {
                return Ok(applied);
            }
            _ => continue,
        }
    }
    Err(color_eyre::eyre::eyre!("Catalog request was dropped before it finished"))
}

/// Render the active listing with its title bar and pagination controls.
pub(crate) fn print_listing(ctx: &AppContext, output: &Output) {
    let state = ctx.session.state();
    let kind = ctx.orchestrator.active_kind();
    let movies = ctx.orchestrator.displayed_movies();
    let controls = ctx.orchestrator.pagination();

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            let route = Route::Listing {
                search: state.is_searching().then(|| state.search_query.clone()),
            };
            println!("\n{}", render::title_bar(state, &route));
            println!("{}", render::listing_heading(kind, &state.search_query));
            if movies.is_empty() {
                output.info("No movies found.");
            } else {
                println!("{}", render::movie_table(movies, state, &ctx.images));
            }
            println!("{}", render::pagination_line(&controls));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&render::listing_json(
                kind,
                &state.search_query,
                movies,
                &controls,
                state,
                &ctx.images,
            ));
        }
    }
}
