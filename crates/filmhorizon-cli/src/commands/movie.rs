use super::listing::show_progress;
use super::ui::FetchSpinner;
use crate::output::{Output, OutputFormat};
use crate::render;
use color_eyre::Result;
use filmhorizon_catalog::CatalogError;
use filmhorizon_core::{is_in_watchlist, load_detail, toggle_watchlist, AppContext, Route};
use filmhorizon_models::MovieDetail;

pub async fn run_movie(id: u64, toggle: bool, output: &Output) -> Result<()> {
    let mut ctx = super::load_context(output)?;

    let spinner = FetchSpinner::start(format!("Loading movie {}...", id), show_progress(output));
    let result = load_detail(ctx.catalog.as_ref(), id).await;
    spinner.finish();

    let detail = match result {
        Ok(detail) => detail,
        Err(CatalogError::NotFound(_)) => {
            return Err(color_eyre::eyre::eyre!("No movie with id {}", id));
        }
        Err(e) if e.is_transport() => {
            return Err(color_eyre::eyre::eyre!("Could not reach the movie catalog: {}", e));
        }
        Err(e) => {
            tracing::error!(movie_id = id, "Error fetching movie details: {}", e);
            return Err(color_eyre::eyre::eyre!("Error fetching movie details: {}", e));
        }
    };

    if toggle {
        toggle_watchlist(&mut ctx.session, &detail, &mut ctx.notifier);
    }
    print_detail(&ctx, &detail, output);
    super::show_notifications(&mut ctx, output);
    Ok(())
}

pub(crate) fn print_detail(ctx: &AppContext, detail: &MovieDetail, output: &Output) {
    let saved = is_in_watchlist(ctx.session.state(), detail.id);
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            let route = Route::Detail { id: detail.id };
            println!("\n{}", render::title_bar(ctx.session.state(), &route));
            println!("{}", render::detail_table(detail, &ctx.images, saved));
            if !detail.top_billed_cast(render::TOP_CAST).is_empty() {
                println!("{}", render::cast_table(detail, &ctx.images));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&render::detail_json(detail, &ctx.images, saved));
        }
    }
}
