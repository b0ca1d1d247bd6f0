use crate::output::{Output, OutputFormat};
use crate::render;
use crate::WatchlistCommands;
use color_eyre::Result;
use filmhorizon_core::{remove_from_watchlist, AppContext, Route};

pub async fn run_watchlist(cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let mut ctx = super::load_context(output)?;
    match cmd {
        WatchlistCommands::List => print_watchlist(&ctx, output),
        WatchlistCommands::Remove { id } => {
            remove_by_id(&mut ctx, id, output);
            super::show_notifications(&mut ctx, output);
        }
    }
    Ok(())
}

/// Remove `id` if it is saved; warns otherwise.
pub(crate) fn remove_by_id(ctx: &mut AppContext, id: u64, output: &Output) -> bool {
    let title = ctx
        .session
        .state()
        .watchlist
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.title.clone());

    match title {
        Some(title) => {
            remove_from_watchlist(&mut ctx.session, id, &title, &mut ctx.notifier);
            true
        }
        None => {
            output.warn(format!("Movie {} is not in your watchlist", id));
            false
        }
    }
}

pub(crate) fn print_watchlist(ctx: &AppContext, output: &Output) {
    let entries = &ctx.session.state().watchlist;
    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return;
            }
            println!("\n{}", render::title_bar(ctx.session.state(), &Route::Watchlist));
            if entries.is_empty() {
                output.info("Your watchlist is empty.");
            } else {
                println!("{}", render::watchlist_table(entries, &ctx.images));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&render::watchlist_json(entries, &ctx.images));
        }
    }
}
