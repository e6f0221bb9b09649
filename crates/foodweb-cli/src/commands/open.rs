//! Route a path through the client router

use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::FoodwebResult;

/// Navigate as the browser client would and print where it lands
pub fn open(ctx: &FoodwebContext, console: &CliConsole, path: &str) -> FoodwebResult<()> {
    let outcome = ctx.router().navigate(path)?;

    console.print_header(&outcome.route.full_path);
    console.field("route", &outcome.route.name);
    if let Some(title) = &outcome.title {
        console.field("title", title);
    }
    for (name, value) in &outcome.route.params {
        console.field(name, value);
    }
    if outcome.was_redirected() {
        console.field("requested", &outcome.requested);
        console.field("redirects", outcome.redirects.join(" -> "));
    }

    let tabs = ctx.tabs().visited_views();
    if !tabs.is_empty() {
        console.field(
            "tabs",
            tabs.iter()
                .map(|t| t.title.as_str())
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    Ok(())
}
