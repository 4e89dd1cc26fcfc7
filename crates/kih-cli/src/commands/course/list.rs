use kih_core::filter::CourseCriteria;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::course::CourseListArgs;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::courses;
use crate::progress::Progress;

pub async fn run(
    args: &CourseListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let criteria = criteria_from_args(args);
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let spinner = Progress::spinner("Memuat data kursus...");
    let page = courses::list(&ctx.service, &criteria, limit).await;
    spinner.finish_clear();
    ctx.track_page_view("/courses", "Kursus").await;

    if args.options {
        output(&page, flags.format)
    } else {
        output(&page.listing, flags.format)
    }
}

/// Same parsing rules as the page's query string.
fn criteria_from_args(args: &CourseListArgs) -> CourseCriteria {
    let verified = if args.verified { "true" } else { "" };
    CourseCriteria::from_pairs([
        ("search", args.search.as_deref().unwrap_or_default()),
        ("program", args.program.as_deref().unwrap_or_default()),
        ("priceRange", args.price_range.as_deref().unwrap_or_default()),
        ("verified", verified),
    ])
}
