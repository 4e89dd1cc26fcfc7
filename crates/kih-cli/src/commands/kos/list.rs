use kih_core::filter::KosCriteria;
use kih_core::enums::{GenderPreference, KosType};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::kos::KosListArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::kos;
use crate::progress::Progress;

pub async fn run(args: &KosListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let criteria = criteria_from_args(args)?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let spinner = Progress::spinner("Memuat data kos & homestay...");
    let page = kos::list(&ctx.service, &criteria, limit).await;
    spinner.finish_clear();
    ctx.track_page_view("/kos-homestay", "Kos & Homestay").await;

    if args.options {
        output(&page, flags.format)
    } else {
        output(&page.listing, flags.format)
    }
}

/// Enum flags are checked up front so a typo is an error, not an empty list.
fn criteria_from_args(args: &KosListArgs) -> anyhow::Result<KosCriteria> {
    if let Some(kind) = active(args.kind.as_deref()) {
        parse_enum::<KosType>(kind, "type")?;
    }
    if let Some(gender) = active(args.gender.as_deref()) {
        parse_enum::<GenderPreference>(gender, "gender")?;
    }

    let kind = args.kind.as_deref().map(str::to_ascii_lowercase);
    let gender = args.gender.as_deref().map(str::to_ascii_lowercase);
    let verified = if args.verified { "true" } else { "" };

    let mut pairs = vec![
        ("search", args.search.as_deref().unwrap_or_default()),
        ("type", kind.as_deref().unwrap_or_default()),
        ("gender", gender.as_deref().unwrap_or_default()),
        ("minPrice", args.min_price.as_deref().unwrap_or_default()),
        ("maxPrice", args.max_price.as_deref().unwrap_or_default()),
        ("price", args.price.as_deref().unwrap_or_default()),
        ("verified", verified),
    ];
    pairs.extend(args.facility.iter().map(|f| ("facility", f.as_str())));
    Ok(KosCriteria::from_pairs(pairs))
}

fn active(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != kih_core::filter::ALL)
}
