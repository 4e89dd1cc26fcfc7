use kih_core::enums::LocationCategory;
use kih_core::filter::LocationCriteria;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LocationCommands;
use crate::cli::subcommands::location::LocationListArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::locations;

/// Handle `kih locations`.
pub async fn handle(
    action: &LocationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LocationCommands::List(args) => list(args, ctx, flags).await,
    }
}

async fn list(
    args: &LocationListArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let criteria = criteria_from_args(args)?;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);

    let page = locations::page(&ctx.service, &criteria, limit).await;
    ctx.track_page_view("/locations", "Lokasi Penting").await;
    output(&page, flags.format)
}

fn criteria_from_args(args: &LocationListArgs) -> anyhow::Result<LocationCriteria> {
    let category = match args.category.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() && !raw.eq_ignore_ascii_case(kih_core::filter::ALL) => {
            Some(parse_enum::<LocationCategory>(raw, "category")?)
        }
        _ => None,
    };

    Ok(LocationCriteria::from_pairs([
        ("search", args.search.as_deref().unwrap_or_default()),
        ("category", category.map_or("", LocationCategory::as_str)),
    ]))
}

#[cfg(test)]
mod tests {
    use kih_core::filter::Criteria;

    use super::*;

    #[test]
    fn unknown_category_is_an_error() {
        let args = LocationListArgs {
            search: None,
            category: Some("museum".into()),
        };
        let err = criteria_from_args(&args).unwrap_err();
        assert!(err.to_string().contains("invalid category 'museum'"));
    }

    #[test]
    fn all_and_blank_mean_no_filter() {
        for category in [None, Some(String::new()), Some("all".to_string())] {
            let args = LocationListArgs {
                search: None,
                category,
            };
            assert!(criteria_from_args(&args).unwrap().is_inactive());
        }
    }

    #[test]
    fn known_category_is_active() {
        let args = LocationListArgs {
            search: None,
            category: Some("bank".into()),
        };
        assert!(!criteria_from_args(&args).unwrap().is_inactive());
    }
}
