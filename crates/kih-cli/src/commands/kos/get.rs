use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::kos;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = kos::detail(&ctx.service, id).await;
    ctx.track_page_view(&format!("/kos-homestay/{id}"), "Detail Kos").await;
    output(&page, flags.format)
}
