use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::pages::courses;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let page = courses::detail(&ctx.service, id).await;
    ctx.track_page_view(&format!("/courses/{id}"), "Detail Kursus").await;
    output(&page, flags.format)
}
