use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::notify::{DescribeOverrides, NotifyOutcome, notify_build};

#[derive(Debug, Clone)]
pub struct NotifyCommandArgs {
    pub build_url: String,
    pub overrides: DescribeOverrides,
    pub dry_run: bool,
}

pub async fn run(ctx: &AppContext, args: NotifyCommandArgs) -> AppResult<NotifyOutcome> {
    notify_build(ctx, &args.build_url, &args.overrides, args.dry_run).await
}
