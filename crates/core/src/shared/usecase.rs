use feed_digest_infra::DigestContext;
use std::fmt::Debug;
use tracing::error;

/// One unit of work against the digest context. The external scheduler
/// drives the whole system through `CrawlFeedUseCase` and
/// `DispatchDigestsUseCase`, plus the schedule-mutation operations.
#[async_trait::async_trait(?Send)]
pub trait UseCase: Debug {
    type Response;
    type Errors;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors>;
}

#[tracing::instrument(name = "Executing usecase", skip(usecase, ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &DigestContext) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
