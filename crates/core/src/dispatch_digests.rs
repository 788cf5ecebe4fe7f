use crate::schedule::{compute_digest_next, resolve_schedule};
use crate::shared::usecase::UseCase;
use chrono::{DateTime, Utc};
use feed_digest_domain::{
    DayMask, DigestPayload, DigestSection, Feed, FeedItem, TimeOfDay, ID,
};
use feed_digest_infra::{DeliveryError, DigestContext};
use thiserror::Error;

/// The per-user dispatch cycle: collect the pending items of every due
/// feed, group them into one combined payload or one payload per feed,
/// hand them to the mail transport and clear what was confirmed
/// delivered. Triggered per user by the external scheduler at or after
/// the user's `digest_next`.
#[derive(Debug)]
pub struct DispatchDigestsUseCase {
    pub user_id: ID,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub payloads_sent: usize,
    pub items_delivered: usize,
}

#[derive(Debug, Error)]
pub enum DispatchDigestsError {
    #[error("user {0} was not found")]
    UserNotFound(ID),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

struct DueFeed {
    feed: Feed,
    items: Vec<FeedItem>,
    days: DayMask,
    time: TimeOfDay,
}

fn section_for(due: &DueFeed) -> DigestSection {
    DigestSection {
        feed_id: due.feed.id.clone(),
        feed_title: due.feed.title.clone(),
        feed_link: due.feed.link_web.clone(),
        items: due.items.clone(),
    }
}

/// A feed is due when its effective schedule is instant (it has
/// pending items, that is enough) or its precomputed fire time has
/// been reached. A batched feed that was never scheduled gets a fire
/// time now and waits for it.
async fn collect_due_feeds(
    user_id: &ID,
    now: DateTime<Utc>,
    ctx: &DigestContext,
) -> anyhow::Result<Vec<DueFeed>> {
    let mut due = Vec::new();
    for mut feed in ctx.repos.feeds.find_by_user(user_id).await {
        let items = ctx.repos.feed_items.find_by_feed(&feed.id).await;
        if items.is_empty() {
            continue;
        }
        let (days, time) = resolve_schedule(&mut feed, ctx).await?;
        let is_due = if days.is_instant() {
            true
        } else {
            match feed.digest_next {
                Some(next) => now >= next,
                None => {
                    feed.digest_next = compute_digest_next(days, time, now);
                    ctx.repos.feeds.save(&feed).await?;
                    false
                }
            }
        };
        if is_due {
            due.push(DueFeed {
                feed,
                items,
                days,
                time,
            });
        }
    }
    Ok(due)
}

/// Confirmed delivery for one feed: clear exactly the items that were
/// in the confirmed payload, advance the feed's clock with `now` as
/// the new baseline and count the email. Items queued by a crawl while
/// the send was in flight are not part of the snapshot and stay
/// pending for the next digest. Returns how many items the digest
/// carried.
async fn finalize_delivered(
    due: &mut DueFeed,
    now: DateTime<Utc>,
    ctx: &DigestContext,
) -> anyhow::Result<usize> {
    let item_ids: Vec<ID> = due.items.iter().map(|i| i.id.clone()).collect();
    let cleared = ctx.repos.feed_items.delete_many(&item_ids).await;
    due.feed.emails_sent += 1;
    due.feed.digest_next = compute_digest_next(due.days, due.time, now);
    due.feed.state = due.feed.state.on_dispatch_success();
    ctx.repos.feeds.save(&due.feed).await?;
    Ok(cleared.len())
}

async fn revert_in_flight(due: &mut DueFeed, ctx: &DigestContext) -> anyhow::Result<()> {
    due.feed.state = due.feed.state.on_dispatch_failure();
    ctx.repos.feeds.save(&due.feed).await
}

async fn send_with_timeout(
    email: &str,
    payload: &DigestPayload,
    ctx: &DigestContext,
) -> Result<(), DeliveryError> {
    match tokio::time::timeout(ctx.config.send_timeout, ctx.mail_transport.send(email, payload))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout {
            email: email.to_string(),
        }),
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchDigestsUseCase {
    type Response = DispatchReport;

    type Errors = DispatchDigestsError;

    async fn execute(&mut self, ctx: &DigestContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now();
        let mut user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or_else(|| DispatchDigestsError::UserNotFound(self.user_id.clone()))?;

        let mut due = collect_due_feeds(&user.id, now, ctx).await?;
        if due.is_empty() {
            return Ok(Default::default());
        }

        for due_feed in due.iter_mut() {
            due_feed.feed.state = due_feed.feed.state.on_dispatch_start();
            ctx.repos.feeds.save(&due_feed.feed).await?;
        }

        let mut report = DispatchReport::default();
        // One failing payload must not block the rest of the cycle;
        // the first failure is surfaced after every payload was tried.
        let mut first_failure: Option<DeliveryError> = None;

        if user.combined_digest {
            let payload = DigestPayload {
                user_id: user.id.clone(),
                sections: due.iter().map(section_for).collect(),
            };
            match send_with_timeout(&user.email, &payload, ctx).await {
                Ok(()) => {
                    for due_feed in due.iter_mut() {
                        report.items_delivered += finalize_delivered(due_feed, now, ctx).await?;
                    }
                    report.payloads_sent += 1;
                    user.emails_received += 1;
                    user.emails_last = Some(now);
                }
                Err(err) => {
                    for due_feed in due.iter_mut() {
                        revert_in_flight(due_feed, ctx).await?;
                    }
                    first_failure = Some(err);
                }
            }
        } else {
            for due_feed in due.iter_mut() {
                let payload = DigestPayload {
                    user_id: user.id.clone(),
                    sections: vec![section_for(due_feed)],
                };
                match send_with_timeout(&user.email, &payload, ctx).await {
                    Ok(()) => {
                        report.items_delivered += finalize_delivered(due_feed, now, ctx).await?;
                        report.payloads_sent += 1;
                        user.emails_received += 1;
                        user.emails_last = Some(now);
                    }
                    Err(err) => {
                        revert_in_flight(due_feed, ctx).await?;
                        if first_failure.is_none() {
                            first_failure = Some(err);
                        }
                    }
                }
            }
        }

        // Accounts for feeds that were not due this cycle as well as
        // feeds whose delivery just failed.
        user.items_ready = !ctx.repos.feed_items.find_by_user(&user.id).await.is_empty();
        let feeds = ctx.repos.feeds.find_by_user(&user.id).await;
        user.digest_next = feeds.iter().filter_map(|f| f.digest_next).min();
        ctx.repos.users.save(&user).await?;

        match first_failure {
            Some(err) => Err(err.into()),
            None => Ok(report),
        }
    }
}
