use crate::{ContentId, PlanId, UserId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("plan {0} is not registered")]
    PlanNotFound(PlanId),

    #[error("user {0} is not registered")]
    UserNotFound(UserId),

    #[error("content {0} is not registered")]
    ContentNotFound(ContentId),

    #[error("user {user} is already subscribed to plan {plan}")]
    AlreadySubscribed { user: UserId, plan: PlanId },

    #[error("user {0} is inactive and cannot change plans")]
    InactiveAccount(UserId),

    #[error("rating {0} is outside the 0-10 scale")]
    InvalidRating(f64),

    #[error("episode {episode} is outside 1..={episodes}")]
    InvalidEpisode { episode: u32, episodes: u32 },

    #[error("content {0} is not episodic")]
    NotEpisodic(ContentId),

    #[error("monthly price {0} is negative")]
    InvalidPrice(f64),

    #[error("a plan must allow at least one screen")]
    InvalidScreenLimit,

    #[error("a series must have at least one episode")]
    InvalidEpisodeCount,
}
