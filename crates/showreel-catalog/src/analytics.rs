//! Read-only queries over the catalog: top-watched, per-plan revenue, and
//! personalized recommendations. Nothing in here mutates service state.
//!
//! All sorts are stable over content registration order, so equal play
//! counts and equal ratings come back in the order the content was added.

use crate::content::Content;
use crate::error::CatalogError;
use crate::service::CatalogService;
use crate::{ContentId, UserId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

const RECOMMEND_CAP: usize = 5;
const FILTERED_RECOMMEND_CAP: usize = 10;

impl CatalogService {
    /// Up to `n` content items, most-played first. Only items with at least
    /// one service-mediated play appear.
    pub fn top_watched(&self, n: usize) -> Vec<&Content> {
        let mut played: Vec<(&Content, u64)> = self
            .content_order()
            .iter()
            .filter_map(|id| {
                let count = self.play_count(*id);
                if count == 0 {
                    return None;
                }
                self.content(*id).map(|content| (content, count))
            })
            .collect();

        played.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
        played.truncate(n);
        played.into_iter().map(|(content, _)| content).collect()
    }

    /// Monthly revenue per plan name: each subscribed user contributes their
    /// plan's monthly price. Plans with no subscribers are absent from the
    /// result, not present with zero.
    pub fn plan_wise_revenue(&self) -> HashMap<String, f64> {
        let prices: HashMap<_, _> = self
            .plans_iter()
            .map(|plan| (plan.id(), (plan.name().to_string(), plan.monthly_price())))
            .collect();

        let mut revenue: HashMap<String, f64> = HashMap::new();
        for user in self.users_iter() {
            let Some(plan_id) = user.plan() else { continue };
            // A user's plan id always points at a registered plan; skip
            // silently if a registry overwrite ever broke that.
            let Some((name, price)) = prices.get(&plan_id) else { continue };
            *revenue.entry(name.clone()).or_insert(0.0) += price;
        }
        revenue
    }

    /// Top-rated catalog items the user has not watched yet, capped at 5.
    pub fn recommend(&self, user_id: UserId) -> Result<Vec<&Content>, CatalogError> {
        self.recommend_where(user_id, RECOMMEND_CAP, |_| true)
    }

    /// Like [`recommend`](Self::recommend), restricted to one genre
    /// (case-insensitive exact match), capped at 5.
    pub fn recommend_by_genre(
        &self,
        user_id: UserId,
        genre: &str,
    ) -> Result<Vec<&Content>, CatalogError> {
        self.recommend_where(user_id, RECOMMEND_CAP, |content| {
            content.genre().eq_ignore_ascii_case(genre)
        })
    }

    /// Like [`recommend`](Self::recommend), restricted to items released in
    /// `min_year` or later with an average rating of at least `min_rating`,
    /// capped at 10.
    pub fn recommend_by_year_and_rating(
        &self,
        user_id: UserId,
        min_year: u32,
        min_rating: f64,
    ) -> Result<Vec<&Content>, CatalogError> {
        self.recommend_where(user_id, FILTERED_RECOMMEND_CAP, |content| {
            content.year() >= min_year && content.rating() >= min_rating
        })
    }

    fn recommend_where(
        &self,
        user_id: UserId,
        cap: usize,
        keep: impl Fn(&Content) -> bool,
    ) -> Result<Vec<&Content>, CatalogError> {
        let user = self
            .user(user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?;
        let watched: HashSet<ContentId> =
            user.history().iter().map(|event| event.content_id).collect();

        let mut candidates: Vec<&Content> = self
            .content_order()
            .iter()
            .copied()
            .filter(|id| !watched.contains(id))
            .filter_map(|id| self.content(id))
            .filter(|content| keep(content))
            .collect();

        candidates.sort_by(|a, b| b.rating().total_cmp(&a.rating()));
        candidates.truncate(cap);
        debug!(
            user = user_id,
            watched = watched.len(),
            returned = candidates.len(),
            "recommendations computed"
        );
        Ok(candidates)
    }
}
