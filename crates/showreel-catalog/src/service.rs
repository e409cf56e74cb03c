use crate::content::{Content, PlayOutcome};
use crate::error::CatalogError;
use crate::plan::Plan;
use crate::user::User;
use crate::{ContentId, PlanId, UserId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Root owner of the catalog: id-keyed registries for plans, users, and
/// content, plus the cumulative play tally.
///
/// Registration order of content is remembered and used as the deterministic
/// tie-break for every analytics sort (see `analytics`).
#[derive(Debug, Default)]
pub struct CatalogService {
    plans: HashMap<PlanId, Plan>,
    users: HashMap<UserId, User>,
    content: HashMap<ContentId, Content>,
    content_order: Vec<ContentId>,
    play_counts: HashMap<ContentId, u64>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-adding an id overwrites the previous entry (last write wins).
    pub fn add_plan(&mut self, plan: Plan) {
        debug!(plan = plan.id(), name = plan.name(), "registering plan");
        self.plans.insert(plan.id(), plan);
    }

    /// Re-adding an id overwrites the previous entry (last write wins).
    pub fn add_user(&mut self, user: User) {
        debug!(user = user.id(), "registering user");
        self.users.insert(user.id(), user);
    }

    /// Re-adding an id overwrites the previous entry but keeps the original
    /// registration position for analytics ordering.
    pub fn add_content(&mut self, content: Content) {
        debug!(content = content.id(), title = content.title(), "registering content");
        if !self.content_order.contains(&content.id()) {
            self.content_order.push(content.id());
        }
        self.content.insert(content.id(), content);
    }

    pub fn plan(&self, id: PlanId) -> Option<&Plan> {
        self.plans.get(&id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn content(&self, id: ContentId) -> Option<&Content> {
        self.content.get(&id)
    }

    /// Content ids in registration order.
    pub fn content_order(&self) -> &[ContentId] {
        &self.content_order
    }

    /// Service-mediated plays recorded for this content id.
    pub fn play_count(&self, id: ContentId) -> u64 {
        self.play_counts.get(&id).copied().unwrap_or(0)
    }

    pub(crate) fn plans_iter(&self) -> impl Iterator<Item = &Plan> {
        self.plans.values()
    }

    pub(crate) fn users_iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Puts the user on `plan`. Rejects resubscribing to the plan the user is
    /// already on; does not look at the active flag (unlike `change_plan` —
    /// the asymmetry is part of the contract).
    pub fn subscribe(&mut self, user_id: UserId, plan_id: PlanId) -> Result<(), CatalogError> {
        if !self.plans.contains_key(&plan_id) {
            return Err(CatalogError::PlanNotFound(plan_id));
        }
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?;
        if user.plan() == Some(plan_id) {
            return Err(CatalogError::AlreadySubscribed {
                user: user_id,
                plan: plan_id,
            });
        }
        user.set_plan(Some(plan_id));
        info!(user = user_id, plan = plan_id, "subscribed");
        Ok(())
    }

    /// Overwrites the active plan unconditionally, including with the plan
    /// the user is already on, but only for active accounts.
    pub fn change_plan(&mut self, user_id: UserId, plan_id: PlanId) -> Result<(), CatalogError> {
        if !self.plans.contains_key(&plan_id) {
            return Err(CatalogError::PlanNotFound(plan_id));
        }
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?;
        if !user.is_active() {
            return Err(CatalogError::InactiveAccount(user_id));
        }
        user.set_plan(Some(plan_id));
        info!(user = user_id, plan = plan_id, "plan changed");
        Ok(())
    }

    pub fn activate_user(&mut self, user_id: UserId) -> Result<(), CatalogError> {
        self.users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?
            .activate();
        Ok(())
    }

    pub fn deactivate_user(&mut self, user_id: UserId) -> Result<(), CatalogError> {
        self.users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?
            .deactivate();
        Ok(())
    }

    pub fn add_to_watchlist(
        &mut self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<(), CatalogError> {
        if !self.content.contains_key(&content_id) {
            return Err(CatalogError::ContentNotFound(content_id));
        }
        self.users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?
            .add_to_watchlist(content_id);
        Ok(())
    }

    pub fn remove_from_watchlist(
        &mut self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<(), CatalogError> {
        self.users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?
            .remove_from_watchlist(content_id);
        Ok(())
    }

    /// Submits a rating for a content item through the registry.
    pub fn rate_content(
        &mut self,
        content_id: ContentId,
        value: f64,
    ) -> Result<f64, CatalogError> {
        self.content
            .get_mut(&content_id)
            .ok_or(CatalogError::ContentNotFound(content_id))?
            .rate(value)
    }

    /// Plays `content_id` for `user_id` via the item's own play behavior
    /// (movie as one unit, series resuming from the user's progress), then
    /// bumps the play tally. This is the only place the tally moves;
    /// explicit-episode plays via [`play_episode`](Self::play_episode) do
    /// not count.
    pub fn play_content(
        &mut self,
        user_id: UserId,
        content_id: ContentId,
    ) -> Result<PlayOutcome, CatalogError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?;
        let content = self
            .content
            .get_mut(&content_id)
            .ok_or(CatalogError::ContentNotFound(content_id))?;

        let outcome = content.play(user)?;
        *self.play_counts.entry(content_id).or_insert(0) += 1;
        info!(user = user_id, content = content_id, ?outcome, "played");
        Ok(outcome)
    }

    /// Explicit-episode play, bypassing resume logic. Deliberately does not
    /// touch the play tally: the tally counts [`play_content`](Self::play_content)
    /// calls only.
    pub fn play_episode(
        &mut self,
        user_id: UserId,
        content_id: ContentId,
        episode: u32,
    ) -> Result<PlayOutcome, CatalogError> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or(CatalogError::UserNotFound(user_id))?;
        let content = self
            .content
            .get_mut(&content_id)
            .ok_or(CatalogError::ContentNotFound(content_id))?;
        content.play_episode(user, episode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Quality;

    fn service_with_alice() -> CatalogService {
        let mut service = CatalogService::new();
        service.add_plan(Plan::new(1, "Premium", 799.0, 4, Quality::UltraHd).unwrap());
        service.add_plan(Plan::new(2, "Basic", 199.0, 1, Quality::Sd).unwrap());
        service.add_user(User::new(1, "Alice", "alice@example.com"));
        service
    }

    #[test]
    fn test_subscribe_rejects_same_plan_twice() {
        let mut service = service_with_alice();
        service.subscribe(1, 1).unwrap();
        let err = service.subscribe(1, 1).unwrap_err();
        assert_eq!(err, CatalogError::AlreadySubscribed { user: 1, plan: 1 });
        assert_eq!(service.user(1).unwrap().plan(), Some(1));
    }

    #[test]
    fn test_subscribe_ignores_active_flag() {
        let mut service = service_with_alice();
        service.deactivate_user(1).unwrap();
        service.subscribe(1, 1).unwrap();
        assert_eq!(service.user(1).unwrap().plan(), Some(1));
    }

    #[test]
    fn test_change_plan_allows_same_plan_but_requires_active() {
        let mut service = service_with_alice();
        service.subscribe(1, 1).unwrap();

        // No "already on this plan" guard here.
        service.change_plan(1, 1).unwrap();
        service.change_plan(1, 2).unwrap();
        assert_eq!(service.user(1).unwrap().plan(), Some(2));

        service.deactivate_user(1).unwrap();
        let err = service.change_plan(1, 1).unwrap_err();
        assert_eq!(err, CatalogError::InactiveAccount(1));
        assert_eq!(service.user(1).unwrap().plan(), Some(2));
    }

    #[test]
    fn test_subscribe_unknown_ids() {
        let mut service = service_with_alice();
        assert_eq!(service.subscribe(1, 99), Err(CatalogError::PlanNotFound(99)));
        assert_eq!(service.subscribe(99, 1), Err(CatalogError::UserNotFound(99)));
    }

    #[test]
    fn test_play_content_counts_per_call() {
        let mut service = service_with_alice();
        let movie = Content::movie(10, "Night Train", "Thriller", 2019, 112, "R. Iyer", false);
        service.add_content(movie);

        service.play_content(1, 10).unwrap();
        service.play_content(1, 10).unwrap();
        assert_eq!(service.play_count(10), 2);
        assert_eq!(service.user(1).unwrap().history().len(), 2);
    }

    #[test]
    fn test_direct_episode_play_bypasses_tally() {
        let mut service = service_with_alice();
        let series =
            Content::series(20, "Mystery Mansion", "Mystery", 2021, 8, 42, "L. Okafor").unwrap();
        service.add_content(series);

        service.play_content(1, 20).unwrap();
        assert_eq!(service.play_count(20), 1);

        // Explicit-episode play: progress and history move, the tally does not.
        service.play_episode(1, 20, 3).unwrap();

        assert_eq!(service.play_count(20), 1);
        assert_eq!(service.content(20).unwrap().last_watched_episode(1), Some(3));
        assert_eq!(service.user(1).unwrap().history().len(), 2);
    }

    #[test]
    fn test_play_content_unknown_ids_are_noops() {
        let mut service = service_with_alice();
        assert_eq!(
            service.play_content(1, 77),
            Err(CatalogError::ContentNotFound(77))
        );
        assert_eq!(
            service.play_content(77, 1),
            Err(CatalogError::UserNotFound(77))
        );
        assert!(service.user(1).unwrap().history().is_empty());
    }

    #[test]
    fn test_add_content_overwrite_keeps_registration_order() {
        let mut service = CatalogService::new();
        service.add_content(Content::movie(1, "First", "Drama", 2001, 90, "A", false));
        service.add_content(Content::movie(2, "Second", "Drama", 2002, 90, "B", false));
        service.add_content(Content::movie(1, "First, revised", "Drama", 2001, 95, "A", true));

        assert_eq!(service.content_order(), &[1, 2]);
        assert_eq!(service.content(1).unwrap().title(), "First, revised");
    }

    #[test]
    fn test_watchlist_requires_known_content() {
        let mut service = service_with_alice();
        assert_eq!(
            service.add_to_watchlist(1, 42),
            Err(CatalogError::ContentNotFound(42))
        );
        service.add_content(Content::movie(42, "Found", "Drama", 2010, 100, "C", false));
        service.add_to_watchlist(1, 42).unwrap();
        assert_eq!(service.user(1).unwrap().watchlist(), &[42]);
    }

    #[test]
    fn test_end_to_end_resume_then_direct_episode() {
        let mut service = service_with_alice();
        let series =
            Content::series(30, "Mystery Mansion", "Mystery", 2021, 8, 42, "L. Okafor").unwrap();
        service.add_content(series);

        service.subscribe(1, 1).unwrap();
        service.play_content(1, 30).unwrap();
        assert_eq!(service.content(30).unwrap().last_watched_episode(1), Some(1));
        assert_eq!(service.user(1).unwrap().history().len(), 1);
        assert_eq!(service.play_count(30), 1);

        service.play_episode(1, 30, 3).unwrap();

        assert_eq!(service.content(30).unwrap().last_watched_episode(1), Some(3));
        assert_eq!(service.user(1).unwrap().history().len(), 2);
        assert_eq!(service.play_count(30), 1);
    }
}
