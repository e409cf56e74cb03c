use crate::error::CatalogError;
use crate::user::User;
use crate::{ContentId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// What a successful play delivered.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The whole feature, in one sitting.
    Movie,
    /// A single episode of a series.
    Episode(u32),
}

/// Variant-specific state. Callers never match on this directly; playback
/// goes through [`Content::play`] / [`Content::play_episode`], which dispatch
/// on the kind internally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum ContentKind {
    Movie {
        duration_minutes: u32,
        director: String,
        #[serde(default)]
        exclusive: bool,
    },
    Series {
        episodes: u32,
        avg_episode_minutes: u32,
        showrunner: String,
        /// Last-watched episode per user. Runtime state, grows as distinct
        /// users play the series; never serialized with the catalog.
        #[serde(skip)]
        progress: HashMap<UserId, u32>,
    },
}

/// A playable catalog item: shared metadata plus a movie or series payload.
///
/// The average rating is a provider-side running mean; individual
/// submissions are not retrievable after they are folded in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    id: ContentId,
    title: String,
    genre: String,
    year: u32,
    rating: f64,
    rating_count: u32,
    #[serde(flatten)]
    kind: ContentKind,
}

impl Content {
    pub fn movie(
        id: ContentId,
        title: impl Into<String>,
        genre: impl Into<String>,
        year: u32,
        duration_minutes: u32,
        director: impl Into<String>,
        exclusive: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            genre: genre.into(),
            year,
            rating: 0.0,
            rating_count: 0,
            kind: ContentKind::Movie {
                duration_minutes,
                director: director.into(),
                exclusive,
            },
        }
    }

    pub fn series(
        id: ContentId,
        title: impl Into<String>,
        genre: impl Into<String>,
        year: u32,
        episodes: u32,
        avg_episode_minutes: u32,
        showrunner: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        if episodes == 0 {
            return Err(CatalogError::InvalidEpisodeCount);
        }
        Ok(Self {
            id,
            title: title.into(),
            genre: genre.into(),
            year,
            rating: 0.0,
            rating_count: 0,
            kind: ContentKind::Series {
                episodes,
                avg_episode_minutes,
                showrunner: showrunner.into(),
                progress: HashMap::new(),
            },
        })
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    /// Running mean of all accepted rating submissions, on a 0-10 scale.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn rating_count(&self) -> u32 {
        self.rating_count
    }

    pub fn is_series(&self) -> bool {
        matches!(self.kind, ContentKind::Series { .. })
    }

    /// Where the given user left off, if they have played this series.
    pub fn last_watched_episode(&self, user_id: UserId) -> Option<u32> {
        match &self.kind {
            ContentKind::Series { progress, .. } => progress.get(&user_id).copied(),
            ContentKind::Movie { .. } => None,
        }
    }

    /// Folds a new submission into the running mean. Values outside the 0-10
    /// scale are rejected and leave the mean and count untouched.
    pub fn rate(&mut self, value: f64) -> Result<f64, CatalogError> {
        if !(0.0..=10.0).contains(&value) {
            warn!(content = self.id, value, "rejecting out-of-scale rating");
            return Err(CatalogError::InvalidRating(value));
        }
        let count = self.rating_count as f64;
        self.rating = (self.rating * count + value) / (count + 1.0);
        self.rating_count += 1;
        debug!(
            content = self.id,
            rating = self.rating,
            count = self.rating_count,
            "rating updated"
        );
        Ok(self.rating)
    }

    /// Plays this item for `user`, dispatching on the variant: a movie plays
    /// as one unit, a series resumes from one past the user's last-watched
    /// episode (episode 1 on first play) and stays on the final episode once
    /// the series is finished.
    pub fn play(&mut self, user: &mut User) -> Result<PlayOutcome, CatalogError> {
        match &self.kind {
            ContentKind::Movie { .. } => {
                user.record_watch(self.id);
                debug!(content = self.id, user = user.id(), "played movie");
                Ok(PlayOutcome::Movie)
            }
            ContentKind::Series { episodes, progress, .. } => {
                let last = progress.get(&user.id()).copied().unwrap_or(0);
                let next = (last + 1).min(*episodes);
                self.play_episode(user, next)
            }
        }
    }

    /// Plays a specific episode, overwriting the user's last-watched marker
    /// even when jumping backwards. Rejects episode numbers outside
    /// `1..=episodes` and anything that is not a series, with no state
    /// change either way.
    pub fn play_episode(
        &mut self,
        user: &mut User,
        episode: u32,
    ) -> Result<PlayOutcome, CatalogError> {
        match &mut self.kind {
            ContentKind::Movie { .. } => Err(CatalogError::NotEpisodic(self.id)),
            ContentKind::Series { episodes, progress, .. } => {
                if episode == 0 || episode > *episodes {
                    warn!(
                        content = self.id,
                        user = user.id(),
                        episode,
                        episodes = *episodes,
                        "rejecting invalid episode"
                    );
                    return Err(CatalogError::InvalidEpisode {
                        episode,
                        episodes: *episodes,
                    });
                }
                progress.insert(user.id(), episode);
                user.record_watch(self.id);
                debug!(content = self.id, user = user.id(), episode, "played episode");
                Ok(PlayOutcome::Episode(episode))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Content {
        Content::movie(1, "Night Train", "Thriller", 2019, 112, "R. Iyer", false)
    }

    fn sample_series(episodes: u32) -> Content {
        Content::series(2, "Mystery Mansion", "Mystery", 2021, episodes, 42, "L. Okafor").unwrap()
    }

    #[test]
    fn test_series_requires_episodes() {
        let err = Content::series(2, "Empty", "Drama", 2020, 0, 30, "N. One").unwrap_err();
        assert_eq!(err, CatalogError::InvalidEpisodeCount);
    }

    #[test]
    fn test_movie_play_records_one_watch() {
        let mut movie = sample_movie();
        let mut user = User::new(1, "Alice", "alice@example.com");
        let outcome = movie.play(&mut user).unwrap();
        assert_eq!(outcome, PlayOutcome::Movie);
        assert_eq!(user.history().len(), 1);
        assert_eq!(user.history()[0].content_id, movie.id());
    }

    #[test]
    fn test_series_resume_visits_episodes_in_order_then_stays_at_last() {
        let mut series = sample_series(3);
        let mut user = User::new(1, "Alice", "alice@example.com");

        for expected in [1, 2, 3, 3, 3] {
            let outcome = series.play(&mut user).unwrap();
            assert_eq!(outcome, PlayOutcome::Episode(expected));
            assert_eq!(series.last_watched_episode(user.id()), Some(expected));
        }
        assert_eq!(user.history().len(), 5);
    }

    #[test]
    fn test_explicit_episode_overwrites_even_backwards() {
        let mut series = sample_series(8);
        let mut user = User::new(1, "Alice", "alice@example.com");
        series.play_episode(&mut user, 5).unwrap();
        series.play_episode(&mut user, 2).unwrap();
        assert_eq!(series.last_watched_episode(user.id()), Some(2));
        // Resume continues from the overwritten marker.
        assert_eq!(series.play(&mut user).unwrap(), PlayOutcome::Episode(3));
    }

    #[test]
    fn test_explicit_episode_out_of_range_is_rejected_without_state_change() {
        let mut series = sample_series(4);
        let mut user = User::new(1, "Alice", "alice@example.com");
        series.play_episode(&mut user, 2).unwrap();

        for bad in [0, 5, 100] {
            let err = series.play_episode(&mut user, bad).unwrap_err();
            assert_eq!(err, CatalogError::InvalidEpisode { episode: bad, episodes: 4 });
        }
        assert_eq!(series.last_watched_episode(user.id()), Some(2));
        assert_eq!(user.history().len(), 1);
    }

    #[test]
    fn test_movie_rejects_explicit_episode() {
        let mut movie = sample_movie();
        let mut user = User::new(1, "Alice", "alice@example.com");
        let err = movie.play_episode(&mut user, 1).unwrap_err();
        assert_eq!(err, CatalogError::NotEpisodic(movie.id()));
        assert!(user.history().is_empty());
    }

    #[test]
    fn test_rating_running_mean() {
        let mut movie = sample_movie();
        movie.rate(8.5).unwrap();
        let mean = movie.rate(9.0).unwrap();
        assert!((mean - 8.75).abs() < 1e-9);
        assert_eq!(movie.rating_count(), 2);
    }

    #[test]
    fn test_rating_out_of_scale_leaves_state_unchanged() {
        let mut movie = sample_movie();
        movie.rate(7.0).unwrap();
        for bad in [-0.1, 10.1, 42.0] {
            assert_eq!(movie.rate(bad).unwrap_err(), CatalogError::InvalidRating(bad));
        }
        assert_eq!(movie.rating(), 7.0);
        assert_eq!(movie.rating_count(), 1);
    }

    #[test]
    fn test_rating_boundaries_accepted() {
        let mut movie = sample_movie();
        movie.rate(0.0).unwrap();
        movie.rate(10.0).unwrap();
        assert_eq!(movie.rating_count(), 2);
        assert!((movie.rating() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_is_tracked_per_user() {
        let mut series = sample_series(6);
        let mut alice = User::new(1, "Alice", "alice@example.com");
        let mut bob = User::new(2, "Bob", "bob@example.com");

        series.play(&mut alice).unwrap();
        series.play(&mut alice).unwrap();
        series.play(&mut bob).unwrap();

        assert_eq!(series.last_watched_episode(alice.id()), Some(2));
        assert_eq!(series.last_watched_episode(bob.id()), Some(1));
        assert_eq!(series.last_watched_episode(99), None);
    }
}
