use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use showreel_catalog::{CatalogService, Content, ContentId, Plan, PlanId, Quality, User, UserId};
use std::path::Path;
use tracing::{debug, info};

/// Declarative catalog seed: the plans, users, and content a service starts
/// with. Loaded from TOML and materialized through the validated model
/// constructors, so a malformed seed fails loudly instead of producing a
/// half-built catalog.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub plans: Vec<PlanSeed>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub content: Vec<ContentSeed>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanSeed {
    pub id: PlanId,
    pub name: String,
    pub monthly_price: f64,
    pub screen_limit: u32,
    pub quality: Quality,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserSeed {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Plan the user starts subscribed to, if any.
    #[serde(default)]
    pub plan: Option<PlanId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentSeed {
    pub id: ContentId,
    pub title: String,
    pub genre: String,
    pub year: u32,
    /// Optional initial rating, folded in as a first submission.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub kind: ContentKindSeed,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentKindSeed {
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
    },
}

fn default_true() -> bool {
    true
}

impl SeedCatalog {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog seed from {}", path.display()))?;
        let seed: SeedCatalog = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse catalog seed at {}", path.display()))?;
        debug!(
            plans = seed.plans.len(),
            users = seed.users.len(),
            content = seed.content.len(),
            "loaded catalog seed"
        );
        Ok(seed)
    }

    /// Builds a populated service: plans first, then users, then content
    /// (with initial ratings), then the users' starting subscriptions.
    pub fn build_service(&self) -> Result<CatalogService> {
        let mut service = CatalogService::new();

        for plan in &self.plans {
            let plan = Plan::new(
                plan.id,
                &plan.name,
                plan.monthly_price,
                plan.screen_limit,
                plan.quality,
            )
            .with_context(|| format!("Invalid plan '{}' in seed", plan.name))?;
            service.add_plan(plan);
        }

        for user in &self.users {
            let mut account = User::new(user.id, &user.name, &user.email);
            if !user.active {
                account.deactivate();
            }
            service.add_user(account);
        }

        for item in &self.content {
            let mut content = match &item.kind {
                ContentKindSeed::Movie {
                    duration_minutes,
                    director,
                    exclusive,
                } => Content::movie(
                    item.id,
                    &item.title,
                    &item.genre,
                    item.year,
                    *duration_minutes,
                    director,
                    *exclusive,
                ),
                ContentKindSeed::Series {
                    episodes,
                    avg_episode_minutes,
                    showrunner,
                } => Content::series(
                    item.id,
                    &item.title,
                    &item.genre,
                    item.year,
                    *episodes,
                    *avg_episode_minutes,
                    showrunner,
                )
                .with_context(|| format!("Invalid series '{}' in seed", item.title))?,
            };
            if let Some(rating) = item.rating {
                content
                    .rate(rating)
                    .with_context(|| format!("Invalid rating for '{}' in seed", item.title))?;
            }
            service.add_content(content);
        }

        for user in &self.users {
            if let Some(plan_id) = user.plan {
                service
                    .subscribe(user.id, plan_id)
                    .with_context(|| format!("Invalid subscription for '{}' in seed", user.name))?;
            }
        }

        info!(
            plans = self.plans.len(),
            users = self.users.len(),
            content = self.content.len(),
            "catalog seeded"
        );
        Ok(service)
    }
}
