pub mod paths;
pub mod seed;

pub use paths::{default_catalog_file, PathManager};
pub use seed::{ContentKindSeed, ContentSeed, PlanSeed, SeedCatalog, UserSeed};
