pub(crate) mod seed_repositories;

pub use seed_repositories::{SeedRepositoriesInterface, DEFAULT_REPOSITORIES};

#[cfg(any(test, feature = "testkit"))]
pub use self::seed_repositories::MockSeedRepositoriesInterface;
