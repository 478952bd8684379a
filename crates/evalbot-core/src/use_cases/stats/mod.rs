pub(crate) mod build_statistics;

pub use build_statistics::{BuildStatisticsInterface, Statistics};

#[cfg(any(test, feature = "testkit"))]
pub use self::build_statistics::MockBuildStatisticsInterface;
