pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use deps::{NoopStatisticsService, ServerDeps, StatsAdapter};
pub use traits::{
    BaseCategoryStore, BaseCompilationStore, BaseEventStore, BaseRequestStore,
    BaseStatisticsService, BaseSubscriptionStore, BaseUserStore,
};
