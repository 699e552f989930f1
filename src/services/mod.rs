// Service exports
pub mod cache;
pub mod matching;
pub mod memory;
pub mod postgres;
pub mod seed;
pub mod store;

pub use cache::{CacheKey, CachedStore};
pub use matching::{MatchError, MatchService};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use seed::{apply_seed, load_seed, SeedData, SeedError, SeedSummary};
pub use store::{MatchStore, StoreError};
