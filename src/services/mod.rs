// Service exports
pub mod cache;
pub mod deepseek;
pub mod postgres;
pub mod supabase;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use deepseek::{DeepSeekClient, DeepSeekError, ModerationVerdict};
pub use postgres::{PostgresClient, PostgresError};
pub use supabase::{StoreError, SupabaseClient};
