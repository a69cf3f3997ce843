pub use crate::ds::{FrequencyBuckets, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
pub use crate::listener::{CacheListener, FileListener, MemoryListener, NoopListener};
pub use crate::metrics::{LfuStats, LfuStatsSnapshot};
pub use crate::policy::{ConcurrentLfuCache, LfuCache};
pub use crate::service::LfuCacheService;
pub use crate::traits::{CacheService, CoreCache, MutableCache};
