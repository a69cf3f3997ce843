pub mod frequency_buckets;
pub mod slot_arena;

pub use frequency_buckets::FrequencyBuckets;
pub use slot_arena::{SlotArena, SlotId};
