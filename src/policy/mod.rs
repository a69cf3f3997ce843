pub mod lfu;

pub use lfu::{ConcurrentLfuCache, LfuCache};
