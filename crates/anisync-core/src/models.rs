pub mod progress;

pub use anisync_api::ViewingEvent;
pub use progress::{SeasonAggregate, SeriesAggregate};
