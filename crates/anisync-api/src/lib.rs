pub mod crunchyroll;
pub mod traits;

pub use traits::{CatalogService, EpisodeMetadata, SeasonMetadata, SeriesMetadata, ViewingEvent};
