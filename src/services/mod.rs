pub mod backend;
pub mod bootstrap;
pub mod catalog;
pub mod interactions;
pub mod loading;
pub mod review_cache;
pub mod reviews;
pub mod screen_size;
pub mod search;
pub mod session;

pub use backend::{HttpBackend, RecommendationBackend};
pub use bootstrap::{remaining_movies, BootstrapPlan, HomeFeed, RecommendationFlow};
pub use catalog::Catalog;
pub use interactions::InteractionStore;
pub use review_cache::ReviewCache;
pub use reviews::ReviewFlow;
pub use screen_size::{ScreenSize, ScreenSizeObserver, Viewport};
pub use search::{SearchSession, SearchState};
pub use session::{Session, SessionStatus};
