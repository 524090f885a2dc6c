// State management module.
// Handles navigation, paging and loading state for each screen.

pub mod detail;
pub mod infinite;
pub mod list;
pub mod loading;
pub mod navigation;
pub mod page_window;
pub mod pagination;

pub use detail::{ImagePreview, PostDetail};
pub use infinite::{INFINITE_STATE_KEY, InfiniteScroll, InfiniteScrollSnapshot, RestorePlan};
pub use list::PostList;
pub use loading::{FeedPhase, LoadingState, PageRequest};
pub use navigation::{BreadcrumbNode, NavigationStack, Route};
pub use page_window::{PageToken, page_window};
pub use pagination::{PAGINATION_STATE_KEY, Pagination};
