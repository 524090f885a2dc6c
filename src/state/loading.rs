// Loading state shared by the list and detail screens.
// Sum types for async data plus the request token passed between load steps.

/// Loading state for a single piece of async data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingState<T> {
    /// Not requested yet.
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadingState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Phase of a list screen. Posts live beside the phase so a failed load
/// leaves the previously loaded posts visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl FeedPhase {
    /// The single-flight guard: true while a page fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FeedPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A page fetch that a screen has agreed to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}
