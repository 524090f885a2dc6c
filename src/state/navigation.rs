// Navigation state management.
// Handles the route stack and breadcrumb trail between screens.

/// A node in the navigation breadcrumb trail.
#[derive(Debug, Clone)]
pub struct BreadcrumbNode {
    /// Display label for the breadcrumb.
    pub label: String,
    /// The route this node represents.
    pub route: Route,
}

/// A screen the user can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Menu choosing between the two list styles
    Home,
    /// Posts loaded page after page as the selection reaches the end
    InfiniteScroll,
    /// Posts shown one numbered page at a time
    Pagination,
    /// A single post
    PostDetail { post_id: u64, title: String },
}

impl Route {
    /// Get the display title for this route.
    pub fn title(&self) -> String {
        match self {
            Route::Home => "Lists Demo".to_string(),
            Route::InfiniteScroll => "Infinite Scroll".to_string(),
            Route::Pagination => "Pagination".to_string(),
            Route::PostDetail { title, .. } => title.clone(),
        }
    }

    /// Create a breadcrumb node for this route.
    pub fn to_breadcrumb(&self) -> BreadcrumbNode {
        let label = match self {
            Route::Home => "Home".to_string(),
            Route::PostDetail { post_id, .. } => format!("#{}", post_id),
            other => other.title(),
        };
        BreadcrumbNode {
            label,
            route: self.clone(),
        }
    }
}

/// Navigation stack of routes (bottom = root, top = current).
#[derive(Debug, Clone)]
pub struct NavigationStack {
    stack: Vec<Route>,
}

impl NavigationStack {
    /// Create a new navigation stack starting at the given route.
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    /// Get the current route.
    pub fn current(&self) -> &Route {
        self.stack.last().expect("Stack should never be empty")
    }

    /// Push a new route onto the stack (drill down).
    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pop the current route (go back). Returns false if at root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Check if we can go back (not at root).
    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Get the breadcrumb trail.
    pub fn breadcrumbs(&self) -> Vec<BreadcrumbNode> {
        self.stack.iter().map(Route::to_breadcrumb).collect()
    }

    /// Get the depth of the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
