// App state and main event loop.
// Owns the live screen, routes keyboard input and applies fetch results.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use image::DynamicImage;
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{Post, PostRepository, PostsPage};
use crate::cache::{ImageCache, KeyValueStore};
use crate::error::Result;
use crate::state::{
    InfiniteScroll, NavigationStack, PageRequest, Pagination, PostDetail, RestorePlan, Route,
};
use crate::ui;

/// Dependencies handed to the app at startup.
pub struct Services {
    pub repository: Arc<dyn PostRepository>,
    pub images: Arc<ImageCache>,
    pub store: Arc<dyn KeyValueStore>,
    pub infinite_per_page: u32,
    pub pagination_per_page: u32,
}

/// Identity of one screen instance. A new id is issued every time a screen
/// is entered, so results for a screen that has since been left can be told
/// apart from results for the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenId(u64);

/// Menu entries on the home screen.
pub const HOME_ENTRIES: [Route; 2] = [Route::InfiniteScroll, Route::Pagination];

/// Home screen menu.
#[derive(Debug)]
pub struct HomeMenu {
    pub list_state: ListState,
}

impl HomeMenu {
    fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn selected_route(&self) -> Option<Route> {
        HOME_ENTRIES.get(self.list_state.selected()?).cloned()
    }

    fn select_next(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(HOME_ENTRIES.len() - 1)));
    }

    fn select_prev(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }
}

/// The live screen.
#[derive(Debug)]
pub enum Screen {
    Home(HomeMenu),
    Infinite(InfiniteScroll),
    Pagination(Pagination),
    Detail(PostDetail),
}

/// Results delivered from background tasks to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    PageLoaded {
        screen: ScreenId,
        request: PageRequest,
        result: Result<PostsPage>,
    },
    Restored {
        screen: ScreenId,
        result: Result<Vec<Post>>,
    },
    PostLoaded {
        screen: ScreenId,
        result: Result<Post>,
    },
    ImageLoaded {
        screen: ScreenId,
        url: String,
        result: Result<Arc<DynamicImage>>,
    },
}

impl AppEvent {
    fn screen(&self) -> ScreenId {
        match self {
            AppEvent::PageLoaded { screen, .. }
            | AppEvent::Restored { screen, .. }
            | AppEvent::PostLoaded { screen, .. }
            | AppEvent::ImageLoaded { screen, .. } => *screen,
        }
    }
}

/// Main application state.
pub struct App {
    services: Services,
    /// Route stack for the breadcrumb trail.
    pub nav: NavigationStack,
    /// The screen for the route on top of the stack.
    pub screen: Screen,
    screen_id: ScreenId,
    next_screen_id: u64,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Whether the key help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
}

impl App {
    pub fn new(services: Services) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            services,
            nav: NavigationStack::default(),
            screen: Screen::Home(HomeMenu::new()),
            screen_id: ScreenId(0),
            next_screen_id: 1,
            events_tx,
            events_rx,
            show_help: false,
            should_quit: false,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_terminal_events()?;
            self.drain_events();
        }
        self.save_current();
        Ok(())
    }

    /// Handle keyboard events from the terminal.
    fn handle_terminal_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Apply every background result that has arrived so far.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    /// Wait for the next background result.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.handle_page_input(key) {
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Esc | KeyCode::Backspace => {
                if !self.dismiss_error() {
                    self.go_back();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Enter => self.open_selected(),
            KeyCode::Left | KeyCode::Char('p') => self.change_page(false),
            KeyCode::Right | KeyCode::Char('n') => self.change_page(true),
            KeyCode::Home => self.jump_page(Pagination::first_page),
            KeyCode::End => self.jump_page(Pagination::last_page),
            KeyCode::Char('g') => {
                if let Screen::Pagination(screen) = &mut self.screen {
                    screen.start_page_input();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Screen::Pagination(screen) = &mut self.screen {
                    screen.push_page_digit(c);
                }
            }
            KeyCode::Char('r') => self.retry(),
            _ => {}
        }
    }

    /// Keys for an open go-to-page prompt. Returns false when no prompt is open.
    fn handle_page_input(&mut self, key: KeyEvent) -> bool {
        let Screen::Pagination(screen) = &mut self.screen else {
            return false;
        };
        if screen.page_input().is_none() {
            return false;
        }

        let request = match key.code {
            KeyCode::Enter => screen.submit_page_input(),
            KeyCode::Esc => {
                screen.cancel_page_input();
                None
            }
            KeyCode::Backspace => {
                screen.pop_page_digit();
                None
            }
            KeyCode::Char(c) => {
                screen.push_page_digit(c);
                None
            }
            _ => None,
        };
        if let Some(request) = request {
            self.spawn_page(request);
        }
        true
    }

    /// Push `route` and enter its screen.
    pub fn navigate_to(&mut self, route: Route) {
        self.save_current();
        self.nav.push(route);
        self.enter_current();
    }

    /// Pop the current route. Returns false at the root.
    pub fn go_back(&mut self) -> bool {
        if !self.nav.can_go_back() {
            return false;
        }
        self.save_current();
        self.nav.pop();
        self.enter_current();
        true
    }

    /// Persist paging state of the live list screen.
    fn save_current(&self) {
        let store = self.services.store.as_ref();
        match &self.screen {
            Screen::Infinite(screen) => screen.save(store),
            Screen::Pagination(screen) => screen.save(store),
            _ => {}
        }
    }

    /// Build a fresh screen for the route on top of the stack.
    fn enter_current(&mut self) {
        self.screen_id = ScreenId(self.next_screen_id);
        self.next_screen_id += 1;

        let route = self.nav.current().clone();
        tracing::debug!(?route, screen = self.screen_id.0, "entering screen");

        match route {
            Route::Home => self.screen = Screen::Home(HomeMenu::new()),
            Route::InfiniteScroll => {
                let mut screen = InfiniteScroll::new(self.services.infinite_per_page);
                if let Some(plan) = screen.restore(self.services.store.as_ref()) {
                    self.spawn_restore(plan);
                } else if screen.posts().is_empty() {
                    if let Some(request) = screen.begin_load() {
                        self.spawn_page(request);
                    }
                }
                self.screen = Screen::Infinite(screen);
            }
            Route::Pagination => {
                let mut screen = Pagination::new(self.services.pagination_per_page);
                screen.restore(self.services.store.as_ref());
                if let Some(request) = screen.reload() {
                    self.spawn_page(request);
                }
                self.screen = Screen::Pagination(screen);
            }
            Route::PostDetail { post_id, .. } => {
                self.screen = Screen::Detail(PostDetail::new(post_id));
                self.spawn_post(post_id);
            }
        }
    }

    fn select_prev(&mut self) {
        match &mut self.screen {
            Screen::Home(menu) => menu.select_prev(),
            Screen::Infinite(screen) => screen.list.select_prev(),
            Screen::Pagination(screen) => screen.list.select_prev(),
            Screen::Detail(_) => {}
        }
    }

    fn select_next(&mut self) {
        let request = match &mut self.screen {
            Screen::Home(menu) => {
                menu.select_next();
                None
            }
            Screen::Infinite(screen) => {
                let current = screen.list.select_next().map(|post| post.id);
                current.and_then(|id| screen.load_more_if_needed(id))
            }
            Screen::Pagination(screen) => {
                screen.list.select_next();
                None
            }
            Screen::Detail(_) => None,
        };
        if let Some(request) = request {
            self.spawn_page(request);
        }
    }

    fn open_selected(&mut self) {
        let route = match &self.screen {
            Screen::Home(menu) => menu.selected_route(),
            Screen::Infinite(screen) => screen.list.selected_item().map(detail_route),
            Screen::Pagination(screen) => screen.list.selected_item().map(detail_route),
            Screen::Detail(_) => None,
        };
        if let Some(route) = route {
            self.navigate_to(route);
        }
    }

    fn jump_page(&mut self, jump: fn(&mut Pagination) -> Option<PageRequest>) {
        if let Screen::Pagination(screen) = &mut self.screen {
            if let Some(request) = jump(screen) {
                self.spawn_page(request);
            }
        }
    }

    fn change_page(&mut self, forward: bool) {
        if let Screen::Pagination(screen) = &mut self.screen {
            let request = if forward {
                screen.next_page()
            } else {
                screen.prev_page()
            };
            if let Some(request) = request {
                self.spawn_page(request);
            }
        }
    }

    /// Re-trigger the last load by hand.
    fn retry(&mut self) {
        match &mut self.screen {
            Screen::Home(_) => {}
            Screen::Infinite(screen) => {
                if screen.is_restoring() {
                    if let Some(plan) = screen.retry_restore() {
                        self.spawn_restore(plan);
                    }
                } else if let Some(request) = screen.begin_load() {
                    self.spawn_page(request);
                }
            }
            Screen::Pagination(screen) => {
                if let Some(request) = screen.reload() {
                    self.spawn_page(request);
                }
            }
            Screen::Detail(screen) => {
                if !screen.state.is_loading() {
                    screen.reload();
                    let post_id = screen.post_id();
                    self.spawn_post(post_id);
                }
            }
        }
    }

    /// Hide a visible error. Returns false if there was none.
    fn dismiss_error(&mut self) -> bool {
        match &mut self.screen {
            Screen::Infinite(screen) if screen.error().is_some() => {
                screen.dismiss_error();
                true
            }
            Screen::Pagination(screen) if screen.error().is_some() => {
                screen.dismiss_error();
                true
            }
            _ => false,
        }
    }

    fn spawn_page(&self, request: PageRequest) {
        let repo = Arc::clone(&self.services.repository);
        let tx = self.events_tx.clone();
        let screen = self.screen_id;
        tokio::spawn(async move {
            let result = repo.fetch_posts(request.page, request.per_page).await;
            let _ = tx.send(AppEvent::PageLoaded {
                screen,
                request,
                result,
            });
        });
    }

    fn spawn_restore(&self, plan: RestorePlan) {
        let repo = Arc::clone(&self.services.repository);
        let tx = self.events_tx.clone();
        let screen = self.screen_id;
        tokio::spawn(async move {
            let result = plan.fetch(repo.as_ref()).await;
            let _ = tx.send(AppEvent::Restored { screen, result });
        });
    }

    fn spawn_post(&self, post_id: u64) {
        let repo = Arc::clone(&self.services.repository);
        let tx = self.events_tx.clone();
        let screen = self.screen_id;
        tokio::spawn(async move {
            let result = repo.fetch_post(post_id).await;
            let _ = tx.send(AppEvent::PostLoaded { screen, result });
        });
    }

    fn spawn_image(&self, url: String) {
        let images = Arc::clone(&self.services.images);
        let tx = self.events_tx.clone();
        let screen = self.screen_id;
        tokio::spawn(async move {
            let result = images.get(&url).await;
            let _ = tx.send(AppEvent::ImageLoaded {
                screen,
                url,
                result,
            });
        });
    }

    /// Apply a background result if its screen is still the live one.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        if event.screen() != self.screen_id {
            tracing::debug!(
                screen = event.screen().0,
                live = self.screen_id.0,
                "dropping result for a screen that is gone"
            );
            return;
        }

        let store = Arc::clone(&self.services.store);
        let mut image_url = None;
        let mut follow_up = None;
        match (event, &mut self.screen) {
            (AppEvent::PageLoaded { request, result, .. }, Screen::Infinite(screen)) => {
                if screen.apply_page(request, result) {
                    screen.save(store.as_ref());
                }
            }
            (AppEvent::PageLoaded { request, result, .. }, Screen::Pagination(screen)) => {
                if screen.apply_page(request, result) {
                    screen.save(store.as_ref());
                }
                follow_up = screen.clamp_to_last_page();
            }
            (AppEvent::Restored { result, .. }, Screen::Infinite(screen)) => {
                screen.apply_restored(result);
            }
            (AppEvent::PostLoaded { result, .. }, Screen::Detail(screen)) => {
                screen.apply_post(result);
                if let Some(post) = screen.post() {
                    let url = self.services.repository.image_url(post);
                    if screen.begin_image() {
                        image_url = Some(url);
                    }
                }
            }
            (AppEvent::ImageLoaded { url, result, .. }, Screen::Detail(screen)) => {
                screen.apply_image(url, result);
            }
            (event, _) => {
                tracing::warn!(?event, "result does not match the live screen");
            }
        }

        if let Some(url) = image_url {
            self.spawn_image(url);
        }
        if let Some(request) = follow_up {
            self.spawn_page(request);
        }
    }
}

fn detail_route(post: &Post) -> Route {
    Route::PostDetail {
        post_id: post.id,
        title: post.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use reqwest::Client;
    use tempfile::TempDir;

    use super::*;
    use crate::api::repository::mock::MockPostRepository;
    use crate::cache::MemoryStore;
    use crate::state::{FeedPhase, INFINITE_STATE_KEY, LoadingState, PAGINATION_STATE_KEY};

    struct Harness {
        app: App,
        repo: Arc<MockPostRepository>,
        store: Arc<MemoryStore>,
        _dir: TempDir,
    }

    fn harness(total: u64) -> Harness {
        let dir = TempDir::new().unwrap();
        let repo = Arc::new(MockPostRepository::new(total));
        let store = Arc::new(MemoryStore::new());
        let images = Arc::new(ImageCache::new(dir.path().to_path_buf(), Client::new(), 10));
        let app = App::new(Services {
            repository: repo.clone(),
            images,
            store: store.clone(),
            infinite_per_page: 20,
            pagination_per_page: 10,
        });
        Harness {
            app,
            repo,
            store,
            _dir: dir,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    async fn settle(app: &mut App) {
        let event = app.next_event().await.expect("event channel closed");
        app.handle_app_event(event);
    }

    fn infinite(app: &App) -> &InfiniteScroll {
        match &app.screen {
            Screen::Infinite(screen) => screen,
            other => panic!("expected infinite scroll, got {:?}", other),
        }
    }

    fn pagination(app: &App) -> &Pagination {
        match &app.screen {
            Screen::Pagination(screen) => screen,
            other => panic!("expected pagination, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_home_menu_opens_pagination() {
        let mut h = harness(100);
        press(&mut h.app, KeyCode::Down);
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.nav.current(), &Route::Pagination);
        assert!(pagination(&h.app).is_loading());

        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).posts().len(), 10);

        press(&mut h.app, KeyCode::Right);
        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).current_page(), 2);
        assert_eq!(pagination(&h.app).posts()[0].id, 11);
        assert_eq!(h.store.get(PAGINATION_STATE_KEY).as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_infinite_scroll_loads_at_end_of_list() {
        let mut h = harness(100);
        h.app.navigate_to(Route::InfiniteScroll);
        settle(&mut h.app).await;
        assert_eq!(infinite(&h.app).posts().len(), 20);

        // Selection starts on the first post; walk to the last one.
        for _ in 0..19 {
            press(&mut h.app, KeyCode::Down);
        }
        assert!(infinite(&h.app).is_loading());

        // Further movement while loading does not start another fetch.
        press(&mut h.app, KeyCode::Down);
        settle(&mut h.app).await;
        assert_eq!(infinite(&h.app).posts().len(), 40);
        assert_eq!(h.repo.requests(), vec![(1, 20), (2, 20)]);
    }

    #[tokio::test]
    async fn test_stale_result_is_dropped() {
        let mut h = harness(100);
        h.app.navigate_to(Route::Pagination);
        let stale = h.app.next_event().await.unwrap();

        // Leave and re-enter before the first result is applied.
        assert!(h.app.go_back());
        h.app.navigate_to(Route::Pagination);
        h.app.handle_app_event(stale);
        assert!(pagination(&h.app).posts().is_empty());
        assert!(pagination(&h.app).is_loading());

        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).posts().len(), 10);
    }

    #[tokio::test]
    async fn test_error_is_dismissible_and_retry_recovers() {
        let mut h = harness(100);
        h.repo.fail_next(500);
        h.app.navigate_to(Route::Pagination);
        settle(&mut h.app).await;
        assert!(pagination(&h.app).error().is_some());

        // Esc first dismisses the error and stays on the screen.
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.nav.current(), &Route::Pagination);
        assert_eq!(pagination(&h.app).phase(), &FeedPhase::Idle);

        press(&mut h.app, KeyCode::Char('r'));
        settle(&mut h.app).await;
        assert!(pagination(&h.app).error().is_none());
        assert_eq!(pagination(&h.app).posts().len(), 10);
    }

    #[tokio::test]
    async fn test_detail_round_trip_restores_infinite_scroll() {
        let mut h = harness(100);
        h.app.navigate_to(Route::InfiniteScroll);
        settle(&mut h.app).await;
        for _ in 0..19 {
            press(&mut h.app, KeyCode::Down);
        }
        settle(&mut h.app).await;
        assert_eq!(infinite(&h.app).posts().len(), 40);

        press(&mut h.app, KeyCode::Enter);
        assert!(matches!(
            h.app.nav.current(),
            Route::PostDetail { post_id: 20, .. }
        ));
        assert!(h.store.get(INFINITE_STATE_KEY).is_some());

        // Post arrives, then the image request resolves (the mock URL cannot be fetched).
        settle(&mut h.app).await;
        match &h.app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.post().map(|p| p.id), Some(20));
                assert!(detail.image.is_loading());
            }
            other => panic!("expected detail, got {:?}", other),
        }
        settle(&mut h.app).await;
        match &h.app.screen {
            Screen::Detail(detail) => assert!(matches!(detail.image, LoadingState::Error(_))),
            other => panic!("expected detail, got {:?}", other),
        }

        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.nav.current(), &Route::InfiniteScroll);
        assert!(infinite(&h.app).is_loading());
        settle(&mut h.app).await;

        let restored: Vec<u64> = infinite(&h.app).posts().iter().map(|p| p.id).collect();
        assert_eq!(restored, (1..=40).collect::<Vec<_>>());
        assert_eq!(infinite(&h.app).next_page(), 3);
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut h = harness(1);
        press(&mut h.app, KeyCode::Char('q'));
        assert!(h.app.should_quit);
    }

    /// Load two pages, open post `open_index` and come back once the detail
    /// screen has settled. Returns the snapshot saved when the list was left.
    async fn open_detail_then_return(h: &mut Harness, open_index: usize) -> String {
        h.app.navigate_to(Route::InfiniteScroll);
        settle(&mut h.app).await;
        for _ in 0..19 {
            press(&mut h.app, KeyCode::Down);
        }
        settle(&mut h.app).await;
        while infinite(&h.app).list.selected() != Some(open_index) {
            press(&mut h.app, KeyCode::Up);
        }

        press(&mut h.app, KeyCode::Enter);
        let saved = h.store.get(INFINITE_STATE_KEY).unwrap();
        settle(&mut h.app).await;
        settle(&mut h.app).await;
        saved
    }

    #[tokio::test]
    async fn test_failed_restore_shows_error_and_keeps_saved_list() {
        let mut h = harness(100);
        let saved = open_detail_then_return(&mut h, 19).await;

        h.repo.fail_next(500);
        press(&mut h.app, KeyCode::Esc);
        settle(&mut h.app).await;

        let screen = infinite(&h.app);
        assert!(screen.posts().is_empty());
        assert!(screen.error().unwrap().contains("500"));
        assert_eq!(h.store.get(INFINITE_STATE_KEY).unwrap(), saved);

        // Retry walks the saved ids again rather than loading page 3.
        press(&mut h.app, KeyCode::Char('r'));
        settle(&mut h.app).await;
        let restored: Vec<u64> = infinite(&h.app).posts().iter().map(|p| p.id).collect();
        assert_eq!(restored, (1..=40).collect::<Vec<_>>());
        assert!(!h.repo.requests().contains(&(3, 20)));

        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.nav.current(), &Route::Home);
        let snapshot: crate::state::InfiniteScrollSnapshot =
            serde_json::from_str(&h.store.get(INFINITE_STATE_KEY).unwrap()).unwrap();
        assert_eq!(snapshot.post_ids, (1..=40).collect::<Vec<_>>());
        assert_eq!(snapshot.current_page, 3);
    }

    #[tokio::test]
    async fn test_leaving_during_failed_restore_keeps_saved_list() {
        let mut h = harness(100);
        let saved = open_detail_then_return(&mut h, 5).await;

        h.repo.fail_next(503);
        press(&mut h.app, KeyCode::Esc);
        settle(&mut h.app).await;

        // First Esc dismisses the error, the second leaves the screen.
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.nav.current(), &Route::InfiniteScroll);
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.nav.current(), &Route::Home);
        assert_eq!(h.store.get(INFINITE_STATE_KEY).unwrap(), saved);
    }

    #[tokio::test]
    async fn test_return_from_detail_restores_selection() {
        let mut h = harness(100);
        open_detail_then_return(&mut h, 10).await;
        assert!(matches!(
            h.app.nav.current(),
            Route::PostDetail { post_id: 11, .. }
        ));

        press(&mut h.app, KeyCode::Esc);
        settle(&mut h.app).await;
        let screen = infinite(&h.app);
        assert_eq!(screen.list.selected(), Some(10));
        assert_eq!(screen.list.selected_item().map(|p| p.id), Some(11));
    }

    #[tokio::test]
    async fn test_jump_to_last_first_and_typed_page() {
        let mut h = harness(95);
        h.app.navigate_to(Route::Pagination);
        settle(&mut h.app).await;

        press(&mut h.app, KeyCode::End);
        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).current_page(), 10);
        assert_eq!(pagination(&h.app).posts().len(), 5);

        press(&mut h.app, KeyCode::Home);
        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).current_page(), 1);

        // Typing a digit opens the prompt; Enter jumps.
        press(&mut h.app, KeyCode::Char('7'));
        assert_eq!(pagination(&h.app).page_input(), Some("7"));
        press(&mut h.app, KeyCode::Enter);
        settle(&mut h.app).await;
        assert_eq!(pagination(&h.app).current_page(), 7);
        assert_eq!(pagination(&h.app).posts()[0].id, 61);

        // Out-of-range pages close the prompt and stay put.
        press(&mut h.app, KeyCode::Char('g'));
        press(&mut h.app, KeyCode::Char('4'));
        press(&mut h.app, KeyCode::Char('2'));
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(pagination(&h.app).page_input(), None);
        assert!(!pagination(&h.app).is_loading());
        assert_eq!(pagination(&h.app).current_page(), 7);

        // Esc inside the prompt only closes it.
        press(&mut h.app, KeyCode::Char('g'));
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(pagination(&h.app).page_input(), None);
        assert_eq!(h.app.nav.current(), &Route::Pagination);
    }

    #[tokio::test]
    async fn test_saved_page_past_the_end_moves_to_last_page() {
        let mut h = harness(30);
        h.store.set(PAGINATION_STATE_KEY, "12");
        h.app.navigate_to(Route::Pagination);

        settle(&mut h.app).await;
        assert!(pagination(&h.app).is_loading());
        settle(&mut h.app).await;

        let screen = pagination(&h.app);
        assert_eq!(screen.current_page(), 3);
        assert_eq!(screen.posts().len(), 10);
        assert_eq!(h.store.get(PAGINATION_STATE_KEY).as_deref(), Some("3"));
    }
}
