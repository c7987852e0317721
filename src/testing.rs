//! Backend falso para tests: mismas reglas que el servidor real
//! (usuarios sembrados, tokens emitidos, posts más recientes primero),
//! con inyección de fallos, registro de llamadas y respuestas diferidas.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use futures::channel::oneshot;

use crate::config::StaleResponsePolicy;
use crate::error::ApiError;
use crate::models::Post;
use crate::services::ApiGateway;
use crate::state::AppContext;
use crate::stores::{ContentStore, SessionStore};
use crate::utils::storage::MemoryStorage;

pub const ADMIN_PASSWORD: &str = "password123";
pub const ADMIN_NICK: &str = "管理员小张";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Login,
    FetchProfile,
    ListPosts,
    CreatePost,
    Logout,
}

type PostsReply = oneshot::Sender<Result<Vec<Post>, ApiError>>;
type ProfileReply = oneshot::Sender<Result<String, ApiError>>;

#[derive(Default)]
pub struct FakeBackend {
    users: RefCell<HashMap<String, (String, String)>>,
    tokens: RefCell<HashMap<String, String>>,
    posts: RefCell<Vec<Post>>,
    next_id: Cell<i64>,
    calls: RefCell<Vec<Op>>,
    failures: RefCell<HashMap<Op, VecDeque<ApiError>>>,
    hold_list_posts: Cell<bool>,
    held_list_posts: RefCell<VecDeque<PostsReply>>,
    hold_fetch_profile: Cell<bool>,
    held_profiles: RefCell<VecDeque<ProfileReply>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.add_user("admin", ADMIN_PASSWORD, ADMIN_NICK);
        backend.add_user("user1", "mypassword", "用户小李");
        backend
    }

    pub fn add_user(&self, username: &str, password: &str, nickname: &str) {
        self.users
            .borrow_mut()
            .insert(username.to_string(), (password.to_string(), nickname.to_string()));
    }

    /// Invalida todos los tokens emitidos (expiración en el servidor)
    pub fn revoke_all_tokens(&self) {
        self.tokens.borrow_mut().clear();
    }

    /// La próxima llamada a `op` falla con `error`
    pub fn fail_next(&self, op: Op, error: ApiError) {
        self.failures.borrow_mut().entry(op).or_default().push_back(error);
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.borrow().iter().filter(|called| **called == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Inserta un post directamente en el "servidor"
    pub fn seed_post(&self, author: &str, content: &str) -> Post {
        let post = self.make_post(author, content);
        self.posts.borrow_mut().insert(0, post.clone());
        post
    }

    /// A partir de ahora `list_posts` queda pendiente hasta `resolve_held_list`
    pub fn hold_list_posts(&self, hold: bool) {
        self.hold_list_posts.set(hold);
    }

    pub fn held_list_count(&self) -> usize {
        self.held_list_posts.borrow().len()
    }

    /// Resuelve la petición retenida número `index` (orden de emisión)
    pub fn resolve_held_list(&self, index: usize, reply: Result<Vec<Post>, ApiError>) {
        resolve_held(&self.held_list_posts, index, reply, "list_posts");
    }

    /// Igual que `hold_list_posts`, para `fetch_profile`
    pub fn hold_fetch_profile(&self, hold: bool) {
        self.hold_fetch_profile.set(hold);
    }

    pub fn held_profile_count(&self) -> usize {
        self.held_profiles.borrow().len()
    }

    pub fn resolve_held_profile(&self, index: usize, reply: Result<String, ApiError>) {
        resolve_held(&self.held_profiles, index, reply, "fetch_profile");
    }

    fn record(&self, op: Op) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(op);
        match self.failures.borrow_mut().get_mut(&op).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn user_for(&self, token: &str) -> Result<String, ApiError> {
        self.tokens.borrow().get(token).cloned().ok_or(ApiError::Unauthorized {
            message: Some("Invalid token".to_string()),
        })
    }

    fn make_post(&self, author: &str, content: &str) -> Post {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().unwrap_or_else(Utc::now);
        Post {
            id,
            author_nickname: author.to_string(),
            content: content.to_string(),
            created_at: base + Duration::minutes(id),
        }
    }
}

fn resolve_held<T>(held: &RefCell<VecDeque<oneshot::Sender<T>>>, index: usize, reply: T, op: &str) {
    let mut held = held.borrow_mut();
    let Some(slot) = held.get_mut(index) else {
        panic!("no held {} request at index {}", op, index);
    };
    // El sender se sustituye por uno muerto para no mover los índices
    let (dead, _) = oneshot::channel();
    let sender = std::mem::replace(slot, dead);
    let _ = sender.send(reply);
}

#[async_trait(?Send)]
impl ApiGateway for FakeBackend {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        self.record(Op::Login)?;
        let users = self.users.borrow();
        match users.get(username) {
            Some((expected, _)) if expected == password => {
                let token = format!("token-{}-{}", username, self.tokens.borrow().len() + 1);
                self.tokens.borrow_mut().insert(token.clone(), username.to_string());
                Ok(token)
            }
            _ => Err(ApiError::from_status(
                401,
                Some("Invalid username or password".to_string()),
            )),
        }
    }

    async fn fetch_profile(&self, token: &str) -> Result<String, ApiError> {
        self.record(Op::FetchProfile)?;
        if self.hold_fetch_profile.get() {
            let (sender, receiver) = oneshot::channel();
            self.held_profiles.borrow_mut().push_back(sender);
            return receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Request("request dropped".to_string())));
        }
        let username = self.user_for(token)?;
        let users = self.users.borrow();
        users
            .get(&username)
            .map(|(_, nickname)| nickname.clone())
            .ok_or(ApiError::Server { status: 404, message: Some("User not found".to_string()) })
    }

    async fn list_posts(&self, _token: Option<&str>) -> Result<Vec<Post>, ApiError> {
        self.record(Op::ListPosts)?;
        if self.hold_list_posts.get() {
            let (sender, receiver) = oneshot::channel();
            self.held_list_posts.borrow_mut().push_back(sender);
            return receiver
                .await
                .unwrap_or_else(|_| Err(ApiError::Request("request dropped".to_string())));
        }
        Ok(self.posts.borrow().clone())
    }

    async fn create_post(&self, token: &str, content: &str) -> Result<Post, ApiError> {
        self.record(Op::CreatePost)?;
        let username = self.user_for(token)?;
        if content.trim().is_empty() {
            return Err(ApiError::from_status(400, Some("Invalid request format".to_string())));
        }
        let nickname = self
            .users
            .borrow()
            .get(&username)
            .map(|(_, nickname)| nickname.clone())
            .unwrap_or_default();
        Ok(self.seed_post(&nickname, content))
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        self.record(Op::Logout)?;
        self.user_for(token).map(|_| ())
    }
}

pub struct Harness {
    pub backend: Rc<FakeBackend>,
    pub storage: Rc<MemoryStorage>,
    pub session: SessionStore,
    pub content: ContentStore,
    pub context: AppContext,
}

pub fn harness() -> Harness {
    harness_with_policy(StaleResponsePolicy::LastResolvedWins)
}

pub fn harness_with_policy(policy: StaleResponsePolicy) -> Harness {
    let backend = Rc::new(FakeBackend::new());
    let storage = Rc::new(MemoryStorage::new());
    let context = AppContext::new(backend.clone(), storage.clone(), "token", policy);
    Harness {
        backend,
        storage,
        session: context.session.clone(),
        content: context.content.clone(),
        context,
    }
}

/// Ids de una lista de posts, para comparar órdenes
pub fn ids(posts: &[Post]) -> Vec<i64> {
    posts.iter().map(|p| p.id).collect()
}

