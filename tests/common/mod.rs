// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use botgate::db::{
    LeaderboardStore, MemoryLeaderboard, MemorySessionStore, MemoryUserRepository, SessionStore,
    UserRepository,
};
use botgate::error::{StoreError, StoreResult};
use botgate::middleware::AuthLayer;
use botgate::models::{Chat, ChatKind, Identity, NewUser, SessionRecord, Update, UpdateContext, User};
use futures_util::future::{ready, Ready};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;
use tower::{BoxError, Service};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{self, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[allow(dead_code)]
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

// ─── Store fakes ─────────────────────────────────────────────

/// User repository that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingUsers {
    pub inner: MemoryUserRepository,
    pub finds: AtomicUsize,
    pub creates: AtomicUsize,
    pub fail_find: Option<StoreError>,
    pub fail_create: Option<StoreError>,
}

#[allow(dead_code)]
impl CountingUsers {
    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

impl UserRepository for CountingUsers {
    async fn find_user_by_external_id(&self, external_id: i64) -> StoreResult<Option<User>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_find {
            return Err(err.clone());
        }
        self.inner.find_user_by_external_id(external_id).await
    }

    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.fail_create {
            return Err(err.clone());
        }
        self.inner.create_user(user).await
    }
}

/// Session store that records every write.
pub struct CountingSessions {
    pub inner: MemorySessionStore,
    pub sets: Mutex<Vec<(String, SessionRecord)>>,
    pub touches: Mutex<Vec<String>>,
    pub fail: Option<StoreError>,
}

impl Default for CountingSessions {
    fn default() -> Self {
        Self {
            inner: MemorySessionStore::new(SESSION_TTL),
            sets: Mutex::new(Vec::new()),
            touches: Mutex::new(Vec::new()),
            fail: None,
        }
    }
}

#[allow(dead_code)]
impl CountingSessions {
    pub fn sets(&self) -> Vec<(String, SessionRecord)> {
        self.sets.lock().unwrap().clone()
    }

    pub fn touches(&self) -> Vec<String> {
        self.touches.lock().unwrap().clone()
    }
}

impl SessionStore for CountingSessions {
    async fn set_session(&self, token: &str, record: &SessionRecord) -> StoreResult<()> {
        self.sets
            .lock()
            .unwrap()
            .push((token.to_string(), record.clone()));
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.inner.set_session(token, record).await
    }

    async fn touch_session(&self, token: &str) -> StoreResult<()> {
        self.touches.lock().unwrap().push(token.to_string());
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.inner.touch_session(token).await
    }
}

/// Leaderboard that records every write.
#[derive(Default)]
pub struct CountingLeaderboard {
    pub inner: MemoryLeaderboard,
    pub writes: Mutex<Vec<(String, String)>>,
    pub fail: Option<StoreError>,
}

#[allow(dead_code)]
impl CountingLeaderboard {
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl LeaderboardStore for CountingLeaderboard {
    async fn set_user_data(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        self.writes
            .lock()
            .unwrap()
            .push((user_id.to_string(), display_name.to_string()));
        if let Some(err) = &self.fail {
            return Err(err.clone());
        }
        self.inner.set_user_data(user_id, display_name).await
    }
}

/// The three stores behind one auth layer.
#[derive(Default)]
pub struct TestStores {
    pub users: Arc<CountingUsers>,
    pub sessions: Arc<CountingSessions>,
    pub leaderboard: Arc<CountingLeaderboard>,
}

#[allow(dead_code)]
impl TestStores {
    pub fn new(users: CountingUsers, sessions: CountingSessions, leaderboard: CountingLeaderboard) -> Self {
        Self {
            users: Arc::new(users),
            sessions: Arc::new(sessions),
            leaderboard: Arc::new(leaderboard),
        }
    }

    pub fn auth_layer(&self) -> AuthLayer<CountingUsers, CountingSessions, CountingLeaderboard> {
        AuthLayer::new(
            self.users.clone(),
            self.sessions.clone(),
            self.leaderboard.clone(),
            SESSION_TTL,
        )
    }

    /// Total calls across all three stores.
    pub fn store_calls(&self) -> usize {
        self.users.finds()
            + self.users.creates()
            + self.sessions.sets().len()
            + self.sessions.touches().len()
            + self.leaderboard.writes().len()
    }
}

// ─── Updates ─────────────────────────────────────────────────

#[allow(dead_code)]
pub fn human(id: i64) -> Identity {
    Identity {
        username: Some(format!("user{id}")),
        first_name: Some("Test".to_string()),
        ..Identity::new(id)
    }
}

#[allow(dead_code)]
pub fn update_from(sender: Option<Identity>) -> Update {
    let chat = sender.as_ref().map(|s| Chat {
        id: s.id,
        kind: ChatKind::Private,
    });
    Update {
        update_id: 1,
        sender,
        chat,
        text: Some("/tap".to_string()),
    }
}

#[allow(dead_code)]
pub fn ctx_from(sender: Option<Identity>) -> UpdateContext {
    UpdateContext::new(update_from(sender))
}

#[allow(dead_code)]
pub fn seeded_user(id: &str, external_id: i64) -> User {
    let now = chrono::Utc::now();
    User {
        id: id.to_string(),
        external_id,
        username: Some("testuser".to_string()),
        first_name: Some("Test".to_string()),
        last_name: None,
        custom_name: None,
        score: 0,
        created_at: now,
        updated_at: now,
    }
}

// ─── Downstream handler ──────────────────────────────────────

/// Next stage that remembers every context it was handed.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    pub seen: Arc<Mutex<Vec<UpdateContext>>>,
}

#[allow(dead_code)]
impl RecordingHandler {
    pub fn seen(&self) -> Vec<UpdateContext> {
        self.seen.lock().unwrap().clone()
    }
}

impl Service<UpdateContext> for RecordingHandler {
    type Response = &'static str;
    type Error = BoxError;
    type Future = Ready<Result<&'static str, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, ctx: UpdateContext) -> Self::Future {
        self.seen.lock().unwrap().push(ctx);
        ready(Ok("handled"))
    }
}

// ─── Log capture ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub message: String,
    pub fields: HashMap<String, String>,
}

#[allow(dead_code)]
impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Ordered record of tracing events, plus markers pushed by test handlers.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<CapturedEvent>>>);

#[allow(dead_code)]
impl EventLog {
    pub fn push_marker(&self, message: impl Into<String>) {
        self.0.lock().unwrap().push(CapturedEvent {
            message: message.into(),
            fields: HashMap::new(),
        });
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    /// Position of the first event matching `message` and `external_id`.
    pub fn position(&self, message: &str, external_id: Option<&str>) -> Option<usize> {
        self.events().iter().position(|e| {
            e.message == message && (external_id.is_none() || e.field("external_id") == external_id)
        })
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push(CapturedEvent {
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

/// Capture events emitted on the current thread until the guard drops.
#[allow(dead_code)]
pub fn capture_events() -> (EventLog, tracing::subscriber::DefaultGuard) {
    let log = EventLog::default();
    let guard = tracing_subscriber::registry()
        .with(log.clone())
        .set_default();
    (log, guard)
}
