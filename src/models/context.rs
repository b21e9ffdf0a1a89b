//! Request-scoped state threaded through the middleware chain.

use super::{Identity, Session, Update, User};

/// Everything known about one inbound update.
///
/// Created per update and moved by value from stage to stage; it is never
/// shared between concurrent updates.
#[derive(Debug, Clone)]
pub struct UpdateContext {
    pub update: Update,
    /// Attached by the auth middleware
    pub user: Option<User>,
    /// Attached by the auth middleware, or preloaded by the transport
    pub session: Option<Session>,
}

impl UpdateContext {
    pub fn new(update: Update) -> Self {
        Self {
            update,
            user: None,
            session: None,
        }
    }

    /// Seed the context with a session loaded by the transport.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn sender(&self) -> Option<&Identity> {
        self.update.sender.as_ref()
    }
}
