//! Process-wide auth context
//!
//! Read-mostly holder of the signed-in user. Lifecycle is explicit:
//! `init` on startup from the persisted session, `sign_in` / `sign_out`
//! on user action. Nothing else writes it.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::domain::{CurrentUser, DomainResult, SessionStore};

#[derive(Clone)]
pub struct AuthContext {
    current: Arc<RwLock<Option<CurrentUser>>>,
    store: Arc<dyn SessionStore>,
}

impl AuthContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Restore the persisted session. A corrupt or unreadable session is
    /// treated as signed out.
    pub async fn init(&self) -> Option<CurrentUser> {
        let restored = match self.store.load().await {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable persisted session");
                None
            }
        };
        if let Some(user) = &restored {
            info!(user_id = %user.id, "Session restored");
        }
        *self.current.write().await = restored.clone();
        restored
    }

    pub async fn sign_in(&self, user: CurrentUser) -> DomainResult<()> {
        self.store.save(&user).await?;
        info!(user_id = %user.id, "Signed in");
        *self.current.write().await = Some(user);
        Ok(())
    }

    pub async fn sign_out(&self) -> DomainResult<()> {
        let previous = self.current.write().await.take();
        self.store.clear().await?;
        if let Some(user) = previous {
            info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Option<CurrentUser> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|u| u.token.clone())
    }

    pub async fn is_signed_in(&self) -> bool {
        self.current.read().await.is_some()
    }
}
