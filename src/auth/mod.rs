//! Session state: who is logged in, and notifications when that changes.

use crate::api::{ApiClient, CurrentUser};
use crate::storage::StorageHandle;
use anyhow::bail;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    Login(CurrentUser),
    Logout,
    ProfileUpdated(CurrentUser),
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    storage: StorageHandle,
    current: RwLock<Option<CurrentUser>>,
    events: broadcast::Sender<AuthEvent>,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    inner: Arc<Inner>,
}

impl AuthService {
    pub fn new(api: ApiClient, storage: StorageHandle) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            inner: Arc::new(Inner {
                api,
                storage,
                current: RwLock::new(None),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.inner
            .current
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user().is_some()
    }

    /// Load the saved session, if any. Does not publish.
    pub async fn restore(&self) -> anyhow::Result<Option<CurrentUser>> {
        let saved = self.inner.storage.run(|s| s.current_user()).await?;
        self.set_current(saved.clone());
        Ok(saved)
    }

    pub async fn login(&self, account: &str, password: &str) -> anyhow::Result<CurrentUser> {
        validate_credentials(account, password)?;
        let resp = self.inner.api.login(account.trim(), password).await?;
        let user = CurrentUser {
            id: resp.user_id,
            nickname: resp.nickname,
            email: account.trim().to_string(),
        };
        self.persist(&user).await?;
        tracing::info!(nickname = %user.nickname, "logged in");
        self.publish(AuthEvent::Login(user.clone()));
        Ok(user)
    }

    pub async fn register(&self, account: &str, password: &str) -> anyhow::Result<CurrentUser> {
        validate_credentials(account, password)?;
        let resp = self.inner.api.register(account.trim(), password).await?;
        let user = CurrentUser {
            id: resp.user_id,
            nickname: resp.nickname,
            email: account.trim().to_string(),
        };
        self.persist(&user).await?;
        tracing::info!(nickname = %user.nickname, "registered");
        self.publish(AuthEvent::Login(user.clone()));
        Ok(user)
    }

    /// Ends the session locally even when the server call fails.
    pub async fn logout(&self) -> anyhow::Result<()> {
        if let Err(e) = self.inner.api.logout().await {
            tracing::warn!(error = %format!("{e:#}"), "server logout failed");
        }
        self.inner.storage.run(|s| s.clear_current_user()).await?;
        self.set_current(None);
        tracing::info!("logged out");
        self.publish(AuthEvent::Logout);
        Ok(())
    }

    /// Reconcile the local session with the server's view.
    pub async fn refresh(&self) -> anyhow::Result<Option<CurrentUser>> {
        let status = self.inner.api.check_auth().await?;
        let current = self.current_user();

        match (status.authenticated, status.user, current) {
            (true, Some(profile), Some(existing)) => {
                let updated = CurrentUser {
                    id: existing.id.clone(),
                    nickname: profile.nickname,
                    email: if profile.email.is_empty() {
                        existing.email.clone()
                    } else {
                        profile.email
                    },
                };
                if updated != existing {
                    self.persist(&updated).await?;
                    self.publish(AuthEvent::ProfileUpdated(updated.clone()));
                }
                Ok(Some(updated))
            }
            (true, _, existing) => Ok(existing),
            (false, _, Some(_)) => {
                self.inner.storage.run(|s| s.clear_current_user()).await?;
                self.set_current(None);
                tracing::info!("session expired");
                self.publish(AuthEvent::Logout);
                Ok(None)
            }
            (false, _, None) => Ok(None),
        }
    }

    async fn persist(&self, user: &CurrentUser) -> anyhow::Result<()> {
        let record = user.clone();
        self.inner
            .storage
            .run(move |s| s.set_current_user(&record))
            .await?;
        self.set_current(Some(user.clone()));
        Ok(())
    }

    fn set_current(&self, user: Option<CurrentUser>) {
        if let Ok(mut guard) = self.inner.current.write() {
            *guard = user;
        }
    }

    fn publish(&self, event: AuthEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }
}

pub fn validate_credentials(account: &str, password: &str) -> anyhow::Result<()> {
    if account.trim().is_empty() || password.is_empty() {
        bail!("Please enter both account and password");
    }
    Ok(())
}
