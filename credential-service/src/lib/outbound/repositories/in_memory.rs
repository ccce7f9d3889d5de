use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::credentials::errors::RepositoryError;
use crate::credentials::models::NewUser;
use crate::credentials::models::User;
use crate::credentials::models::UserId;
use crate::credentials::ports::UserRepository;

/// Process-local user store.
///
/// Usernames are unique case-sensitively, emails case-insensitively. Both
/// constraints are checked under the write lock on insert, so concurrent
/// registrations cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    last_id: i64,
    users_by_username: HashMap<String, User>,
    usernames_by_email: HashMap<String, String>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub async fn len(&self) -> usize {
        self.state.read().await.users_by_username.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut state = self.state.write().await;

        if state.users_by_username.contains_key(user.username()) {
            return Err(RepositoryError::UsernameAlreadyExists(
                user.username().to_string(),
            ));
        }
        let email_key = user.email().to_lowercase();
        if state.usernames_by_email.contains_key(&email_key) {
            return Err(RepositoryError::EmailAlreadyExists(user.email().to_string()));
        }

        state.last_id += 1;
        let user = user.into_user(UserId(state.last_id), Utc::now());

        state
            .usernames_by_email
            .insert(email_key, user.username.clone());
        state
            .users_by_username
            .insert(user.username.clone(), user.clone());

        Ok(user)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .users_by_username
            .get(username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .users_by_username
            .contains_key(username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .state
            .read()
            .await
            .usernames_by_email
            .contains_key(&email.trim().to_lowercase()))
    }
}
