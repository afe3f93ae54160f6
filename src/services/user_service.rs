use std::sync::Arc;

use crate::{
    errors::{ServiceError, ServiceResult},
    models::user_model::{CreateUser, User},
    repositories::UserRepository,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn create(&self, req: CreateUser) -> ServiceResult<User> {
        let username = req.username.trim();
        if username.is_empty() {
            return Err(ServiceError::Validation("username is required".to_string()));
        }
        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "User with username = {username} already exists"
            )));
        }
        Ok(self.users.create(username).await?)
    }

    pub async fn get_by_username(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", "username", username))
    }
}
