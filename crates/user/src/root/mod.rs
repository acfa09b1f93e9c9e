use std::ops::Deref;

use sqlx::prelude::FromRow;

use crate::repository::{self, FindType};

mod active;
mod authenticate;
mod create;
mod update;

pub use create::{CreateUserInput, RegisterInput};
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub recipebox_shared::State);

impl Deref for Command {
    type Target = recipebox_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    password: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub created_at: i64,
}

impl User {
    pub fn check_password(&self, raw: &str) -> bool {
        crate::password::verify_password(raw, &self.password)
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("name", &self.name)
            .field("is_staff", &self.is_staff)
            .field("is_active", &self.is_active)
            .field("is_superuser", &self.is_superuser)
            .finish_non_exhaustive()
    }
}

impl Command {
    pub async fn find(&self, id: i64) -> recipebox_shared::Result<Option<User>> {
        repository::find(&self.read_db, FindType::Id(id)).await
    }

    /// Looks a user up by email after normalizing it.
    pub async fn find_by_email(&self, email: &str) -> recipebox_shared::Result<Option<User>> {
        repository::find(
            &self.read_db,
            FindType::Email(crate::normalize_email(email)),
        )
        .await
    }

    pub(crate) async fn load(&self, id: i64) -> recipebox_shared::Result<User> {
        // Read-your-writes: go through the write pool.
        let Some(user) = repository::find(&self.write_db, FindType::Id(id)).await? else {
            recipebox_shared::not_found!("user {id}");
        };

        Ok(user)
    }
}
