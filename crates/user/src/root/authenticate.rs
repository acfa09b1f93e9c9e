use crate::repository;

impl super::Command {
    /// Returns the user only when the password matches and the account is active.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> recipebox_shared::Result<Option<super::User>> {
        let Some(user) = repository::find(
            &self.read_db,
            repository::FindType::Email(crate::normalize_email(email)),
        )
        .await?
        else {
            // keep timing close to the wrong-password path
            let _ = crate::password::hash_password(password);
            return Ok(None);
        };

        if !user.check_password(password) {
            tracing::debug!(user = user.id, "password mismatch");
            return Ok(None);
        }

        if !user.is_active {
            tracing::warn!(user = user.id, "inactive user attempted to authenticate");
            return Ok(None);
        }

        Ok(Some(user))
    }
}
