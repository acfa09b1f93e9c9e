use crate::repository;

impl super::Command {
    pub async fn activate(&self, id: i64) -> recipebox_shared::Result<()> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: i64) -> recipebox_shared::Result<()> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: i64, is_active: bool) -> recipebox_shared::Result<()> {
        let user = self.load(id).await?;

        if user.is_active == is_active {
            return Ok(());
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id,
                is_active: Some(is_active),
                ..Default::default()
            },
        )
        .await?;

        tracing::info!(user = id, is_active, "user activation changed");

        Ok(())
    }
}
