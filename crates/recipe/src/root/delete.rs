use crate::repository;

impl super::Command {
    /// Deletes the recipe and returns the path of its image, if it had one,
    /// so the caller can remove the file.
    pub async fn delete(&self, id: i64, user_id: i64) -> recipebox_shared::Result<Option<String>> {
        let Some(recipe) = repository::find(&self.write_db, id, user_id).await? else {
            recipebox_shared::not_found!("recipe {id}");
        };

        if repository::delete(&self.write_db, id, user_id).await? == 0 {
            recipebox_shared::not_found!("recipe {id}");
        }

        tracing::info!(recipe = id, user = user_id, "recipe deleted");

        Ok(recipe.image)
    }
}
