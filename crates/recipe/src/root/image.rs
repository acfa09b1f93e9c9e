use crate::repository;

impl super::Command {
    /// Points the recipe at a newly stored image. Returns the previous
    /// image path, if any.
    pub async fn set_image(
        &self,
        id: i64,
        user_id: i64,
        image: &str,
    ) -> recipebox_shared::Result<Option<String>> {
        let Some(recipe) = repository::find(&self.write_db, id, user_id).await? else {
            recipebox_shared::not_found!("recipe {id}");
        };

        repository::update_image(&self.write_db, id, user_id, image).await?;

        tracing::info!(recipe = id, user = user_id, image, "recipe image updated");

        Ok(recipe.image)
    }
}
