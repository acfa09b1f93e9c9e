use crate::repository;

/// Recipe list filters. A recipe matches `tags` when it is linked to any of
/// the ids; `tags` and `ingredients` must both match when both are set.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

impl super::Command {
    pub async fn list(
        &self,
        user_id: i64,
        query: ListQuery,
    ) -> recipebox_shared::Result<Vec<super::Recipe>> {
        let rows = repository::filter(
            &self.read_db,
            repository::FilterInput {
                user_id,
                tags: query.tags,
                ingredients: query.ingredients,
            },
        )
        .await?;

        self.attach_labels(&self.read_db, rows).await
    }
}
