use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::{LabelInput, LabelKind, label, repository};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInput {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "crate::validate_not_blank")
    )]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub time_minutes: i64,
    #[validate(custom(function = "crate::validate_price"))]
    pub price: Decimal,
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub link: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<LabelInput>,
    #[serde(default)]
    #[validate(nested)]
    pub ingredients: Vec<LabelInput>,
}

impl super::Command {
    /// Creates a recipe owned by `user_id` and links its tags and
    /// ingredients, creating any the user does not have yet.
    pub async fn create(
        &self,
        user_id: i64,
        input: CreateInput,
    ) -> recipebox_shared::Result<super::Recipe> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;

        let id = repository::create(
            &mut tx,
            repository::CreateInput {
                user_id,
                title: input.title,
                description: input.description,
                time_minutes: input.time_minutes,
                price: crate::price::to_db(input.price),
                link: input.link,
            },
        )
        .await?;

        label::assign(&mut tx, LabelKind::Tag, user_id, id, &input.tags).await?;
        label::assign(&mut tx, LabelKind::Ingredient, user_id, id, &input.ingredients).await?;

        tx.commit().await?;

        tracing::info!(recipe = id, user = user_id, "recipe created");

        self.load(id, user_id).await
    }
}
