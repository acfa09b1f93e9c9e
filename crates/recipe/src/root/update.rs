use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::{LabelInput, LabelKind, field::null_error, label, repository};

/// Partial recipe update. The outer `None` leaves a field as it is and
/// `Some(None)` is an explicit `null`, which only `link` accepts. For `tags`
/// and `ingredients`, a list replaces every link, so an empty one clears them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInput {
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "crate::validate_not_blank")
    )]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub time_minutes: Option<Option<i64>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(custom(function = "crate::validate_price"))]
    pub price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(nested)]
    pub tags: Option<Option<Vec<LabelInput>>>,
    #[serde(default, deserialize_with = "crate::nullable")]
    #[validate(nested)]
    pub ingredients: Option<Option<Vec<LabelInput>>>,
}

impl UpdateInput {
    fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_default();

        let nulls = [
            ("title", matches!(self.title, Some(None))),
            ("description", matches!(self.description, Some(None))),
            ("time_minutes", matches!(self.time_minutes, Some(None))),
            ("price", matches!(self.price, Some(None))),
            ("tags", matches!(self.tags, Some(None))),
            ("ingredients", matches!(self.ingredients, Some(None))),
        ];

        for (field, is_null) in nulls {
            if is_null {
                errors.add(field, null_error());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl super::Command {
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: UpdateInput,
    ) -> recipebox_shared::Result<super::Recipe> {
        input.check()?;

        let mut tx = self.write_db.begin().await?;

        if repository::find(&mut *tx, id, user_id).await?.is_none() {
            recipebox_shared::not_found!("recipe {id}");
        }

        repository::update(
            &mut tx,
            repository::UpdateInput {
                id,
                user_id,
                title: input.title.flatten(),
                description: input.description.flatten(),
                time_minutes: input.time_minutes.flatten(),
                price: input.price.flatten().map(crate::price::to_db),
                link: input.link,
            },
        )
        .await?;

        if let Some(Some(tags)) = input.tags {
            label::assign(&mut tx, LabelKind::Tag, user_id, id, &tags).await?;
        }

        if let Some(Some(ingredients)) = input.ingredients {
            label::assign(&mut tx, LabelKind::Ingredient, user_id, id, &ingredients).await?;
        }

        tx.commit().await?;

        tracing::info!(recipe = id, user = user_id, "recipe updated");

        self.load(id, user_id).await
    }
}
