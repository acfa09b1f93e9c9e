use std::ops::Deref;

use rust_decimal::Decimal;

use crate::{
    Label, LabelCommand, LabelKind, label,
    repository::{self, RecipeRow},
};

mod create;
mod delete;
mod image;
mod list;
mod update;

pub use create::CreateInput;
pub use list::ListQuery;
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub recipebox_shared::State);

impl Deref for Command {
    type Target = recipebox_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: Option<String>,
    pub image: Option<String>,
    pub tags: Vec<Label>,
    pub ingredients: Vec<Label>,
    pub created_at: i64,
}

impl Recipe {
    fn from_row(row: RecipeRow, tags: Vec<Label>, ingredients: Vec<Label>) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            time_minutes: row.time_minutes,
            price: row.price.0,
            link: row.link,
            image: row.image,
            tags,
            ingredients,
            created_at: row.created_at,
        }
    }
}

impl Command {
    pub fn tags(&self) -> LabelCommand {
        self.labels(LabelKind::Tag)
    }

    pub fn ingredients(&self) -> LabelCommand {
        self.labels(LabelKind::Ingredient)
    }

    pub fn labels(&self, kind: LabelKind) -> LabelCommand {
        LabelCommand::new(self.0.clone(), kind)
    }

    pub async fn find(&self, id: i64, user_id: i64) -> recipebox_shared::Result<Option<Recipe>> {
        let Some(row) = repository::find(&self.read_db, id, user_id).await? else {
            return Ok(None);
        };

        let mut recipes = self.attach_labels(&self.read_db, vec![row]).await?;

        Ok(recipes.pop())
    }

    pub(crate) async fn load(&self, id: i64, user_id: i64) -> recipebox_shared::Result<Recipe> {
        let Some(row) = repository::find(&self.write_db, id, user_id).await? else {
            recipebox_shared::not_found!("recipe {id}");
        };

        let mut recipes = self.attach_labels(&self.write_db, vec![row]).await?;
        let Some(recipe) = recipes.pop() else {
            recipebox_shared::not_found!("recipe {id}");
        };

        Ok(recipe)
    }

    async fn attach_labels(
        &self,
        pool: &sqlx::SqlitePool,
        rows: Vec<RecipeRow>,
    ) -> recipebox_shared::Result<Vec<Recipe>> {
        let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
        let mut tags = label::for_recipes(pool, LabelKind::Tag, &ids).await?;
        let mut ingredients = label::for_recipes(pool, LabelKind::Ingredient, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let tags = tags.remove(&row.id).unwrap_or_default();
                let ingredients = ingredients.remove(&row.id).unwrap_or_default();
                Recipe::from_row(row, tags, ingredients)
            })
            .collect())
    }
}
