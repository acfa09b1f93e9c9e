use std::{path::PathBuf, str::FromStr};

use recipebox_recipe::{CreateInput, LabelInput, Recipe};
use recipebox_user::CreateUserInput;
use rust_decimal::Decimal;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<recipebox_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebox_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(recipebox_shared::State::single(pool))
}

pub async fn create_user(state: &recipebox_shared::State, name: &str) -> anyhow::Result<i64> {
    let user = recipebox_user::Command(state.clone())
        .create_user(CreateUserInput {
            email: format!("{name}@recipebox.localhost"),
            password: "testpass123".to_owned(),
            name: name.to_owned(),
        })
        .await?;

    Ok(user.id)
}

pub fn labels(names: &[&str]) -> Vec<LabelInput> {
    names
        .iter()
        .map(|name| LabelInput {
            name: (*name).to_owned(),
        })
        .collect()
}

pub fn recipe_input(title: &str) -> CreateInput {
    CreateInput {
        title: title.to_owned(),
        description: "Sample description".to_owned(),
        time_minutes: 22,
        price: Decimal::from_str("5.25").unwrap(),
        link: Some("http://example.com/recipe.pdf".to_owned()),
        tags: vec![],
        ingredients: vec![],
    }
}

#[allow(dead_code)]
pub async fn create_recipe(
    cmd: &recipebox_recipe::Command,
    user_id: i64,
    title: &str,
) -> anyhow::Result<Recipe> {
    Ok(cmd.create(user_id, recipe_input(title)).await?)
}

#[allow(dead_code)]
pub fn names(labels: &[recipebox_recipe::Label]) -> Vec<&str> {
    labels.iter().map(|label| label.name.as_str()).collect()
}
