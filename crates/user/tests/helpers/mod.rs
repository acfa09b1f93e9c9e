use std::{path::PathBuf, str::FromStr};

use recipebox_user::{Command, CreateUserInput, User};
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

#[allow(dead_code)]
pub async fn create_user(cmd: &Command, name: impl Into<String>) -> anyhow::Result<User> {
    let name = name.into();

    Ok(cmd
        .create_user(CreateUserInput {
            email: format!("{name}@recipebox.localhost"),
            password: "my_password".to_owned(),
            name,
        })
        .await?)
}
