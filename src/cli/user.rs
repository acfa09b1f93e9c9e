use clap::ValueEnum;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Status {
    Active,
    Inactive,
}

async fn command(config: &recipebox::config::Config) -> anyhow::Result<recipebox_user::Command> {
    let pool = recipebox::db::create_pool(&config.database.url, 1).await?;

    Ok(recipebox_user::Command(recipebox_shared::State::single(
        pool,
    )))
}

pub async fn create_superuser(
    config: recipebox::config::Config,
    email: String,
    name: String,
    password: String,
) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let user = command
        .create_superuser(recipebox_user::CreateUserInput {
            email,
            password,
            name,
        })
        .await?;

    tracing::info!("superuser {} created", user.email);

    Ok(())
}

pub async fn set_status(
    config: recipebox::config::Config,
    email: String,
    status: Status,
) -> anyhow::Result<()> {
    let command = command(&config).await?;

    let Some(user) = command.find_by_email(&email).await? else {
        tracing::error!("user {email} not found");
        return Ok(());
    };

    match status {
        Status::Active => command.activate(user.id).await?,
        Status::Inactive => command.deactivate(user.id).await?,
    }

    tracing::info!("{email} is now {}", match status {
        Status::Active => "active",
        Status::Inactive => "inactive",
    });

    Ok(())
}
