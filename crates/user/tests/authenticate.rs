use recipebox_user::UpdateInput;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn authenticate_checks_credentials() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = recipebox_user::Command(state);

    assert!(
        cmd.authenticate("john.doe@recipebox.localhost", "my_password")
            .await?
            .is_none()
    );

    let user = helpers::create_user(&cmd, "john.doe").await?;

    assert!(
        cmd.authenticate("john.doe@recipebox.localhost", "my_password3")
            .await?
            .is_none()
    );
    assert!(
        cmd.authenticate("john.doe@recipebox.localhos", "my_password")
            .await?
            .is_none()
    );

    let found = cmd
        .authenticate("john.doe@RECIPEBOX.LOCALHOST", "my_password")
        .await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

#[tokio::test]
async fn inactive_user_cannot_authenticate() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = recipebox_user::Command(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;
    cmd.deactivate(user.id).await?;

    assert!(
        cmd.authenticate("john.doe@recipebox.localhost", "my_password")
            .await?
            .is_none()
    );

    cmd.activate(user.id).await?;

    assert!(
        cmd.authenticate("john.doe@recipebox.localhost", "my_password")
            .await?
            .is_some()
    );

    Ok(())
}

#[tokio::test]
async fn update_name_and_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = recipebox_user::Command(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;

    let updated = cmd
        .update(
            user.id,
            UpdateInput {
                name: Some("John Doe".to_owned()),
                password: Some("new_password".to_owned()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.name, "John Doe");
    assert_eq!(updated.email, user.email);
    assert!(updated.check_password("new_password"));
    assert!(!updated.check_password("my_password"));

    let renamed_only = cmd
        .update(
            user.id,
            UpdateInput {
                name: Some("J. Doe".to_owned()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(renamed_only.name, "J. Doe");
    assert!(renamed_only.check_password("new_password"));

    Ok(())
}

#[tokio::test]
async fn update_changes_email() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = recipebox_user::Command(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;
    helpers::create_user(&cmd, "jane").await?;

    let updated = cmd
        .update(
            user.id,
            UpdateInput {
                email: Some("John.Doe@EXAMPLE.com".to_owned()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.email, "John.Doe@example.com");
    assert!(cmd.authenticate("John.Doe@example.com", "my_password").await?.is_some());

    let unchanged = cmd
        .update(
            user.id,
            UpdateInput {
                email: Some("John.Doe@example.com".to_owned()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(unchanged.email, "John.Doe@example.com");

    let taken = cmd
        .update(
            user.id,
            UpdateInput {
                email: Some("jane@RECIPEBOX.localhost".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        taken.unwrap_err(),
        recipebox_shared::Error::User(_)
    ));

    let invalid = cmd
        .update(
            user.id,
            UpdateInput {
                email: Some("not-an-email".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        invalid.unwrap_err(),
        recipebox_shared::Error::Validate(_)
    ));

    Ok(())
}

#[tokio::test]
async fn update_rejects_short_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = recipebox_user::Command(state);

    let user = helpers::create_user(&cmd, "john.doe").await?;

    let resp = cmd
        .update(
            user.id,
            UpdateInput {
                password: Some("abc".to_owned()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        resp.unwrap_err(),
        recipebox_shared::Error::Validate(_)
    ));

    let missing = cmd.update(9999, UpdateInput::default()).await;
    assert!(matches!(
        missing.unwrap_err(),
        recipebox_shared::Error::NotFound(_)
    ));

    Ok(())
}
