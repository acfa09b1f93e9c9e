use std::str::FromStr;

use rust_decimal::Decimal;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn create_recipe_with_new_tags_and_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user_id = helpers::create_user(&state, "john").await?;
    let cmd = recipebox_recipe::Command(state);

    let mut input = helpers::recipe_input("Thai Prawn Curry");
    input.tags = helpers::labels(&["Thai", "Dinner"]);
    input.ingredients = helpers::labels(&["Prawns", "Coconut milk"]);

    let recipe = cmd.create(user_id, input).await?;

    assert_eq!(recipe.title, "Thai Prawn Curry");
    assert_eq!(recipe.user_id, user_id);
    assert_eq!(recipe.price.to_string(), "5.25");
    assert_eq!(recipe.image, None);
    assert_eq!(helpers::names(&recipe.tags), vec!["Thai", "Dinner"]);
    assert_eq!(
        helpers::names(&recipe.ingredients),
        vec!["Prawns", "Coconut milk"]
    );

    assert_eq!(cmd.tags().list(user_id, false).await?.len(), 2);
    assert_eq!(cmd.ingredients().list(user_id, false).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn create_recipe_with_existing_tag_reuses_it() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user_id = helpers::create_user(&state, "john").await?;
    let other_id = helpers::create_user(&state, "jane").await?;
    let cmd = recipebox_recipe::Command(state);

    let mut first = helpers::recipe_input("Pongal");
    first.tags = helpers::labels(&["Indian"]);
    let first = cmd.create(user_id, first).await?;

    let mut other = helpers::recipe_input("Dal");
    other.tags = helpers::labels(&["Indian"]);
    let other = cmd.create(other_id, other).await?;

    let mut second = helpers::recipe_input("Dosa");
    second.tags = helpers::labels(&["Indian", "Breakfast", "Indian"]);
    let second = cmd.create(user_id, second).await?;

    assert_eq!(second.tags[0].id, first.tags[0].id);
    assert_ne!(other.tags[0].id, first.tags[0].id);
    assert_eq!(helpers::names(&second.tags), vec!["Indian", "Breakfast"]);
    assert_eq!(cmd.tags().list(user_id, false).await?.len(), 2);
    assert_eq!(cmd.tags().list(other_id, false).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn create_recipe_rejects_invalid_input() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user_id = helpers::create_user(&state, "john").await?;
    let cmd = recipebox_recipe::Command(state);

    let mut input = helpers::recipe_input("");
    input.price = Decimal::from_str("5.555")?;
    input.tags = helpers::labels(&["ok", ""]);

    let Err(recipebox_shared::Error::Validate(errors)) = cmd.create(user_id, input).await else {
        panic!("expected a validation error");
    };

    let errors = errors.errors();
    assert!(errors.contains_key("title"));
    assert!(errors.contains_key("price"));
    assert!(errors.contains_key("tags"));

    assert!(cmd.list(user_id, Default::default()).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn find_is_scoped_to_owner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let user_id = helpers::create_user(&state, "john").await?;
    let other_id = helpers::create_user(&state, "jane").await?;
    let cmd = recipebox_recipe::Command(state);

    let recipe = helpers::create_recipe(&cmd, user_id, "Sample recipe").await?;

    let found = cmd.find(recipe.id, user_id).await?;
    assert_eq!(found.map(|r| r.description), Some("Sample description".to_owned()));
    assert!(cmd.find(recipe.id, other_id).await?.is_none());

    Ok(())
}
