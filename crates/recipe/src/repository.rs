use recipebox_db::table::{Recipe, RecipeIngredient, RecipeTag};
use rust_decimal::Decimal;
use sea_query::{Expr, ExprTrait, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool, prelude::FromRow, types::Text};
use time::OffsetDateTime;

#[derive(FromRow)]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub time_minutes: i64,
    pub price: Text<Decimal>,
    pub link: Option<String>,
    pub image: Option<String>,
    pub created_at: i64,
}

fn select() -> SelectStatement {
    Query::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::UserId),
            (Recipe::Table, Recipe::Title),
            (Recipe::Table, Recipe::Description),
            (Recipe::Table, Recipe::TimeMinutes),
            (Recipe::Table, Recipe::Price),
            (Recipe::Table, Recipe::Link),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::CreatedAt),
        ])
        .from(Recipe::Table)
        .to_owned()
}

pub(crate) async fn find<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: i64,
    user_id: i64,
) -> recipebox_shared::Result<Option<RecipeRow>> {
    let statement = select()
        .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
        .and_where(Expr::col((Recipe::Table, Recipe::UserId)).eq(user_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_optional(executor)
        .await?)
}

pub(crate) struct FilterInput {
    pub user_id: i64,
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

pub(crate) async fn filter(
    pool: &SqlitePool,
    input: FilterInput,
) -> recipebox_shared::Result<Vec<RecipeRow>> {
    let mut statement = select()
        .and_where(Expr::col((Recipe::Table, Recipe::UserId)).eq(input.user_id))
        .order_by((Recipe::Table, Recipe::Id), Order::Desc)
        .to_owned();

    if !input.tags.is_empty() {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                Query::select()
                    .column(RecipeTag::RecipeId)
                    .from(RecipeTag::Table)
                    .and_where(Expr::col(RecipeTag::TagId).is_in(input.tags))
                    .to_owned(),
            ),
        );
    }

    if !input.ingredients.is_empty() {
        statement.and_where(
            Expr::col((Recipe::Table, Recipe::Id)).in_subquery(
                Query::select()
                    .column(RecipeIngredient::RecipeId)
                    .from(RecipeIngredient::Table)
                    .and_where(Expr::col(RecipeIngredient::IngredientId).is_in(input.ingredients))
                    .to_owned(),
            ),
        );
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
        .fetch_all(pool)
        .await?)
}

pub(crate) struct CreateInput {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub time_minutes: i64,
    pub price: String,
    pub link: Option<String>,
}

pub(crate) async fn create(
    conn: &mut SqliteConnection,
    input: CreateInput,
) -> recipebox_shared::Result<i64> {
    let statement = Query::insert()
        .into_table(Recipe::Table)
        .columns([
            Recipe::UserId,
            Recipe::Title,
            Recipe::Description,
            Recipe::TimeMinutes,
            Recipe::Price,
            Recipe::Link,
            Recipe::CreatedAt,
        ])
        .values_panic([
            input.user_id.into(),
            input.title.into(),
            input.description.into(),
            input.time_minutes.into(),
            input.price.into(),
            input.link.into(),
            OffsetDateTime::now_utc().unix_timestamp().into(),
        ])
        .returning_col(Recipe::Id)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (id,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(conn)
        .await?;

    Ok(id)
}

#[derive(Default)]
pub(crate) struct UpdateInput {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time_minutes: Option<i64>,
    pub price: Option<String>,
    /// `Some(None)` clears the link.
    pub link: Option<Option<String>>,
}

pub(crate) async fn update(
    conn: &mut SqliteConnection,
    input: UpdateInput,
) -> recipebox_shared::Result<()> {
    let mut statement = Query::update()
        .table(Recipe::Table)
        .value(
            Recipe::UpdatedAt,
            OffsetDateTime::now_utc().unix_timestamp(),
        )
        .and_where(Expr::col(Recipe::Id).eq(input.id))
        .and_where(Expr::col(Recipe::UserId).eq(input.user_id))
        .to_owned();

    if let Some(title) = input.title {
        statement.value(Recipe::Title, title);
    }

    if let Some(description) = input.description {
        statement.value(Recipe::Description, description);
    }

    if let Some(time_minutes) = input.time_minutes {
        statement.value(Recipe::TimeMinutes, time_minutes);
    }

    if let Some(price) = input.price {
        statement.value(Recipe::Price, price);
    }

    if let Some(link) = input.link {
        statement.value(Recipe::Link, link);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(conn).await?;

    Ok(())
}

pub(crate) async fn update_image(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
    image: &str,
) -> recipebox_shared::Result<()> {
    let statement = Query::update()
        .table(Recipe::Table)
        .value(Recipe::Image, image)
        .value(
            Recipe::UpdatedAt,
            OffsetDateTime::now_utc().unix_timestamp(),
        )
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn delete(
    pool: &SqlitePool,
    id: i64,
    user_id: i64,
) -> recipebox_shared::Result<u64> {
    let statement = Query::delete()
        .from_table(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id))
        .and_where(Expr::col(Recipe::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.rows_affected())
}
