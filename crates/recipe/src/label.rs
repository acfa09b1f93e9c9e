use std::collections::HashMap;

use recipebox_db::table::{Ingredient, RecipeIngredient, RecipeTag, Tag};
use sea_query::{DynIden, Expr, ExprTrait, IntoIden, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool, prelude::FromRow};
use validator::Validate;

/// Tags and ingredients share the same shape: a user-owned name linked to
/// recipes through a join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Tag,
    Ingredient,
}

impl LabelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabelKind::Tag => "tag",
            LabelKind::Ingredient => "ingredient",
        }
    }

    fn table(self) -> LabelTable {
        match self {
            LabelKind::Tag => LabelTable {
                table: Tag::Table.into_iden(),
                id: Tag::Id.into_iden(),
                user_id: Tag::UserId.into_iden(),
                name: Tag::Name.into_iden(),
                link: RecipeTag::Table.into_iden(),
                link_recipe_id: RecipeTag::RecipeId.into_iden(),
                link_label_id: RecipeTag::TagId.into_iden(),
            },
            LabelKind::Ingredient => LabelTable {
                table: Ingredient::Table.into_iden(),
                id: Ingredient::Id.into_iden(),
                user_id: Ingredient::UserId.into_iden(),
                name: Ingredient::Name.into_iden(),
                link: RecipeIngredient::Table.into_iden(),
                link_recipe_id: RecipeIngredient::RecipeId.into_iden(),
                link_label_id: RecipeIngredient::IngredientId.into_iden(),
            },
        }
    }
}

struct LabelTable {
    table: DynIden,
    id: DynIden,
    user_id: DynIden,
    name: DynIden,
    link: DynIden,
    link_recipe_id: DynIden,
    link_label_id: DynIden,
}

impl LabelTable {
    fn col(&self, column: &DynIden) -> (DynIden, DynIden) {
        (self.table.clone(), column.clone())
    }

    fn link_col(&self, column: &DynIden) -> (DynIden, DynIden) {
        (self.link.clone(), column.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LabelInput {
    #[validate(
        length(max = 255, message = "Ensure this field has no more than 255 characters."),
        custom(function = "crate::validate_not_blank")
    )]
    pub name: String,
}

#[derive(Clone)]
pub struct LabelCommand {
    state: recipebox_shared::State,
    kind: LabelKind,
}

impl LabelCommand {
    pub(crate) fn new(state: recipebox_shared::State, kind: LabelKind) -> Self {
        Self { state, kind }
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    /// Lists the user's labels by name, descending. With `assigned_only`
    /// only labels linked to at least one recipe are returned, once each.
    pub async fn list(
        &self,
        user_id: i64,
        assigned_only: bool,
    ) -> recipebox_shared::Result<Vec<Label>> {
        let t = self.kind.table();
        let mut statement = Query::select()
            .column(t.col(&t.id))
            .column(t.col(&t.name))
            .from(t.table.clone())
            .and_where(Expr::col(t.col(&t.user_id)).eq(user_id))
            .order_by(t.col(&t.name), Order::Desc)
            .order_by(t.col(&t.id), Order::Desc)
            .to_owned();

        if assigned_only {
            statement.distinct().inner_join(
                t.link.clone(),
                Expr::col(t.link_col(&t.link_label_id)).equals(t.col(&t.id)),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Label, _>(&sql, values)
            .fetch_all(&self.state.read_db)
            .await?)
    }

    pub async fn find(&self, id: i64, user_id: i64) -> recipebox_shared::Result<Option<Label>> {
        find(&self.state.read_db, self.kind, id, user_id).await
    }

    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        input: LabelInput,
    ) -> recipebox_shared::Result<Label> {
        input.validate()?;

        let t = self.kind.table();
        let statement = Query::update()
            .table(t.table.clone())
            .value(t.name.clone(), input.name.clone())
            .and_where(Expr::col(t.id.clone()).eq(id))
            .and_where(Expr::col(t.user_id.clone()).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.state.write_db)
            .await?;

        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("{} {id}", self.kind.as_str());
        }

        tracing::info!(kind = self.kind.as_str(), id, user = user_id, "label renamed");

        Ok(Label {
            id,
            name: input.name,
        })
    }

    pub async fn delete(&self, id: i64, user_id: i64) -> recipebox_shared::Result<()> {
        let t = self.kind.table();
        let statement = Query::delete()
            .from_table(t.table.clone())
            .and_where(Expr::col(t.id.clone()).eq(id))
            .and_where(Expr::col(t.user_id.clone()).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.state.write_db)
            .await?;

        if result.rows_affected() == 0 {
            recipebox_shared::not_found!("{} {id}", self.kind.as_str());
        }

        tracing::info!(kind = self.kind.as_str(), id, user = user_id, "label deleted");

        Ok(())
    }
}

async fn find(
    pool: &SqlitePool,
    kind: LabelKind,
    id: i64,
    user_id: i64,
) -> recipebox_shared::Result<Option<Label>> {
    let t = kind.table();
    let statement = Query::select()
        .columns([t.id.clone(), t.name.clone()])
        .from(t.table.clone())
        .and_where(Expr::col(t.id.clone()).eq(id))
        .and_where(Expr::col(t.user_id.clone()).eq(user_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, Label, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

/// Returns the oldest label of `kind` with this name for the user, creating
/// it when none exists.
pub(crate) async fn get_or_create(
    conn: &mut SqliteConnection,
    kind: LabelKind,
    user_id: i64,
    name: &str,
) -> recipebox_shared::Result<i64> {
    let t = kind.table();
    let statement = Query::select()
        .column(t.id.clone())
        .from(t.table.clone())
        .and_where(Expr::col(t.user_id.clone()).eq(user_id))
        .and_where(Expr::col(t.name.clone()).eq(name))
        .order_by(t.id.clone(), Order::Asc)
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    if let Some((id,)) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(id);
    }

    let statement = Query::insert()
        .into_table(t.table.clone())
        .columns([t.user_id.clone(), t.name.clone()])
        .values_panic([user_id.into(), name.into()])
        .returning_col(t.id.clone())
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (id,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(&mut *conn)
        .await?;

    tracing::debug!(kind = kind.as_str(), id, user = user_id, "label created");

    Ok(id)
}

pub(crate) async fn link(
    conn: &mut SqliteConnection,
    kind: LabelKind,
    recipe_id: i64,
    label_id: i64,
) -> recipebox_shared::Result<()> {
    let t = kind.table();
    let statement = Query::insert()
        .into_table(t.link.clone())
        .columns([t.link_recipe_id.clone(), t.link_label_id.clone()])
        .values_panic([recipe_id.into(), label_id.into()])
        .on_conflict(
            OnConflict::columns([t.link_recipe_id.clone(), t.link_label_id.clone()])
                .do_nothing()
                .to_owned(),
        )
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

pub(crate) async fn clear(
    conn: &mut SqliteConnection,
    kind: LabelKind,
    recipe_id: i64,
) -> recipebox_shared::Result<()> {
    let t = kind.table();
    let statement = Query::delete()
        .from_table(t.link.clone())
        .and_where(Expr::col(t.link_recipe_id.clone()).eq(recipe_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *conn).await?;

    Ok(())
}

/// Replaces the recipe's links of `kind` with the given names, resolving
/// each one through [`get_or_create`].
pub(crate) async fn assign(
    conn: &mut SqliteConnection,
    kind: LabelKind,
    user_id: i64,
    recipe_id: i64,
    labels: &[LabelInput],
) -> recipebox_shared::Result<()> {
    clear(conn, kind, recipe_id).await?;

    for label in labels {
        let label_id = get_or_create(conn, kind, user_id, &label.name).await?;
        link(conn, kind, recipe_id, label_id).await?;
    }

    Ok(())
}

#[derive(FromRow)]
struct LinkedLabel {
    recipe_id: i64,
    id: i64,
    name: String,
}

/// Loads the labels of `kind` for every recipe in `recipe_ids`, keyed by recipe.
pub(crate) async fn for_recipes(
    pool: &SqlitePool,
    kind: LabelKind,
    recipe_ids: &[i64],
) -> recipebox_shared::Result<HashMap<i64, Vec<Label>>> {
    if recipe_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let t = kind.table();
    let statement = Query::select()
        .column(t.link_col(&t.link_recipe_id))
        .column(t.col(&t.id))
        .column(t.col(&t.name))
        .from(t.link.clone())
        .inner_join(
            t.table.clone(),
            Expr::col(t.link_col(&t.link_label_id)).equals(t.col(&t.id)),
        )
        .and_where(Expr::col(t.link_col(&t.link_recipe_id)).is_in(recipe_ids.iter().copied()))
        .order_by(t.col(&t.id), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows = sqlx::query_as_with::<_, LinkedLabel, _>(&sql, values)
        .fetch_all(pool)
        .await?;

    let mut labels: HashMap<i64, Vec<Label>> = HashMap::new();
    for row in rows {
        labels.entry(row.recipe_id).or_default().push(Label {
            id: row.id,
            name: row.name,
        });
    }

    Ok(labels)
}
