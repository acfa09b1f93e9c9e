use recipebox_db::table::User;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use time::OffsetDateTime;

pub enum FindType {
    Id(i64),
    Email(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> recipebox_shared::Result<Option<crate::User>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Name,
            User::Password,
            User::IsStaff,
            User::IsActive,
            User::IsSuperuser,
            User::CreatedAt,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, crate::User, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) struct CreateInput {
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> recipebox_shared::Result<i64> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Name,
            User::Password,
            User::IsStaff,
            User::IsActive,
            User::IsSuperuser,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.name.into(),
            input.password.into(),
            input.is_staff.into(),
            true.into(),
            input.is_superuser.into(),
            now.into(),
        ])
        .returning_col(User::Id)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    match sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await
    {
        Ok((id,)) => Ok(id),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            recipebox_shared::user!("user with this email already exists.")
        }
        Err(err) => Err(err.into()),
    }
}

#[derive(Default)]
pub(crate) struct UpdateInput {
    pub id: i64,
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

pub(crate) async fn update(pool: &SqlitePool, input: UpdateInput) -> recipebox_shared::Result<()> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(input.id))
        .to_owned();

    let mut changed = false;

    if let Some(email) = input.email {
        statement.value(User::Email, email);
        changed = true;
    }

    if let Some(name) = input.name {
        statement.value(User::Name, name);
        changed = true;
    }

    if let Some(password) = input.password {
        statement.value(User::Password, password);
        changed = true;
    }

    if let Some(is_active) = input.is_active {
        statement.value(User::IsActive, is_active);
        changed = true;
    }

    if !changed {
        return Ok(());
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    match sqlx::query_with(&sql, values).execute(pool).await {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
            recipebox_shared::user!("user with this email already exists.")
        }
        Err(err) => Err(err.into()),
    }
}
