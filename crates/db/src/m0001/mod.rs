mod ingredient;
mod recipe;
mod recipe_ingredient;
mod recipe_tag;
mod tag;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "recipebox",
    "m0001",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateUk1,
        recipe::CreateTable,
        recipe::CreateIdx1,
        tag::CreateTable,
        tag::CreateIdx1,
        ingredient::CreateTable,
        ingredient::CreateIdx1,
        recipe_tag::CreateTable,
        recipe_tag::CreateIdx1,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIdx1
    ]
);
