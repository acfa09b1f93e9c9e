use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Name,
    Password,
    IsStaff,
    IsActive,
    IsSuperuser,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    UserId,
    Title,
    Description,
    TimeMinutes,
    Price,
    Link,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    UserId,
    Name,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    UserId,
    Name,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientId,
}
