use validator::Validate;

use crate::repository;

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Public registration payload, validated before it reaches [`CreateUserInput`].
#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email(message = "Enter a valid email address."), length(max = 255))]
    pub email: String,
    #[validate(length(
        min = 5,
        max = 128,
        message = "Ensure this field has at least 5 characters."
    ))]
    pub password: String,
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub name: String,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> recipebox_shared::Result<super::User> {
        input.validate()?;

        self.create_user(CreateUserInput {
            email: input.email,
            password: input.password,
            name: input.name,
        })
        .await
    }

    pub async fn create_user(&self, input: CreateUserInput) -> recipebox_shared::Result<super::User> {
        self.create(input, false).await
    }

    pub async fn create_superuser(
        &self,
        input: CreateUserInput,
    ) -> recipebox_shared::Result<super::User> {
        self.create(input, true).await
    }

    async fn create(
        &self,
        input: CreateUserInput,
        superuser: bool,
    ) -> recipebox_shared::Result<super::User> {
        if input.email.trim().is_empty() {
            recipebox_shared::user!("Please provide a valid email address");
        }

        let email = crate::normalize_email(&input.email);

        if repository::find(&self.write_db, repository::FindType::Email(email.to_owned()))
            .await?
            .is_some()
        {
            recipebox_shared::user!("user with this email already exists.");
        }

        let password = crate::password::hash_password(&input.password)?;

        let id = repository::create(
            &self.write_db,
            repository::CreateInput {
                email,
                name: input.name,
                password,
                is_staff: superuser,
                is_superuser: superuser,
            },
        )
        .await?;

        tracing::info!(user = id, superuser, "user created");

        self.load(id).await
    }
}
