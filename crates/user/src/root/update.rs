use validator::Validate;

use crate::repository;

#[derive(Validate, Default)]
pub struct UpdateInput {
    #[validate(email(message = "Enter a valid email address."), length(max = 255))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub name: Option<String>,
    #[validate(length(
        min = 5,
        max = 128,
        message = "Ensure this field has at least 5 characters."
    ))]
    pub password: Option<String>,
}

impl super::Command {
    pub async fn update(&self, id: i64, input: UpdateInput) -> recipebox_shared::Result<super::User> {
        input.validate()?;
        let user = self.load(id).await?;

        let email = input.email.map(|email| crate::normalize_email(&email));

        if let Some(email) = email.as_ref().filter(|email| **email != user.email)
            && repository::find(&self.write_db, repository::FindType::Email(email.to_owned()))
                .await?
                .is_some()
        {
            recipebox_shared::user!("user with this email already exists.");
        }

        let password = match input.password {
            Some(password) => Some(crate::password::hash_password(&password)?),
            _ => None,
        };

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id,
                email,
                name: input.name,
                password,
                ..Default::default()
            },
        )
        .await?;

        self.load(id).await
    }
}
