//! Account lifecycle: form validation, company resolution, storage and the
//! welcome email side-channel.

pub mod intent;
pub mod notify;
pub mod repository;
pub mod validation;

use bcrypt::hash;
use tracing::info;

use crate::error::AppError;
use crate::models::user::User;
use intent::{resolve_intent, CreationIntent};
use repository::{AccountRepository, NewAccount};
use validation::NewUserForm;

/// Validates the form, resolves the company and stores the user. Nothing
/// is stored when validation fails.
pub async fn create_from_form(
    repo: &dyn AccountRepository,
    form: &NewUserForm,
    approved: bool,
    bcrypt_cost: u32,
) -> Result<(User, CreationIntent), AppError> {
    form.validate()?;

    let companies = repo.list_companies().await?;
    let intent = resolve_intent(form, &companies);

    let password_hash = hash(intent.password(), bcrypt_cost)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;
    let account = NewAccount {
        email: intent.email().to_string(),
        name: intent.name().to_string(),
        password_hash,
        is_admin: false,
        is_approved: approved,
    };

    let user = match &intent {
        CreationIntent::ExistingCompany { company_id, .. } => {
            repo.create_user(account, Some(*company_id)).await?
        }
        CreationIntent::NewCompany { company_name, .. } => {
            repo.create_company_and_user(account, company_name).await?
        }
    };

    Ok((user, intent))
}

/// Creates an approved admin account unless the email is already taken.
pub async fn ensure_admin(
    repo: &dyn AccountRepository,
    email: &str,
    name: &str,
    password: &str,
    bcrypt_cost: u32,
) -> Result<(), AppError> {
    if repo.find_user_by_email(email).await?.is_some() {
        return Ok(());
    }
    let password_hash = hash(password, bcrypt_cost)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;
    repo.create_user(
        NewAccount {
            email: email.to_string(),
            name: name.to_string(),
            password_hash,
            is_admin: true,
            is_approved: true,
        },
        None,
    )
    .await?;
    info!(%email, "Bootstrap admin created");
    Ok(())
}
