// src/accounts/validation.rs
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// Password empty, too short, or not confirmed.
    #[error("Passwords must match and be at least 8 characters")]
    PasswordsDontMatch,
    #[error("Email, name and company name are required")]
    MissingFields,
    #[error("Email and password are required")]
    MissingCredentials,
}

/// Account form used both by the admin console and self-service
/// registration.
#[derive(Clone, Default, Deserialize)]
pub struct NewUserForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "companyName")]
    pub company_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "confirmedPassword")]
    pub confirmed_password: String,
}

impl fmt::Debug for NewUserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUserForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("company_name", &self.company_name)
            .finish_non_exhaustive()
    }
}

impl NewUserForm {
    // Password rules are checked before required fields.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.password.is_empty()
            || self.password.chars().count() < MIN_PASSWORD_LEN
            || self.password != self.confirmed_password
        {
            return Err(FormError::PasswordsDontMatch);
        }
        if [&self.email, &self.name, &self.company_name]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm").field("email", &self.email).finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewUserForm {
        NewUserForm {
            email: "ann@acme.test".into(),
            name: "Ann".into(),
            company_name: "Acme".into(),
            password: "longenough".into(),
            confirmed_password: "longenough".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn short_password_fails_even_when_confirmed() {
        let f = NewUserForm {
            password: "short".into(),
            confirmed_password: "short".into(),
            ..form()
        };
        assert_eq!(f.validate(), Err(FormError::PasswordsDontMatch));
    }

    #[test]
    fn mismatch_fails() {
        let f = NewUserForm { confirmed_password: "longenougH".into(), ..form() };
        assert_eq!(f.validate(), Err(FormError::PasswordsDontMatch));
    }

    #[test]
    fn password_checked_before_missing_fields() {
        let f = NewUserForm { email: String::new(), password: String::new(), ..form() };
        assert_eq!(f.validate(), Err(FormError::PasswordsDontMatch));
    }

    #[test]
    fn blank_company_is_missing() {
        let f = NewUserForm { company_name: "   ".into(), ..form() };
        assert_eq!(f.validate(), Err(FormError::MissingFields));
    }

    #[test]
    fn login_requires_both_fields() {
        let login = LoginForm { email: "a@b.c".into(), password: String::new() };
        assert_eq!(login.validate(), Err(FormError::MissingCredentials));
        let login = LoginForm { email: "a@b.c".into(), password: "x".into() };
        assert_eq!(login.validate(), Ok(()));
    }

    #[test]
    fn errors_carry_form_messages() {
        let err: Box<dyn std::error::Error> = Box::new(FormError::MissingCredentials);
        assert_eq!(err.to_string(), "Email and password are required");
        assert_eq!(
            FormError::PasswordsDontMatch.to_string(),
            "Passwords must match and be at least 8 characters"
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", form());
        assert!(!rendered.contains("longenough"));
    }
}
