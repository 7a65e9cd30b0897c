// src/accounts/intent.rs
use serde::Serialize;

use super::validation::NewUserForm;
use crate::models::company::Company;

/// What an accepted account form asks the backend to do.
#[derive(Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CreationIntent {
    ExistingCompany {
        company_id: i64,
        email: String,
        name: String,
        #[serde(skip_serializing)]
        password: String,
    },
    NewCompany {
        company_name: String,
        email: String,
        name: String,
        #[serde(skip_serializing)]
        password: String,
    },
}

impl std::fmt::Debug for CreationIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreationIntent::ExistingCompany { company_id, email, .. } => f
                .debug_struct("ExistingCompany")
                .field("company_id", company_id)
                .field("email", email)
                .finish_non_exhaustive(),
            CreationIntent::NewCompany { company_name, email, .. } => f
                .debug_struct("NewCompany")
                .field("company_name", company_name)
                .field("email", email)
                .finish_non_exhaustive(),
        }
    }
}

impl CreationIntent {
    pub fn email(&self) -> &str {
        match self {
            CreationIntent::ExistingCompany { email, .. }
            | CreationIntent::NewCompany { email, .. } => email,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CreationIntent::ExistingCompany { name, .. }
            | CreationIntent::NewCompany { name, .. } => name,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            CreationIntent::ExistingCompany { password, .. }
            | CreationIntent::NewCompany { password, .. } => password,
        }
    }
}

/// Picks the existing company whose name matches exactly (case-sensitive),
/// otherwise asks for a new company with the typed name.
pub fn resolve_intent(form: &NewUserForm, companies: &[Company]) -> CreationIntent {
    let email = form.email.trim().to_string();
    let name = form.name.trim().to_string();
    let password = form.password.clone();

    match companies.iter().find(|c| c.name == form.company_name) {
        Some(company) => CreationIntent::ExistingCompany {
            company_id: company.id,
            email,
            name,
            password,
        },
        None => CreationIntent::NewCompany {
            company_name: form.company_name.clone(),
            email,
            name,
            password,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> Vec<Company> {
        vec![
            Company { id: 1, name: "Globex".into() },
            Company { id: 7, name: "Acme".into() },
        ]
    }

    fn form(company: &str) -> NewUserForm {
        NewUserForm {
            email: "ann@acme.test".into(),
            name: "Ann".into(),
            company_name: company.into(),
            password: "longenough".into(),
            confirmed_password: "longenough".into(),
        }
    }

    #[test]
    fn matching_name_uses_existing_company() {
        match resolve_intent(&form("Acme"), &directory()) {
            CreationIntent::ExistingCompany { company_id, .. } => assert_eq!(company_id, 7),
            other => panic!("unexpected intent {other:?}"),
        }
    }

    #[test]
    fn match_is_case_sensitive() {
        let intent = resolve_intent(&form("acme"), &directory());
        assert!(matches!(
            intent,
            CreationIntent::NewCompany { ref company_name, .. } if company_name == "acme"
        ));
    }

    #[test]
    fn accessors_expose_shared_fields() {
        let intent = resolve_intent(&form("Initech"), &directory());
        assert_eq!(intent.email(), "ann@acme.test");
        assert_eq!(intent.name(), "Ann");
        assert_eq!(intent.password(), "longenough");
    }
}
