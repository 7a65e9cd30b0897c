// src/auth/guard.rs
//
// Page access rules for the front end. The client asks where a path should
// lead for the current session and follows the answer.
use serde::Serialize;

use super::jwt::Claims;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    SignedIn { is_admin: bool, is_approved: bool },
}

impl From<&Claims> for Session {
    fn from(claims: &Claims) -> Self {
        Session::SignedIn {
            is_admin: claims.is_admin,
            is_approved: claims.is_approved,
        }
    }
}

impl Session {
    pub fn is_approved(&self) -> bool {
        matches!(self, Session::SignedIn { is_approved: true, .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Session::SignedIn { is_admin: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    Redirect { to: &'static str },
    /// Protected page requested without a session: the login form is shown
    /// in place.
    ShowLogin,
    NotFound,
}

pub const HOME: &str = "/home";
pub const WAITING_PAGE: &str = "/waiting-page";

const PUBLIC_PAGES: &[&str] = &["/about", "/contact", WAITING_PAGE];
const PROTECTED_PAGES: &[&str] = &[
    HOME,
    "/cost-and-pricing",
    "/my-account-page",
    "/tool-two",
    "/tool-three",
];

pub fn route_decision(session: &Session, path: &str) -> RouteDecision {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    match path {
        "/" => RouteDecision::Redirect { to: HOME },
        "/login" | "/registration" => {
            if session.is_approved() {
                RouteDecision::Redirect { to: HOME }
            } else {
                RouteDecision::Allow
            }
        }
        "/admin" => match session {
            Session::Anonymous => RouteDecision::ShowLogin,
            s if s.is_admin() => RouteDecision::Allow,
            _ => RouteDecision::Redirect { to: HOME },
        },
        p if PUBLIC_PAGES.contains(&p) => RouteDecision::Allow,
        p if PROTECTED_PAGES.contains(&p) => match session {
            Session::Anonymous => RouteDecision::ShowLogin,
            s if s.is_approved() || s.is_admin() => RouteDecision::Allow,
            _ => RouteDecision::Redirect { to: WAITING_PAGE },
        },
        _ => RouteDecision::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER: Session = Session::SignedIn { is_admin: false, is_approved: true };
    const PENDING: Session = Session::SignedIn { is_admin: false, is_approved: false };
    const ADMIN: Session = Session::SignedIn { is_admin: true, is_approved: true };

    #[test]
    fn root_redirects_home() {
        assert_eq!(route_decision(&Session::Anonymous, "/"), RouteDecision::Redirect { to: HOME });
    }

    #[test]
    fn admin_page_requires_admin_flag() {
        assert_eq!(route_decision(&ADMIN, "/admin"), RouteDecision::Allow);
        assert_eq!(route_decision(&MEMBER, "/admin"), RouteDecision::Redirect { to: HOME });
        assert_eq!(route_decision(&Session::Anonymous, "/admin"), RouteDecision::ShowLogin);
    }

    #[test]
    fn approved_users_skip_login_and_registration() {
        assert_eq!(route_decision(&MEMBER, "/login"), RouteDecision::Redirect { to: HOME });
        assert_eq!(route_decision(&MEMBER, "/registration/"), RouteDecision::Redirect { to: HOME });
        assert_eq!(route_decision(&PENDING, "/login"), RouteDecision::Allow);
    }

    #[test]
    fn protected_pages_need_a_session() {
        assert_eq!(route_decision(&Session::Anonymous, "/cost-and-pricing"), RouteDecision::ShowLogin);
        assert_eq!(route_decision(&MEMBER, "/cost-and-pricing"), RouteDecision::Allow);
        assert_eq!(
            route_decision(&PENDING, "/home"),
            RouteDecision::Redirect { to: WAITING_PAGE }
        );
    }

    #[test]
    fn public_and_unknown_pages() {
        assert_eq!(route_decision(&Session::Anonymous, "/about"), RouteDecision::Allow);
        assert_eq!(route_decision(&MEMBER, "/nope"), RouteDecision::NotFound);
    }
}
