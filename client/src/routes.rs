//! The site's routing surface.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use crate::util::auth::SIGN_IN_PATH;

/// Every page the site serves, by path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    SignIn,
    Generators,
    Subscription,
    About,
    Contact,
    PrivacyPolicy,
    Refund,
    SubscriptionSuccess,
    AccessDenied,
}

impl AppRoute {
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::SignIn,
        Self::Generators,
        Self::Subscription,
        Self::About,
        Self::Contact,
        Self::PrivacyPolicy,
        Self::Refund,
        Self::SubscriptionSuccess,
        Self::AccessDenied,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::SignIn => SIGN_IN_PATH,
            Self::Generators => "/generators",
            Self::Subscription => "/subscription",
            Self::About => "/about",
            Self::Contact => "/contact",
            Self::PrivacyPolicy => "/privacy-policy",
            Self::Refund => "/refund",
            Self::SubscriptionSuccess => "/subscription-success",
            Self::AccessDenied => "/access-denied",
        }
    }

    /// Match a location path; a single trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(trimmed) => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Whether the page needs a signed-in user.
    #[must_use]
    pub fn requires_auth(self) -> bool {
        matches!(self, Self::SubscriptionSuccess)
    }

    /// Sign-in location that returns to this page afterwards.
    #[must_use]
    pub fn sign_in_redirect(self) -> String {
        format!("{SIGN_IN_PATH}?next={}", self.path())
    }

    /// Where to land after signing in. Only known site paths are followed;
    /// anything else, including the sign-in page itself, goes to the generators.
    #[must_use]
    pub fn after_sign_in(next: Option<&str>) -> Self {
        next.and_then(Self::from_path)
            .filter(|route| *route != Self::SignIn)
            .unwrap_or(Self::Generators)
    }
}
