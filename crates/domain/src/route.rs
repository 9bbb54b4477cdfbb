//! Navigable screens and their access tiers.
//!
//! The route table is static configuration. Every screen belongs to exactly
//! one tier, and any path that matches no screen resolves to the
//! authenticated landing screen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Who may render a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessTier {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    Authenticated,
    /// Signed-in admins only.
    Admin,
}

impl AccessTier {
    /// Returns true if this tier requires a signed-in user.
    #[must_use]
    pub const fn requires_user(self) -> bool {
        matches!(self, Self::Authenticated | Self::Admin)
    }
}

/// A screen of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Route {
    /// `/login`
    Login,
    /// `/signup`
    Signup,
    /// `/demo`
    Demo,
    /// `/demo/admin`
    DemoAdmin,
    /// `/`
    Dashboard,
    /// `/conversations`
    Conversations,
    /// `/conversations/:id`
    ConversationDetail {
        /// Conversation identifier from the path.
        id: String,
    },
    /// `/leads`
    Leads,
    /// `/settings`
    Settings,
    /// `/notifications`
    Notifications,
    /// `/admin`
    AdminOverview,
    /// `/admin/users`
    AdminUsers,
    /// `/admin/usage`
    AdminUsage,
    /// `/admin/whatsapp`
    AdminWhatsApp,
    /// `/admin/logs`
    AdminLogs,
}

impl Route {
    /// Screen shown to anonymous users who hit a protected route.
    pub const LOGIN: Self = Self::Login;

    /// Default screen for signed-in users.
    pub const LANDING: Self = Self::Dashboard;

    /// Matches a path against the route table.
    ///
    /// Query strings, fragments, and trailing slashes are ignored.
    /// Returns `None` for paths that match no screen.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["demo"] => Self::Demo,
            ["demo", "admin"] => Self::DemoAdmin,
            ["conversations"] => Self::Conversations,
            ["conversations", id] => Self::ConversationDetail {
                id: (*id).to_string(),
            },
            ["leads"] => Self::Leads,
            ["settings"] => Self::Settings,
            ["notifications"] => Self::Notifications,
            ["admin"] => Self::AdminOverview,
            ["admin", "users"] => Self::AdminUsers,
            ["admin", "usage"] => Self::AdminUsage,
            ["admin", "whatsapp"] => Self::AdminWhatsApp,
            ["admin", "logs"] => Self::AdminLogs,
            _ => return None,
        };
        Some(route)
    }

    /// Canonical path for this screen.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::ConversationDetail { id } => format!("/conversations/{id}"),
            other => other.static_path().to_string(),
        }
    }

    fn static_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Demo => "/demo",
            Self::DemoAdmin => "/demo/admin",
            Self::Dashboard => "/",
            Self::Conversations | Self::ConversationDetail { .. } => "/conversations",
            Self::Leads => "/leads",
            Self::Settings => "/settings",
            Self::Notifications => "/notifications",
            Self::AdminOverview => "/admin",
            Self::AdminUsers => "/admin/users",
            Self::AdminUsage => "/admin/usage",
            Self::AdminWhatsApp => "/admin/whatsapp",
            Self::AdminLogs => "/admin/logs",
        }
    }

    /// Access tier of this screen.
    #[must_use]
    pub const fn tier(&self) -> AccessTier {
        match self {
            Self::Login | Self::Signup | Self::Demo | Self::DemoAdmin => AccessTier::Public,
            Self::Dashboard
            | Self::Conversations
            | Self::ConversationDetail { .. }
            | Self::Leads
            | Self::Settings
            | Self::Notifications => AccessTier::Authenticated,
            Self::AdminOverview
            | Self::AdminUsers
            | Self::AdminUsage
            | Self::AdminWhatsApp
            | Self::AdminLogs => AccessTier::Admin,
        }
    }

    /// Human-readable screen title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Login => "Log in",
            Self::Signup => "Sign up",
            Self::Demo => "Demo",
            Self::DemoAdmin => "Demo (admin)",
            Self::Dashboard => "Dashboard",
            Self::Conversations => "Conversations",
            Self::ConversationDetail { .. } => "Conversation",
            Self::Leads => "Leads",
            Self::Settings => "Settings",
            Self::Notifications => "Notifications",
            Self::AdminOverview => "Admin",
            Self::AdminUsers => "Users",
            Self::AdminUsage => "Usage",
            Self::AdminWhatsApp => "WhatsApp accounts",
            Self::AdminLogs => "Webhook logs",
        }
    }

    /// Sidebar entries for the given session.
    ///
    /// The admin entry only appears for admins; anonymous sessions get none.
    #[must_use]
    pub fn menu_for(session: &Session) -> Vec<Self> {
        if !session.is_authenticated() {
            return Vec::new();
        }
        let mut menu = vec![
            Self::Dashboard,
            Self::Conversations,
            Self::Leads,
            Self::Settings,
            Self::Notifications,
        ];
        if session.is_admin() {
            menu.push(Self::AdminOverview);
        }
        menu
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::user::{Role, UserProfile};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Some(Route::Dashboard));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
        assert_eq!(Route::parse("/demo/admin"), Some(Route::DemoAdmin));
        assert_eq!(Route::parse("/admin/whatsapp"), Some(Route::AdminWhatsApp));
        assert_eq!(
            Route::parse("/conversations/c-42"),
            Some(Route::ConversationDetail {
                id: "c-42".to_string()
            })
        );
    }

    #[test]
    fn test_parse_ignores_query_and_trailing_slash() {
        assert_eq!(Route::parse("/leads/?status=new"), Some(Route::Leads));
        assert_eq!(Route::parse("/settings#flow"), Some(Route::Settings));
    }

    #[test]
    fn test_unmatched_paths() {
        assert_eq!(Route::parse("/nope"), None);
        assert_eq!(Route::parse("/admin/users/extra"), None);
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        let routes = [
            Route::Login,
            Route::Signup,
            Route::Demo,
            Route::DemoAdmin,
            Route::Dashboard,
            Route::Conversations,
            Route::ConversationDetail { id: "7".into() },
            Route::Leads,
            Route::Settings,
            Route::Notifications,
            Route::AdminOverview,
            Route::AdminUsers,
            Route::AdminUsage,
            Route::AdminWhatsApp,
            Route::AdminLogs,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Route::Signup.tier(), AccessTier::Public);
        assert_eq!(Route::DemoAdmin.tier(), AccessTier::Public);
        assert_eq!(Route::Leads.tier(), AccessTier::Authenticated);
        assert_eq!(
            Route::ConversationDetail { id: "1".into() }.tier(),
            AccessTier::Authenticated
        );
        assert_eq!(Route::AdminLogs.tier(), AccessTier::Admin);
    }

    #[test]
    fn test_menu_shows_admin_entry_only_to_admins() {
        let user = Session::authenticated(UserProfile::new("1", "a@b.co", Role::User));
        let admin = Session::authenticated(UserProfile::new("2", "o@b.co", Role::Admin));

        assert!(Route::menu_for(&Session::anonymous()).is_empty());
        assert!(!Route::menu_for(&user).contains(&Route::AdminOverview));
        assert_eq!(Route::menu_for(&admin).last(), Some(&Route::AdminOverview));
    }
}
