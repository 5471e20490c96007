//! Path-to-view mapping for the single-page front end.
//!
//! Paths are hash-based (`#/conversations/abc`); the leading `#` is optional
//! when resolving. Only the mapping lives here, navigation is up to the caller.

use serde::{Deserialize, Serialize};

/// Views reachable from the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// Username entry, the landing page
    Login,

    /// Conversation list
    Home,

    /// A single conversation
    Chat { conversation_id: String },

    /// The logged-in user's profile
    Profile,

    /// Group management, optionally focused on one group
    Groups { group_id: Option<String> },
}

/// Outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Show(View),
    /// The path is an alias; navigate to the target instead.
    Redirect(View),
}

impl Route {
    /// The view that ends up on screen.
    pub fn view(&self) -> &View {
        match self {
            Self::Show(view) | Self::Redirect(view) => view,
        }
    }
}

impl View {
    /// Canonical hash path for this view, without the `#`.
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Home => "/home".to_string(),
            Self::Chat { conversation_id } => format!("/conversations/{}", conversation_id),
            Self::Profile => "/profile".to_string(),
            Self::Groups { group_id: None } => "/groups".to_string(),
            Self::Groups { group_id: Some(id) } => format!("/groups/{}", id),
        }
    }

    /// Route name as registered with the router.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Home => "home",
            Self::Chat { .. } => "chat",
            Self::Profile => "profile",
            Self::Groups { .. } => "groups",
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Profile)
    }
}

/// Map a path to a view. Unknown paths resolve to `None`.
pub fn resolve(path: &str) -> Option<Route> {
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        [] => Route::Redirect(View::Login),
        ["login"] => Route::Show(View::Login),
        ["home"] => Route::Show(View::Home),
        ["conversations", id] => Route::Show(View::Chat {
            conversation_id: (*id).to_string(),
        }),
        ["profile"] => Route::Show(View::Profile),
        ["groups"] => Route::Show(View::Groups { group_id: None }),
        ["groups", id] => Route::Show(View::Groups {
            group_id: Some((*id).to_string()),
        }),
        _ => return None,
    };

    Some(route)
}

/// Send auth-required views to the login page when there is no session.
pub fn guard(route: Route, has_session: bool) -> Route {
    if route.view().requires_auth() && !has_session {
        Route::Redirect(View::Login)
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects_to_login() {
        assert_eq!(resolve("/"), Some(Route::Redirect(View::Login)));
        assert_eq!(resolve("#/"), Some(Route::Redirect(View::Login)));
        assert_eq!(resolve(""), Some(Route::Redirect(View::Login)));
    }

    #[test]
    fn chat_route_captures_conversation_id() {
        let route = resolve("#/conversations/abc-123").unwrap();
        assert_eq!(
            route,
            Route::Show(View::Chat {
                conversation_id: "abc-123".into()
            })
        );
        assert_eq!(route.view().name(), "chat");
        assert_eq!(route.view().path(), "/conversations/abc-123");
    }

    #[test]
    fn group_id_is_optional() {
        assert_eq!(
            resolve("/groups/").unwrap().view(),
            &View::Groups { group_id: None }
        );
        assert_eq!(
            resolve("/groups/g1?tab=members").unwrap().view(),
            &View::Groups {
                group_id: Some("g1".into())
            }
        );
    }

    #[test]
    fn unknown_paths_do_not_resolve() {
        assert_eq!(resolve("/conversations"), None);
        assert_eq!(resolve("/home/extra"), None);
        assert_eq!(resolve("/settings"), None);
    }

    #[test]
    fn profile_needs_a_session() {
        let route = resolve("/profile").unwrap();
        assert_eq!(guard(route.clone(), true), route);
        assert_eq!(guard(route, false), Route::Redirect(View::Login));

        let home = resolve("/home").unwrap();
        assert_eq!(guard(home.clone(), false), home);
    }

    #[test]
    fn paths_round_trip_through_resolve() {
        for view in [
            View::Login,
            View::Home,
            View::Profile,
            View::Groups { group_id: None },
            View::Chat {
                conversation_id: "c9".into(),
            },
        ] {
            assert_eq!(resolve(&view.path()), Some(Route::Show(view)));
        }
    }
}
