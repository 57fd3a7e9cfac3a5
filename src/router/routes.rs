//! Route metadata consumed by the navigation guard.
//!
//! Each route declares whether it requires an authenticated session. The
//! guard only reads this table; it never mutates it.

/// A route entry: stable name, path, and auth requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMeta {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
}

/// Name of the login route.
pub const ROUTE_LOGIN: &str = "login";

/// Default landing route for authenticated users.
pub const ROUTE_LANDING: &str = "antennas-list";

/// The application route table.
pub fn routes() -> Vec<RouteMeta> {
    vec![
        RouteMeta { name: "index", path: "/", requires_auth: false },
        RouteMeta { name: ROUTE_LOGIN, path: "/app/login", requires_auth: false },
        RouteMeta { name: ROUTE_LANDING, path: "/antennas", requires_auth: true },
        RouteMeta { name: "antennas-create", path: "/antennas/new", requires_auth: true },
    ]
}

/// Look a route up by its stable name.
pub fn route_by_name(name: &str) -> Option<RouteMeta> {
    routes().into_iter().find(|r| r.name == name)
}
