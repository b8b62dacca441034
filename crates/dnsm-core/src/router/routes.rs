/// Anonymous landing route (the login page)
pub const LOGIN_ROUTE: &str = "/";

/// Pseudo-route that tears the session down
pub const LOGOUT_ROUTE: &str = "/logout";

pub const ADMIN_ROUTE: &str = "/admin";

pub const DNS_ROUTE: &str = "/admin/dns";

pub const FORBIDDEN_ROUTE: &str = "/403";

/// Where a successful login lands
pub const LANDING_ROUTE: &str = DNS_ROUTE;

/// Title used when a route has none
pub const DEFAULT_TITLE: &str = "DNSM DNS Management";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub name: &'static str,
    /// `"*"` for the catch-all
    pub path: &'static str,
    pub title: Option<&'static str>,
    /// Hidden routes are left out of navigation menus and are public
    pub hidden: bool,
}

impl RouteDescriptor {
    pub fn requires_auth(&self) -> bool {
        !(self.path == LOGIN_ROUTE || self.hidden)
    }

    pub fn display_title(&self) -> &'static str {
        self.title.unwrap_or(DEFAULT_TITLE)
    }
}

pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        name: "Login",
        path: LOGIN_ROUTE,
        title: Some("Login"),
        hidden: true,
    },
    RouteDescriptor {
        name: "Logout",
        path: LOGOUT_ROUTE,
        title: Some("Log out"),
        hidden: true,
    },
    RouteDescriptor {
        name: "Admin",
        path: ADMIN_ROUTE,
        title: Some("Admin home"),
        hidden: false,
    },
    RouteDescriptor {
        name: "DNS",
        path: DNS_ROUTE,
        title: Some("Domain list"),
        hidden: false,
    },
    RouteDescriptor {
        name: "Forbidden",
        path: FORBIDDEN_ROUTE,
        title: Some("Forbidden"),
        hidden: true,
    },
];

pub const NOT_FOUND: RouteDescriptor = RouteDescriptor {
    name: "NotFound",
    path: "*",
    title: Some("Not found"),
    hidden: true,
};

/// Strip query, fragment and trailing slashes; ensure a leading slash.
pub fn normalize(path: &str) -> String {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        LOGIN_ROUTE.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Find the route for `path`, falling back to the catch-all
pub fn resolve(path: &str) -> RouteDescriptor {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .copied()
        .unwrap_or(NOT_FOUND)
}

/// Routes shown in navigation menus
pub fn menu() -> impl Iterator<Item = &'static RouteDescriptor> {
    ROUTES.iter().filter(|r| !r.hidden)
}
