//! Route table for the client.
//!
//! Screens are addressed by rooted paths, so a `--route` argument reads
//! like a URL: `/`, `/login`, `/register`, `/news`, `/profile`.

/// A navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    News,
    Profile,
}

/// All routes in navigation order.
pub const ROUTES: &[Route] = &[
    Route::Home,
    Route::Login,
    Route::Register,
    Route::News,
    Route::Profile,
];

impl Route {
    /// The rooted path for this route.
    pub fn as_path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::News => "/news",
            Route::Profile => "/profile",
        }
    }

    /// Parse a rooted path. Unknown or relative paths yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/news" => Some(Route::News),
            "/profile" => Some(Route::Profile),
            _ => None,
        }
    }

    /// Screen title shown in the navigation header.
    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Главная",
            Route::Login => "Вход",
            Route::Register => "Регистрация",
            Route::News => "Темы",
            Route::Profile => "Профиль",
        }
    }
}
