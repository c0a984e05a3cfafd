//! Navigation targets and the access gate in front of them.

use std::fmt;

use crate::types::ProductId;

/// Every screen of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Products,
    ProductDetail(ProductId),
    NewProduct,
    EditProduct(ProductId),
    Categories,
    Movements,
    NewMovement,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Route {
    /// Landing screen after login and the fallback for unknown paths.
    pub const HOME: Self = Self::Dashboard;

    /// Access level this route requires.
    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login | Self::Register => Access::Public,
            Self::NewProduct => Access::Admin,
            Self::Dashboard
            | Self::Products
            | Self::ProductDetail(_)
            | Self::EditProduct(_)
            | Self::Categories
            | Self::Movements
            | Self::NewMovement => Access::Authenticated,
        }
    }

    /// Where navigation to this route actually lands.
    ///
    /// Anonymous users are sent to login; signed-in non-admins asking for an
    /// admin screen are sent to the dashboard.
    #[must_use]
    pub const fn resolve(self, authenticated: bool, admin: bool) -> Self {
        match self.access() {
            Access::Public => self,
            _ if !authenticated => Self::Login,
            Access::Admin if !admin => Self::HOME,
            _ => self,
        }
    }

    /// Path of this route.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Products => "/products".to_owned(),
            Self::ProductDetail(id) => format!("/products/{id}"),
            Self::NewProduct => "/products/new".to_owned(),
            Self::EditProduct(id) => format!("/products/edit/{id}"),
            Self::Categories => "/categories".to_owned(),
            Self::Movements => "/movements".to_owned(),
            Self::NewMovement => "/movements/new".to_owned(),
        }
    }

    /// Match a path; the empty path and unknown paths go to [`Route::HOME`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["products"] => Self::Products,
            ["products", "new"] => Self::NewProduct,
            ["products", "edit", id] => id.parse().map_or(Self::HOME, Self::EditProduct),
            ["products", id] => id.parse().map_or(Self::HOME, Self::ProductDetail),
            ["categories"] => Self::Categories,
            ["movements"] => Self::Movements,
            ["movements", "new"] => Self::NewMovement,
            _ => Self::HOME,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
