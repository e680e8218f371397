//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Used when the configuration does not provide an address
    pub const CLIENT_DEFAULT_SERVER_ADDRESS: &str = "http://localhost:8789";

    /// Upper bound for a configured request timeout
    pub const CLIENT_MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
}

pub mod validation {
    pub const VALIDATION_MIN_PASSWORD_LENGTH: usize = 6;
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/auth/login");
    pub const PATH_AUTH_LOGOUT: PathSpec = PathSpec::post("/auth/logout");
    pub const PATH_AUTH_ME: PathSpec = PathSpec::get("/auth/me");
    pub const PATH_PERMISSIONS_CREATE: PathSpec = PathSpec::post("/permissions");
    pub const PATH_QUOTATIONS_CREATE: PathSpec = PathSpec::post("/quotations");
    pub const PATH_QUOTATIONS_LIST: PathSpec = PathSpec::get("/quotations");
    pub const PATH_ROLES_CREATE: PathSpec = PathSpec::post("/roles");
    pub const PATH_USERS_CREATE: PathSpec = PathSpec::post("/users");
    pub const PATH_USERS_LIST: PathSpec = PathSpec::get("/users");
    /// `{id}` is replaced by the user's id
    pub const PATH_USERS_STATUS: PathSpec = PathSpec::patch("/users/{id}/status");
}

#[cfg(test)]
mod tests {
    use static_assertions::const_assert;

    use super::{client::CLIENT_MAX_REQUEST_TIMEOUT_SECS, validation::VALIDATION_MIN_PASSWORD_LENGTH};

    const_assert!(CLIENT_MAX_REQUEST_TIMEOUT_SECS > 0);
    const_assert!(VALIDATION_MIN_PASSWORD_LENGTH > 0);

    #[test]
    fn default_address_is_http() {
        // Paths are appended directly so the address must not end with a slash
        let address = super::client::CLIENT_DEFAULT_SERVER_ADDRESS;
        assert!(address.starts_with("http"));
        assert!(!address.ends_with('/'));
    }
}
