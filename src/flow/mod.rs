//! Navigation and authentication-gating flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! These modules hold the behaviour of the pages without any HTTP: the
//! session observed by the dashboard, the dashboard's redirect decision, and
//! the sign-up/sign-in submission outcomes. Route handlers feed them request
//! data and translate their outcomes into responses.

pub mod account_api;
pub mod forms;
pub mod gate;
pub mod session;


/// Application paths.
pub mod paths {
    pub const HOME: &str = "/";
    pub const SIGN_UP: &str = "/auth/signup";
    pub const SIGN_IN: &str = "/auth/signin";
    pub const SIGN_OUT: &str = "/auth/signout";
    pub const DASHBOARD: &str = "/dashboard";

    /// Sign-in path carrying an informational `message` query parameter.
    #[must_use]
    pub fn sign_in_with_message(message: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("message", message)
            .finish();
        format!("{SIGN_IN}?{query}")
    }
}
