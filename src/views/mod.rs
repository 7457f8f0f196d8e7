//! Server-rendered HTML pages.
//!
//! DESIGN
//! ======
//! Pages are minijinja templates extending `layout.html`. Template names end
//! in `.html`, so every interpolated value is HTML-escaped unless it was
//! registered as a safe string (the application paths). Missing variables are
//! a render error. Each page element carries a stable `data-testid` for
//! browser automation.

pub mod text;

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;

use std::sync::LazyLock;

use minijinja::{Environment, UndefinedBehavior, Value, context};

use crate::flow::gate::ViewState;
use crate::flow::paths;
use crate::services::accounts::Registration;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("signup.html", include_str!("../../templates/signup.html")),
    ("signin.html", include_str!("../../templates/signin.html")),
    ("dashboard.html", include_str!("../../templates/dashboard.html")),
];

#[derive(Debug, thiserror::Error)]
#[error("template rendering failed: {0}")]
pub struct RenderError(String);

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        Self(err.to_string())
    }
}

static ENVIRONMENT: LazyLock<Result<Environment<'static>, minijinja::Error>> = LazyLock::new(build_environment);

fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }

    env.add_global("app_title", text::APP_TITLE);
    for (name, path) in [
        ("sign_up_path", paths::SIGN_UP),
        ("sign_in_path", paths::SIGN_IN),
        ("sign_out_path", paths::SIGN_OUT),
    ] {
        env.add_global(name, Value::from_safe_string(path.to_owned()));
    }
    Ok(env)
}

fn render(name: &str, ctx: Value) -> Result<String, RenderError> {
    let env = ENVIRONMENT.as_ref().map_err(|e| RenderError(e.to_string()))?;
    Ok(env.get_template(name)?.render(ctx)?)
}

/// # Errors
///
/// Returns an error if the template fails to render.
pub fn landing() -> Result<String, RenderError> {
    render(
        "landing.html",
        context! {
            title => text::APP_TITLE,
            subtitle => text::HOME_SUBTITLE,
            footer => text::HOME_FOOTER,
        },
    )
}

/// Sign-up page. Name and email are echoed back after a failed submission;
/// the password never is.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn sign_up(error: Option<&str>, form: &Registration) -> Result<String, RenderError> {
    render(
        "signup.html",
        context! {
            title => text::SIGN_UP_TITLE,
            error => error,
            name => &form.name,
            email => &form.email,
        },
    )
}

/// # Errors
///
/// Returns an error if the template fails to render.
pub fn sign_in(error: Option<&str>, message: Option<&str>, email: &str) -> Result<String, RenderError> {
    render(
        "signin.html",
        context! {
            title => text::SIGN_IN_TITLE,
            error => error,
            message => message,
            email => email,
        },
    )
}

/// Dashboard rendered purely from the gate's view state. `Redirecting`
/// renders nothing.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn dashboard(view: &ViewState) -> Result<String, RenderError> {
    match view {
        ViewState::Loading => render(
            "dashboard.html",
            context! { title => text::APP_TITLE, loading => true, loading_text => text::LOADING },
        ),
        ViewState::Redirecting => Ok(String::new()),
        ViewState::Authenticated(user) => render(
            "dashboard.html",
            context! { title => text::APP_TITLE, loading => false, display_name => user.display_name() },
        ),
    }
}
