use super::*;
use crate::flow::session::SessionUser;

/// Text content of the first element carrying `data-testid="{id}"`.
fn testid_text(html: &str, id: &str) -> Option<String> {
    let marker = format!(r#"data-testid="{id}""#);
    let start = html.find(&marker)?;
    let open_end = start + html[start..].find('>')? + 1;
    let close = open_end + html[open_end..].find('<')?;
    Some(html[open_end..close].trim().to_owned())
}

fn has_testid(html: &str, id: &str) -> bool {
    html.contains(&format!(r#"data-testid="{id}""#))
}

// =============================================================
// environment
// =============================================================

#[test]
fn every_template_compiles() {
    let env = ENVIRONMENT.as_ref().expect("templates should compile");
    for (name, _) in TEMPLATES {
        assert!(env.get_template(name).is_ok(), "missing {name}");
    }
}

#[test]
fn html_templates_escape_interpolated_values() {
    let html = sign_in(Some(r#"<script>alert("x") & 'y'</script>"#), None, "").unwrap();
    assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;) &amp; "));
    assert!(!html.contains("<script>"));
}

#[test]
fn paths_are_not_escaped() {
    let html = sign_up(None, &Registration::default()).unwrap();
    assert!(html.contains(r#"action="/auth/signup""#));
    assert!(!html.contains("&#x2f;auth"));
}

#[test]
fn missing_variable_is_a_render_error() {
    let err = render("signin.html", context! { title => "x" }).unwrap_err();
    assert!(err.to_string().contains("template rendering failed"), "{err}");
}

// =============================================================
// landing
// =============================================================

#[test]
fn landing_renders_title_subtitle_and_footer() {
    let html = landing().unwrap();
    assert!(has_testid(&html, "home-page"));
    assert_eq!(testid_text(&html, "home-title").as_deref(), Some("Arbre Généalogique"));
    assert_eq!(
        testid_text(&html, "home-subtitle").as_deref(),
        Some("Créez, gérez et explorez votre histoire familiale")
    );
    assert_eq!(
        testid_text(&html, "home-footer").as_deref(),
        Some("Découvrez vos racines et partagez votre histoire familiale")
    );
}

#[test]
fn landing_links_to_both_forms() {
    let html = landing().unwrap();
    assert!(has_testid(&html, "signup-card"));
    assert!(has_testid(&html, "signin-card"));
    assert!(html.contains(r#"data-testid="signup-link" class="button" href="/auth/signup""#));
    assert!(html.contains(r#"data-testid="signin-link" class="button button--muted" href="/auth/signin""#));
    assert!(!html.contains("{{"));
}

// =============================================================
// sign-up
// =============================================================

#[test]
fn sign_up_renders_form_without_error() {
    let html = sign_up(None, &Registration::default()).unwrap();
    assert_eq!(testid_text(&html, "signup-title").as_deref(), Some("Créer votre compte"));
    for id in ["signup-page", "name-input", "email-input", "password-input", "signup-submit-button"] {
        assert!(has_testid(&html, id), "missing {id}");
    }
    assert!(!has_testid(&html, "signup-error"));
    assert!(html.contains(r#"data-testid="signin-link" href="/auth/signin""#));
}

#[test]
fn sign_up_error_is_escaped_and_password_not_echoed() {
    let form = Registration {
        name: "<b>John</b>".into(),
        email: "john@example.com".into(),
        password: "password123".into(),
    };
    let html = sign_up(Some("Cet email est déjà utilisé"), &form).unwrap();
    assert_eq!(testid_text(&html, "signup-error").as_deref(), Some("Cet email est déjà utilisé"));
    assert!(html.contains("&lt;b&gt;John&lt;"));
    assert!(!html.contains("<b>John"));
    assert!(html.contains(r#"value="john@example.com""#));
    assert!(!html.contains("password123"));
}

// =============================================================
// sign-in
// =============================================================

#[test]
fn sign_in_renders_form_and_signup_link() {
    let html = sign_in(None, None, "").unwrap();
    assert_eq!(
        testid_text(&html, "signin-title").as_deref(),
        Some("Connexion à votre arbre généalogique")
    );
    for id in ["signin-page", "email-input", "password-input", "signin-submit-button"] {
        assert!(has_testid(&html, id), "missing {id}");
    }
    assert!(!has_testid(&html, "signin-error"));
    assert!(!has_testid(&html, "signin-message"));
    assert!(html.contains(r#"data-testid="signup-link" href="/auth/signup""#));
}

#[test]
fn sign_in_shows_message_and_error() {
    let html = sign_in(Some("Identifiants incorrects"), Some("Inscription réussie"), "a@b.c").unwrap();
    assert_eq!(testid_text(&html, "signin-error").as_deref(), Some("Identifiants incorrects"));
    assert_eq!(testid_text(&html, "signin-message").as_deref(), Some("Inscription réussie"));
    assert!(html.contains(r#"value="a@b.c""#));
}

// =============================================================
// dashboard
// =============================================================

#[test]
fn dashboard_loading_shows_placeholder() {
    let html = dashboard(&ViewState::Loading).unwrap();
    assert_eq!(testid_text(&html, "dashboard-loading").as_deref(), Some("Chargement..."));
    assert!(!has_testid(&html, "dashboard-page"));
}

#[test]
fn dashboard_redirecting_renders_nothing() {
    assert!(dashboard(&ViewState::Redirecting).unwrap().is_empty());
}

#[test]
fn dashboard_welcomes_by_name() {
    let user = SessionUser { name: Some("John Doe".into()), email: "john@example.com".into() };
    let html = dashboard(&ViewState::Authenticated(user)).unwrap();
    assert_eq!(testid_text(&html, "welcome-message").as_deref(), Some("Bienvenue, John Doe"));
    assert_eq!(testid_text(&html, "dashboard-title").as_deref(), Some("Arbre Généalogique"));
    assert_eq!(
        testid_text(&html, "dashboard-welcome").as_deref(),
        Some("Bienvenue dans votre tableau de bord")
    );
    assert_eq!(testid_text(&html, "create-tree-button").as_deref(), Some("Créer un nouvel arbre"));
    assert_eq!(testid_text(&html, "view-trees-button").as_deref(), Some("Voir mes arbres"));
    assert!(has_testid(&html, "logout-button"));
    assert!(html.contains(r#"action="/auth/signout""#));
}

#[test]
fn dashboard_falls_back_to_email() {
    let user = SessionUser { name: None, email: "john@example.com".into() };
    let html = dashboard(&ViewState::Authenticated(user)).unwrap();
    assert_eq!(testid_text(&html, "welcome-message").as_deref(), Some("Bienvenue, john@example.com"));
}
