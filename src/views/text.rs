//! User-facing copy (French).

pub const APP_TITLE: &str = "Arbre Généalogique";
pub const HOME_SUBTITLE: &str = "Créez, gérez et explorez votre histoire familiale";
pub const HOME_FOOTER: &str = "Découvrez vos racines et partagez votre histoire familiale";

pub const SIGN_UP_TITLE: &str = "Créer votre compte";
pub const SIGN_IN_TITLE: &str = "Connexion à votre arbre généalogique";

pub const LOADING: &str = "Chargement...";

pub const SIGN_UP_SUCCESS: &str = "Inscription réussie";
pub const INVALID_CREDENTIALS: &str = "Identifiants incorrects";
pub const EMAIL_TAKEN: &str = "Cet email est déjà utilisé";
pub const INVALID_EMAIL: &str = "Adresse email invalide";
pub const REQUIRED_FIELDS: &str = "Tous les champs sont requis";
pub const GENERIC_ERROR: &str = "Une erreur est survenue. Veuillez réessayer.";
