//! User-facing messages for failed requests.
//!
//! [`normalize`] picks the first available of:
//! 1. a string `detail` field in a JSON error body (the backend's convention),
//! 2. a string `message` or `error` field in a JSON error body,
//! 3. a plain-text error body,
//! 4. a generic message for the failure class.
//!
//! Transport details and HTML error pages are never shown.

use payloads::ClientError;
use reqwest::StatusCode;

pub const DEFAULT_ERROR: &str = "Une erreur inattendue est survenue.";
pub const NETWORK_ERROR: &str =
    "Erreur réseau. Veuillez vérifier votre connexion.";
pub const AUTH_ERROR: &str =
    "Accès refusé. Veuillez vous reconnecter.";
pub const NOT_FOUND_ERROR: &str = "La ressource demandée est introuvable.";
pub const UNAVAILABLE_ERROR: &str =
    "Le service est momentanément indisponible.";

const BODY_FIELDS: [&str; 3] = ["detail", "message", "error"];

pub fn normalize(err: &ClientError) -> String {
    match err {
        ClientError::Network(e) => {
            tracing::warn!("request failed: {e}");
            NETWORK_ERROR.to_string()
        }
        ClientError::APIError(status, body) => message_from_body(body)
            .unwrap_or_else(|| status_message(*status).to_string()),
    }
}

fn message_from_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() || body.starts_with('<') {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => BODY_FIELDS
            .iter()
            .find_map(|field| value.get(field)?.as_str())
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(String::from),
        Err(_) => Some(body.to_string()),
    }
}

fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AUTH_ERROR,
        StatusCode::NOT_FOUND => NOT_FOUND_ERROR,
        s if s.is_server_error() => UNAVAILABLE_ERROR,
        _ => DEFAULT_ERROR,
    }
}
