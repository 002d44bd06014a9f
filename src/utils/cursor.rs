use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::AppError;

/// Encode an entity id into an opaque pagination token.
pub fn encode(id: &str) -> String {
    STANDARD.encode(id.as_bytes())
}

/// Decode a pagination token back into the id it was produced from.
/// No semantic validation is applied to the decoded content.
pub fn decode(token: &str) -> Result<String, AppError> {
    let bytes = STANDARD
        .decode(token)
        .map_err(|_| AppError::Constraint("cursor is not a valid token".to_string()))?;
    String::from_utf8(bytes)
        .map_err(|_| AppError::Constraint("cursor is not a valid token".to_string()))
}
