use super::*;

#[test]
fn classify_invalid_credentials() {
    let err = ApiError::classify_identity("Invalid login credentials");
    assert_eq!(err.kind, ApiErrorKind::Credential);
    assert_eq!(err.user_message(), "Email ou senha incorretos");
}

#[test]
fn classify_duplicate_account() {
    let err = ApiError::classify_identity("User already registered");
    assert_eq!(err.kind, ApiErrorKind::DuplicateAccount);
    assert_eq!(err.user_message(), "Este email já está registrado");
}

#[test]
fn classify_short_password() {
    let err = ApiError::classify_identity("Password should be at least 6 characters");
    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert_eq!(err.user_message(), "A senha deve ter pelo menos 6 caracteres");
}

#[test]
fn classify_unrecognized_message_falls_back_to_unknown() {
    let err = ApiError::classify_identity("Database connection pool exhausted");
    assert_eq!(err.kind, ApiErrorKind::Unknown);
    assert_eq!(err.user_message(), "Ocorreu um erro inesperado");
}

#[test]
fn classification_is_case_insensitive() {
    let err = ApiError::classify_identity("INVALID LOGIN CREDENTIALS");
    assert_eq!(err.kind, ApiErrorKind::Credential);
}

#[test]
fn original_message_is_preserved_for_diagnostics() {
    let err = ApiError::classify_identity("Invalid login credentials");
    assert_eq!(err.message, "Invalid login credentials");
}
