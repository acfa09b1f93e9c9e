/// Lowercases the domain part of an email address, leaving the local part as typed.
///
/// Surrounding whitespace is always trimmed. Input without an `@` is
/// otherwise returned unchanged.
pub fn normalize_email(email: &str) -> String {
    let trimmed = email.trim();

    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => trimmed.to_owned(),
    }
}
