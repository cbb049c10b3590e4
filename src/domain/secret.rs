pub const SECRET_MASK: &str = "***";

/// Secrets this short are not masked; they would match too much unrelated text.
pub const MIN_MASKED_SECRET_LEN: usize = 8;

/// Replaces every occurrence of `secret` in `text` with [`SECRET_MASK`].
pub fn mask_secret(text: &str, secret: &str) -> String {
    let secret = secret.trim();
    if secret.len() <= MIN_MASKED_SECRET_LEN {
        return text.to_string();
    }
    text.replace(secret, SECRET_MASK)
}
