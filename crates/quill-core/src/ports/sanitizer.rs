/// Strips disallowed markup from user-supplied post bodies before they are stored.
pub trait BodySanitizer: Send + Sync {
    fn sanitize(&self, body: &str) -> String;
}
