/// Upper-cases a containment fragment and wraps it in LIKE wildcards, for use
/// against an `UPPER(column)` expression.
pub(crate) fn wrap_like_query(fragment: &str) -> String {
    format!("%{}%", fragment.to_uppercase())
}
