/// Extract a short type name from the full module path.
///
/// Given `"my_crate::rules::MyRule"`, returns `"MyRule"`.
pub fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}
