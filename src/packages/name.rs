//! Scoped package name mangling
//!
//! `@scope/name` packages are tracked under the mangled key `scope__name`,
//! the same convention the TypeScript module resolver uses.

const SCOPE_SEPARATOR: &str = "__";

/// Canonical lookup key for a possibly scoped package name.
///
/// `@foo/bar` becomes `foo__bar`; unscoped names are returned unchanged.
pub fn mangle_scoped_package(package_name: &str) -> String {
    if let Some(scoped) = package_name.strip_prefix('@')
        && let Some((scope, name)) = scoped.split_once('/')
    {
        return format!("{scope}{SCOPE_SEPARATOR}{name}");
    }
    package_name.to_string()
}

/// Reverse of [`mangle_scoped_package`], or `None` for an unscoped name.
pub fn unmangle_scoped_package(package_name: &str) -> Option<String> {
    package_name
        .split_once(SCOPE_SEPARATOR)
        .map(|(scope, name)| format!("@{scope}/{name}"))
}
