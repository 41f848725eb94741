//! Path algebra: building, parameterizing, and pattern-matching path strings.
//!
//! All functions here are **pure**: given the same input they always produce
//! the same output, with no side effects. They never fail — absent or
//! unresolvable input falls through untouched instead of raising an error.
//!
//! Two placeholder markers coexist in path templates:
//!
//! - `:name` — a named parameter, left for the rendering layer's own
//!   extraction (and for [`set_params`]).
//! - `$name` — an environment placeholder, resolved against a process-level
//!   env map at path-build time via [`resolve_envs`].
//!
//! Both markers compile to the same capturing wildcard in [`create_path_regex`],
//! so route matching and view lookup agree on every URL.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use regex::Regex;

/// Character class accepted inside a path parameter value.
const PARAM_CLASS: &str = "([.A-Za-z0-9_-]*)";

/// `$name` environment placeholder token.
static ENV_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$([.A-Za-z0-9_-]*)").expect("env token pattern is valid")
});

/// Any placeholder marker, `:name` or `$name`.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[:$]([.A-Za-z0-9_-]*)").expect("placeholder pattern is valid")
});

/// Shared, live environment map handle.
///
/// The registry owns one of these and hands a clone to every compiled view,
/// so `$name` resolution always sees the current values even for groups
/// compiled before the env was set.
pub type EnvMap = Arc<RwLock<HashMap<String, String>>>;

/// Creates an empty [`EnvMap`].
pub fn env_map() -> EnvMap {
    Arc::new(RwLock::new(HashMap::new()))
}

/// Concatenates a segment onto a base path with an explicit separator.
///
/// # Examples
///
/// ```
/// use waymark::path::{append, append_with};
///
/// assert_eq!(append("/settings", "profile"), "/settings/profile");
/// assert_eq!(append_with("/docs", "intro", '#'), "/docs#intro");
/// ```
pub fn append(base: &str, segment: &str) -> String {
    append_with(base, segment, '/')
}

/// [`append`] with a caller-chosen separator.
pub fn append_with(base: &str, segment: &str, separator: char) -> String {
    format!("{base}{separator}{segment}")
}

/// Substitutes `:key` placeholders from a parameter map.
///
/// Every occurrence of `:key` is replaced globally with the mapped value.
/// Placeholders with no entry in the map are left intact — no error is
/// raised for unresolved parameters.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use waymark::path::set_params;
///
/// let mut params = HashMap::new();
/// params.insert("id".to_string(), "42".to_string());
///
/// assert_eq!(set_params("/user/:id", &params), "/user/42");
/// assert_eq!(set_params("/user/:id", &HashMap::new()), "/user/:id");
/// ```
pub fn set_params(template: &str, params: &HashMap<String, String>) -> String {
    params.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!(":{name}"), value)
    })
}

/// Appends `?` plus the URL-encoded representation of the query pairs.
///
/// Pairs are encoded in the order given; duplicate keys pass through
/// untouched.
///
/// # Examples
///
/// ```
/// use waymark::path::set_queries;
///
/// let path = set_queries("/search", &[("q", "route trees"), ("page", "2")]);
/// assert_eq!(path, "/search?q=route%20trees&page=2");
/// ```
pub fn set_queries<K, V>(path: &str, queries: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let encoded = queries
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key.as_ref()),
                urlencoding::encode(value.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{path}?{encoded}")
}

/// Substitutes `$name` environment placeholders from an env map.
///
/// Tokens whose name is not present in the map are left as-is.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use waymark::path::resolve_envs;
///
/// let mut envs = HashMap::new();
/// envs.insert("lang".to_string(), "en".to_string());
///
/// assert_eq!(resolve_envs("/docs/$lang", &envs), "/docs/en");
/// assert_eq!(resolve_envs("/docs/$unknown", &envs), "/docs/$unknown");
/// ```
pub fn resolve_envs(path: &str, envs: &HashMap<String, String>) -> String {
    ENV_TOKEN
        .replace_all(path, |caps: &regex::Captures| {
            let name = &caps[1];
            envs.get(name)
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .to_string()
}

/// Rewrites every `$name` environment marker into the `:name` marker.
///
/// The rendering layer only understands `:name` parameters; rewriting the
/// marker keeps the same named segment extractable on that side.
///
/// # Examples
///
/// ```
/// use waymark::path::remove_envs;
///
/// assert_eq!(remove_envs("/docs/$lang"), "/docs/:lang");
/// assert_eq!(remove_envs("/user/:id"), "/user/:id");
/// ```
pub fn remove_envs(path: &str) -> String {
    ENV_TOKEN.replace_all(path, ":$1").to_string()
}

/// Synthesizes the match-regex source for a path template.
///
/// `/` is escaped as a literal token, `:name` and `$name` placeholders
/// become the capturing wildcard `([.A-Za-z0-9_-]*)`, and the result is
/// end-anchored with one optional trailing slash. The root path `/` anchors
/// exactly, with no trailing-slash tolerance.
///
/// Malformed templates are not rejected here; they compile into patterns
/// that simply fail to match anything meaningful.
///
/// # Examples
///
/// ```
/// use waymark::path::create_path_regex;
/// use regex::Regex;
///
/// let pattern = Regex::new(&create_path_regex("/user/:id")).unwrap();
/// assert!(pattern.is_match("/user/42"));
/// assert!(pattern.is_match("/user/42/"));
/// assert!(!pattern.is_match("/user/42/extra"));
///
/// assert_eq!(create_path_regex("/"), "^/$");
/// ```
pub fn create_path_regex(path: &str) -> String {
    if path == "/" {
        return "^/$".to_string();
    }

    let body = PLACEHOLDER
        .replace_all(path, PARAM_CLASS)
        .replace('/', r"\/");

    format!("^{body}/?$")
}

/// Strips the trailing separator from a compiled path so it can serve as a
/// base for child concatenation.
///
/// Operates on parsed segments rather than last-character surgery, which
/// also collapses accidental empty segments. The root path normalizes to the
/// empty base, so children of `/` get absolute paths without doubling the
/// separator.
///
/// # Examples
///
/// ```
/// use waymark::path::normalize_base;
///
/// assert_eq!(normalize_base("/settings"), "/settings");
/// assert_eq!(normalize_base("/settings/"), "/settings");
/// assert_eq!(normalize_base("/"), "");
/// ```
pub fn normalize_base(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Extracts placeholder names (`:name` and `$name`) from a template,
/// in order of appearance.
pub fn param_names(path: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(path)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// A compiled path pattern: the synthesized regex source plus its compiled
/// form, shared by route flattening and view lookup.
///
/// Templates that produce an uncompilable regex keep the source string but
/// match nothing, mirroring the no-validation contract of the compiler.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Option<Regex>,
}

impl PathPattern {
    /// Compiles the pattern for a path template.
    ///
    /// # Examples
    ///
    /// ```
    /// use waymark::path::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/user/:id");
    /// assert!(pattern.is_match("/user/42"));
    /// assert!(!pattern.is_match("/user/42/extra"));
    /// ```
    pub fn compile(path: &str) -> Self {
        let source = create_path_regex(path);
        let regex = Regex::new(&source).ok();

        Self { source, regex }
    }

    /// The synthesized regex source.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests a location path against the pattern.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(path))
    }

    /// Captured parameter values, in placeholder order.
    pub fn capture_values(&self, path: &str) -> Option<Vec<String>> {
        let caps = self.regex.as_ref()?.captures(path)?;

        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_append_default_separator() {
        assert_eq!(append("/settings", "profile"), "/settings/profile");
    }

    #[test]
    fn test_append_with_custom_separator() {
        assert_eq!(append_with("/docs", "usage", '#'), "/docs#usage");
    }

    #[test]
    fn test_set_params_replaces_globally() {
        let result = set_params("/org/:id/member/:id", &params(&[("id", "7")]));
        assert_eq!(result, "/org/7/member/7");
    }

    #[test]
    fn test_set_params_leaves_unresolved_placeholders() {
        let result = set_params("/user/:id/:tab", &params(&[("id", "42")]));
        assert_eq!(result, "/user/42/:tab");

        assert_eq!(set_params("/user/:id", &HashMap::new()), "/user/:id");
    }

    #[test]
    fn test_set_queries_encodes_in_order() {
        let result = set_queries("/search", &[("q", "a b"), ("lang", "en")]);
        assert_eq!(result, "/search?q=a%20b&lang=en");
    }

    #[test]
    fn test_set_queries_empty_map_appends_bare_marker() {
        let empty: [(&str, &str); 0] = [];
        assert_eq!(set_queries("/search", &empty), "/search?");
    }

    #[test]
    fn test_resolve_envs_known_and_unknown() {
        let envs = params(&[("lang", "en")]);

        assert_eq!(resolve_envs("/docs/$lang", &envs), "/docs/en");
        assert_eq!(resolve_envs("/docs/$theme", &envs), "/docs/$theme");
        assert_eq!(resolve_envs("/docs/plain", &envs), "/docs/plain");
    }

    #[test]
    fn test_remove_envs_rewrites_marker_only() {
        assert_eq!(remove_envs("/docs/$lang/page/:id"), "/docs/:lang/page/:id");
    }

    #[test]
    fn test_create_path_regex_named_param() {
        let re = Regex::new(&create_path_regex("/user/:id")).unwrap();

        assert!(re.is_match("/user/42"));
        assert!(re.is_match("/user/42/"));
        assert!(!re.is_match("/user/42/extra"));
        assert!(!re.is_match("/other/42"));
    }

    #[test]
    fn test_create_path_regex_env_param_matches_like_named() {
        let re = Regex::new(&create_path_regex("/docs/$lang")).unwrap();

        assert!(re.is_match("/docs/en"));
        assert!(re.is_match("/docs/en/"));
        assert!(!re.is_match("/docs/en/intro"));
    }

    #[test]
    fn test_create_path_regex_root_anchors_exactly() {
        let re = Regex::new(&create_path_regex("/")).unwrap();

        assert!(re.is_match("/"));
        assert!(!re.is_match("//"));
        assert!(!re.is_match("/home"));
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base("/settings"), "/settings");
        assert_eq!(normalize_base("/settings/"), "/settings");
        assert_eq!(normalize_base("/a//b/"), "/a/b");
        assert_eq!(normalize_base("/"), "");
        assert_eq!(normalize_base(""), "");
    }

    #[test]
    fn test_param_names_in_order() {
        assert_eq!(param_names("/docs/$lang/page/:id"), vec!["lang", "id"]);
        assert!(param_names("/plain").is_empty());
    }

    #[test]
    fn test_path_pattern_captures() {
        let pattern = PathPattern::compile("/user/:id/post/:slug");
        let values = pattern.capture_values("/user/42/post/intro").unwrap();

        assert_eq!(values, vec!["42", "intro"]);
        assert!(pattern.capture_values("/user/42").is_none());
    }

    #[test]
    fn test_path_pattern_bad_template_matches_nothing() {
        let pattern = PathPattern::compile("/broken([");

        assert!(!pattern.is_match("/broken"));
        assert!(!pattern.is_match("/broken(["));
    }
}
