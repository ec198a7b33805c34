use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static UNQUOTE_VAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']\$\{(\w+)@U\}["']"#).unwrap()
});

static VAR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{(\w+)\}").unwrap());

/// Replace `${name}` in `s` with `mapping(name)`.
///
/// Only the braced form is recognized and `name` must match `\w+`; anything
/// else, including `$name` and `${ name }`, is left untouched.
///
/// The quoted form `"${name@U}"` (or single-quoted) is replaced together with
/// its quotes, so a config value such as `port = "${PORT@U}"` can expand to a
/// bare number.
///
/// ```
/// let expanded = satchel_env::expand("port = '${port@U}', host = ${host}", |name| match name {
///     "port" => "8080".to_string(),
///     _ => "localhost".to_string(),
/// });
/// assert_eq!(expanded, "port = 8080, host = localhost");
/// ```
pub fn expand<F>(s: &str, mapping: F) -> String
where
    F: Fn(&str) -> String,
{
    if !s.contains("${") {
        return s.to_string();
    }

    let unquoted = UNQUOTE_VAR_REGEX.replace_all(s, |caps: &Captures<'_>| mapping(&caps[1]));
    VAR_REGEX
        .replace_all(&unquoted, |caps: &Captures<'_>| mapping(&caps[1]))
        .into_owned()
}
