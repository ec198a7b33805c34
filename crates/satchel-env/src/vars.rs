/// Set each `(key, value)` pair in a list of `key=value` strings.
///
/// An existing entry for `key` is replaced in place; otherwise a new entry is
/// appended.
pub fn set_env_vars(vars: &mut Vec<String>, pairs: &[(&str, &str)]) {
    for (key, value) in pairs {
        set_env_var(vars, key, value);
    }
}

/// Split `key=value` at the first `=`. Without one, the value is empty.
pub fn split_env_var(var: &str) -> (&str, &str) {
    var.split_once('=').unwrap_or((var, ""))
}

fn set_env_var(vars: &mut Vec<String>, key: &str, value: &str) {
    let entry = format!("{key}={value}");
    let prefix = format!("{key}=");
    match vars.iter_mut().find(|var| var.starts_with(&prefix)) {
        Some(existing) => *existing = entry,
        None => vars.push(entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_env_vars() {
        let mut vars = vec!["FOO=bar".to_string(), "FOOD=pizza".to_string()];
        set_env_vars(&mut vars, &[("FOO", "baz"), ("NEW", "value")]);
        assert_eq!(vars, ["FOO=baz", "FOOD=pizza", "NEW=value"]);
    }

    #[test]
    fn test_set_env_vars_empty_list() {
        let mut vars = Vec::new();
        set_env_vars(&mut vars, &[("A", "1"), ("A", "2")]);
        assert_eq!(vars, ["A=2"]);
    }

    #[test]
    fn test_split_env_var() {
        assert_eq!(split_env_var("key=value"), ("key", "value"));
        assert_eq!(split_env_var("key=a=b"), ("key", "a=b"));
        assert_eq!(split_env_var("key="), ("key", ""));
        assert_eq!(split_env_var("key"), ("key", ""));
    }
}
