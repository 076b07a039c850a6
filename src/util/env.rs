//! Helpers for inspecting the program's environment variables.

/// Returns the `NAME=value` pairs of every environment variable starting with a given prefix,
/// sorted by name.
pub fn dump_lines(prefix: &str) -> Vec<String> {
    let mut vars: Vec<(String, String)> = std::env::vars().filter(|(k, _)| k.starts_with(prefix)).collect();
    vars.sort();

    vars.into_iter().map(|(k, v)| format!("{}={}", k, v)).collect()
}

/// Returns [`dump_lines`](dump_lines) joined into a single newline-separated string, used as error
/// context when the environment can't be parsed.
pub fn dump_string(prefix: &str) -> String {
    dump_lines(prefix).join("\n")
}
