//! Slash-path joining for logical Vault paths.
//!
//! Listing keys come back as `name` for secrets and `name/` for folders, and
//! the mount path may be given with or without slashes. Joining drops empty
//! elements and then cleans the result lexically so that every path used as
//! a document key or request path has a single canonical spelling.

/// Join path elements with `/` and clean the result.
///
/// Empty elements are ignored; if every element is empty the result is the
/// empty string, which denotes the mount root.
pub fn join(elements: &[&str]) -> String {
    let joined = elements.iter().filter(|e| !e.is_empty()).copied().collect::<Vec<_>>().join("/");
    if joined.is_empty() {
        return String::new();
    }
    clean(&joined)
}

/// Lexically clean a slash path.
///
/// Repeated and trailing slashes are removed, `.` elements are dropped and
/// `..` removes the preceding element. A rooted path stays rooted and never
/// climbs above `/`. An empty result is spelled `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();

    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => match out.last() {
                Some(last) if *last != ".." => {
                    out.pop();
                }
                _ if rooted => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    let body = out.join("/");
    if rooted {
        format!("/{body}")
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}
