//! Single-dash long flags.
//!
//! Users of the `vault` tooling write `-quiet`, `-file=out.json` and
//! `-help`. Clap reads a single dash as a cluster of short flags, so known
//! long names are rewritten to their `--` form before parsing. Rewriting
//! stops at the first positional argument or at `--`; anything after that is
//! passed through untouched and ends up as a positional.

/// Long flags accepted with a single dash.
const LONG_FLAGS: &[&str] = &["quiet", "file", "help", "version"];

/// Flags that take a separate value when written without `=`.
const VALUE_FLAGS: &[&str] = &["file"];

/// Rewrite `-name[=value]` to `--name[=value]` for the known long flags.
///
/// The first element is the program name and is kept as is.
pub fn normalize_go_style_flags<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<String> = args.next().into_iter().collect();
    let mut expect_value = false;

    while let Some(arg) = args.next() {
        if expect_value {
            expect_value = false;
            out.push(arg);
            continue;
        }

        if arg == "--" || !arg.starts_with('-') || arg == "-" {
            out.push(arg);
            out.extend(args.by_ref());
            break;
        }

        let body = arg.trim_start_matches('-');
        let name = body.split_once('=').map_or(body, |(name, _)| name);

        if LONG_FLAGS.contains(&name) {
            expect_value = VALUE_FLAGS.contains(&name) && !body.contains('=');
            out.push(format!("--{body}"));
        } else {
            out.push(arg);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_go_style_flags(args.iter().copied())
    }

    #[test]
    fn test_single_dash_long_flags() {
        assert_eq!(
            normalize(&["bin", "-quiet", "-file", "out.json", "secret"]),
            vec!["bin", "--quiet", "--file", "out.json", "secret"]
        );
    }

    #[test]
    fn test_equals_forms() {
        assert_eq!(
            normalize(&["bin", "-quiet=false", "-file=x.json", "kv"]),
            vec!["bin", "--quiet=false", "--file=x.json", "kv"]
        );
    }

    #[test]
    fn test_double_dash_flags_unchanged() {
        assert_eq!(
            normalize(&["bin", "--quiet", "--file", "a", "kv"]),
            vec!["bin", "--quiet", "--file", "a", "kv"]
        );
    }

    #[test]
    fn test_stops_at_first_positional() {
        assert_eq!(
            normalize(&["bin", "secret", "-quiet"]),
            vec!["bin", "secret", "-quiet"]
        );
    }

    #[test]
    fn test_stops_at_separator() {
        assert_eq!(normalize(&["bin", "--", "-quiet"]), vec!["bin", "--", "-quiet"]);
    }

    #[test]
    fn test_file_value_is_not_rewritten() {
        assert_eq!(
            normalize(&["bin", "-file", "-quiet", "kv"]),
            vec!["bin", "--file", "-quiet", "kv"]
        );
    }

    #[test]
    fn test_help_version_and_unknown() {
        assert_eq!(normalize(&["bin", "-help"]), vec!["bin", "--help"]);
        assert_eq!(normalize(&["bin", "-h"]), vec!["bin", "-h"]);
        assert_eq!(normalize(&["bin", "-version"]), vec!["bin", "--version"]);
        assert_eq!(normalize(&["bin", "-bogus", "kv"]), vec!["bin", "-bogus", "kv"]);
    }
}
