//! Name transformation - regex matching and replacement rendering

use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Token grammars recognized in replacement templates. Positional tokens are
// substituted in a first pass over the whole template, named tokens in a
// second pass over the result of the first.
static POSITIONAL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\d+)").expect("invalid positional token regex"));
static NAMED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)").expect("invalid named token regex"));

/// Check whether `pattern` matches anywhere in `name`.
pub fn matches(name: &str, pattern: &Regex) -> bool {
    pattern.is_match(name)
}

/// Render `template` against the first match of `pattern` in `name`.
///
/// `$0` is the whole match, `$1`.. are positional groups and `$word`
/// resolves named groups; both kinds draw from one evaluation of the
/// pattern. A group the pattern declares but that did not participate in
/// the match renders as the empty string. A reference to a group the
/// pattern does not declare stays in the output verbatim, so a bad
/// template shows up in the result instead of failing the rename.
///
/// Note the two-pass order: text produced by a positional substitution is
/// still subject to named substitution. `$1` capturing the literal text
/// `$core` ends up resolved against a `core` group if one exists.
pub fn render(name: &str, pattern: &Regex, template: &str) -> Result<String> {
    let caps = pattern.captures(name).ok_or_else(|| Error::NoMatch {
        input: name.to_string(),
        pattern: pattern.as_str().to_string(),
    })?;

    let positional = POSITIONAL_TOKEN.replace_all(template, |token: &Captures| {
        match token[1].parse::<usize>() {
            Ok(index) if index < caps.len() => {
                caps.get(index).map(|g| g.as_str()).unwrap_or("").to_string()
            }
            _ => token[0].to_string(),
        }
    });

    let declared: Vec<&str> = pattern.capture_names().flatten().collect();
    let rendered = NAMED_TOKEN.replace_all(&positional, |token: &Captures| {
        let group = &token[1];
        match caps.name(group) {
            Some(m) => m.as_str().to_string(),
            None if declared.contains(&group) => String::new(),
            None => token[0].to_string(),
        }
    });

    Ok(rendered.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_match_all_markdown_files() {
        assert!(matches("file.md", &re(r".*\.md")));
    }

    #[test]
    fn test_match_with_prefix() {
        let pattern = re(r"Prefix-.*\.md");

        assert!(matches("Prefix-I should match.md", &pattern));
        assert!(matches("Prefix-With some numbers 4-5-6.md", &pattern));
        assert!(matches("Prefix-.md", &pattern));

        assert!(!matches("Prefix2-I should NOT match.md", &pattern));
        assert!(!matches("Pre-I should NOT match.md", &pattern));
        assert!(!matches("A random file name.md", &pattern));
    }

    #[test]
    fn test_match_with_suffix() {
        let pattern = re(r".*-Suffix\.md");

        assert!(matches("I should match-Suffix.md", &pattern));
        assert!(matches("12345-Suffix.md", &pattern));
        assert!(matches("-Suffix.md", &pattern));

        assert!(!matches("I should NOT match-Suffix2.md", &pattern));
        assert!(!matches("I should NOT match-Suff.md", &pattern));
        assert!(!matches("A random file name.md", &pattern));
    }

    #[test]
    fn test_simple_positional_replacement() {
        let result = render(
            "Prefix-And I should match.md",
            &re(r"Prefix-(.*)\.md"),
            "$1.md",
        )
        .unwrap();
        assert_eq!(result, "And I should match.md");
    }

    #[test]
    fn test_multiple_positional_groups() {
        let result = render(
            "abc-123456-ABCD.md",
            &re(r"([a-zA-Z]+)-([0-9]+)-([a-zA-Z]+)\.md"),
            "$3:$2:$1.md",
        )
        .unwrap();
        assert_eq!(result, "ABCD:123456:abc.md");
    }

    #[test]
    fn test_whole_match_group() {
        let result = render("Prefix-core.md", &re(r"Prefix-(.*)\.md"), "$0").unwrap();
        assert_eq!(result, "Prefix-core.md");
    }

    #[test]
    fn test_simple_named_group() {
        let result = render(
            "Prefix-And I should match.md",
            &re(r"Prefix-(?<core>.*)\.md"),
            "$core.md",
        )
        .unwrap();
        assert_eq!(result, "And I should match.md");
    }

    #[test]
    fn test_no_tokens_passes_through() {
        let result = render(
            "Prefix-12345-and_some_text.md",
            &re(r"Prefix-(\d*)-(?<core>.*)\.md"),
            "No rename.md",
        )
        .unwrap();
        assert_eq!(result, "No rename.md");
    }

    #[test]
    fn test_multiple_named_groups() {
        let result = render(
            "Prefix-12345-and_some_text.md",
            &re(r"Prefix-(?<id>\d*)-(?<core>.*)\.md"),
            "$id-$core.md",
        )
        .unwrap();
        assert_eq!(result, "12345-and_some_text.md");
    }

    #[test]
    fn test_mixed_positional_and_named_groups() {
        let result = render(
            "Prefix-12345-and_some_text.md",
            &re(r"Prefix-(\d*)-(?<core>.*)\.md"),
            "$core-$1.md",
        )
        .unwrap();
        assert_eq!(result, "and_some_text-12345.md");
    }

    #[test]
    fn test_positional_group_not_found() {
        // $2 is out of range; the token itself stays in the output so the
        // broken reference is visible in the rename result.
        let result = render("Prefix-Suffix.md", &re(r"Prefix-(.*)\.md"), "$1-$2.md").unwrap();
        assert_eq!(result, "Suffix-$2.md");
    }

    #[test]
    fn test_named_group_not_found() {
        let result = render("Prefix-Suffix.md", &re(r"Prefix-(.*)\.md"), "$1-$group.md").unwrap();
        assert_eq!(result, "Suffix-$group.md");
    }

    #[test]
    fn test_declared_group_without_participation_is_empty() {
        // An alternation leaves one side's groups without a match; those
        // substitute as empty rather than staying as tokens.
        let result = render("b", &re(r"(a)|(b)"), "[$1][$2]").unwrap();
        assert_eq!(result, "[][b]");

        let result = render("b", &re(r"(?<left>a)|(?<right>b)"), "$left/$right").unwrap();
        assert_eq!(result, "/b");
    }

    #[test]
    fn test_positional_output_is_rescanned_by_named_pass() {
        // Two sequential passes, no escaping: a captured value that looks
        // like a named token gets substituted again by the second pass.
        let pattern = re(r"Prefix-(.*)-(?<core>\w+)\.md");
        let result = render("Prefix-$core-REAL.md", &pattern, "$1.md").unwrap();
        assert_eq!(result, "REAL.md");

        // A numeric leftover is not a valid group name, so it survives both
        // passes untouched.
        let result = render("Prefix-$2-REAL.md", &pattern, "$1.md").unwrap();
        assert_eq!(result, "$2.md");
    }

    #[test]
    fn test_render_requires_a_match() {
        let err = render("note.md", &re(r"Prefix-(.*)\.md"), "$1.md").unwrap_err();
        assert!(matches!(err, Error::NoMatch { .. }));
    }

    #[test]
    fn test_rendered_output_is_rejected_on_rerender() {
        let pattern = re(r"Prefix-(.*)\.md");
        let renamed = render("Prefix-And I should match.md", &pattern, "$1.md").unwrap();

        // The output no longer matches, so a second pass is a NoMatch
        // rejection rather than a silent pass-through.
        assert!(!matches(&renamed, &pattern));
        assert!(render(&renamed, &pattern, "$1.md").is_err());
    }
}
