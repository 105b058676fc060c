//! The built-in chain-collapse rules and the file they exist to fix.

use crate::rewrite::{RewriteError, RewriteRule};

/// The one file this tool edits.
pub const TARGET_FILE: &str = "backend/src/main/java/com/skillbridge/config/SecurityConfig.java";

// First broken chain: the single-path GET matcher, wrapped between the
// closing paren and `.hasAnyAuthority`.
const GET_PENDING_PATTERN: &str =
    r#"\.requestMatchers\(HttpMethod\.GET, "/assignments/pending"\)\s+\.hasAnyAuthority"#;
const GET_PENDING_REPLACEMENT: &str =
    r#".requestMatchers(HttpMethod.GET, "/assignments/pending").hasAnyAuthority"#;

// Second broken chain: the three-path PUT lifecycle matcher, wrapped inside
// the argument list and again before `.hasAnyAuthority`. The `*` in the path
// literals is Spring's own wildcard, not a regex operator.
const PUT_LIFECYCLE_PATTERN: &str = r#"\.requestMatchers\(HttpMethod\.PUT, "/assignments/\*/approve", "/assignments/\*/reject",\s+"/assignments/\*/end"\)\s+\.hasAnyAuthority"#;
const PUT_LIFECYCLE_REPLACEMENT: &str = r#".requestMatchers(HttpMethod.PUT, "/assignments/*/approve", "/assignments/*/reject", "/assignments/*/end").hasAnyAuthority"#;

/// The two chain-collapse rules, in application order.
///
/// The second rule runs over the output of the first. The patterns are
/// disjoint, so ordering only affects reporting.
pub fn builtin_rules() -> Result<Vec<RewriteRule>, RewriteError> {
    Ok(vec![
        RewriteRule::new(
            "collapse-get-pending",
            GET_PENDING_PATTERN,
            GET_PENDING_REPLACEMENT,
        )?,
        RewriteRule::new(
            "collapse-put-lifecycle",
            PUT_LIFECYCLE_PATTERN,
            PUT_LIFECYCLE_REPLACEMENT,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::RuleOutcome;
    use proptest::prelude::*;

    fn rules() -> Vec<RewriteRule> {
        builtin_rules().unwrap()
    }

    fn apply_all(text: &str) -> String {
        rules()
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc).0)
    }

    #[test]
    fn test_get_pending_chain_collapses() {
        let input = ".requestMatchers(HttpMethod.GET, \"/assignments/pending\")\n            .hasAnyAuthority(\"ADMIN\")";
        let expected =
            ".requestMatchers(HttpMethod.GET, \"/assignments/pending\").hasAnyAuthority(\"ADMIN\")";

        let (out, outcome) = rules()[0].apply(input);
        assert_eq!(out, expected);
        assert_eq!(outcome, RuleOutcome::Rewritten { sites: 1 });
    }

    #[test]
    fn test_put_lifecycle_chain_collapses() {
        let input = ".requestMatchers(HttpMethod.PUT, \"/assignments/*/approve\", \"/assignments/*/reject\",\n                \"/assignments/*/end\")\n            .hasAnyAuthority(\"ROLE_HR\", \"ROLE_MANAGER\")";
        let expected = ".requestMatchers(HttpMethod.PUT, \"/assignments/*/approve\", \"/assignments/*/reject\", \"/assignments/*/end\").hasAnyAuthority(\"ROLE_HR\", \"ROLE_MANAGER\")";

        let (out, outcome) = rules()[1].apply(input);
        assert_eq!(out, expected);
        assert_eq!(outcome, RuleOutcome::Rewritten { sites: 1 });
    }

    #[test]
    fn test_surrounding_lines_are_untouched() {
        let input = concat!(
            "                        .requestMatchers(\"/assignments/my\").hasRole(\"EMPLOYEE\")\n",
            "                        .requestMatchers(HttpMethod.GET, \"/assignments/pending\")\n",
            "                                .hasAnyAuthority(\"ROLE_HR\", \"ROLE_MANAGER\")\n",
            "                        .requestMatchers(\"/utilization/team\").hasRole(\"MANAGER\")\n",
        );

        let out = apply_all(input);
        assert!(out.contains(
            ".requestMatchers(HttpMethod.GET, \"/assignments/pending\").hasAnyAuthority(\"ROLE_HR\", \"ROLE_MANAGER\")"
        ));
        assert!(out.contains(".requestMatchers(\"/assignments/my\").hasRole(\"EMPLOYEE\")\n"));
        assert!(out.contains(".requestMatchers(\"/utilization/team\").hasRole(\"MANAGER\")\n"));
    }

    #[test]
    fn test_rules_do_not_cross_match() {
        // Each rule leaves the other's chain alone.
        let put_chain = ".requestMatchers(HttpMethod.PUT, \"/assignments/*/approve\", \"/assignments/*/reject\",\n    \"/assignments/*/end\")\n    .hasAnyAuthority";
        let (out, outcome) = rules()[0].apply(put_chain);
        assert_eq!(out, put_chain);
        assert_eq!(outcome, RuleOutcome::NoMatch);
    }

    #[test]
    fn test_already_collapsed_text_is_a_noop() {
        let input = ".requestMatchers(HttpMethod.GET, \"/assignments/pending\").hasAnyAuthority(\"ADMIN\")";
        for rule in rules() {
            let (out, outcome) = rule.apply(input);
            assert_eq!(out, input);
            assert_eq!(outcome, RuleOutcome::NoMatch);
        }
    }

    proptest! {
        // Whatever whitespace the editor reflow produced at the wrap points,
        // the chains collapse to the same canonical line and a second pass
        // changes nothing.
        #[test]
        fn prop_collapse_is_canonical_and_idempotent(
            ws1 in "[ \t\r\n]{1,12}",
            ws2 in "[ \t\r\n]{1,12}",
        ) {
            let get_chain = format!(
                ".requestMatchers(HttpMethod.GET, \"/assignments/pending\"){ws1}.hasAnyAuthority(\"ADMIN\")"
            );
            let put_chain = format!(
                ".requestMatchers(HttpMethod.PUT, \"/assignments/*/approve\", \"/assignments/*/reject\",{ws1}\"/assignments/*/end\"){ws2}.hasAnyAuthority(\"ADMIN\")"
            );

            let once = apply_all(&format!("{get_chain}\n{put_chain}"));
            prop_assert!(once.contains(
                ".requestMatchers(HttpMethod.GET, \"/assignments/pending\").hasAnyAuthority(\"ADMIN\")"
            ));
            prop_assert!(once.contains(
                ".requestMatchers(HttpMethod.PUT, \"/assignments/*/approve\", \"/assignments/*/reject\", \"/assignments/*/end\").hasAnyAuthority(\"ADMIN\")"
            ));

            let twice = apply_all(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
