//! Template expansion for configuration values.
//!
//! Values may embed `${ configuration("dotted.key") }` and `${ env("NAME") }`
//! placeholders. Everything outside a placeholder is copied as-is.

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Looks up the value behind a placeholder.
pub(crate) trait Resolve {
    fn configuration(&self, key: &str) -> Result<String, String>;

    fn env(&self, name: &str) -> Result<String, String> {
        std::env::var(name).map_err(|_| format!("environment variable '{name}' is not set"))
    }
}

/// Expand every placeholder in `template`.
pub(crate) fn render(template: &str, resolver: &dyn Resolve) -> Result<String, String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let end = after
            .find(CLOSE)
            .ok_or_else(|| format!("unterminated placeholder in '{template}'"))?;

        output.push_str(&expand(after[..end].trim(), resolver)?);
        rest = &after[end + 1..];
    }

    output.push_str(rest);
    Ok(output)
}

fn expand(expression: &str, resolver: &dyn Resolve) -> Result<String, String> {
    let (function, argument) = parse_call(expression)
        .ok_or_else(|| format!("invalid placeholder '{expression}'"))?;

    match function {
        "configuration" => resolver.configuration(argument),
        "env" => resolver.env(argument),
        other => Err(format!("unknown function '{other}'")),
    }
}

/// Split `name("argument")` into its parts. Single quotes are accepted too.
fn parse_call(expression: &str) -> Option<(&str, &str)> {
    let (function, rest) = expression.split_once('(')?;
    let inner = rest.trim_end().strip_suffix(')')?.trim();

    let argument = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))?;

    Some((function.trim(), argument))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Values(HashMap<&'static str, &'static str>);

    impl Resolve for Values {
        fn configuration(&self, key: &str) -> Result<String, String> {
            self.0
                .get(key)
                .map(|v| v.to_string())
                .ok_or_else(|| format!("missing '{key}'"))
        }

        fn env(&self, name: &str) -> Result<String, String> {
            self.configuration(&format!("env:{name}"))
        }
    }

    fn values() -> Values {
        Values(HashMap::from([
            ("project.name", "network"),
            ("google.region", "europe-west1"),
            ("env:USER", "ci"),
        ]))
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(render("eu-west-1", &values()).unwrap(), "eu-west-1");
        assert_eq!(render("", &values()).unwrap(), "");
    }

    #[test]
    fn expands_configuration_references() {
        assert_eq!(
            render("${ configuration(\"project.name\") }-state", &values()).unwrap(),
            "network-state"
        );
    }

    #[test]
    fn expands_several_placeholders() {
        let rendered = render(
            "${configuration('google.region')}/${ env(\"USER\") }",
            &values(),
        )
        .unwrap();
        assert_eq!(rendered, "europe-west1/ci");
    }

    #[test]
    fn missing_reference_is_an_error() {
        let err = render("${ configuration(\"nope\") }", &values()).unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn malformed_placeholders_are_errors() {
        assert!(render("${ configuration(\"a\") ", &values()).is_err());
        assert!(render("${ configuration(a) }", &values()).is_err());
        assert!(render("${ secret(\"a\") }", &values()).is_err());
    }

    #[test]
    fn dollar_without_brace_is_literal() {
        assert_eq!(render("cost: $5 {x}", &values()).unwrap(), "cost: $5 {x}");
    }
}
