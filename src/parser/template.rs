//! Substep description rendering.
//!
//! Templates use `{name}` placeholders for identifiers and `{{` / `}}` for
//! literal braces:
//!
//! ```text
//! ssh admin@{mtor} 'show interface status'
//! rpower {server}01-{server}22 on
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::TemplateError;
use crate::models::{Catalog, IdentifierSet};

/// Escaped braces or a `{...}` group without nested braces.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").expect("template token pattern is valid")
});

/// Renders the description of `substep` with the current identifiers.
///
/// A substep without a template renders as the empty string. Placeholders
/// whose identifier is not derived yet render empty.
pub fn render(
    catalog: &Catalog,
    substep: &str,
    identifiers: &IdentifierSet,
) -> Result<String, TemplateError> {
    match catalog.template(substep) {
        Some(template) => render_str(substep, template, identifiers),
        None => Ok(String::new()),
    }
}

/// Renders a single template string. `substep` is only used for error reporting.
pub fn render_str(
    substep: &str,
    template: &str,
    identifiers: &IdentifierSet,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for captures in TOKEN.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        push_literal(&mut output, substep, template, cursor, whole.start())?;

        match (whole.as_str(), captures.get(1)) {
            ("{{", _) => output.push('{'),
            ("}}", _) => output.push('}'),
            (_, Some(name)) => {
                let value = identifiers.lookup(name.as_str().trim()).ok_or_else(|| {
                    TemplateError::UnknownPlaceholder {
                        substep: substep.to_string(),
                        name: name.as_str().to_string(),
                    }
                })?;
                output.push_str(value);
            }
            _ => unreachable!("token regex only matches escapes and groups"),
        }
        cursor = whole.end();
    }

    push_literal(&mut output, substep, template, cursor, template.len())?;
    Ok(output)
}

/// Copies literal text, rejecting any brace that was not part of a token.
fn push_literal(
    output: &mut String,
    substep: &str,
    template: &str,
    start: usize,
    end: usize,
) -> Result<(), TemplateError> {
    let literal = &template[start..end];
    if let Some(offset) = literal.find(['{', '}']) {
        return Err(TemplateError::UnbalancedBrace {
            substep: substep.to_string(),
            offset: start + offset,
        });
    }
    output.push_str(literal);
    Ok(())
}

/// Renders every template in the catalog with an empty identifier set and
/// returns all failures, sorted by substep name.
pub fn validate_templates(catalog: &Catalog) -> Vec<TemplateError> {
    let blank = IdentifierSet::default();
    let mut substeps: Vec<_> = catalog.sub_step_descriptions.keys().collect();
    substeps.sort();

    substeps
        .into_iter()
        .filter_map(|substep| render(catalog, substep, &blank).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn identifiers() -> IdentifierSet {
        let mut ids = IdentifierSet::default();
        ids.apply_input("SYS-42", "fra2-rk5", "7X06");
        ids
    }

    fn catalog_with(substep: &str, template: &str) -> Catalog {
        let mut descriptions = HashMap::new();
        descriptions.insert(substep.to_string(), template.to_string());
        Catalog {
            steps: indexmap::IndexMap::new(),
            sub_step_descriptions: descriptions,
        }
    }

    #[test]
    fn test_render_all_placeholders() {
        let template =
            "{sys} {rack} {plain_rack} {mtm} {mtor} {tor} {pdu} {bmc} {server}";
        let rendered = render_str("All", template, &identifiers()).unwrap();
        assert_eq!(
            rendered,
            "SYS-42 fra2-rk5 rk5 7X06 r5-mtor r5-tor r5pdu r5bmc r5s"
        );
    }

    #[test]
    fn test_render_missing_template_is_empty() {
        let catalog = Catalog::default();
        assert_eq!(render(&catalog, "Nothing", &identifiers()).unwrap(), "");
    }

    #[test]
    fn test_render_underived_placeholder_is_empty() {
        let rendered = render_str("Ping", "ping {bmc}.", &IdentifierSet::default()).unwrap();
        assert_eq!(rendered, "ping .");
    }

    #[test]
    fn test_render_escaped_braces() {
        let rendered =
            render_str("Awk", "awk '{{print $1}}' {server}.txt", &identifiers()).unwrap();
        assert_eq!(rendered, "awk '{print $1}' r5s.txt");
    }

    #[test]
    fn test_render_multiline() {
        let rendered = render_str("Multi", "a {tor}\nb {pdu}\n", &identifiers()).unwrap();
        assert_eq!(rendered, "a r5-tor\nb r5pdu\n");
    }

    #[test]
    fn test_unknown_placeholder_is_error() {
        let err = render_str("Cable", "connect {pud}", &identifiers()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                substep: "Cable".to_string(),
                name: "pud".to_string(),
            }
        );
    }

    #[test]
    fn test_unbalanced_braces_are_errors() {
        assert!(matches!(
            render_str("Open", "echo {tor", &identifiers()),
            Err(TemplateError::UnbalancedBrace { offset: 5, .. })
        ));
        assert!(matches!(
            render_str("Close", "echo tor}", &identifiers()),
            Err(TemplateError::UnbalancedBrace { offset: 8, .. })
        ));
    }

    #[test]
    fn test_validate_templates_collects_failures() {
        let mut catalog = catalog_with("Good", "ssh {mtor}");
        catalog
            .sub_step_descriptions
            .insert("Bad".to_string(), "ssh {switch}".to_string());

        let errors = validate_templates(&catalog);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("switch"));
    }
}
