//! Placeholder substitution
//!
//! Templates mark substitution points with an identifier wrapped in a
//! delimiter on both sides, e.g. `$&label$&`. This is deliberately not a
//! template language: there are no loops, conditionals or escaping.

use super::context::RenderContext;

/// Delimiter used by the bundled templates
pub const DEFAULT_DELIMITER: &str = "$&";

/// Replace every placeholder in `template` with its value from `context`.
///
/// - Unknown identifiers render as empty text.
/// - Substituted values are never scanned again, so a value that looks like a
///   placeholder is emitted literally.
/// - A delimiter that does not open a well-formed placeholder is copied as-is.
pub fn render(template: &str, context: &RenderContext, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return template.to_string();
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(delimiter) {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + delimiter.len()..];

        match placeholder_len(after_open, delimiter) {
            Some(ident_len) => {
                let ident = &after_open[..ident_len];
                if let Some(value) = context.get(ident) {
                    output.push_str(value);
                }
                rest = &after_open[ident_len + delimiter.len()..];
            }
            None => {
                output.push_str(delimiter);
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

/// Length of the identifier if `text` starts with `ident` + `delimiter`
fn placeholder_len(text: &str, delimiter: &str) -> Option<usize> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return None,
    }

    let len = chars
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    text[len..].starts_with(delimiter).then_some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> RenderContext {
        let mut context = RenderContext::new();
        for (key, value) in pairs {
            context.insert(*key, *value);
        }
        context
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let ctx = context(&[("componentName", "Boiler")]);
        let out = render(
            "export default function $&componentName$&() { /* $&componentName$& */ }",
            &ctx,
            DEFAULT_DELIMITER,
        );
        assert_eq!(out, "export default function Boiler() { /* Boiler */ }");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let ctx = context(&[("componentName", "Boiler"), ("unit", "C")]);
        let out = render("$&componentName$&$&unit$&", &ctx, DEFAULT_DELIMITER);
        assert_eq!(out, "BoilerC");
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let ctx = RenderContext::new();
        let out = render("const SETPOINT = $&setpoint$&;", &ctx, DEFAULT_DELIMITER);
        assert_eq!(out, "const SETPOINT = ;");
    }

    #[test]
    fn test_values_are_not_expanded_again() {
        let ctx = context(&[("label", "$&label$&"), ("unit", "$&icon$&"), ("icon", "Flame")]);
        let out = render("<h1>$&label$& [$&unit$&]</h1>", &ctx, DEFAULT_DELIMITER);
        assert_eq!(out, "<h1>$&label$& [$&icon$&]</h1>");
    }

    #[test]
    fn test_stray_delimiters_are_literal() {
        let ctx = context(&[("label", "Temp")]);
        assert_eq!(
            render("s.replace(/x/g, '$&')", &ctx, DEFAULT_DELIMITER),
            "s.replace(/x/g, '$&')"
        );
        assert_eq!(
            render("$& $&label$&", &ctx, DEFAULT_DELIMITER),
            "$& Temp"
        );
        assert_eq!(render("$&1abc$&", &ctx, DEFAULT_DELIMITER), "$&1abc$&");
        assert_eq!(render("trailing $&label", &ctx, DEFAULT_DELIMITER), "trailing $&label");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let ctx = context(&[("componentName", "Boiler"), ("pollingInterval", "3000")]);
        let template = "setInterval(fetch$&componentName$&, $&pollingInterval$&)";
        let first = render(template, &ctx, DEFAULT_DELIMITER);
        let second = render(template, &ctx, DEFAULT_DELIMITER);
        assert_eq!(first, second);
        assert_eq!(first, "setInterval(fetchBoiler, 3000)");
    }

    #[test]
    fn test_custom_delimiter() {
        let ctx = context(&[("name", "Pump")]);
        assert_eq!(render("<%name%> <%other%>", &ctx, "%"), "<Pump> <>");
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        let ctx = context(&[("unit", "°C")]);
        assert_eq!(
            render("Température: 20$&unit$&", &ctx, DEFAULT_DELIMITER),
            "Température: 20°C"
        );
    }
}
