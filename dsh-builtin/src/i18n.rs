//! Message catalog hooks.
//!
//! Every user-facing string of the builtins goes through these functions.
//! No catalog is bundled, so lookups return the message id itself.

use std::borrow::Cow;

/// Translate a message.
pub fn gettext(msgid: &str) -> Cow<'_, str> {
    Cow::Borrowed(msgid)
}

/// Translate a message with a singular and a plural form, selected by `n`.
pub fn ngettext<'a>(singular: &'a str, plural: &'a str, n: usize) -> Cow<'a, str> {
    if n == 1 {
        Cow::Borrowed(singular)
    } else {
        Cow::Borrowed(plural)
    }
}

/// Fill the `%s` slots of a translated template, in order.
///
/// Templates are looked up before substitution so the catalog key never
/// contains user data. Missing arguments leave the slot empty.
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("%s") {
        filled.push_str(&rest[..pos]);
        filled.push_str(args.next().copied().unwrap_or(""));
        rest = &rest[pos + 2..];
    }
    filled.push_str(rest);
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngettext_selects_form() {
        assert_eq!(ngettext("keyword", "keywords", 1), "keyword");
        assert_eq!(ngettext("keyword", "keywords", 2), "keywords");
        assert_eq!(ngettext("keyword", "keywords", 0), "keywords");
    }

    #[test]
    fn test_gettext_identity() {
        assert_eq!(
            gettext("Change the shell working directory."),
            "Change the shell working directory."
        );
    }

    #[test]
    fn test_substitute_in_order() {
        assert_eq!(
            substitute("%s: cannot open: %s", &["/usr/share/help/cd", "denied"]),
            "/usr/share/help/cd: cannot open: denied"
        );
    }

    #[test]
    fn test_substitute_does_not_rescan_arguments() {
        assert_eq!(substitute("[%s] %s", &["%s", "x"]), "[%s] x");
    }

    #[test]
    fn test_substitute_missing_argument() {
        assert_eq!(substitute("%s and %s", &["one"]), "one and ");
        assert_eq!(substitute("no slots", &["unused"]), "no slots");
    }
}
