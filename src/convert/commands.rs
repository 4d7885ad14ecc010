//! Generic command stripping with the math whitelist.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

/// Command names passed through untouched for the math renderer.
pub const MATH_COMMANDS: &[&str] = &[
    // Greek letters
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta", "vartheta",
    "iota", "kappa", "lambda", "mu", "nu", "xi", "pi", "varpi", "rho", "varrho", "sigma",
    "varsigma", "tau", "upsilon", "phi", "varphi", "chi", "psi", "omega", "Gamma", "Delta",
    "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega",
    // Operators
    "int", "sum", "prod", "coprod", "bigcup", "bigcap", "bigoplus", "bigotimes", "oint", "iint",
    "iiint",
    // Functions
    "sqrt", "frac", "dfrac", "tfrac", "binom", "sin", "cos", "tan", "cot", "sec", "csc", "sinh",
    "cosh", "tanh", "coth", "arcsin", "arccos", "arctan", "log", "ln", "lg", "exp", "lim",
    "limsup", "liminf", "sup", "inf", "max", "min", "det", "dim", "ker", "deg", "gcd", "hom",
    // Symbols
    "infty", "partial", "nabla", "pm", "mp", "times", "div", "cdot", "ast", "star", "circ",
    "bullet", "cap", "cup", "vee", "wedge", "oplus", "ominus", "otimes", "oslash", "odot", "leq",
    "geq", "neq", "equiv", "sim", "simeq", "approx", "cong", "propto", "subset", "supset",
    "subseteq", "supseteq", "in", "notin", "forall", "exists", "nexists", "emptyset", "to",
    "rightarrow", "leftarrow", "leftrightarrow", "Rightarrow", "Leftarrow", "Leftrightarrow",
    "mapsto",
    // Accents
    "hat", "bar", "tilde", "vec", "dot", "ddot", "overline", "underline", "overbrace",
    "underbrace",
    // Spacing
    "quad", "qquad",
    // Text in math
    "text", "mathrm", "mathbf", "mathit", "mathsf", "mathtt", "mathcal", "mathbb", "mathfrak",
    // Delimiters
    "left", "right", "big", "Big", "bigg", "Bigg",
];

static WHITELIST: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| MATH_COMMANDS.iter().copied().collect());

/// A command name; its optional brace group is found with [`closing_brace`].
static COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\([a-zA-Z]+)").expect("valid command regex"));

/// Offset of the `}` closing a group whose `{` sits just before `text`.
///
/// Nested groups are balanced and backslash escapes (`\{`, `\}`) are
/// skipped. Returns `None` when the group never closes.
pub(crate) fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, byte) in text.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' => escaped = true,
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// The balanced `{...}` group at the start of `text`, without its braces.
pub(crate) fn leading_group(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?;
    closing_brace(inner).map(|close| &inner[..close])
}

/// Check whether `name` is passed through for math rendering.
#[inline]
pub fn is_math_command(name: &str) -> bool {
    WHITELIST.contains(name)
}

/// Strip every non-whitelisted command from `text`.
///
/// `\name{arg}` becomes `arg` (itself stripped) and a bare `\name`
/// disappears, unless `name` is in [`MATH_COMMANDS`], in which case the
/// command and its group are kept as written. Only one balanced group
/// belongs to a command.
///
/// # Example
///
/// ```
/// use latex_preview::convert::strip_commands;
///
/// assert_eq!(strip_commands(r"\foo{bar} \alpha{x} \noindent"), r"bar \alpha{x} ");
/// ```
pub fn strip_commands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    while let Some(caps) = COMMAND.captures_at(text, last) {
        let Some(head) = caps.get(0) else { break };
        let group = leading_group(&text[head.end()..]);
        let end = head.end() + group.map_or(0, |arg| arg.len() + 2);

        out.push_str(&text[last..head.start()]);
        if is_math_command(&caps[1]) {
            out.push_str(&text[head.start()..end]);
        } else if let Some(arg) = group {
            out.push_str(&strip_commands(arg));
        }
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_byte_identical() {
        for name in MATH_COMMANDS {
            let with_arg = format!(r"\{name}{{x}}");
            assert_eq!(strip_commands(&with_arg), with_arg);
            let bare = format!(r"\{name}");
            assert_eq!(strip_commands(&bare), bare);
        }
    }

    #[test]
    fn test_non_whitelisted() {
        for name in ["foo", "noindent", "label", "vspace", "begin", "hline"] {
            assert_eq!(strip_commands(&format!(r"\{name}{{arg}}")), "arg");
            assert_eq!(strip_commands(&format!(r"\{name}")), "");
        }
    }

    #[test]
    fn test_non_letter_escapes_untouched() {
        assert_eq!(strip_commands(r"a \\ b \[ x \] 5\%"), r"a \\ b \[ x \] 5\%");
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(strip_commands(r"On \textsc{Things}"), "On Things");
        assert_eq!(strip_commands(r"\foo{a \bar{b} c} d"), "a b c d");
        assert_eq!(strip_commands(r"\mathbf{\foo{x}}"), r"\mathbf{\foo{x}}");
        assert_eq!(strip_commands(r"\foo{a \} b}"), r"a \} b");
    }

    #[test]
    fn test_unbalanced_group_left_as_text() {
        assert_eq!(strip_commands(r"\foo{bar"), "{bar");
    }

    #[test]
    fn test_closing_brace() {
        assert_eq!(closing_brace("a}b"), Some(1));
        assert_eq!(closing_brace("a{b}c}"), Some(5));
        assert_eq!(closing_brace(r"\}x}"), Some(3));
        assert_eq!(closing_brace("{x}"), None);
        assert_eq!(leading_group("{é{x}}rest"), Some("é{x}"));
        assert_eq!(leading_group("x{y}"), None);
    }

    #[test]
    fn test_only_first_group_consumed() {
        assert_eq!(strip_commands(r"\frac{a}{b}"), r"\frac{a}{b}");
        assert_eq!(strip_commands(r"\fbox{a}{b}"), "a{b}");
    }
}
