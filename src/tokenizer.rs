//! Splits the text of one pipeline segment into an argument list.

use std::fmt;

/// Maximum number of arguments kept for a single command. Tokens past this
/// limit are dropped without an error.
pub const MAX_ARGS: usize = 128;

/// Arguments of one command, `argv[0]` being the command name.
///
/// Every segment gets its own list; nothing is shared between the commands of
/// a pipeline. Reading past the end yields `None`, which plays the role of the
/// terminating null entry of a C `argv`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    args: Vec<String>,
    quoted: Vec<bool>,
}

impl ArgumentList {
    fn push(&mut self, arg: &str, quoted: bool) {
        self.args.push(arg.to_owned());
        self.quoted.push(quoted);
    }

    /// The command name, if there is one.
    pub fn name(&self) -> Option<&str> {
        self.get(0)
    }

    /// Argument at `index`, or `None` at and after the end of the list.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    /// Everything after the command name.
    pub fn operands(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Index of the first unquoted argument equal to `token`.
    pub fn find_unquoted(&self, token: &str) -> Option<usize> {
        self.args
            .iter()
            .zip(&self.quoted)
            .position(|(arg, quoted)| !quoted && arg == token)
    }

    /// Shortens the list to `len` arguments; no-op if it is already shorter.
    pub fn truncate(&mut self, len: usize) {
        self.args.truncate(len);
        self.quoted.truncate(len);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ArgumentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

/// Argument separators: the characters C's `isspace` accepts in the default
/// locale. Other Unicode spaces are part of an argument.
pub(crate) fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '\x0b'
}

/// Tokenize one command's text into at most `max_args` arguments.
///
/// Arguments are separated by runs of ASCII whitespace. An argument starting with
/// `'` or `"` extends to the next occurrence of the same quote character, or
/// to the end of the input when the quote is never closed; the quotes are not
/// part of the value. Quotes in the middle of an unquoted argument are kept
/// literally.
pub fn tokenize(text: &str, max_args: usize) -> ArgumentList {
    let mut args = ArgumentList::default();
    let mut rest = text;

    while args.len() < max_args {
        rest = rest.trim_start_matches(is_separator);
        let Some(first) = rest.chars().next() else {
            break;
        };

        let quoted = first == '"' || first == '\'';
        let (token, remainder) = if quoted {
            let body = &rest[1..];
            match body.find(first) {
                Some(end) => (&body[..end], &body[end + 1..]),
                None => (body, ""),
            }
        } else {
            match rest.find(is_separator) {
                Some(end) => rest.split_at(end),
                None => (rest, ""),
            }
        };

        args.push(token, quoted);
        rest = remainder;
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text, MAX_ARGS).as_slice().to_vec()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("ls"), vec!["ls"]);
        assert_eq!(words("mkdir  \t new_dir  "), vec!["mkdir", "new_dir"]);
    }

    #[test]
    fn quoted_arguments_keep_spaces() {
        assert_eq!(words(r#"echo "a b" 'c'"#), vec!["echo", "a b", "c"]);
    }

    #[test]
    fn unmatched_quote_runs_to_end() {
        assert_eq!(words(r#"echo "a b"#), vec!["echo", "a b"]);
        assert_eq!(words("echo 'it is"), vec!["echo", "it is"]);
    }

    #[test]
    fn other_quote_kind_is_literal_inside_quotes() {
        assert_eq!(words(r#"echo "it's here""#), vec!["echo", "it's here"]);
    }

    #[test]
    fn adjacent_quotes_give_empty_argument() {
        assert_eq!(words(r#"echo "" x"#), vec!["echo", "", "x"]);
    }

    #[test]
    fn quote_inside_word_is_literal() {
        assert_eq!(words(r#"echo a"b c""#), vec!["echo", "a\"b", "c\""]);
    }

    #[test]
    fn closing_quote_ends_argument() {
        assert_eq!(words(r#"echo "a"b"#), vec!["echo", "a", "b"]);
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("", MAX_ARGS).is_empty());
        assert!(tokenize(" \t ", MAX_ARGS).is_empty());
    }

    #[test]
    fn excess_tokens_are_dropped() {
        let line = (0..130).map(|i| format!("t{i}")).collect::<Vec<_>>().join(" ");
        let args = tokenize(&line, MAX_ARGS);
        assert_eq!(args.len(), 128);
        assert_eq!(args.get(127), Some("t127"));
        assert_eq!(args.get(128), None);
    }

    #[test]
    fn custom_limit() {
        let args = tokenize("a b c d", 2);
        assert_eq!(args.as_slice(), ["a", "b"]);
    }

    #[test]
    fn only_ascii_whitespace_separates() {
        assert_eq!(words("echo a\u{3000}b"), vec!["echo", "a\u{3000}b"]);
        assert_eq!(words("echo\u{a0}x y"), vec!["echo\u{a0}x", "y"]);
        assert_eq!(words("\x0becho\x0bx\r\x0c"), vec!["echo", "x"]);
    }

    #[test]
    fn list_accessors() {
        let mut args = tokenize("echo hi > out.txt", MAX_ARGS);
        assert_eq!(args.name(), Some("echo"));
        assert_eq!(args.operands(), ["hi", ">", "out.txt"]);
        assert_eq!(args.find_unquoted(">"), Some(2));
        assert_eq!(args.get(1), Some("hi"));
        args.truncate(2);
        assert_eq!(args.to_string(), "echo hi");
        assert_eq!(args.get(2), None);
    }

    #[test]
    fn quoting_is_remembered() {
        let args = tokenize("echo '>' > out", MAX_ARGS);
        assert_eq!(args.get(1), Some(">"));
        assert_eq!(args.find_unquoted(">"), Some(2));
        assert_eq!(tokenize("echo \">\" x", MAX_ARGS).find_unquoted(">"), None);
    }

    #[test]
    fn operands_of_empty_list() {
        let args = ArgumentList::default();
        assert!(args.operands().is_empty());
        assert_eq!(args.name(), None);
    }
}
