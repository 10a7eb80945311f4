//! Text rules for book titles.
//!
//! Titles keep their fullwidth punctuation in note metadata. The display form drops it and
//! the filename form strips everything a vault or shell might choke on.
use regex::Regex;

pub const FULLWIDTH_COLON: char = '：';
pub const FULLWIDTH_QUESTION_MARK: char = '？';
const FULLWIDTH_SLASH: char = '／';

/// Drop edition notes in `(...)` and `[...]`, swap ASCII `:`/`?` for their fullwidth forms
/// and trim.
///
/// Only the first occurrence of each pattern is touched. The parenthesized and bracketed
/// runs are greedy within a line, so `"A (x) B (y)"` loses everything from the first `(`
/// to the last `)`.
pub fn clean_title(raw: &str) -> String {
    let paren_re = Regex::new(r"\(.*\)").expect("valid regex");
    let bracket_re = Regex::new(r"\[.*\]").expect("valid regex");

    let text = paren_re.replace(raw, "");
    let text = bracket_re.replace(&text, "");
    text.replacen(':', &FULLWIDTH_COLON.to_string(), 1)
        .replacen('?', &FULLWIDTH_QUESTION_MARK.to_string(), 1)
        .trim()
        .to_string()
}

pub fn join_title_and_subtitle(main: &str, subtitle: Option<&str>) -> String {
    match subtitle.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subtitle) => format!("{main}{FULLWIDTH_COLON}{subtitle}"),
        None => main.to_string(),
    }
}

pub fn to_display_title(title: &str) -> String {
    let whitespace_re = Regex::new(r"\s{2,}").expect("valid regex");

    let text = title
        .replacen(FULLWIDTH_COLON, " ", 1)
        .replacen(FULLWIDTH_QUESTION_MARK, "", 1)
        .replacen('/', &FULLWIDTH_SLASH.to_string(), 1);
    whitespace_re.replace_all(&text, " ").into_owned()
}

/// Strip punctuation that is unsafe or awkward in a file name. Spaces are kept.
pub fn sanitize_for_filename(title: &str) -> String {
    let reserved_re = Regex::new(r#"[{}\[\]/?.,;:|)*~`!\^\-+<>@#$%&\\=('"]"#).expect("valid regex");
    reserved_re.replace_all(title, "").into_owned()
}
