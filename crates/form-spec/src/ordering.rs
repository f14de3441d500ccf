use std::cmp::Ordering;

use crate::schema::question::Question;

/// Leading-digit sentinel for unlabeled questions so they sort last.
const UNNUMBERED: u64 = u64::MAX;

/// Parsed form of a free-text question number label such as `"12a"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberKey {
    /// Leading run of digits; [`UNNUMBERED`] when the label has none.
    pub prefix: u64,
    /// Whatever trails the digits, e.g. `"a"`. Empty sorts first.
    pub suffix: String,
}

/// Split a question number label into its numeric prefix and suffix.
pub fn parse_number(label: &str) -> NumberKey {
    let trimmed = label.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    let suffix = trimmed[digits.len()..].to_string();
    let prefix = if digits.is_empty() {
        UNNUMBERED
    } else {
        // A pathological run of digits longer than u64 still sorts last.
        digits.parse().unwrap_or(UNNUMBERED)
    };
    NumberKey { prefix, suffix }
}

/// Display comparator: numeric prefix only, ties broken by the stored
/// `order` integer. Used when listing or filling a form.
pub fn display_cmp(a: &Question, b: &Question) -> Ordering {
    let key_a = parse_number(&a.question_number);
    let key_b = parse_number(&b.question_number);
    key_a
        .prefix
        .cmp(&key_b.prefix)
        .then_with(|| a.order.cmp(&b.order))
}

/// Renumber comparator: numeric prefix, then trailing suffix (empty
/// first), then `order`. Used when reordering parent and children
/// together for editing.
pub fn renumber_cmp(a: &Question, b: &Question) -> Ordering {
    let key_a = parse_number(&a.question_number);
    let key_b = parse_number(&b.question_number);
    key_a
        .prefix
        .cmp(&key_b.prefix)
        .then_with(|| key_a.suffix.cmp(&key_b.suffix))
        .then_with(|| a.order.cmp(&b.order))
}

/// Stable sort of sibling questions for answer-time rendering.
pub fn sort_for_display(questions: &[Question]) -> Vec<Question> {
    let mut sorted = questions.to_vec();
    sorted.sort_by(display_cmp);
    sorted
}

/// Stable sort of sibling questions for the renumber transform.
pub fn sort_for_renumber(questions: &[Question]) -> Vec<Question> {
    let mut sorted = questions.to_vec();
    sorted.sort_by(renumber_cmp);
    sorted
}

/// Assign sequential labels `"1","2",...` to top-level questions in
/// renumber order, and `"<parent>a","<parent>b",...` to each parent's
/// sub-questions in theirs. Returns a new sequence; `order` and ids are
/// untouched.
pub fn renumber(questions: &[Question]) -> Vec<Question> {
    let mut renumbered = sort_for_renumber(questions);
    for (index, question) in renumbered.iter_mut().enumerate() {
        let label = (index + 1).to_string();
        question.question_number = label.clone();

        let mut subs = sort_for_renumber(&question.sub_questions);
        for (sub_index, sub) in subs.iter_mut().enumerate() {
            sub.question_number = format!("{label}{}", letter_label(sub_index));
        }
        question.sub_questions = subs;
    }
    renumbered
}

/// Spreadsheet-style letter sequence: a..z, aa, ab, ...
fn letter_label(index: usize) -> String {
    let mut remaining = index;
    let mut label = Vec::new();
    loop {
        label.push(b'a' + (remaining % 26) as u8);
        remaining /= 26;
        if remaining == 0 {
            break;
        }
        remaining -= 1;
    }
    label.reverse();
    String::from_utf8(label).expect("ascii letters")
}
