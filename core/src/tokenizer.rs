use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Terms shorter than this (in characters) are never indexed.
pub const MIN_TERM_LEN: usize = 2;

lazy_static! {
    // ASCII punctuation: !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~
    static ref PUNCT: Regex = Regex::new(r"[[:punct:]]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","an","the","and","or","but","is","are","was","were",
            "in","on","at","to","for","with","by","about","against",
            "between","into","through","during","before","after","above",
            "below","from","up","down","of","off","over","under","again",
            "further","then","once","here","there","when","where","why",
            "how","all","any","both","each","few","more","most","other",
            "some","such","no","nor","not","only","own","same","so",
            "than","too","very","s","t","can","will","just","don",
            "should","now","he","she","it","they","we","you","i","me","my",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Tokenize text into index terms: lowercase, delete ASCII punctuation, split on
/// whitespace, then drop stopwords and tokens shorter than [`MIN_TERM_LEN`].
///
/// Punctuation is removed rather than replaced, so `"don't"` yields `"dont"`.
/// Duplicates are kept in input order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = PUNCT.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TERM_LEN && !is_stopword(token))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("Running, runner's run!");
        assert_eq!(t, vec!["running", "runners", "run"]);
    }

    #[test]
    fn punctuation_is_deleted_not_split() {
        assert_eq!(tokenize("don't e-mail"), vec!["dont", "email"]);
    }

    #[test]
    fn short_and_stop_tokens_dropped() {
        assert_eq!(tokenize("I am a x"), vec!["am"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \t\n ").is_empty());
    }
}
