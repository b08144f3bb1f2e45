use nextstep_core::normalize::{is_unspaced_script, terms};

/// Function words dropped from queries before scoring. Normalized form
/// (lowercase, no diacritics); English, Spanish, Vietnamese and Chinese.
const STOP_WORDS: &[&str] = &[
    "a","an","and","are","as","at","be","by","for","from","has","he","in","is","it","its","of","on","that","the","to","was","will","with","or","but","not","this","these","they","them","their","there","then","than","so","if","when","where","why","how","what","which","who","whom","whose","can","could","should","would","may","might","must","shall","do","does","did","have","had","having",
    "i","me","my","we","our","you","your","need","want","help","get","find","looking","please","some","any","am","im",
    "el","la","los","las","un","una","de","del","y","o","en","por","para","con","que","yo","mi","necesito","ayuda","busco","quiero",
    "toi","can","giup","cho","va","cua",
    "我","你","的","了","需","要","需要","我需","帮助","请",
];

pub fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}

fn push_term(out: &mut Vec<String>, term: &str) {
    if term.is_empty() || is_stop_word(term) || out.iter().any(|o| o == term) { return; }
    out.push(term.to_string());
}

/// Distinct content terms of a normalized query, in first-seen order.
///
/// Runs of unspaced script (CJK, kana, Hangul) carry no word boundaries, so
/// each run contributes its single characters and its overlapping character
/// bigrams. Extending a run only adds terms.
pub fn query_terms(normalized: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in terms(normalized) {
        if !is_unspaced(t) {
            push_term(&mut out, t);
            continue;
        }
        let chars: Vec<char> = t.chars().collect();
        let mut start = 0;
        while start < chars.len() {
            let unspaced = is_unspaced_script(chars[start]);
            let end = chars[start..]
                .iter()
                .position(|c| is_unspaced_script(*c) != unspaced)
                .map_or(chars.len(), |n| start + n);
            let run = &chars[start..end];
            if unspaced {
                for c in run {
                    push_term(&mut out, &c.to_string());
                }
                for pair in run.windows(2) {
                    push_term(&mut out, &pair.iter().collect::<String>());
                }
            } else {
                push_term(&mut out, &run.iter().collect::<String>());
            }
            start = end;
        }
    }
    out
}

pub fn is_unspaced(term: &str) -> bool {
    term.chars().any(is_unspaced_script)
}

/// True when `a` and `b` differ by at most one insertion, deletion or substitution.
pub fn within_one_edit(a: &str, b: &str) -> bool {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    if long.len() - short.len() > 1 { return false; }
    let prefix = short.iter().zip(long.iter()).take_while(|(x, y)| x == y).count();
    if short.len() == long.len() {
        short[prefix..].iter().skip(1).eq(long[prefix..].iter().skip(1))
    } else {
        short[prefix..].iter().eq(long[prefix + 1..].iter())
    }
}
