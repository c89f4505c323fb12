use serde::Serialize;

/// Longest vowel or consonant run that still reads naturally.
const MAX_RUN: usize = 3;

/// Identical characters in a row at which a run stops being pronounceable.
const REPEAT_LIMIT: usize = 3;

/// Lexical metrics derived from a domain string alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainMetrics {
    pub length: usize,
    pub hyphen_count: usize,
    pub digit_count: usize,
    pub readable_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Vowel,
    Consonant,
    Other,
}

fn classify(c: char) -> CharClass {
    match c {
        'a' | 'e' | 'i' | 'o' | 'u' => CharClass::Vowel,
        c if c.is_ascii_alphabetic() => CharClass::Consonant,
        _ => CharClass::Other,
    }
}

pub fn compute_metrics(domain: &str) -> DomainMetrics {
    let chars: Vec<char> = domain.chars().collect();

    DomainMetrics {
        length: chars.len(),
        hyphen_count: chars.iter().filter(|&&c| c == '-').count(),
        digit_count: chars.iter().filter(|c| c.is_ascii_digit()).count(),
        readable_ratio: readable_ratio_of(&chars),
    }
}

/// Fraction of adjacent pairs that alternate between a vowel and a consonant.
///
/// Positions inside a same-class letter run longer than three, or inside a
/// run of three or more identical characters, never count as alternations.
/// Strings shorter than two characters are fully readable.
pub fn readable_ratio(domain: &str) -> f64 {
    let chars: Vec<char> = domain.chars().collect();
    readable_ratio_of(&chars)
}

fn readable_ratio_of(chars: &[char]) -> f64 {
    if chars.len() < 2 {
        return 1.0;
    }

    let classes: Vec<CharClass> = chars.iter().map(|&c| classify(c)).collect();
    let mut penalized = vec![false; chars.len()];

    mark_runs(&mut penalized, MAX_RUN + 1, |i| {
        classes[i] != CharClass::Other && classes[i] == classes[i - 1]
    });
    mark_runs(&mut penalized, REPEAT_LIMIT, |i| chars[i] == chars[i - 1]);

    let alternations = (0..chars.len() - 1)
        .filter(|&i| {
            let (a, b) = (classes[i], classes[i + 1]);
            a != CharClass::Other
                && b != CharClass::Other
                && a != b
                && !penalized[i]
                && !penalized[i + 1]
        })
        .count();

    (alternations as f64 / (chars.len() - 1) as f64).clamp(0.0, 1.0)
}

/// Flags every position of a maximal run at least `min_len` long, where
/// `continues(i)` says whether position `i` extends the run ending at `i - 1`.
fn mark_runs<F>(penalized: &mut [bool], min_len: usize, continues: F)
where
    F: Fn(usize) -> bool,
{
    let mut start = 0;
    for i in 1..=penalized.len() {
        if i < penalized.len() && continues(i) {
            continue;
        }
        if i - start >= min_len {
            penalized[start..i].iter_mut().for_each(|p| *p = true);
        }
        start = i;
    }
}
