//! English inflection helpers for model and table names
//!
//! Covers the forms the scaffolder derives: singular table names for view
//! variables, plural model names for route and view paths, and human labels.

/// Words that have no distinct singular/plural form
const UNCOUNTABLE: &[&str] = &[
    "audio",
    "data",
    "equipment",
    "feedback",
    "fish",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
    "staff",
];

/// (singular, plural) pairs that do not follow suffix rules
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Singularize the last word of a name
///
/// Only the trailing segment is inflected so `user_roles` becomes `user_role`.
pub fn singular(word: &str) -> String {
    let (head, tail) = split_last_word(word);
    let lower = tail.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((single, _)) = IRREGULAR.iter().find(|(_, plural)| *plural == lower) {
        return format!("{}{}", head, match_case(tail, single));
    }

    let stem = if let Some(stem) = strip_suffix_ci(tail, "ies").filter(|s| s.len() > 1) {
        format!("{}y", stem)
    } else if let Some(stem) = strip_suffix_ci(tail, "ives") {
        format!("{}ife", stem)
    } else if let Some(stem) = strip_suffix_ci(tail, "uses").filter(|s| !ends_with_vowel(s)) {
        format!("{}us", stem)
    } else if let Some(stem) = ["sses", "xes", "zzes", "ches", "shes"]
        .iter()
        .find_map(|suffix| strip_suffix_ci(tail, suffix).map(|s| (s, suffix)))
        .map(|(s, suffix)| format!("{}{}", s, &suffix[..suffix.len() - 2]))
    {
        stem
    } else if lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        tail[..tail.len() - 1].to_string()
    } else {
        tail.to_string()
    };

    format!("{}{}", head, stem)
}

/// Pluralize the last word of a name
pub fn plural(word: &str) -> String {
    let (head, tail) = split_last_word(word);
    let lower = tail.to_lowercase();

    if tail.is_empty() || UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, many)) = IRREGULAR.iter().find(|(single, _)| *single == lower) {
        return format!("{}{}", head, match_case(tail, many));
    }

    let plural_tail = if lower.ends_with('y') && !ends_with_vowel_y(&lower) {
        format!("{}ies", &tail[..tail.len() - 1])
    } else if lower.ends_with("fe") {
        format!("{}ves", &tail[..tail.len() - 2])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        format!("{}es", tail)
    } else {
        format!("{}s", tail)
    };

    format!("{}{}", head, plural_tail)
}

/// Title-case a snake name for display: `created_at` becomes `Created At`
pub fn title(name: &str) -> String {
    name.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn split_last_word(word: &str) -> (&str, &str) {
    let boundary = word
        .char_indices()
        .filter(|(i, c)| *c == '_' || *c == '-' || *c == ' ' || (*i > 0 && c.is_uppercase()))
        .map(|(i, c)| if c.is_uppercase() { i } else { i + c.len_utf8() })
        .last()
        .unwrap_or(0);
    word.split_at(boundary)
}

fn strip_suffix_ci<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    if word.len() >= suffix.len()
        && word.is_char_boundary(word.len() - suffix.len())
        && word[word.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    {
        Some(&word[..word.len() - suffix.len()])
    } else {
        None
    }
}

fn ends_with_vowel(word: &str) -> bool {
    matches!(
        word.chars().last().map(|c| c.to_ascii_lowercase()),
        Some('a' | 'e' | 'i' | 'o' | 'u')
    )
}

fn ends_with_vowel_y(lower: &str) -> bool {
    let mut rev = lower.chars().rev();
    rev.next();
    matches!(rev.next(), Some('a' | 'e' | 'i' | 'o' | 'u'))
}

fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}
