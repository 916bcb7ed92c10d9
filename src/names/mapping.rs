/// Comparison key for alias and canonical lookups: trimmed, inner whitespace
/// collapsed to single spaces, lower-cased.
pub fn fold_key(raw: &str) -> String {
    collapse_whitespace(raw).to_lowercase()
}

pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-cases a letter that follows a non-letter and lower-cases every
/// other letter: `DELA ROSA, BATO` -> `Dela Rosa, Bato`, `JR.` -> `Jr.`.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_letter = false;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

/// `Last, First[, Suffix]` -> `First [Suffix] Last`.
pub fn reorder_comma_name(raw: &str) -> String {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() < 2 {
        return raw.to_string();
    }
    let mut ordered: Vec<&str> = parts[1..].iter().copied().filter(|p| !p.is_empty()).collect();
    ordered.push(parts[0]);
    ordered.join(" ")
}

/// Drops whole-word nickname tokens. Surrounding quotes or parentheses on a
/// token do not prevent the match.
pub fn strip_nicknames(raw: &str, nicknames: &[String]) -> String {
    if nicknames.is_empty() {
        return raw.to_string();
    }
    raw.split_whitespace()
        .filter(|token| {
            let bare = token.trim_matches(|c: char| !c.is_alphanumeric());
            !nicknames.iter().any(|n| n == bare)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces the whole name with a fix-up target when the name contains the
/// fix-up key as a run of whole words, case-insensitively. Later entries see
/// the output of earlier ones.
pub fn apply_fixups(name: &str, fixups: &[(String, String)]) -> String {
    let mut out = collapse_whitespace(name);
    for (key, target) in fixups {
        let haystack = format!(" {} ", fold_key(&out));
        let needle = format!(" {} ", fold_key(key));
        if needle.trim().is_empty() {
            continue;
        }
        if haystack.contains(&needle) {
            out = collapse_whitespace(target);
        }
    }
    out
}

/// The rule-based standard form of a candidate name.
pub fn standardize(raw: &str, nicknames: &[String], fixups: &[(String, String)]) -> String {
    let titled = title_case(raw.trim());
    let reordered = reorder_comma_name(&titled);
    let stripped = strip_nicknames(&reordered, nicknames);
    apply_fixups(&stripped, fixups)
}
