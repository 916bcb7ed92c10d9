#[derive(Debug, Clone, Copy)]
pub struct AliasDef {
    pub alias: &'static str,
    pub canonical: &'static str,
}

const fn alias(alias: &'static str, canonical: &'static str) -> AliasDef {
    AliasDef { alias, canonical }
}

/// Ballot spellings ("Last, First Nickname") and common variants that the
/// standardization rules alone do not resolve.
const BUILTIN_ALIASES: &[AliasDef] = &[
    alias("Go, Bong Go", "Bong Go"),
    alias("Bong Revilla, Ramon, Jr.", "Ramon Bong Revilla Jr."),
    alias("Bong Revilla", "Ramon Bong Revilla Jr."),
    alias("Pacquiao, Manny Pacman", "Manny Pacquiao"),
    alias("Tolentino, Francis Tol", "Francis Tolentino"),
    alias("Salvador, Phillip Ipe", "Phillip Salvador"),
    alias("Phillip Ipe Salvador", "Phillip Salvador"),
    alias("Revillame, Willie Wil", "Willie Revillame"),
    alias("Tulfo, Ben Bitag", "Ben Tulfo"),
    alias("Bosita, Colonel", "Bonifacio Bosita"),
    alias("Colonel Bosita", "Bonifacio Bosita"),
    alias("Rodriguez, Atty. Vic", "Vic Rodriguez"),
    alias("Atty. Vic Rodriguez", "Vic Rodriguez"),
    alias("Bato Dela Rosa", "Bato dela Rosa"),
    alias("Panfilo Lacson", "Ping Lacson"),
    alias("Kiko Pangilinan", "Francis Kiko Pangilinan"),
];

/// Fix-ups applied to a standardized name that contains the alias as a run
/// of whole words: `Ronald Bato Dela Rosa` -> `Bato dela Rosa`. Applied in
/// order, each against the result of the previous one.
const BUILTIN_FIXUPS: &[AliasDef] = &[
    alias("Bato Dela Rosa", "Bato dela Rosa"),
    alias("Panfilo Lacson", "Ping Lacson"),
    alias("Francis Tolentino", "Francis Tolentino"),
    alias("Phillip Ipe Salvador", "Phillip Salvador"),
    alias("Willie Revillame", "Willie Revillame"),
    alias("Ben Tulfo", "Ben Tulfo"),
    alias("Colonel Bosita", "Bonifacio Bosita"),
    alias("Atty. Vic Rodriguez", "Vic Rodriguez"),
    alias("Rodante Marcoleta", "Rodante Marcoleta"),
    alias("Kiko Pangilinan", "Francis Kiko Pangilinan"),
];

/// Ballot nicknames that are dropped as whole words during standardization.
const BUILTIN_NICKNAMES: &[&str] = &["Pacman", "Tol", "Wil", "Bitag"];

pub fn builtin_aliases() -> &'static [AliasDef] {
    BUILTIN_ALIASES
}

pub fn builtin_fixups() -> &'static [AliasDef] {
    BUILTIN_FIXUPS
}

pub fn builtin_nicknames() -> &'static [&'static str] {
    BUILTIN_NICKNAMES
}
