//! Utilities to help with writing problems for external solvers
use std::borrow::Cow;
use std::collections::HashSet;

/// Useful to generate a list of unique valid .lp column names
#[derive(Debug, Default)]
pub struct UniqueNameGenerator {
    names: HashSet<String>,
}

impl UniqueNameGenerator {
    /// Returns a valid column name for `name`, never returned before by this generator.
    ///
    /// ```
    /// use lp_models::util::UniqueNameGenerator;
    ///
    /// let mut gen = UniqueNameGenerator::default();
    /// assert_eq!(gen.add_variable("x"), "x");
    /// assert_eq!(gen.add_variable("p_0"), "p_0");
    /// assert_eq!(gen.add_variable("x[1]"), "x1"); // brackets are not valid in .lp names
    /// assert_eq!(gen.add_variable("!#?/"), "v");
    /// assert_eq!(gen.add_variable("3rd"), "v3rd"); // names cannot start with a digit
    /// assert_eq!(gen.add_variable("x"), "x_2"); // A variable with name x is already present
    /// assert_eq!(gen.add_variable("free"), "free_2"); // .lp keyword
    /// ```
    pub fn add_variable<'a>(&mut self, name: &'a str) -> Cow<'a, str> {
        let stem = stem(name);
        let mut candidate = stem.clone();
        let mut n = 1;
        while is_reserved(&candidate) || self.names.contains(candidate.as_ref()) {
            n += 1;
            candidate = Cow::Owned(format!("{}_{}", stem, n));
        }
        self.names.insert(candidate.clone().into_owned());
        candidate
    }
}

/// Words with a meaning of their own in .lp files, compared case-insensitively
const RESERVED: &[&str] = &[
    "bin", "binaries", "binary", "bound", "bounds", "end", "free", "gen", "general", "generals",
    "inf", "infinity", "int", "integer", "integers", "max", "maximise", "maximize", "maximum",
    "min", "minimise", "minimize", "minimum", "semi", "semis", "st", "subject", "such", "to",
];

fn is_reserved(name: &str) -> bool {
    RESERVED.iter().any(|word| word.eq_ignore_ascii_case(name))
}

fn is_valid_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn stem(name: &str) -> Cow<str> {
    let starts_ok = name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_');
    if starts_ok && name.chars().all(is_valid_char) {
        return Cow::Borrowed(name);
    }
    let mut owned: String = name.chars().filter(|&c| is_valid_char(c)).collect();
    if !owned.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        owned.insert(0, 'v');
    }
    Cow::Owned(owned)
}
