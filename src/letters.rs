use std::{
    fmt::{self, Debug, Display, Write},
    ops::{Index, IndexMut, Neg},
};

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Letter(u8);

impl Letter {
    #[cfg(test)]
    pub const fn new(letter: char) -> Self {
        if !letter.is_ascii_lowercase() {
            panic!("letter out of range");
        }
        Self((letter as u8) - b'a')
    }

    /// Case-insensitive; anything outside `a-z`/`A-Z` has no letter.
    pub const fn from_ascii(ch: char) -> Option<Self> {
        match ch {
            'a'..='z' => Some(Self(ch as u8 - b'a')),
            'A'..='Z' => Some(Self(ch as u8 - b'A')),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = Letter> {
        (0..26).map(Letter)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn to_uppercase(self) -> char {
        (self.0 + b'A') as char
    }
}

impl Debug for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Letter").field(&char::from(*self)).finish()
    }
}

impl Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        (value.0 + b'a') as char
    }
}

/// Letters of `text`, skipping everything that is not an ASCII letter.
pub fn letters_of(text: &str) -> impl Iterator<Item = Letter> + '_ {
    text.chars().filter_map(Letter::from_ascii)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterMap<T>([T; 26]);

impl<T> LetterMap<T> {
    pub const fn new(values: [T; 26]) -> Self {
        Self(values)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.0.iter_mut()
    }

    pub fn entries(&self) -> impl Iterator<Item = (Letter, &T)> {
        Letter::all().zip(self.0.iter())
    }
}

impl<T> IndexMut<Letter> for LetterMap<T> {
    fn index_mut(&mut self, index: Letter) -> &mut Self::Output {
        &mut self.0[index.index()]
    }
}

impl<T> Index<Letter> for LetterMap<T> {
    type Output = T;

    fn index(&self, index: Letter) -> &Self::Output {
        &self.0[index.index()]
    }
}

/// Signed per-letter residual between a source text and an anagram candidate.
///
/// Positive entries are letters the source still has to offer, negative
/// entries are letters the candidate uses but the source does not have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LetterCounts(LetterMap<i32>);

impl LetterCounts {
    pub fn between(source: &str, candidate: &str) -> Self {
        let mut counts = LetterMap::default();
        for letter in letters_of(source) {
            counts[letter] += 1;
        }
        for letter in letters_of(candidate) {
            counts[letter] -= 1;
        }
        Self(counts)
    }

    /// Inverse of [`LetterCounts::remaining`]: lowercase letters count as
    /// surplus, uppercase ones as deficit.
    #[cfg(test)]
    pub fn from_remaining(remaining: &str) -> Self {
        let mut counts = LetterMap::default();
        for ch in remaining.chars() {
            if let Some(letter) = Letter::from_ascii(ch) {
                counts[letter] += if ch.is_ascii_uppercase() { -1 } else { 1 };
            }
        }
        Self(counts)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|count| count.unsigned_abs()).sum()
    }

    pub fn is_anagram(&self) -> bool {
        self.total() == 0
    }

    pub fn get(&self, letter: Letter) -> i32 {
        self.0[letter]
    }

    pub fn map(&self) -> &LetterMap<i32> {
        &self.0
    }

    /// Missing letters in lowercase, extra letters in uppercase, a to z.
    pub fn remaining(&self) -> String {
        let mut out = String::with_capacity(self.total() as usize);
        for (letter, &count) in self.0.entries() {
            let ch = if count > 0 {
                char::from(letter)
            } else {
                letter.to_uppercase()
            };
            out.extend(std::iter::repeat(ch).take(count.unsigned_abs() as usize));
        }
        out
    }
}

impl Neg for LetterCounts {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.0.iter_mut().for_each(|count| *count = -*count);
        self
    }
}

impl From<LetterMap<i32>> for LetterCounts {
    fn from(value: LetterMap<i32>) -> Self {
        Self(value)
    }
}
