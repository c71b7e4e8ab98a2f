//! Random test-data generation for the name and email keys.
//!
//! Purely cosmetic: names alternate consonant/vowel so they are pronounceable,
//! nothing here is meant to be unpredictable.

use rand::Rng;
use rand::seq::IndexedRandom;

const VOWELS: &[u8] = b"aeiou";
const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwxyz";

/// Shortest and longest half of a generated full name.
pub const NAME_PART_LEN: std::ops::RangeInclusive<usize> = 3..=7;

pub const DEFAULT_EMAIL_DOMAINS: [&str; 5] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "protonmail.com",
];

/// Builds a capitalized name of exactly `len` chars, consonant first.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let mut name = String::with_capacity(len);
    for i in 0..len {
        let pool = if i % 2 == 0 { CONSONANTS } else { VOWELS };
        let letter = pool[rng.random_range(0..pool.len())] as char;
        if i == 0 {
            name.push(letter.to_ascii_uppercase());
        } else {
            name.push(letter);
        }
    }
    name
}

fn random_part<R: Rng + ?Sized>(rng: &mut R) -> String {
    let len = rng.random_range(NAME_PART_LEN);
    random_name(rng, len)
}

/// `"First Last"`, each half 3 to 7 letters.
pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = random_part(rng);
    let last = random_part(rng);
    format!("{first} {last}")
}

/// `first.last<n>@domain` with `n` in `0..1000` and the domain picked
/// uniformly from `domains` (the stock list when `domains` is empty).
pub fn email<R: Rng + ?Sized, S: AsRef<str>>(rng: &mut R, domains: &[S]) -> String {
    let first = random_part(rng).to_lowercase();
    let last = random_part(rng).to_lowercase();
    let number = rng.random_range(0..1000u32);
    let domain = domains
        .choose(rng)
        .map(|d| d.as_ref())
        .or_else(|| DEFAULT_EMAIL_DOMAINS.choose(rng).copied())
        .unwrap_or(DEFAULT_EMAIL_DOMAINS[0]);
    format!("{first}.{last}{number}@{domain}")
}
