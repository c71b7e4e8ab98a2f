//! Built-in English/Arabic (101) layout.

use super::{KeyDescriptor, KeyKind, Layout, Rect};

pub const KEY_WIDTH: f64 = 40.0;
pub const KEY_HEIGHT: f64 = 50.0;

/// `(id, base, shifted, ar, ar_shifted)`; empty strings mean absent.
type CharRow = &'static [(&'static str, &'static str, &'static str, &'static str, &'static str)];

const DIGIT_ROW: CharRow = &[
    ("1", "1", "!", "١", ""),
    ("2", "2", "@", "٢", ""),
    ("3", "3", "#", "٣", ""),
    ("4", "4", "$", "٤", ""),
    ("5", "5", "%", "٥", ""),
    ("6", "6", "^", "٦", ""),
    ("7", "7", "&", "٧", ""),
    ("8", "8", "*", "٨", ""),
    ("9", "9", "(", "٩", ")"),
    ("0", "0", ")", "٠", "("),
];

const TOP_ROW: CharRow = &[
    ("q", "q", "Q", "ض", "َ"),
    ("w", "w", "W", "ص", "ً"),
    ("e", "e", "E", "ث", "ُ"),
    ("r", "r", "R", "ق", "ٌ"),
    ("t", "t", "T", "ف", "لإ"),
    ("y", "y", "Y", "غ", "إ"),
    ("u", "u", "U", "ع", "‘"),
    ("i", "i", "I", "ه", "÷"),
    ("o", "o", "O", "خ", "×"),
    ("p", "p", "P", "ح", "؛"),
    ("bracket_left", "[", "{", "ج", "<"),
    ("bracket_right", "]", "}", "د", ">"),
];

const HOME_ROW: CharRow = &[
    ("a", "a", "A", "ش", "ِ"),
    ("s", "s", "S", "س", "ٍ"),
    ("d", "d", "D", "ي", "]"),
    ("f", "f", "F", "ب", "["),
    ("g", "g", "G", "ل", "لأ"),
    ("h", "h", "H", "ا", "أ"),
    ("j", "j", "J", "ت", "ـ"),
    ("k", "k", "K", "ن", "،"),
    ("l", "l", "L", "م", "/"),
    ("semicolon", ";", ":", "ك", ":"),
    ("quote", "'", "\"", "ط", "\""),
];

const BOTTOM_ROW: CharRow = &[
    ("z", "z", "Z", "ئ", "~"),
    ("x", "x", "X", "ء", "ْ"),
    ("c", "c", "C", "ؤ", "}"),
    ("v", "v", "V", "ر", "{"),
    ("b", "b", "B", "لا", "لآ"),
    ("n", "n", "N", "ى", "آ"),
    ("m", "m", "M", "ة", "’"),
    ("comma", ",", "<", "و", ","),
    ("period", ".", ">", "ز", "."),
    ("slash", "/", "?", "ظ", "؟"),
    ("at", "@", "", "", ""),
];

fn push_row(keys: &mut Vec<KeyDescriptor>, row: CharRow, x0: f64, y: f64) -> f64 {
    let mut x = x0;
    for &(id, base, shifted, ar, ar_shifted) in row {
        let rect = Rect::new(x, y, KEY_WIDTH, KEY_HEIGHT);
        keys.push(KeyDescriptor::char_key(id, rect, base, shifted, ar, ar_shifted));
        x += KEY_WIDTH;
    }
    x
}

fn special(id: &str, kind: KeyKind, x: f64, y: f64, width: f64) -> KeyDescriptor {
    KeyDescriptor::new(id, kind, Rect::new(x, y, width, KEY_HEIGHT))
}

/// The stock five-row layout.
///
/// Rows are `KEY_HEIGHT` tall starting at y = 0; the bottom row holds the
/// language, space, generator and dark-mode keys.
pub fn default_layout() -> Layout {
    let mut keys = Vec::with_capacity(64);

    let end = push_row(&mut keys, DIGIT_ROW, 0.0, 0.0);
    keys.push(special("backspace", KeyKind::Backspace, end, 0.0, 2.0 * KEY_WIDTH));

    push_row(&mut keys, TOP_ROW, 0.0, KEY_HEIGHT);

    let end = push_row(&mut keys, HOME_ROW, 0.0, 2.0 * KEY_HEIGHT);
    keys.push(special("enter", KeyKind::Enter, end, 2.0 * KEY_HEIGHT, 2.0 * KEY_WIDTH));

    let y = 3.0 * KEY_HEIGHT;
    keys.push(special("shift", KeyKind::Shift, 0.0, y, 1.5 * KEY_WIDTH));
    push_row(&mut keys, BOTTOM_ROW, 1.5 * KEY_WIDTH, y);

    let y = 4.0 * KEY_HEIGHT;
    let mut x = 0.0;
    for (id, kind, width) in [
        ("lang", KeyKind::Language, 2.0),
        ("space", KeyKind::Space, 6.0),
        ("generate_name", KeyKind::GenerateName, 2.0),
        ("generate_email", KeyKind::GenerateEmail, 2.0),
        ("dark_mode", KeyKind::DarkMode, 1.5),
    ] {
        keys.push(special(id, kind, x, y, width * KEY_WIDTH));
        x += width * KEY_WIDTH;
    }

    Layout::new(keys).unwrap_or_else(|err| unreachable!("built-in layout is valid: {err}"))
}
