use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target alphabet for affix detection, in declared order (final forms included).
pub const AFFIX_ALPHABET: [char; 27] = [
    'א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט', 'י', 'כ', 'ך', 'ל', 'מ', 'ם', 'נ', 'ן', 'ס', 'ע',
    'פ', 'ף', 'צ', 'ץ', 'ק', 'ר', 'ש', 'ת',
];

/// 1-based alphabet positions kept in optimized mode.
pub const OPTIMIZED_AFFIX_POSITIONS: [usize; 18] =
    [1, 2, 5, 6, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 22, 26, 27];

pub const TOP_LEMMA_COUNT: usize = 50;

/// Most frequent headline lemmas of the January 2015 reference period.
pub const TOP_LEMMAS: [&str; TOP_LEMMA_COUNT] = [
    "של", "את", "על", "הוא", "לא", "עם", "אחרי", "נתניהו", "ישראל", "זה",
    "היא", "כל", "בחירות", "ראש", "ממשלה", "שר", "נגד", "יום", "גם", "אמר",
    "משטרה", "הרצוג", "ליכוד", "כנסת", "בנט", "לפיד", "ליברמן", "עזה", "חמאס", "צבא",
    "מדינה", "בית", "איש", "שנה", "ילד", "אישה", "חדש", "גדול", "מיליון", "שקל",
    "אלף", "פיגוע", "חיזבאללה", "איראן", "אובמה", "קונגרס", "נאום", "סקר", "מנדט", "ירושלים",
];

/// 1-based position of `c` in the affix alphabet.
pub fn alphabet_position(c: char) -> Option<usize> {
    AFFIX_ALPHABET.iter().position(|&a| a == c).map(|i| i + 1)
}

pub fn in_alphabet(c: char) -> bool {
    AFFIX_ALPHABET.contains(&c)
}

const EXTRA_DASHES: [char; 2] = ['\u{2013}', '\u{2014}'];

/// Which characters count as punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunctuationClass {
    /// ASCII punctuation only.
    Ascii,
    /// ASCII punctuation plus en dash and em dash.
    #[default]
    AsciiDashes,
}

static RE_PUNCT_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:punct:]]+$").unwrap());
static RE_PUNCT_DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:punct:]\x{2013}\x{2014}]+$").unwrap());

impl PunctuationClass {
    pub fn is_punct_char(self, c: char) -> bool {
        match self {
            PunctuationClass::Ascii => c.is_ascii_punctuation(),
            PunctuationClass::AsciiDashes => c.is_ascii_punctuation() || EXTRA_DASHES.contains(&c),
        }
    }

    /// True when the token is non-empty and made of punctuation only.
    pub fn is_punct_token(self, token: &str) -> bool {
        match self {
            PunctuationClass::Ascii => RE_PUNCT_ASCII.is_match(token),
            PunctuationClass::AsciiDashes => RE_PUNCT_DASHES.is_match(token),
        }
    }

    pub fn count_punct(self, text: &str) -> usize {
        text.chars().filter(|c| self.is_punct_char(*c)).count()
    }
}

impl FromStr for PunctuationClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(PunctuationClass::Ascii),
            "ascii-dashes" | "dashes" => Ok(PunctuationClass::AsciiDashes),
            other => Err(format!("unknown punctuation class '{other}'")),
        }
    }
}
