//! Fixed Cyrillic → Latin phonetic substitution table.
//!
//! Characters absent from the table pass through unchanged, so
//! already-Latin text is unaffected. The table covers lowercase forms;
//! callers lowercase before lookup.

/// Look up the Latin replacement for a single character.
///
/// Returns `None` for characters the table does not cover.
pub fn map_char(ch: char) -> Option<&'static str> {
    Some(match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' | 'ю' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        // Soft and hard signs have no phonetic value
        'ъ' | 'ь' => "",
        'я' => "ya",
        _ => return None,
    })
}

/// Transliterate a string through the substitution table.
///
/// Input is lowercased character by character before lookup, so
/// uppercase Cyrillic maps the same way as lowercase.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        for lower in ch.to_lowercase() {
            match map_char(lower) {
                Some(mapped) => out.push_str(mapped),
                None => out.push(lower),
            }
        }
    }
    out
}
