/// Words masked in every chirp body.
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const MASK: &str = "****";

/// Replace profane words with `****`.
///
/// Words are delimited by single spaces only, so a word with punctuation
/// attached (`"Sharbert!"`) is left as-is. Matching ignores case.
pub fn clean(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
