/// Collapses every whitespace run (spaces, tabs, newlines) into one space
/// and trims both ends.
#[must_use]
pub fn clean_description(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
