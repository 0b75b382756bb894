/// Split a file stem of the form `Artist - Title` into `(title, artist)`.
///
/// Only the first ` - ` separates the two parts, so titles may contain
/// further dashes. Stems without a separator become the title as-is, and a
/// stem with nothing after the separator keeps the whole trimmed stem as its
/// title so the row never renders blank.
pub fn split_artist_title(stem: &str) -> (String, Option<String>) {
    let Some((artist, title)) = stem.split_once(" - ") else {
        return (stem.to_string(), None);
    };

    let artist = artist.trim();
    let title = title.trim();
    // "Artist - " still has an artist; the title falls back to the stem.
    let title = if title.is_empty() { stem.trim() } else { title };
    let artist = (!artist.is_empty()).then(|| artist.to_string());

    (title.to_string(), artist)
}
