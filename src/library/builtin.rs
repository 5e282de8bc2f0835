use std::path::Path;

use super::model::Track;

/// The stock three-track playlist, with sources resolved against `assets_dir`.
pub fn builtin_tracks(assets_dir: &Path) -> Vec<Track> {
    let entries: [(&str, &str, &str, &str); 3] = [
        (
            "Jailer BGM",
            "Anirudh Ravichander",
            "Track1.mp3",
            "https://img.freepik.com/premium-photo/concept-eternal-theme-about-eternity-music-musical-instruments-good-mood-ascended-aspiration-action-treble-clef-sheet-music_771426-4115.jpg?w=740",
        ),
        (
            "Kaththi BGM",
            "Anirudh Ravichander",
            "Track2.mp3",
            "https://tse4.mm.bing.net/th?id=OIP.nwH0GKmmn6yuVl7Ffv3rTwHaEK&pid=Api&P=0&h=180",
        ),
        (
            "Sillunu Oru Kadhal",
            "AR Rahman",
            "Track3.mp3",
            "https://images.alphacoders.com/109/1090856.jpg",
        ),
    ];

    entries
        .iter()
        .map(|(title, artist, file, cover)| Track {
            title: title.to_string(),
            artist: artist.to_string(),
            source: assets_dir.join(file),
            cover_url: cover.to_string(),
        })
        .collect()
}
