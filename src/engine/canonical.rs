use unicode_normalization::UnicodeNormalization;

/// Canonical buckets in match order. The first bucket with a matching keyword
/// wins, so "jazz fusion" lands in jazz before anything broader can claim it.
const BUCKETS: &[(&str, &[&str])] = &[
    ("hip hop", &["hip hop", "hiphop", "rap"]),
    ("rock", &["rock", "punk", "metal", "grunge", "indie"]),
    (
        "electronic",
        &["electro", "edm", "dance", "house", "techno", "electronica"],
    ),
    // "fusion" has no keyword of its own: it only means jazz next to "jazz"
    (
        "jazz",
        &[
            "jazz",
            "bop",
            "swing",
            "big band",
            "bossa nova",
            "latin jazz",
            "jazz latino",
            "jazz funk",
            "soul jazz",
            "smooth jazz",
            "lounge",
        ],
    ),
    ("r&b", &["r&b", "rnb", "soul"]),
    ("christmas", &["navidad", "christmas"]),
    ("pop", &["pop"]),
];

/// Lower-cases, turns hyphens into spaces and strips combining marks.
///
/// "Rock Clásico" becomes "rock clasico", "jazz-fusión" becomes "jazz fusion".
pub fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .replace('-', " ")
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Maps a raw genre label to its canonical bucket.
///
/// Labels matching no bucket come back as their trimmed normalized form, so
/// unrelated raw genres stay distinct. Empty input yields an empty label.
pub fn canonicalize(raw: &str) -> String {
    let lower = normalize_label(raw);

    for (bucket, keywords) in BUCKETS {
        if keywords.iter().any(|k| lower.contains(k)) {
            return (*bucket).to_string();
        }
    }

    lower.trim().to_string()
}

/// Distinct canonical genres for a set of raw tags, in first-seen order.
pub fn canonical_set<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    let mut set: Vec<String> = Vec::new();
    for tag in tags {
        let canon = canonicalize(tag.as_ref());
        if !set.contains(&canon) {
            set.push(canon);
        }
    }
    set
}

fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}
