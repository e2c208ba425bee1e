use playbucket::engine::{canonical_set, canonicalize, normalize_label};

#[test]
fn test_bucket_keywords() {
    let cases = [
        ("hip hop", "hip hop"),
        ("conscious hip hop", "hip hop"),
        ("Hip-Hop", "hip hop"),
        ("trap latino", "hip hop"),
        ("hiphop", "hip hop"),
        ("alternative rock", "rock"),
        ("pop punk", "rock"),
        ("nu metal", "rock"),
        ("grunge", "rock"),
        ("indie pop", "rock"),
        ("electro house", "electronic"),
        ("edm", "electronic"),
        ("dance pop", "electronic"),
        ("minimal techno", "electronic"),
        ("bebop", "jazz"),
        ("western swing", "jazz"),
        ("big band", "jazz"),
        ("bossa nova", "jazz"),
        ("lounge", "jazz"),
        ("contemporary r&b", "r&b"),
        ("rnb", "r&b"),
        ("neo soul", "r&b"),
        ("villancicos de navidad", "christmas"),
        ("christmas", "christmas"),
        ("k-pop", "pop"),
        ("pop", "pop"),
    ];

    for (raw, expected) in cases {
        assert_eq!(canonicalize(raw), expected, "raw label {:?}", raw);
    }
}

#[test]
fn test_jazz_fusion_is_jazz() {
    assert_eq!(canonicalize("jazz fusion"), "jazz");
    assert_eq!(canonicalize("jazz-fusión"), "jazz");
}

#[test]
fn test_bucket_order_precedence() {
    // "rap" is checked before "rock"
    assert_eq!(canonicalize("rap rock"), "hip hop");
    // rock keywords win over pop
    assert_eq!(canonicalize("indie pop"), "rock");
    // "soul jazz" is jazz because jazz is checked before r&b
    assert_eq!(canonicalize("soul jazz"), "jazz");
    // "electro swing" hits electronic first
    assert_eq!(canonicalize("electro swing"), "electronic");
}

#[test]
fn test_fusion_without_jazz_falls_through() {
    assert_eq!(canonicalize("fusion"), "fusion");
    assert_eq!(canonicalize("Fusion Andina"), "fusion andina");
}

#[test]
fn test_diacritic_and_hyphen_folding() {
    assert_eq!(canonicalize("Rock Clásico"), "rock");
    assert_eq!(canonicalize("Rock Clásico"), canonicalize("rock clasico"));
    assert_eq!(normalize_label("Rock Clásico"), "rock clasico");
    assert_eq!(normalize_label("jazz-fusión"), "jazz fusion");
    assert_eq!(normalize_label("Música Mexicana"), "musica mexicana");
}

#[test]
fn test_unmatched_labels_stay_distinct() {
    assert_eq!(canonicalize("  Cumbia  "), "cumbia");
    assert_eq!(canonicalize("Música Mexicana"), "musica mexicana");
    assert_ne!(canonicalize("cumbia"), canonicalize("tango"));
}

#[test]
fn test_empty_and_whitespace_labels() {
    assert_eq!(canonicalize(""), "");
    assert_eq!(canonicalize("   "), "");
    assert_eq!(canonicalize("-"), "");
}

#[test]
fn test_canonicalize_is_deterministic() {
    for raw in ["Rock Clásico", "lo-fi beats", "cumbia villera", ""] {
        assert_eq!(canonicalize(raw), canonicalize(raw));
    }
}

#[test]
fn test_canonical_set_dedups_in_first_seen_order() {
    let tags = ["grunge", "trap", "alternative rock", "hip hop", "cumbia"];
    assert_eq!(canonical_set(&tags), vec!["rock", "hip hop", "cumbia"]);
}

#[test]
fn test_canonical_set_of_nothing() {
    let tags: [&str; 0] = [];
    assert!(canonical_set(&tags).is_empty());
}

#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn canonicalize_is_total_and_pure(raw in ".*") {
            let first = canonicalize(&raw);
            prop_assert_eq!(&first, &canonicalize(&raw));
        }

        #[test]
        fn canonical_labels_are_already_normalized(raw in "[a-zA-Zá-ú -]{0,24}") {
            let canon = canonicalize(&raw);
            prop_assert_eq!(canonicalize(&canon), canon);
        }
    }
}
