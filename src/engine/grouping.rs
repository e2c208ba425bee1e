use std::collections::{HashMap, HashSet};

use crate::{
    engine::canonical::canonical_set,
    types::{GenreGroup, GenreGrouping, MonthGroup, TrackPlayEvent},
    utils,
};

/// Insertion-ordered buckets of distinct-by-id events.
///
/// Buckets come out in the order their key was first seen, and within a
/// bucket the first occurrence of a track id wins.
struct Buckets {
    order: Vec<String>,
    tracks: HashMap<String, Vec<TrackPlayEvent>>,
    seen: HashMap<String, HashSet<String>>,
}

impl Buckets {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            tracks: HashMap::new(),
            seen: HashMap::new(),
        }
    }

    fn insert(&mut self, key: &str, event: &TrackPlayEvent) {
        if !self.tracks.contains_key(key) {
            self.order.push(key.to_string());
            self.tracks.insert(key.to_string(), Vec::new());
        }

        let seen = self.seen.entry(key.to_string()).or_default();
        if seen.insert(event.id.clone()) {
            if let Some(tracks) = self.tracks.get_mut(key) {
                tracks.push(event.clone());
            }
        }
    }

    fn into_groups(mut self) -> Vec<(String, Vec<TrackPlayEvent>)> {
        self.order
            .into_iter()
            .map(|key| {
                let tracks = self.tracks.remove(&key).unwrap_or_default();
                (key, tracks)
            })
            .collect()
    }
}

/// Groups events by `YYYY-MM` month of play, keeping each track once per month.
pub fn group_by_month(events: &[TrackPlayEvent]) -> Vec<MonthGroup> {
    let mut buckets = Buckets::new();
    for event in events {
        buckets.insert(&utils::month_key(event.played_at), event);
    }

    buckets
        .into_groups()
        .into_iter()
        .map(|(month_key, tracks)| MonthGroup { month_key, tracks })
        .collect()
}

/// Groups events by canonical genre.
///
/// A track whose tags span several buckets lands in each of them. Events
/// without any genre tag are skipped.
pub fn group_by_genre(events: &[TrackPlayEvent]) -> Vec<GenreGroup> {
    let mut buckets = Buckets::new();
    for event in events {
        for genre in canonical_set(event.genre_tags.as_slice()) {
            buckets.insert(&genre, event);
        }
    }

    buckets
        .into_groups()
        .into_iter()
        .map(|(genre, tracks)| GenreGroup { genre, tracks })
        .collect()
}

/// Groups events by canonical genre so that every track sits in at most one group.
///
/// Track ids assigned to more than one canonical genre anywhere in the input
/// are removed from all groups and returned once in `duplicates`. Tracks that
/// never carried a genre tag are returned in `ungenred`. Groups left empty by
/// the removal are dropped.
pub fn group_by_genre_dedup(events: &[TrackPlayEvent]) -> GenreGrouping {
    let mut buckets = Buckets::new();
    let mut track_genres: HashMap<&str, HashSet<String>> = HashMap::new();
    let mut first_seen: Vec<&TrackPlayEvent> = Vec::new();
    let mut known: HashSet<&str> = HashSet::new();

    for event in events {
        if known.insert(event.id.as_str()) {
            first_seen.push(event);
        }

        for genre in canonical_set(event.genre_tags.as_slice()) {
            buckets.insert(&genre, event);
            track_genres
                .entry(event.id.as_str())
                .or_default()
                .insert(genre);
        }
    }

    let ambiguous: HashSet<&str> = track_genres
        .iter()
        .filter(|(_, genres)| genres.len() > 1)
        .map(|(id, _)| *id)
        .collect();

    let genres = buckets
        .into_groups()
        .into_iter()
        .filter_map(|(genre, mut tracks)| {
            tracks.retain(|t| !ambiguous.contains(t.id.as_str()));
            (!tracks.is_empty()).then_some(GenreGroup { genre, tracks })
        })
        .collect();

    let duplicates = first_seen
        .iter()
        .filter(|t| ambiguous.contains(t.id.as_str()))
        .map(|t| (*t).clone())
        .collect();

    let ungenred = first_seen
        .iter()
        .filter(|t| !track_genres.contains_key(t.id.as_str()))
        .map(|t| (*t).clone())
        .collect();

    GenreGrouping {
        genres,
        duplicates,
        ungenred,
    }
}
