//! Movie records and the carousel entry sequence built from them.

use std::fmt;

/// One movie as shown on a poster card.  Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieItem {
    /// Unique key (also the list key for the renderer).
    pub id: String,
    pub title: String,
    /// Absolute URL of the poster image, if the API supplied one.
    pub poster: Option<String>,
    /// Absolute URL of the backdrop image, if the API supplied one.
    pub backdrop: Option<String>,
    /// Vote average on a 0–10 scale.
    pub rating: f64,
    pub genres: Vec<String>,
    pub description: String,
    pub release_date: Option<String>,
}

impl MovieItem {
    /// Clamp a raw API rating into `[0, 10]`; non-finite values become 0.
    pub fn normalise_rating(raw: f64) -> f64 {
        if raw.is_finite() {
            raw.clamp(0.0, 10.0)
        } else {
            0.0
        }
    }
}

/// Which end of the list a spacer sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacerSide {
    Left,
    Right,
}

/// One slot in the scrollable list: either a real movie or an empty spacer
/// that lets the first/last movie reach the centred snap position.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEntry {
    Spacer(SpacerSide),
    Movie(MovieItem),
}

impl CarouselEntry {
    /// Stable list key.
    pub fn key(&self) -> &str {
        match self {
            Self::Spacer(SpacerSide::Left) => "left-spacer",
            Self::Spacer(SpacerSide::Right) => "right-spacer",
            Self::Movie(m) => &m.id,
        }
    }

    pub fn movie(&self) -> Option<&MovieItem> {
        match self {
            Self::Movie(m) => Some(m),
            Self::Spacer(_) => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer(_))
    }
}

impl fmt::Display for CarouselEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spacer(_) => write!(f, "<{}>", self.key()),
            Self::Movie(m) => write!(f, "{} ({})", m.title, m.id),
        }
    }
}

/// Bracket `movies` with the two spacer entries.
///
/// Applied unconditionally after every fetch attempt, so a failed or empty
/// fetch still yields `[Spacer(Left), Spacer(Right)]`.
pub fn with_spacers(movies: Vec<MovieItem>) -> Vec<CarouselEntry> {
    let mut entries = Vec::with_capacity(movies.len() + 2);
    entries.push(CarouselEntry::Spacer(SpacerSide::Left));
    entries.extend(movies.into_iter().map(CarouselEntry::Movie));
    entries.push(CarouselEntry::Spacer(SpacerSide::Right));
    entries
}

/// Number of real movies in an entry list.
pub fn movie_count(entries: &[CarouselEntry]) -> usize {
    entries.iter().filter(|e| !e.is_spacer()).count()
}

#[cfg(test)]
pub(crate) fn sample_movie(id: &str) -> MovieItem {
    MovieItem {
        id: id.to_string(),
        title: format!("Movie {id}"),
        poster: Some(format!("https://img.test/p/{id}.jpg")),
        backdrop: Some(format!("https://img.test/b/{id}.jpg")),
        rating: 7.4,
        genres: vec!["Drama".into(), "Thriller".into()],
        description: "A film.".into(),
        release_date: Some("2024-01-01".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacers_bracket_movies() {
        let entries = with_spacers(vec![sample_movie("1"), sample_movie("2")]);
        let keys: Vec<&str> = entries.iter().map(|e| e.key()).collect();
        assert_eq!(keys, ["left-spacer", "1", "2", "right-spacer"]);
        assert_eq!(movie_count(&entries), 2);
    }

    #[test]
    fn empty_fetch_yields_only_spacers() {
        let entries = with_spacers(Vec::new());
        assert_eq!(
            entries,
            vec![
                CarouselEntry::Spacer(SpacerSide::Left),
                CarouselEntry::Spacer(SpacerSide::Right),
            ]
        );
        assert!(entries.iter().all(|e| e.movie().is_none()));
        assert_eq!(movie_count(&entries), 0);
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(MovieItem::normalise_rating(11.2), 10.0);
        assert_eq!(MovieItem::normalise_rating(-1.0), 0.0);
        assert_eq!(MovieItem::normalise_rating(f64::NAN), 0.0);
        assert_eq!(MovieItem::normalise_rating(6.5), 6.5);
    }
}
