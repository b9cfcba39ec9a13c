//! The fixed movie catalog seeded into every backend.
//!
//! Movies are a static reference set: nothing in the system creates,
//! mutates, or deletes them after seeding.

use crate::model::Movie;

/// Number of titles in the seed catalog.
pub const CATALOG_LEN: usize = 18;

fn movie(
    id: &str,
    title: &str,
    genre: &str,
    category: &str,
    hero: &str,
    release_type: &str,
    rating: f64,
) -> Movie {
    Movie {
        id: id.to_string(),
        title: title.to_string(),
        poster: None,
        description: None,
        genre: Some(genre.to_string()),
        category: Some(category.to_string()),
        cast: None,
        director: None,
        hero: Some(hero.to_string()),
        heroine: None,
        vibe: None,
        release_type: Some(release_type.to_string()),
        rating,
    }
}

/// Build the seed catalog: 6 Tamil, 6 English, 6 K-Drama titles.
#[must_use]
pub fn seed_catalog() -> Vec<Movie> {
    let movies = vec![
        movie("t1", "Vikram", "Action/Thriller", "Tamil", "Kamal Haasan", "Theatre", 4.8),
        movie("t2", "Jailer", "Action/Drama", "Tamil", "Rajinikanth", "Theatre", 4.5),
        movie("t3", "Leo", "Action/Crime", "Tamil", "Vijay", "Theatre", 4.2),
        movie("t4", "Ponniyin Selvan 2", "Epic Drama", "Tamil", "Vikram", "Theatre", 4.7),
        movie("t5", "The Legend of Hanuman", "Animation", "Tamil", "Hanuman", "OTT", 4.9),
        movie("t6", "Little Singham", "Animation", "Tamil", "Singham", "OTT", 4.1),
        movie("e1", "Oppenheimer", "Biographical", "English", "Cillian Murphy", "Theatre", 4.9),
        movie("e2", "Dune: Part Two", "Sci-Fi", "English", "Timothée Chalamet", "Theatre", 4.8),
        movie("e3", "Barbie", "Fantasy", "English", "Ryan Gosling", "Theatre", 4.3),
        movie("e4", "Spider-Man", "Animation", "English", "Miles Morales", "Theatre", 4.9),
        movie("e5", "Guardians 3", "Sci-Fi", "English", "Chris Pratt", "Theatre", 4.6),
        movie("e6", "Puss in Boots", "Animation", "English", "Puss", "Theatre", 4.7),
        movie("k1", "Alchemy of Souls", "Fantasy", "K-Drama", "Lee Jae-wook", "OTT", 4.9),
        movie("k2", "The Glory", "Revenge", "K-Drama", "Song Hye-kyo", "OTT", 4.8),
        movie("k3", "Moving", "Sci-Fi", "K-Drama", "Jo In-sung", "OTT", 4.7),
        movie("k4", "Squid Game", "Survival", "K-Drama", "Lee Jung-jae", "OTT", 4.4),
        movie("k5", "Suzume", "Animation", "K-Drama", "Souta", "Theatre", 4.8),
        movie("k6", "Solo Leveling", "Animation", "K-Drama", "Sung Jinwoo", "OTT", 4.9),
    ];

    assert_eq!(movies.len(), CATALOG_LEN, "seed catalog size is fixed");
    movies
}
