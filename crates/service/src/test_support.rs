#![cfg(test)]
use models::{Movie, MovieContent, MovieInput};

/// Valid content with the given title.
pub fn content(title: &str) -> MovieContent {
    MovieContent {
        title: title.to_string(),
        genre: "drama".to_string(),
        description: format!("{title}, the movie"),
        release_year: "1999".to_string(),
    }
}

pub fn input(id: Option<i64>, title: &str) -> MovieInput {
    MovieInput { id, ..MovieInput::from(content(title)) }
}

/// Six movies with ids 2..=7; id 1 is deliberately absent.
pub fn seeded_movies() -> Vec<Movie> {
    [
        (2, "Titanic", "drama", "1997"),
        (3, "Alien", "horror", "1979"),
        (4, "300", "action", "2006"),
        (5, "Dictator", "comedy", "2012"),
        (6, "Amelie", "romance", "2001"),
        (7, "Heat", "crime", "1995"),
    ]
    .into_iter()
    .map(|(id, title, genre, year)| Movie {
        id,
        title: title.to_string(),
        genre: genre.to_string(),
        description: format!("{title}, the movie"),
        release_year: year.to_string(),
    })
    .collect()
}
