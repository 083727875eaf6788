use std::cmp::Ordering;

use models::Movie;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Field a search result can be ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Genre,
    ReleaseYear,
}

impl SortField {
    /// Match a field name case-insensitively. Unknown names yield `None`,
    /// which leaves results in insertion order.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "genre" => Some(Self::Genre),
            "releaseyear" | "release_year" => Some(Self::ReleaseYear),
            _ => None,
        }
    }

    fn compare(self, a: &Movie, b: &Movie) -> Ordering {
        match self {
            Self::Id => Ordering::Equal,
            Self::Title => cmp_text(&a.title, &b.title),
            Self::Genre => cmp_text(&a.genre, &b.genre),
            Self::ReleaseYear => match (a.release_year.trim().parse::<i64>(), b.release_year.trim().parse::<i64>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => cmp_text(&a.release_year, &b.release_year),
            },
        }
        .then(a.id.cmp(&b.id))
    }
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Filter, order and page applied by a search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieQuery {
    /// case-insensitive title substring; empty means "everything"
    pub search: Option<String>,
    pub order_by: Option<SortField>,
    pub pagination: Pagination,
}

impl MovieQuery {
    /// Build a query from raw request parameters. Only the numeric ones can fail.
    pub fn from_params(
        search: Option<&str>,
        order_by: Option<&str>,
        per_page: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
            order_by: order_by.and_then(SortField::parse),
            pagination: Pagination::parse(per_page, page)?,
        })
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        match self.search.as_deref() {
            None | Some("") => true,
            Some(needle) => movie.title.to_lowercase().contains(&needle.to_lowercase()),
        }
    }

    /// Run the query over movies given in insertion order.
    pub fn run<'a, I>(&self, movies: I) -> Vec<Movie>
    where
        I: IntoIterator<Item = &'a Movie>,
    {
        let mut hits: Vec<&Movie> = movies.into_iter().filter(|m| self.matches(m)).collect();
        if let Some(field) = self.order_by {
            hits.sort_by(|a, b| field.compare(a, b));
        }
        self.pagination.apply(hits).into_iter().cloned().collect()
    }
}
