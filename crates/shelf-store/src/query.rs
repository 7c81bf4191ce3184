use shelf_types::{Book, Value};

/// Exact-match constraint over top-level fields. An empty query matches
/// every document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    terms: Vec<(String, Value)>,
}

impl Query {
    /// A query matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an equality term on `field`.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[(String, Value)] {
        &self.terms
    }

    /// Returns `true` if every term equals the same-named field of `book`.
    /// A missing field never matches.
    pub fn matches(&self, book: &Book) -> bool {
        self.terms.iter().all(|(field, expected)| {
            book.get(field)
                .is_some_and(|actual| actual.matches(expected))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_types::{BookId, Fields};

    fn book(author: &str, year: i64) -> Book {
        let mut fields = Fields::new();
        fields.insert("author".into(), author.into());
        fields.insert("year".into(), year.into());
        Book::new(BookId::generate(), fields)
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(Query::all().is_empty());
        assert!(Query::all().matches(&book("Dr.Seuss", 1960)));
    }

    #[test]
    fn all_terms_must_match() {
        let q = Query::all().with("author", "Dr.Seuss").with("year", 1960i64);
        assert!(q.matches(&book("Dr.Seuss", 1960)));
        assert!(!q.matches(&book("Dr.Seuss", 1957)));
        assert!(!q.matches(&book("Leo Tolstoy", 1960)));
    }

    #[test]
    fn missing_field_does_not_match() {
        let q = Query::all().with("title", "Green Eggs and Ham");
        assert!(!q.matches(&book("Dr.Seuss", 1960)));
    }
}
