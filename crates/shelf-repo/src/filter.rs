use shelf_store::Query;
use thiserror::Error;

/// Query parameter carrying the numeric catalogue number.
pub const PARAM_BOOK_ID: &str = "bookId";
pub const PARAM_TITLE: &str = "title";
pub const PARAM_AUTHOR: &str = "author";
pub const PARAM_YEAR: &str = "year";

/// A query parameter that could not be turned into a filter term.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("query parameter {param} must be an integer, got {value:?}")]
    NotAnInteger { param: &'static str, value: String },
}

/// Exact-match filter for [`BookRepository::list`](crate::BookRepository::list).
///
/// Unset fields are unconstrained, so the default filter lists every book.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub book_id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i64>,
}

impl BookFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn book_id(mut self, book_id: i64) -> Self {
        self.book_id = Some(book_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    /// Build a filter from raw query parameters.
    ///
    /// Unrecognized keys are ignored. Numeric parameters must parse as
    /// integers. A repeated key keeps its last value.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::default();
        for (key, value) in params {
            match key.as_ref() {
                PARAM_BOOK_ID => filter.book_id = Some(parse_int(PARAM_BOOK_ID, value.into())?),
                PARAM_TITLE => filter.title = Some(value.into()),
                PARAM_AUTHOR => filter.author = Some(value.into()),
                PARAM_YEAR => filter.year = Some(parse_int(PARAM_YEAR, value.into())?),
                _ => {}
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The store query equivalent to this filter.
    pub fn to_query(&self) -> Query {
        let mut query = Query::all();
        if let Some(book_id) = self.book_id {
            query = query.with(PARAM_BOOK_ID, book_id);
        }
        if let Some(title) = &self.title {
            query = query.with(PARAM_TITLE, title.as_str());
        }
        if let Some(author) = &self.author {
            query = query.with(PARAM_AUTHOR, author.as_str());
        }
        if let Some(year) = self.year {
            query = query.with(PARAM_YEAR, year);
        }
        query
    }
}

fn parse_int(param: &'static str, value: String) -> Result<i64, FilterError> {
    value
        .trim()
        .parse()
        .map_err(|_| FilterError::NotAnInteger { param, value })
}
