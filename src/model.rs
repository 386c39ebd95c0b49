use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traits::HasPrimaryKey;

/// Default number of ids returned by a search.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// A dog record as stored by the ingestion process. Never mutated by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: String,
    pub breed: String,
    pub name: String,
    pub age: u32,
    pub zip_code: String,
    #[serde(rename = "img")]
    pub image_link: String,
}

impl HasPrimaryKey for Dog {
    fn primary_key(&self) -> &str {
        &self.id
    }
}

/// Field a search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Age,
    Breed,
    Name,
}

impl SortField {
    /// Column name of the field in the record store
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Age => "age",
            SortField::Breed => "breed",
            SortField::Name => "name",
        }
    }
}

/// Ordering direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A single sort key: `field:direction` on the wire, e.g. `breed:asc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(SortField::Breed, SortDirection::Asc)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field.column(), self.direction.as_str())
    }
}

/// Error returned when a sort string does not match `(age|breed|name):(asc|desc)`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sort must match (age|breed|name):(asc|desc), got '{0}'")]
pub struct ParseSortError(pub String);

impl FromStr for SortSpec {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s.split_once(':').ok_or_else(|| ParseSortError(s.to_string()))?;
        let field = match field {
            "age" => SortField::Age,
            "breed" => SortField::Breed,
            "name" => SortField::Name,
            _ => return Err(ParseSortError(s.to_string())),
        };
        let direction = match direction {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(ParseSortError(s.to_string())),
        };
        Ok(SortSpec::new(field, direction))
    }
}

/// Typed search parameters, already validated by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub age_max: Option<u32>,
    pub age_min: Option<u32>,
    pub breeds: Option<Vec<String>>,
    pub from: u32,
    pub size: u32,
    pub sort: SortSpec,
    pub zip_codes: Option<Vec<String>>,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            age_max: None,
            age_min: None,
            breeds: None,
            from: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortSpec::default(),
            zip_codes: None,
        }
    }
}

impl SearchRequest {
    pub fn with_breeds<I, S>(mut self, breeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breeds = Some(breeds.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_zip_codes<I, S>(mut self, zip_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_codes = Some(zip_codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_age_min(mut self, age_min: u32) -> Self {
        self.age_min = Some(age_min);
        self
    }

    pub fn with_age_max(mut self, age_max: u32) -> Self {
        self.age_max = Some(age_max);
        self
    }

    pub fn with_from(mut self, from: u32) -> Self {
        self.from = from;
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

/// One page of matching ids plus the total match count under the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub ids: Vec<String>,
    pub total: u64,
}

impl SearchResult {
    pub fn new(ids: Vec<String>, total: u64) -> Self {
        Self { ids, total }
    }
}
