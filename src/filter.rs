use crate::model::Dog;

/// A single constraint over a dog record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `breed` is one of the given values
    BreedIn(Vec<String>),
    /// `zip_code` is one of the given values
    ZipCodeIn(Vec<String>),
    /// `age >= n`
    AgeAtLeast(u32),
    /// `age <= n`
    AgeAtMost(u32),
}

impl Predicate {
    pub fn matches(&self, dog: &Dog) -> bool {
        match self {
            Predicate::BreedIn(breeds) => breeds.iter().any(|b| *b == dog.breed),
            Predicate::ZipCodeIn(zip_codes) => zip_codes.iter().any(|z| *z == dog.zip_code),
            Predicate::AgeAtLeast(min) => dog.age >= *min,
            Predicate::AgeAtMost(max) => dog.age <= *max,
        }
    }
}

/// A conjunction of predicates. The empty filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogFilter {
    predicates: Vec<Predicate>,
}

impl DogFilter {
    /// A filter with no constraints
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Builds a filter from optional search dimensions.
    ///
    /// `None` and empty lists impose no constraint. Values are not validated.
    pub fn build(
        breeds: Option<&[String]>,
        zip_codes: Option<&[String]>,
        age_min: Option<u32>,
        age_max: Option<u32>,
    ) -> Self {
        let mut filter = Self::unrestricted();
        if let Some(zip_codes) = zip_codes.filter(|z| !z.is_empty()) {
            filter = filter.and(Predicate::ZipCodeIn(zip_codes.to_vec()));
        }
        if let Some(max) = age_max {
            filter = filter.and(Predicate::AgeAtMost(max));
        }
        if let Some(min) = age_min {
            filter = filter.and(Predicate::AgeAtLeast(min));
        }
        if let Some(breeds) = breeds.filter(|b| !b.is_empty()) {
            filter = filter.and(Predicate::BreedIn(breeds.to_vec()));
        }
        filter
    }

    /// Adds a predicate to the conjunction
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, dog: &Dog) -> bool {
        self.predicates.iter().all(|p| p.matches(dog))
    }
}
