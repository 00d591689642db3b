use super::Student;

/// Optional filters for listing students. A `None` filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Case-insensitive exact match on `address.country`.
    pub country: Option<String>,
    /// Inclusive lower bound on `age`.
    pub min_age: Option<i64>,
}

impl StudentFilter {
    pub fn new(country: Option<String>, min_age: Option<i64>) -> Self {
        // An empty country string means "no filter".
        let country = country.filter(|c| !c.is_empty());
        Self { country, min_age }
    }

    pub fn matches(&self, student: &Student) -> bool {
        if let Some(country) = self.country.as_deref() {
            if student.address.country.to_lowercase() != country.to_lowercase() {
                return false;
            }
        }
        if let Some(min_age) = self.min_age {
            if student.age < min_age {
                return false;
            }
        }
        true
    }
}
