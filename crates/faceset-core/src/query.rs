use crate::classify::ImageLabels;
use crate::types::{Angle, Orientation, Person, Split};
use serde::{Deserialize, Serialize};

/// Constraint on one category dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Filter<T> {
    /// Do not filter on this dimension.
    Any,
    /// Keep only records whose value resolved to exactly `T`.
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    /// Unresolved values (`None`) only pass the `Any` filter.
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Filter::Any => true,
            Filter::Only(wanted) => value == Some(wanted),
        }
    }
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::Any
    }
}

impl<T> From<T> for Filter<T> {
    fn from(value: T) -> Self {
        Filter::Only(value)
    }
}

/// Pixel representation returned by a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    Rgb,
    #[default]
    Grayscale,
}

/// A conjunctive filter over the four label dimensions plus output options.
///
/// ```
/// use faceset_core::{Angle, Orientation, Query};
///
/// let q = Query::new().angle(Angle::Deg45).orientation(Orientation::Left);
/// assert!(!q.with_labels);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub split: Filter<Split>,
    pub person: Filter<Person>,
    pub angle: Filter<Angle>,
    pub orientation: Filter<Orientation>,
    pub color: ColorMode,
    pub with_labels: bool,
}

impl Query {
    /// Matches every record, grayscale output, no labels.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn split(mut self, split: impl Into<Filter<Split>>) -> Self {
        self.split = split.into();
        self
    }

    pub fn person(mut self, person: impl Into<Filter<Person>>) -> Self {
        self.person = person.into();
        self
    }

    pub fn angle(mut self, angle: impl Into<Filter<Angle>>) -> Self {
        self.angle = angle.into();
        self
    }

    pub fn orientation(mut self, orientation: impl Into<Filter<Orientation>>) -> Self {
        self.orientation = orientation.into();
        self
    }

    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Also return the person label of every matching record.
    pub fn with_labels(mut self) -> Self {
        self.with_labels = true;
        self
    }

    /// True if `labels` satisfies every non-`Any` filter.
    pub fn matches(&self, labels: &ImageLabels) -> bool {
        self.split.matches(labels.split.as_ref())
            && self.person.matches(labels.person.as_ref())
            && self.angle.matches(labels.angle.as_ref())
            && self.orientation.matches(labels.orientation.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn labels(name: &str) -> ImageLabels {
        ImageLabels::from_file_name(name)
    }

    #[test]
    fn test_default_query_matches_everything() {
        let q = Query::new();
        assert!(q.matches(&labels("train_akshay_0_l_1.jpg")));
        assert!(q.matches(&ImageLabels::default()));
        assert_eq!(q.color, ColorMode::Grayscale);
        assert!(!q.with_labels);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let q = Query::new().angle(Angle::Deg45).orientation(Orientation::Left);
        assert!(q.matches(&labels("train_mark_45_l_3.jpg")));
        assert!(!q.matches(&labels("train_mark_45_r_3.jpg")));
        assert!(!q.matches(&labels("train_mark_30_l_3.jpg")));
    }

    #[test]
    fn test_unresolved_never_matches_concrete_filter() {
        let unresolved = labels("train_bob_0_l_1.jpg");
        for person in Person::ALL {
            assert!(!Query::new().person(*person).matches(&unresolved));
        }
        assert!(Query::new().person(Filter::<Person>::Any).matches(&unresolved));
    }

    #[test]
    fn test_builder_sets_fields() {
        let q = Query::new()
            .split(Split::Test)
            .person(Person::Nabilah)
            .color(ColorMode::Rgb)
            .with_labels();
        assert_eq!(q.split, Filter::Only(Split::Test));
        assert_eq!(q.person, Filter::Only(Person::Nabilah));
        assert_eq!(q.angle, Filter::Any);
        assert_eq!(q.color, ColorMode::Rgb);
        assert!(q.with_labels);
    }
}
