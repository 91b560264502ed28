use serde::{Deserialize, Serialize};
use std::fmt;

/// One filterable dimension of a face image's labels.
///
/// Each value is recognised by a filename token. `MATCH_ORDER` is the order
/// in which the tokens are tried; the first token contained in a file name
/// wins.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every value of the dimension, in declaration order.
    const ALL: &'static [Self];
    /// Values in the order their tokens are tested against a file name.
    const MATCH_ORDER: &'static [Self];

    /// Substring identifying this value inside a file name.
    fn token(self) -> &'static str;
}

/// Train/test membership of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Test,
}

impl Category for Split {
    const ALL: &'static [Self] = &[Split::Train, Split::Test];
    // "test" first: it never occurs inside "train".
    const MATCH_ORDER: &'static [Self] = &[Split::Test, Split::Train];

    fn token(self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

/// The person photographed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Person {
    Akshay,
    Angela,
    Isaac,
    Mark,
    Nabilah,
}

impl Person {
    /// Number of people in the collection.
    pub const COUNT: usize = 5;

    /// Numeric class label in `0..Person::COUNT`.
    pub fn index(self) -> usize {
        match self {
            Person::Akshay => 0,
            Person::Angela => 1,
            Person::Isaac => 2,
            Person::Mark => 3,
            Person::Nabilah => 4,
        }
    }

    /// Inverse of [`index`](Self::index).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl Category for Person {
    const ALL: &'static [Self] = &[
        Person::Akshay,
        Person::Angela,
        Person::Isaac,
        Person::Mark,
        Person::Nabilah,
    ];
    const MATCH_ORDER: &'static [Self] = &[
        Person::Akshay,
        Person::Angela,
        Person::Mark,
        Person::Isaac,
        Person::Nabilah,
    ];

    fn token(self) -> &'static str {
        match self {
            Person::Akshay => "akshay",
            Person::Angela => "angela",
            Person::Isaac => "isaac",
            Person::Mark => "mark",
            Person::Nabilah => "nabilah",
        }
    }
}

/// Head rotation away from the camera axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    Deg0,
    Deg30,
    Deg45,
}

impl Angle {
    pub fn degrees(self) -> u32 {
        match self {
            Angle::Deg0 => 0,
            Angle::Deg30 => 30,
            Angle::Deg45 => 45,
        }
    }
}

impl Category for Angle {
    const ALL: &'static [Self] = &[Angle::Deg0, Angle::Deg30, Angle::Deg45];
    const MATCH_ORDER: &'static [Self] = &[Angle::Deg0, Angle::Deg30, Angle::Deg45];

    fn token(self) -> &'static str {
        match self {
            Angle::Deg0 => "_0_",
            Angle::Deg30 => "_30_",
            Angle::Deg45 => "_45_",
        }
    }
}

/// Direction the head is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Left,
    Right,
}

impl Category for Orientation {
    const ALL: &'static [Self] = &[Orientation::Left, Orientation::Right];
    const MATCH_ORDER: &'static [Self] = &[Orientation::Left, Orientation::Right];

    fn token(self) -> &'static str {
        match self {
            Orientation::Left => "l_",
            Orientation::Right => "r_",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Person::Akshay => "Akshay",
            Person::Angela => "Angela",
            Person::Isaac => "Isaac",
            Person::Mark => "Mark",
            Person::Nabilah => "Nabilah",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Left => f.write_str("left"),
            Orientation::Right => f.write_str("right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_match_order_is_permutation<C: Category + Ord>() {
        let mut all = C::ALL.to_vec();
        let mut order = C::MATCH_ORDER.to_vec();
        all.sort();
        order.sort();
        assert_eq!(all, order);
    }

    #[test]
    fn test_match_order_covers_every_value() {
        assert_match_order_is_permutation::<Split>();
        assert_match_order_is_permutation::<Person>();
        assert_match_order_is_permutation::<Angle>();
        assert_match_order_is_permutation::<Orientation>();
    }

    #[test]
    fn test_person_index_roundtrip() {
        for (i, p) in Person::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(Person::from_index(i), Some(*p));
        }
        assert_eq!(Person::ALL.len(), Person::COUNT);
        assert_eq!(Person::from_index(Person::COUNT), None);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Person::Nabilah).unwrap(), "\"nabilah\"");
        assert_eq!(serde_json::to_string(&Angle::Deg30).unwrap(), "\"deg30\"");
        let split: Split = serde_json::from_str("\"test\"").unwrap();
        assert_eq!(split, Split::Test);
    }

    #[test]
    fn test_display() {
        assert_eq!(Person::Mark.to_string(), "Mark");
        assert_eq!(Angle::Deg45.to_string(), "45°");
        assert_eq!(Split::Train.to_string(), "train");
        assert_eq!(Orientation::Right.to_string(), "right");
    }
}
