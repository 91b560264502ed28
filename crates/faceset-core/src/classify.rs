//! Filename labelling.
//!
//! Images follow the naming convention
//! `<split>_<person>_<0|30|45>_<l|r>_<n>.jpg`, but matching is by substring,
//! not position. A dimension whose tokens are all absent stays `None`.

use crate::types::{Angle, Category, Orientation, Person, Split};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Return the first value of `C` whose token occurs in `name`.
pub fn classify<C: Category>(name: &str) -> Option<C> {
    C::MATCH_ORDER
        .iter()
        .copied()
        .find(|value| name.contains(value.token()))
}

/// The four categorical labels derived from one file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageLabels {
    pub split: Option<Split>,
    pub person: Option<Person>,
    pub angle: Option<Angle>,
    pub orientation: Option<Orientation>,
}

impl ImageLabels {
    /// Classify a bare file name such as `train_akshay_0_l_1.jpg`.
    pub fn from_file_name(name: &str) -> Self {
        Self {
            split: classify(name),
            person: classify(name),
            angle: classify(name),
            orientation: classify(name),
        }
    }

    /// Classify the last component of `path`.
    ///
    /// Parent directories are ignored. Returns all-`None` labels when the
    /// path has no UTF-8 file name.
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(Self::from_file_name)
            .unwrap_or_default()
    }

    /// True when every dimension resolved.
    pub fn is_complete(&self) -> bool {
        self.split.is_some()
            && self.person.is_some()
            && self.angle.is_some()
            && self.orientation.is_some()
    }

    /// Names of the dimensions that did not resolve.
    pub fn unresolved(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.split.is_none() {
            missing.push("split");
        }
        if self.person.is_none() {
            missing.push("person");
        }
        if self.angle.is_none() {
            missing.push("angle");
        }
        if self.orientation.is_none() {
            missing.push("orientation");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        let l = ImageLabels::from_file_name("train_akshay_0_l_1.jpg");
        assert_eq!(l.split, Some(Split::Train));
        assert_eq!(l.person, Some(Person::Akshay));
        assert_eq!(l.angle, Some(Angle::Deg0));
        assert_eq!(l.orientation, Some(Orientation::Left));
        assert!(l.is_complete());

        let l = ImageLabels::from_file_name("test_nabilah_30_r_2.jpg");
        assert_eq!(l.split, Some(Split::Test));
        assert_eq!(l.person, Some(Person::Nabilah));
        assert_eq!(l.angle, Some(Angle::Deg30));
        assert_eq!(l.orientation, Some(Orientation::Right));

        let l = ImageLabels::from_file_name("train_mark_45_l_3.jpg");
        assert_eq!(l.person, Some(Person::Mark));
        assert_eq!(l.angle, Some(Angle::Deg45));
        assert_eq!(l.orientation, Some(Orientation::Left));
    }

    #[test]
    fn test_every_person_and_angle() {
        for person in Person::ALL {
            for angle in Angle::ALL {
                let name = format!("train_{}_{}_r_7.jpg", person.token(), angle.degrees());
                let l = ImageLabels::from_file_name(&name);
                assert_eq!(l.person, Some(*person), "{name}");
                assert_eq!(l.angle, Some(*angle), "{name}");
                assert_eq!(l.orientation, Some(Orientation::Right), "{name}");
            }
        }
    }

    #[test]
    fn test_right_orientation_is_not_swallowed_by_left() {
        // Every name used to classify as left; right must survive.
        let l = ImageLabels::from_file_name("test_angela_45_r_9.jpg");
        assert_eq!(l.orientation, Some(Orientation::Right));
    }

    #[test]
    fn test_angle_ignores_image_index() {
        let l = ImageLabels::from_file_name("train_akshay_45_l_30.jpg");
        assert_eq!(l.angle, Some(Angle::Deg45));

        let l = ImageLabels::from_file_name("test_mark_0_r_45.jpg");
        assert_eq!(l.angle, Some(Angle::Deg0));

        let l = ImageLabels::from_file_name("train_isaac_l_30.jpg");
        assert_eq!(l.angle, None);
    }

    #[test]
    fn test_unresolved_dimensions() {
        let l = ImageLabels::from_file_name("holiday.jpg");
        assert_eq!(l, ImageLabels::default());
        assert!(!l.is_complete());
        assert_eq!(l.unresolved(), vec!["split", "person", "angle", "orientation"]);

        let l = ImageLabels::from_file_name("train_bob_30_l_1.jpg");
        assert_eq!(l.person, None);
        assert_eq!(l.split, Some(Split::Train));
        assert_eq!(l.unresolved(), vec!["person"]);
    }

    #[test]
    fn test_parent_directories_are_ignored() {
        let l = ImageLabels::from_path(Path::new("/home/mark/test/train_isaac_0_l_4.jpg"));
        assert_eq!(l.person, Some(Person::Isaac));
        assert_eq!(l.split, Some(Split::Train));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let l = ImageLabels::from_file_name("TRAIN_AKSHAY_0_L_1.jpg");
        assert_eq!(l.split, None);
        assert_eq!(l.person, None);
        assert_eq!(l.angle, Some(Angle::Deg0));
    }
}
