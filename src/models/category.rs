//! Age categories and weapons.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weapon {
    Foil,
    Epee,
    Sabre,
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Weapon::Foil => "Foil",
            Weapon::Epee => "Epee",
            Weapon::Sabre => "Sabre",
        };
        f.write_str(label)
    }
}

/// Age category. Variants are declared (and ordered) by increasing maximum age.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    M13,
    M15,
    M17,
    M20,
    Senior,
    Veteran1,
    Veteran2,
    Veteran3,
    /// Open-ended oldest bracket.
    Veteran4,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::M13,
        Category::M15,
        Category::M17,
        Category::M20,
        Category::Senior,
        Category::Veteran1,
        Category::Veteran2,
        Category::Veteran3,
        Category::Veteran4,
    ];

    /// Inclusive maximum age, `None` for the open-ended bracket.
    pub fn max_age(self) -> Option<u32> {
        match self {
            Category::M13 => Some(13),
            Category::M15 => Some(15),
            Category::M17 => Some(17),
            Category::M20 => Some(20),
            Category::Senior => Some(39),
            Category::Veteran1 => Some(49),
            Category::Veteran2 => Some(59),
            Category::Veteran3 => Some(69),
            Category::Veteran4 => None,
        }
    }

    /// Narrowest category whose maximum age is at least `age`.
    pub fn natural_for_age(age: u32) -> Category {
        Self::ALL
            .into_iter()
            .find(|c| c.max_age().map_or(true, |max| age <= max))
            .unwrap_or(Category::Veteran4)
    }

    /// The next older category, if any.
    pub fn next_older(self) -> Option<Category> {
        let idx = Self::ALL.iter().position(|c| *c == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::M13 => "M13",
            Category::M15 => "M15",
            Category::M17 => "M17",
            Category::M20 => "M20",
            Category::Senior => "Seniors",
            Category::Veteran1 => "Vétérans1",
            Category::Veteran2 => "Vétérans2",
            Category::Veteran3 => "Vétérans3",
            Category::Veteran4 => "Vétérans4",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_category_uses_inclusive_max_age() {
        assert_eq!(Category::natural_for_age(13), Category::M13);
        assert_eq!(Category::natural_for_age(14), Category::M15);
        assert_eq!(Category::natural_for_age(39), Category::Senior);
        assert_eq!(Category::natural_for_age(40), Category::Veteran1);
        assert_eq!(Category::natural_for_age(95), Category::Veteran4);
    }

    #[test]
    fn next_older_stops_at_open_bracket() {
        assert_eq!(Category::M20.next_older(), Some(Category::Senior));
        assert_eq!(Category::Veteran4.next_older(), None);
    }
}
