use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of an activity. Serialized as its numeric catalog id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Category {
    Food = 1,
    Exercise = 2,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Food, Category::Exercise];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Exercise => "Exercise",
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = UnknownCategory;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|category| category.id() == id)
            .ok_or(UnknownCategory(id))
    }
}

impl From<Category> for u8 {
    fn from(category: Category) -> Self {
        category.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategory(pub u8);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category id {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryEntry {
    pub id: u8,
    pub name: &'static str,
}

pub const CATEGORIES: [CategoryEntry; 2] = [
    CategoryEntry { id: 1, name: "Food" },
    CategoryEntry { id: 2, name: "Exercise" },
];
