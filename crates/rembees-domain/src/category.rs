//! The fixed category catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{Displayable, NamedEntity};

/// Display metadata for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Categories known to the application. Transactions store the id string;
/// anything not listed here resolves to [`Category::Other`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Food,
    Transport,
    Shopping,
    Entertainment,
    Health,
    Utilities,
    Other,
}

impl Category {
    /// Catalog order, as presented to users.
    pub const ALL: [Category; 8] = [
        Category::Salary,
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Health,
        Category::Utilities,
        Category::Other,
    ];

    pub const FALLBACK: Category = Category::Other;

    pub fn info(self) -> CategoryInfo {
        match self {
            Category::Salary => CategoryInfo {
                id: "salary",
                name: "Gaji",
                icon: "DollarSign",
                color: "#10b981",
            },
            Category::Food => CategoryInfo {
                id: "food",
                name: "Makanan & Minuman",
                icon: "Utensils",
                color: "#f59e0b",
            },
            Category::Transport => CategoryInfo {
                id: "transport",
                name: "Transportasi",
                icon: "Car",
                color: "#3b82f6",
            },
            Category::Shopping => CategoryInfo {
                id: "shopping",
                name: "Belanja",
                icon: "ShoppingBag",
                color: "#ec4899",
            },
            Category::Entertainment => CategoryInfo {
                id: "entertainment",
                name: "Hiburan",
                icon: "Film",
                color: "#8b5cf6",
            },
            Category::Health => CategoryInfo {
                id: "health",
                name: "Kesehatan",
                icon: "HeartPulse",
                color: "#ef4444",
            },
            Category::Utilities => CategoryInfo {
                id: "utilities",
                name: "Tagihan",
                icon: "Zap",
                color: "#06b6d4",
            },
            Category::Other => CategoryInfo {
                id: "other",
                name: "Lainnya",
                icon: "MoreHorizontal",
                color: "#6b7280",
            },
        }
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Exact lookup by catalog id.
    pub fn from_id(id: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    /// Total lookup: unknown ids map to the fallback entry.
    pub fn resolve(id: &str) -> Category {
        Self::from_id(id).unwrap_or(Self::FALLBACK)
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        self.info().name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.info().name, self.id())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_entry_round_trips_through_its_id() {
        for category in Category::ALL {
            assert_eq!(Category::from_id(category.id()), Some(category));
        }
    }

    #[test]
    fn unknown_ids_resolve_to_other() {
        assert_eq!(Category::from_id("crypto"), None);
        assert_eq!(Category::resolve("crypto"), Category::Other);
        assert_eq!(Category::resolve(""), Category::Other);
        assert_eq!(Category::resolve("food"), Category::Food);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(Category::resolve("Food"), Category::Other);
    }
}
