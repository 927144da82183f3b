//! Search and category filtering for task lists.

use super::{Category, Task};

/// Category restriction applied by a [`TaskFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category matches.
    #[default]
    All,
    /// Only the given category matches.
    Only(Category),
}

impl CategoryFilter {
    /// Parses a filter selection; `"all"` selects every category.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(Category::new(value))
        }
    }
}

/// Title search plus category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: String,
    category: CategoryFilter,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to titles containing `term`, ignoring case.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into().to_lowercase();
        self
    }

    /// Restricts to a category selection.
    #[must_use]
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Returns `true` when the task passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let matches_search = self.search.is_empty()
            || task.title().as_str().to_lowercase().contains(&self.search);
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category() == category,
        };
        matches_search && matches_category
    }
}
