use serde::Serialize;

use crate::domain::category::Category;

/// Category row of the categories page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub title: String,
    pub photo_count: usize,
}

impl CategoryDto {
    pub fn new(category: Category, photo_count: usize) -> Self {
        Self {
            id: category.id.get(),
            title: category.title.into_inner(),
            photo_count,
        }
    }
}
