//! Book entity model and DTOs.

use bookshelf_core::books::popularity_score;
use bookshelf_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full book row from the `books` table.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author_name: String,
    pub publication_year: i32,
    pub views_count: i64,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Book {
    pub fn popularity_score(&self, current_year: i32) -> f64 {
        popularity_score(self.views_count, self.publication_year, current_year)
    }
}

/// Book as returned by the API, with the derived popularity score.
#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub id: DbId,
    pub title: String,
    pub author_name: String,
    pub publication_year: i32,
    pub views_count: i64,
    pub popularity_score: f64,
}

impl BookResponse {
    pub fn from_book(book: Book, current_year: i32) -> Self {
        let popularity_score = book.popularity_score(current_year);
        Self {
            id: book.id,
            title: book.title,
            author_name: book.author_name,
            publication_year: book.publication_year,
            views_count: book.views_count,
            popularity_score,
        }
    }
}

/// DTO for creating a book (single or as one item of a bulk request).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author_name: String,
    pub publication_year: i32,
}

/// DTO for updating a book. Every field is overwritten.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author name is required"))]
    pub author_name: String,
    pub publication_year: i32,
}
