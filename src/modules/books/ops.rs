//! Store operations for the books collection.
//!
//! Each operation issues exactly one deadline-bounded store call and carries
//! no state across invocations: no retry, no partial completion, no
//! rollback.

use bson::{doc, Bson, Document};
use handyhub_store::{Collection, StoreError, SCAN_DEADLINE, WRITE_DEADLINE};

use super::models::Book;

pub const BOOKS_COLLECTION: &str = "books";

/// Insert one book and return the store-assigned identifier.
pub async fn create_book(books: &dyn Collection, book: &Book) -> Result<Bson, StoreError> {
    let document = bson::to_document(book)?;
    books.insert_one(document, WRITE_DEADLINE).await
}

/// Full collection scan, in the store's natural iteration order.
pub async fn list_books(books: &dyn Collection) -> Result<Vec<Document>, StoreError> {
    books.find(Document::new(), SCAN_DEADLINE).await
}

/// Remove every book carrying the isbn; returns how many were removed.
/// A zero count is the caller's cue for a not-found response.
pub async fn delete_by_isbn(books: &dyn Collection, isbn: &str) -> Result<u64, StoreError> {
    books.delete_many(doc! { "isbn": isbn }, WRITE_DEADLINE).await
}
