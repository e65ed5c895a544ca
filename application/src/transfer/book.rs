use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub comment_count: usize,
    pub comments: Vec<String>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            comment_count,
            comments,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            comment_count: comment_count.into(),
            comments: comments.into_iter().map(String::from).collect(),
        }
    }
}

/// Ids arrive as raw path segments; a malformed one is resolved as "not found".
pub struct GetBookDto {
    pub id: String,
}

pub struct CreateBookDto {
    pub title: Option<String>,
}

pub struct AddBookCommentDto {
    pub id: String,
    pub comment: Option<String>,
}

pub struct DeleteBookDto {
    pub id: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeletedBookDto {
    pub id: Uuid,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeletedAllBooksDto {
    pub count: u64,
}
