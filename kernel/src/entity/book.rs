mod comment;
mod id;
mod title;

pub use self::{comment::*, id::*, title::*};
use destructure::Destructure;
use vodca::References;

/// A catalog entry. `comment_count` is always derived from `comments`.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    comment_count: BookCommentCount,
    comments: Vec<BookComment>,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle, comments: Vec<BookComment>) -> Self {
        Self {
            id,
            title,
            comment_count: BookCommentCount::new(comments.len()),
            comments,
        }
    }

    /// Appends to the end of the comment list, keeping the counter in step.
    pub fn push_comment(&mut self, comment: BookComment) {
        self.comments.push(comment);
        self.comment_count = BookCommentCount::new(self.comments.len());
    }
}
