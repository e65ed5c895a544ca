use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Book, BookComment, BookId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError>;

    /// Appends `comment` and bumps the counter in one store operation.
    /// Returns the updated book, or `None` when `book_id` is not live.
    async fn append_comment(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
        comment: &BookComment,
    ) -> error_stack::Result<Option<Book>, KernelError>;

    /// Returns whether a book was actually removed.
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError>;

    /// Returns the number of removed books.
    async fn delete_all(&self, con: &mut Self::Transaction)
        -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnBookModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookModifier: BookModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_modifier(&self) -> &Self::BookModifier;
}
