use sqlx::types::Uuid;
use sqlx::PgConnection;

use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookComment, BookId, BookTitle};
use kernel::KernelError;

use crate::database::postgres::{PostgresDatabase, PostgresTransaction};
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn append_comment(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
        comment: &BookComment,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::append_comment(con, book_id, comment).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        PgBookInternal::delete(con, book_id).await
    }

    async fn delete_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<u64, KernelError> {
        PgBookInternal::delete_all(con).await
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    comments: Vec<String>,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            value.comments.into_iter().map(BookComment::new).collect(),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, comments
            FROM books
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, comments
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        let comments = book
            .comments()
            .iter()
            .cloned()
            .map(String::from)
            .collect::<Vec<_>>();
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, title, comments)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(comments)
        .execute(con)
        .await
        .convert_error()?;
        tracing::debug!(id = %book.id(), "Created book");
        Ok(())
    }

    async fn append_comment(
        con: &mut PgConnection,
        book_id: &BookId,
        comment: &BookComment,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        // Single statement so the array and its length move together.
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            UPDATE books
            SET comments = array_append(comments, $2)
            WHERE id = $1
            RETURNING id, title, comments
            "#,
        )
        .bind(book_id.as_ref())
        .bind(comment.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn delete(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<bool, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(con: &mut PgConnection) -> error_stack::Result<u64, KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM books
            "#,
        )
        .execute(con)
        .await
        .convert_error()?;
        let count = result.rows_affected();
        tracing::info!(count, "Deleted all books");
        Ok(count)
    }
}
