use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookComment, BookId, BookTitle};
use kernel::KernelError;

use crate::transfer::{
    AddBookCommentDto, BookDto, CreateBookDto, DeleteBookDto, DeletedAllBooksDto, DeletedBookDto,
    GetBookDto,
};

fn require(
    field: &'static str,
    value: Option<String>,
) -> error_stack::Result<String, KernelError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Report::new(KernelError::Invalid { field }))
}

fn parse_id(raw: &str) -> error_stack::Result<BookId, KernelError> {
    Uuid::parse_str(raw).map(BookId::new).map_err(|error| {
        Report::new(error)
            .change_context(KernelError::NotFound)
            .attach_printable(format!("Malformed book id: {raw}"))
    })
}

fn not_found(id: &BookId) -> Report<KernelError> {
    Report::new(KernelError::NotFound)
        .attach_printable(format!("Book {id} does not exist"))
}

#[async_trait::async_trait]
pub trait GetAllBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let books = self.book_query().find_all(&mut connection).await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetAllBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<BookDto, KernelError> {
        let id = parse_id(&dto.id)?;
        let mut connection = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&id))?;

        Ok(BookDto::from(book))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let title = require("title", dto.title)?;
        let mut connection = self.database_connection().transact().await?;

        let book = Book::new(
            BookId::new(Uuid::new_v4()),
            BookTitle::new(title),
            Vec::new(),
        );
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait AddBookCommentService: 'static + Sync + Send + DependOnBookModifier {
    /// The comment is checked before the id, so an empty comment on an unknown
    /// book still reports the missing field.
    async fn add_book_comment(
        &self,
        dto: AddBookCommentDto,
    ) -> error_stack::Result<BookDto, KernelError> {
        let comment = BookComment::new(require("comment", dto.comment)?);
        let id = parse_id(&dto.id)?;
        let mut connection = self.database_connection().transact().await?;

        let Some(book) = self
            .book_modifier()
            .append_comment(&mut connection, &id, &comment)
            .await?
        else {
            connection.roll_back().await?;
            return Err(not_found(&id));
        };
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> AddBookCommentService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_book(
        &self,
        dto: DeleteBookDto,
    ) -> error_stack::Result<DeletedBookDto, KernelError> {
        let id = parse_id(&dto.id)?;
        let mut connection = self.database_connection().transact().await?;

        if !self.book_modifier().delete(&mut connection, &id).await? {
            connection.roll_back().await?;
            return Err(not_found(&id));
        }
        connection.commit().await?;

        Ok(DeletedBookDto { id: id.into() })
    }
}

impl<T> DeleteBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait DeleteAllBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn delete_all_books(&self) -> error_stack::Result<DeletedAllBooksDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let count = self.book_modifier().delete_all(&mut connection).await?;
        connection.commit().await?;

        Ok(DeletedAllBooksDto { count })
    }
}

impl<T> DeleteAllBookService for T where T: DependOnBookModifier {}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use error_stack::Report;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{BookQuery, DependOnBookQuery};
    use kernel::interface::update::{BookModifier, DependOnBookModifier};
    use kernel::prelude::entity::{Book, BookComment, BookId};
    use kernel::KernelError;

    use super::{
        AddBookCommentService, CreateBookService, DeleteAllBookService, DeleteBookService,
        GetAllBookService, GetBookService,
    };
    use crate::transfer::{AddBookCommentDto, CreateBookDto, DeleteBookDto, GetBookDto};

    type Books = Arc<Mutex<Vec<Book>>>;

    #[derive(Clone, Default)]
    struct InMemoryDatabase {
        books: Books,
        broken: bool,
    }

    impl InMemoryDatabase {
        fn broken() -> Self {
            Self {
                books: Books::default(),
                broken: true,
            }
        }

        fn len(&self) -> usize {
            self.books.lock().unwrap().len()
        }
    }

    struct InMemoryTransaction(Books);

    #[async_trait::async_trait]
    impl Transaction for InMemoryTransaction {
        async fn commit(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }

        async fn roll_back(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection for InMemoryDatabase {
        type Transaction = InMemoryTransaction;
        async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
            if self.broken {
                return Err(Report::new(KernelError::Internal).attach_printable("store is down"));
            }
            Ok(InMemoryTransaction(Arc::clone(&self.books)))
        }
    }

    struct InMemoryBookRepository;

    #[async_trait::async_trait]
    impl BookQuery for InMemoryBookRepository {
        type Transaction = InMemoryTransaction;

        async fn find_all(
            &self,
            con: &mut InMemoryTransaction,
        ) -> error_stack::Result<Vec<Book>, KernelError> {
            Ok(con.0.lock().unwrap().clone())
        }

        async fn find_by_id(
            &self,
            con: &mut InMemoryTransaction,
            id: &BookId,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            let books = con.0.lock().unwrap();
            Ok(books.iter().find(|book| book.id() == id).cloned())
        }
    }

    #[async_trait::async_trait]
    impl BookModifier for InMemoryBookRepository {
        type Transaction = InMemoryTransaction;

        async fn create(
            &self,
            con: &mut InMemoryTransaction,
            book: &Book,
        ) -> error_stack::Result<(), KernelError> {
            con.0.lock().unwrap().push(book.clone());
            Ok(())
        }

        async fn append_comment(
            &self,
            con: &mut InMemoryTransaction,
            book_id: &BookId,
            comment: &BookComment,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            let mut books = con.0.lock().unwrap();
            Ok(books
                .iter_mut()
                .find(|book| book.id() == book_id)
                .map(|book| {
                    book.push_comment(comment.clone());
                    book.clone()
                }))
        }

        async fn delete(
            &self,
            con: &mut InMemoryTransaction,
            book_id: &BookId,
        ) -> error_stack::Result<bool, KernelError> {
            let mut books = con.0.lock().unwrap();
            let before = books.len();
            books.retain(|book| book.id() != book_id);
            Ok(books.len() != before)
        }

        async fn delete_all(
            &self,
            con: &mut InMemoryTransaction,
        ) -> error_stack::Result<u64, KernelError> {
            let mut books = con.0.lock().unwrap();
            let count = books.len() as u64;
            books.clear();
            Ok(count)
        }
    }

    impl DependOnBookQuery for InMemoryDatabase {
        type BookQuery = InMemoryBookRepository;
        fn book_query(&self) -> &Self::BookQuery {
            &InMemoryBookRepository
        }
    }

    impl DependOnBookModifier for InMemoryDatabase {
        type BookModifier = InMemoryBookRepository;
        fn book_modifier(&self) -> &Self::BookModifier {
            &InMemoryBookRepository
        }
    }

    fn create(title: &str) -> CreateBookDto {
        CreateBookDto {
            title: Some(title.to_string()),
        }
    }

    fn comment(id: impl ToString, comment: Option<&str>) -> AddBookCommentDto {
        AddBookCommentDto {
            id: id.to_string(),
            comment: comment.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn created_book_is_readable() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();

        let created = db.create_book(create("T")).await?;
        assert_eq!(created.title, "T");
        assert_eq!(created.comment_count, 0);
        assert!(created.comments.is_empty());

        let found = db
            .get_book(GetBookDto {
                id: created.id.to_string(),
            })
            .await?;
        assert_eq!(found, created);

        let all = db.get_all_books().await?;
        assert_eq!(all, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn create_without_title_is_invalid() {
        let db = InMemoryDatabase::default();

        for title in [None, Some(String::new())] {
            let error = db.create_book(CreateBookDto { title }).await.unwrap_err();
            assert_eq!(
                error.current_context(),
                &KernelError::Invalid { field: "title" }
            );
        }
        assert_eq!(db.len(), 0);
    }

    #[tokio::test]
    async fn title_is_checked_before_store_is_touched() {
        let db = InMemoryDatabase::broken();

        let error = db
            .create_book(CreateBookDto { title: None })
            .await
            .unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::Invalid { field: "title" }
        );

        let error = db.create_book(create("T")).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Internal);
    }

    #[tokio::test]
    async fn comments_append_in_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let created = db.create_book(create("T")).await?;

        let first = db
            .add_book_comment(comment(created.id, Some("C1")))
            .await?;
        assert_eq!(first.comments, vec!["C1"]);
        assert_eq!(first.comment_count, 1);

        let second = db
            .add_book_comment(comment(created.id, Some("C2")))
            .await?;
        assert_eq!(second.comments, vec!["C1", "C2"]);
        assert_eq!(second.comment_count, second.comments.len());
        assert_eq!(second.title, "T");

        let found = db
            .get_book(GetBookDto {
                id: created.id.to_string(),
            })
            .await?;
        assert_eq!(found, second);
        Ok(())
    }

    #[tokio::test]
    async fn missing_comment_wins_over_missing_book() {
        let db = InMemoryDatabase::default();
        let unknown = Uuid::new_v4();

        for (id, text) in [
            (unknown.to_string(), None),
            (unknown.to_string(), Some("")),
            ("not-an-id".to_string(), None),
        ] {
            let error = db.add_book_comment(comment(id, text)).await.unwrap_err();
            assert_eq!(
                error.current_context(),
                &KernelError::Invalid { field: "comment" }
            );
        }

        let error = InMemoryDatabase::broken()
            .add_book_comment(comment(unknown, None))
            .await
            .unwrap_err();
        assert_eq!(
            error.current_context(),
            &KernelError::Invalid { field: "comment" }
        );
    }

    #[tokio::test]
    async fn comment_on_unknown_book_is_not_found() {
        let db = InMemoryDatabase::default();

        for id in [Uuid::new_v4().to_string(), "not-an-id".to_string()] {
            let error = db
                .add_book_comment(comment(id, Some("C")))
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &KernelError::NotFound);
        }
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids_are_not_found() {
        let db = InMemoryDatabase::default();

        for id in [Uuid::new_v4().to_string(), "1234".to_string()] {
            let error = db
                .get_book(GetBookDto { id: id.clone() })
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &KernelError::NotFound);

            let error = db.delete_book(DeleteBookDto { id }).await.unwrap_err();
            assert_eq!(error.current_context(), &KernelError::NotFound);
        }
    }

    #[tokio::test]
    async fn deleted_book_never_resolves_again() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();
        let created = db.create_book(create("T")).await?;
        let id = created.id.to_string();

        let deleted = db.delete_book(DeleteBookDto { id: id.clone() }).await?;
        assert_eq!(deleted.id, created.id);

        let error = db
            .get_book(GetBookDto { id: id.clone() })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);

        let error = db
            .add_book_comment(comment(&id, Some("C")))
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);

        let error = db.delete_book(DeleteBookDto { id }).await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_empties_the_catalog() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::default();

        assert_eq!(db.delete_all_books().await?.count, 0);

        db.create_book(create("A")).await?;
        db.create_book(create("B")).await?;
        assert_eq!(db.delete_all_books().await?.count, 2);
        assert!(db.get_all_books().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let db = InMemoryDatabase::broken();

        let error = db.get_all_books().await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Internal);

        let error = db.delete_all_books().await.unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Internal);

        let error = db
            .get_book(GetBookDto {
                id: Uuid::new_v4().to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &KernelError::Internal);
    }
}
