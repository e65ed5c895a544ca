use application::service::{
    AddBookCommentService, CreateBookService, DeleteAllBookService, DeleteBookService,
    GetAllBookService, GetBookService,
};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::Router;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;

use crate::controller::Controller;
use crate::error::{ErrorStatus, MISSING_TITLE, NO_BOOK_EXISTS};
use crate::handler::AppModule;
use crate::request::{
    AddCommentRequest, BookTransformer, CreateBookRequest, DeleteBookRequest, Fields,
    GetBookRequest,
};
use crate::response::{BookPresenter, CreatedBookPresenter};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl<D> BookRouter for Router<AppModule<D>>
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>,
                 Fields(req): Fields<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, CreatedBookPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.database().create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::with_message(MISSING_TITLE))
                },
            )
            .delete(|State(module): State<AppModule<D>>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.database().delete_all_books().await })
                    .await
                    .map_err(ErrorStatus::with_message(NO_BOOK_EXISTS))
            }),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(GetBookRequest::new(id))
                        .handle(|dto| async move { module.database().get_book(dto).await })
                        .await
                        .map_err(ErrorStatus::with_message(NO_BOOK_EXISTS))
                },
            )
            .post(
                |State(module): State<AppModule<D>>,
                 Path(id): Path<String>,
                 Fields(req): Fields<AddCommentRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().add_book_comment(dto).await })
                        .await
                        .map_err(ErrorStatus::with_message(NO_BOOK_EXISTS))
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, Path(id): Path<String>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(DeleteBookRequest::new(id))
                        .handle(|dto| async move { module.database().delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::with_message(NO_BOOK_EXISTS))
                },
            ),
        )
    }
}
