use std::ops::Deref;
use std::sync::Arc;

use driver::database::PostgresDatabase;
use kernel::KernelError;
use vodca::References;

/// Shared request state. `D` is the book store every route talks to.
pub struct AppModule<D = PostgresDatabase>(Arc<Handler<D>>);

impl AppModule {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let database = PostgresDatabase::new().await?;
        Ok(Self::with_database(database))
    }
}

impl<D> AppModule<D> {
    pub fn with_database(database: D) -> Self {
        Self(Arc::new(Handler { database }))
    }
}

impl<D> Clone for AppModule<D> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<D> Deref for AppModule<D> {
    type Target = Handler<D>;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

/// Built once at startup; the catalog keeps no other process-wide state.
#[derive(References)]
pub struct Handler<D> {
    database: D,
}
