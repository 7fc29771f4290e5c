use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

use crate::models::{
    author, book, book_authors, category, copy, fine, member, publisher, staff, transaction,
};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    create_tables(&db).await?;

    Ok(db)
}

/// Create any missing table, parents before children so the foreign keys resolve.
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, publisher::Entity).await?;
    create_table(db, category::Entity).await?;
    create_table(db, author::Entity).await?;
    create_table(db, staff::Entity).await?;
    create_table(db, member::Entity).await?;
    create_table(db, book::Entity).await?;
    create_table(db, book_authors::Entity).await?;
    create_table(db, copy::Entity).await?;
    create_table(db, transaction::Entity).await?;
    create_table(db, fine::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}
