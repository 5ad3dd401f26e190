use sea_orm_migration::prelude::*;

/// Exact-match search filters on (postal_code, city).
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_offers_postal_code_city")
                    .table(Offers::Table)
                    .col(Offers::PostalCode)
                    .col(Offers::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_offers_postal_code_city").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Offers {
    Table,
    PostalCode,
    City,
}
