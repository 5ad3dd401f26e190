use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Offers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Offers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Offers::PostalCode).string_len(10).not_null())
                    .col(ColumnDef::new(Offers::City).string_len(100).not_null())
                    .col(ColumnDef::new(Offers::Street).string_len(200))
                    .col(ColumnDef::new(Offers::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Offers::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Offers::ClassLabel).string_len(50))
                    .col(ColumnDef::new(Offers::Phone).string_len(20))
                    .col(ColumnDef::new(Offers::ValidFrom).string_len(20))
                    .col(ColumnDef::new(Offers::ValidTo).string_len(20))
                    .col(ColumnDef::new(Offers::Notes).text())
                    .col(ColumnDef::new(Offers::Latitude).double())
                    .col(ColumnDef::new(Offers::Longitude).double())
                    .col(ColumnDef::new(Offers::EditCode).string_len(16).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Offers::Table)
                    .col(Offers::EditCode)
                    .name("idx_offers_edit_code")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Offers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Offers {
    Table,
    Id,
    PostalCode,
    City,
    Street,
    Name,
    Email,
    ClassLabel,
    Phone,
    ValidFrom,
    ValidTo,
    Notes,
    Latitude,
    Longitude,
    EditCode,
}
