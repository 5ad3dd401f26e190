use sea_orm_migration::prelude::*;

use mitfahr_offers_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
