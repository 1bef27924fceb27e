use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Name))
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string_null(Users::Phone))
                    .col(string_null(Users::Location))
                    .col(string_len(Users::UserType, 20).default("farmer"))
                    .col(date_time(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create farms table
        manager
            .create_table(
                Table::create()
                    .table(Farms::Table)
                    .if_not_exists()
                    .col(pk_auto(Farms::Id))
                    .col(integer(Farms::UserId))
                    .col(string(Farms::FarmName))
                    .col(decimal_null(Farms::AreaAcres).decimal_len(10, 2))
                    .col(string_null(Farms::Location))
                    .col(string_null(Farms::SoilType))
                    .col(date_time(Farms::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_farm_user")
                            .from(Farms::Table, Farms::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create crops table
        manager
            .create_table(
                Table::create()
                    .table(Crops::Table)
                    .if_not_exists()
                    .col(pk_auto(Crops::Id))
                    .col(integer(Crops::FarmId))
                    .col(string(Crops::CropName))
                    .col(string_null(Crops::Variety))
                    .col(date_null(Crops::PlantingDate))
                    .col(date_null(Crops::ExpectedHarvestDate))
                    .col(string(Crops::Status).default("planted"))
                    .col(date_time(Crops::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_crop_farm")
                            .from(Crops::Table, Crops::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(integer(Expenses::FarmId))
                    .col(string(Expenses::ExpenseType))
                    .col(decimal(Expenses::Amount).decimal_len(16, 4))
                    .col(string_null(Expenses::Description))
                    .col(date(Expenses::ExpenseDate))
                    .col(date_time(Expenses::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_farm")
                            .from(Expenses::Table, Expenses::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create farm_diary table
        manager
            .create_table(
                Table::create()
                    .table(FarmDiary::Table)
                    .if_not_exists()
                    .col(pk_auto(FarmDiary::Id))
                    .col(integer(FarmDiary::FarmId))
                    .col(date(FarmDiary::EntryDate))
                    .col(string_null(FarmDiary::ActivityType))
                    .col(text(FarmDiary::Description))
                    .col(text_null(FarmDiary::WeatherNotes))
                    .col(date_time(FarmDiary::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_farm_diary_farm")
                            .from(FarmDiary::Table, FarmDiary::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create yield_records table
        manager
            .create_table(
                Table::create()
                    .table(YieldRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(YieldRecords::Id))
                    .col(integer(YieldRecords::CropId))
                    .col(decimal(YieldRecords::Quantity).decimal_len(16, 4))
                    .col(string(YieldRecords::Unit).default("kg"))
                    .col(date(YieldRecords::HarvestDate))
                    .col(integer_null(YieldRecords::QualityRating))
                    .col(text_null(YieldRecords::Notes))
                    .col(date_time(YieldRecords::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_yield_record_crop")
                            .from(YieldRecords::Table, YieldRecords::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create resource_usage table
        manager
            .create_table(
                Table::create()
                    .table(ResourceUsage::Table)
                    .if_not_exists()
                    .col(pk_auto(ResourceUsage::Id))
                    .col(integer(ResourceUsage::FarmId))
                    .col(string_len(ResourceUsage::ResourceType, 20))
                    .col(decimal(ResourceUsage::Quantity).decimal_len(16, 4))
                    .col(string(ResourceUsage::Unit))
                    .col(date(ResourceUsage::UsageDate))
                    .col(text_null(ResourceUsage::Notes))
                    .col(date_time(ResourceUsage::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_resource_usage_farm")
                            .from(ResourceUsage::Table, ResourceUsage::FarmId)
                            .to(Farms::Table, Farms::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create marketplace_listings table
        manager
            .create_table(
                Table::create()
                    .table(MarketplaceListings::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketplaceListings::Id))
                    .col(integer(MarketplaceListings::SellerId))
                    .col(integer_null(MarketplaceListings::CropId))
                    .col(string(MarketplaceListings::CropName))
                    .col(decimal(MarketplaceListings::Quantity).decimal_len(16, 4))
                    .col(string(MarketplaceListings::Unit).default("kg"))
                    .col(decimal(MarketplaceListings::PricePerKg).decimal_len(16, 4))
                    .col(string_null(MarketplaceListings::Location))
                    .col(text_null(MarketplaceListings::Description))
                    .col(string_len(MarketplaceListings::Status, 20).default("available"))
                    .col(date_time(MarketplaceListings::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_listing_seller")
                            .from(MarketplaceListings::Table, MarketplaceListings::SellerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_marketplace_listing_crop")
                            .from(MarketplaceListings::Table, MarketplaceListings::CropId)
                            .to(Crops::Table, Crops::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create market_prices table
        manager
            .create_table(
                Table::create()
                    .table(MarketPrices::Table)
                    .if_not_exists()
                    .col(pk_auto(MarketPrices::Id))
                    .col(string(MarketPrices::CropName))
                    .col(string(MarketPrices::MandiName))
                    .col(decimal(MarketPrices::PricePerKg).decimal_len(16, 4))
                    .col(date(MarketPrices::PriceDate))
                    .col(string_null(MarketPrices::Location))
                    .col(date_time(MarketPrices::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_market_prices_crop_date")
                    .table(MarketPrices::Table)
                    .col(MarketPrices::CropName)
                    .col(MarketPrices::PriceDate)
                    .to_owned(),
            )
            .await?;

        // Create learning_resources table
        manager
            .create_table(
                Table::create()
                    .table(LearningResources::Table)
                    .if_not_exists()
                    .col(pk_auto(LearningResources::Id))
                    .col(string(LearningResources::Title))
                    .col(text_null(LearningResources::Description))
                    .col(string(LearningResources::ContentType))
                    .col(string(LearningResources::Category))
                    .col(string_len(LearningResources::Language, 10).default("en"))
                    .col(string_null(LearningResources::Tags))
                    .col(text_null(LearningResources::Content))
                    .col(string_null(LearningResources::VideoUrl))
                    .col(date_time(LearningResources::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create user_learning_progress table
        manager
            .create_table(
                Table::create()
                    .table(UserLearningProgress::Table)
                    .if_not_exists()
                    .col(pk_auto(UserLearningProgress::Id))
                    .col(integer(UserLearningProgress::UserId))
                    .col(integer(UserLearningProgress::ResourceId))
                    .col(string_len(UserLearningProgress::Status, 20).default("not_started"))
                    .col(integer(UserLearningProgress::ProgressPercentage).default(0))
                    .col(date_time_null(UserLearningProgress::CompletedAt))
                    .col(date_time(UserLearningProgress::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_learning_progress_user")
                            .from(UserLearningProgress::Table, UserLearningProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_learning_progress_resource")
                            .from(UserLearningProgress::Table, UserLearningProgress::ResourceId)
                            .to(LearningResources::Table, LearningResources::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One progress row per user and resource
        manager
            .create_index(
                Index::create()
                    .name("idx_user_learning_progress_user_resource")
                    .table(UserLearningProgress::Table)
                    .col(UserLearningProgress::UserId)
                    .col(UserLearningProgress::ResourceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLearningProgress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LearningResources::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MarketPrices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MarketplaceListings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ResourceUsage::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YieldRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FarmDiary::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Crops::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Farms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Phone,
    Location,
    UserType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Farms {
    Table,
    Id,
    UserId,
    FarmName,
    AreaAcres,
    Location,
    SoilType,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Crops {
    Table,
    Id,
    FarmId,
    CropName,
    Variety,
    PlantingDate,
    ExpectedHarvestDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    FarmId,
    ExpenseType,
    Amount,
    Description,
    ExpenseDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum FarmDiary {
    Table,
    Id,
    FarmId,
    EntryDate,
    ActivityType,
    Description,
    WeatherNotes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum YieldRecords {
    Table,
    Id,
    CropId,
    Quantity,
    Unit,
    HarvestDate,
    QualityRating,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ResourceUsage {
    Table,
    Id,
    FarmId,
    ResourceType,
    Quantity,
    Unit,
    UsageDate,
    Notes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MarketplaceListings {
    Table,
    Id,
    SellerId,
    CropId,
    CropName,
    Quantity,
    Unit,
    PricePerKg,
    Location,
    Description,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum MarketPrices {
    Table,
    Id,
    CropName,
    MandiName,
    PricePerKg,
    PriceDate,
    Location,
    CreatedAt,
}

#[derive(DeriveIden)]
enum LearningResources {
    Table,
    Id,
    Title,
    Description,
    ContentType,
    Category,
    Language,
    Tags,
    Content,
    VideoUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum UserLearningProgress {
    Table,
    Id,
    UserId,
    ResourceId,
    Status,
    ProgressPercentage,
    CompletedAt,
    CreatedAt,
}
