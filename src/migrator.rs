// The async `MigrationTrait::up`/`down` signatures take `&SchemaManager` with an
// elided lifetime; `async_trait` desugaring makes an explicit `<'_>` early-bound
// (E0195), so the idiomatic `<'_>` cannot be written here. Allow the crate-wide
// `deny(rust_2018_idioms)` elision lint for this module only.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_products_table::Migration),
            Box::new(m20240301_000002_create_upload_history_table::Migration),
            Box::new(m20240301_000003_create_stores_table::Migration),
            Box::new(m20240301_000004_create_assigned_history_table::Migration),
            Box::new(m20240301_000005_create_customers_table::Migration),
            Box::new(m20240301_000006_create_orders_table::Migration),
        ]
    }
}

mod m20240301_000001_create_products_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_products_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Products::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Products::ProductRef)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(Products::ProductGroup)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Products::GroupImageUrl).string())
                        .col(ColumnDef::new(Products::Category).string())
                        .col(ColumnDef::new(Products::CategoryImageUrl).string())
                        .col(ColumnDef::new(Products::SubCategory).string())
                        .col(ColumnDef::new(Products::SubCategoryImageUrl).string())
                        .col(ColumnDef::new(Products::Gender).string())
                        .col(ColumnDef::new(Products::ProductType).string())
                        .col(ColumnDef::new(Products::ProductTypeImageUrl).string())
                        .col(ColumnDef::new(Products::Fit).string())
                        .col(ColumnDef::new(Products::Neckline).string())
                        .col(ColumnDef::new(Products::Sleeves).string())
                        .col(ColumnDef::new(Products::Fabric).string())
                        .col(ColumnDef::new(Products::Price).decimal())
                        .col(ColumnDef::new(Products::ProductDetails).text())
                        .col(ColumnDef::new(Products::Variants).json().not_null())
                        .col(
                            ColumnDef::new(Products::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Products::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // Identity lookups always filter on group first.
            manager
                .create_index(
                    Index::create()
                        .name("idx_products_group")
                        .table(Products::Table)
                        .col(Products::ProductGroup)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
        ProductRef,
        ProductGroup,
        GroupImageUrl,
        Category,
        CategoryImageUrl,
        SubCategory,
        SubCategoryImageUrl,
        Gender,
        ProductType,
        ProductTypeImageUrl,
        Fit,
        Neckline,
        Sleeves,
        Fabric,
        Price,
        ProductDetails,
        Variants,
        IsDeleted,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_upload_history_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_upload_history_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UploadHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UploadHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UploadHistory::UploadRef)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(UploadHistory::TotalAmount)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UploadHistory::Products).json().not_null())
                        .col(
                            ColumnDef::new(UploadHistory::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UploadHistory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UploadHistory {
        Table,
        Id,
        UploadRef,
        TotalAmount,
        Products,
        CreatedAt,
    }
}

mod m20240301_000003_create_stores_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_stores_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Stores::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Stores::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Stores::StoreRef)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Stores::Name).string().not_null())
                        .col(ColumnDef::new(Stores::Address).string().not_null())
                        .col(ColumnDef::new(Stores::City).string().not_null())
                        .col(ColumnDef::new(Stores::Pincode).string().not_null())
                        .col(ColumnDef::new(Stores::State).string().not_null())
                        .col(ColumnDef::new(Stores::CommissionPercentage).decimal())
                        .col(ColumnDef::new(Stores::ContactName).string().not_null())
                        .col(
                            ColumnDef::new(Stores::ContactEmail)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Stores::ContactPhone).string())
                        .col(
                            ColumnDef::new(Stores::IsDeleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Stores::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Stores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Stores {
        Table,
        Id,
        StoreRef,
        Name,
        Address,
        City,
        Pincode,
        State,
        CommissionPercentage,
        ContactName,
        ContactEmail,
        ContactPhone,
        IsDeleted,
        CreatedAt,
    }
}

mod m20240301_000004_create_assigned_history_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_assigned_history_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AssignedHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AssignedHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AssignedHistory::StoreId).uuid().not_null())
                        .col(
                            ColumnDef::new(AssignedHistory::TotalAmount)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(AssignedHistory::Items).json().not_null())
                        .col(
                            ColumnDef::new(AssignedHistory::Status)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AssignedHistory::AssignedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AssignedHistory::ReceivedAt)
                                .timestamp_with_time_zone(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_assigned_history_store")
                                .from(AssignedHistory::Table, AssignedHistory::StoreId)
                                .to(Stores::Table, Stores::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(AssignedHistory::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AssignedHistory {
        Table,
        Id,
        StoreId,
        TotalAmount,
        Items,
        Status,
        AssignedAt,
        ReceivedAt,
    }

    #[derive(DeriveIden)]
    enum Stores {
        Table,
        Id,
    }
}

mod m20240301_000005_create_customers_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_customers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string())
                        .col(ColumnDef::new(Customers::Cart).json().not_null())
                        .col(ColumnDef::new(Customers::Wishlist).json().not_null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        Email,
        Name,
        Phone,
        Cart,
        Wishlist,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000006_create_orders_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000006_create_orders_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderRef)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::ProductId).uuid().not_null())
                        .col(
                            ColumnDef::new(Orders::ProductGroup)
                                .string_len(32)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::Color).json().not_null())
                        .col(ColumnDef::new(Orders::Size).string().not_null())
                        .col(ColumnDef::new(Orders::Quantity).integer().not_null())
                        .col(ColumnDef::new(Orders::UnitPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(Orders::DeliveryCharges)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::DiscountPercentage)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::TotalPrice).decimal().not_null())
                        .col(
                            ColumnDef::new(Orders::DeliveryStatus)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Orders::DeliveredAt).timestamp_with_time_zone())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_product")
                                .from(Orders::Table, Orders::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Orders {
        Table,
        Id,
        OrderRef,
        CustomerId,
        ProductId,
        ProductGroup,
        Color,
        Size,
        Quantity,
        UnitPrice,
        DeliveryCharges,
        DiscountPercentage,
        TotalPrice,
        DeliveryStatus,
        CreatedAt,
        DeliveredAt,
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Products {
        Table,
        Id,
    }
}
