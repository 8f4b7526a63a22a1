use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_warehouse_hierarchy::Migration),
            Box::new(m20240101_000002_create_inventories_table::Migration),
            Box::new(m20240101_000003_create_inventory_locations_table::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_warehouse_hierarchy {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_warehouse_hierarchy"
        }
    }

    fn id_col<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .integer()
            .not_null()
            .auto_increment()
            .primary_key()
            .to_owned()
    }

    fn deleted_col<T: IntoIden>(col: T) -> ColumnDef {
        ColumnDef::new(col)
            .boolean()
            .not_null()
            .default(false)
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(&mut id_col(Warehouses::Id))
                        .col(ColumnDef::new(Warehouses::Name).string().not_null())
                        .col(ColumnDef::new(Warehouses::Address).string().null())
                        .col(&mut deleted_col(Warehouses::Deleted))
                        .col(
                            ColumnDef::new(Warehouses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Floors::Table)
                        .if_not_exists()
                        .col(&mut id_col(Floors::Id))
                        .col(ColumnDef::new(Floors::Name).string().not_null())
                        .col(ColumnDef::new(Floors::WarehouseId).integer().not_null())
                        .col(&mut deleted_col(Floors::Deleted))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_floors_warehouse_id")
                                .from(Floors::Table, Floors::WarehouseId)
                                .to(Warehouses::Table, Warehouses::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Rooms::Table)
                        .if_not_exists()
                        .col(&mut id_col(Rooms::Id))
                        .col(ColumnDef::new(Rooms::Name).string().not_null())
                        .col(ColumnDef::new(Rooms::Capacity).integer().null())
                        .col(ColumnDef::new(Rooms::FloorId).integer().not_null())
                        .col(&mut deleted_col(Rooms::Deleted))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_rooms_floor_id")
                                .from(Rooms::Table, Rooms::FloorId)
                                .to(Floors::Table, Floors::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Aisles::Table)
                        .if_not_exists()
                        .col(&mut id_col(Aisles::Id))
                        .col(ColumnDef::new(Aisles::Name).string().not_null())
                        .col(ColumnDef::new(Aisles::RoomId).integer().not_null())
                        .col(&mut deleted_col(Aisles::Deleted))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_aisles_room_id")
                                .from(Aisles::Table, Aisles::RoomId)
                                .to(Rooms::Table, Rooms::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Shelves::Table)
                        .if_not_exists()
                        .col(&mut id_col(Shelves::Id))
                        .col(ColumnDef::new(Shelves::Name).string().not_null())
                        .col(ColumnDef::new(Shelves::AisleId).integer().not_null())
                        .col(&mut deleted_col(Shelves::Deleted))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_shelves_aisle_id")
                                .from(Shelves::Table, Shelves::AisleId)
                                .to(Aisles::Table, Aisles::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Bins::Table)
                        .if_not_exists()
                        .col(&mut id_col(Bins::Id))
                        .col(ColumnDef::new(Bins::Name).string().not_null())
                        .col(
                            ColumnDef::new(Bins::Capacity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(ColumnDef::new(Bins::ShelfId).integer().not_null())
                        .col(&mut deleted_col(Bins::Deleted))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_bins_shelf_id")
                                .from(Bins::Table, Bins::ShelfId)
                                .to(Shelves::Table, Shelves::Id),
                        )
                        .to_owned(),
                )
                .await?;

            // Child listings always filter by parent id
            let parent_indexes = [
                ("idx_floors_warehouse_id", Floors::Table.into_iden(), Floors::WarehouseId.into_iden()),
                ("idx_rooms_floor_id", Rooms::Table.into_iden(), Rooms::FloorId.into_iden()),
                ("idx_aisles_room_id", Aisles::Table.into_iden(), Aisles::RoomId.into_iden()),
                ("idx_shelves_aisle_id", Shelves::Table.into_iden(), Shelves::AisleId.into_iden()),
                ("idx_bins_shelf_id", Bins::Table.into_iden(), Bins::ShelfId.into_iden()),
            ];
            for (name, table, column) in parent_indexes {
                manager
                    .create_index(
                        Index::create()
                            .if_not_exists()
                            .name(name)
                            .table(table)
                            .col(column)
                            .to_owned(),
                    )
                    .await?;
            }

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Bins::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Shelves::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Aisles::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Rooms::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Floors::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Warehouses {
        Table,
        Id,
        Name,
        Address,
        Deleted,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Floors {
        Table,
        Id,
        Name,
        WarehouseId,
        Deleted,
    }

    #[derive(DeriveIden)]
    enum Rooms {
        Table,
        Id,
        Name,
        Capacity,
        FloorId,
        Deleted,
    }

    #[derive(DeriveIden)]
    enum Aisles {
        Table,
        Id,
        Name,
        RoomId,
        Deleted,
    }

    #[derive(DeriveIden)]
    enum Shelves {
        Table,
        Id,
        Name,
        AisleId,
        Deleted,
    }

    #[derive(DeriveIden)]
    enum Bins {
        Table,
        Id,
        Name,
        Capacity,
        ShelfId,
        Deleted,
    }
}

mod m20240101_000002_create_inventories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_inventories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Inventories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Inventories::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Inventories::Name).string().not_null())
                        .col(
                            ColumnDef::new(Inventories::Stock)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Inventories::Deleted)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Inventories::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Inventories {
        Table,
        Id,
        Name,
        Stock,
        Deleted,
    }
}

mod m20240101_000003_create_inventory_locations_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_inventory_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(InventoryLocations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InventoryLocations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::InventoryId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(InventoryLocations::WarehouseId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InventoryLocations::FloorId).integer().not_null())
                        .col(ColumnDef::new(InventoryLocations::RoomId).integer().not_null())
                        .col(ColumnDef::new(InventoryLocations::AisleId).integer().not_null())
                        .col(ColumnDef::new(InventoryLocations::ShelfId).integer().not_null())
                        .col(ColumnDef::new(InventoryLocations::BinId).integer().not_null())
                        .col(
                            ColumnDef::new(InventoryLocations::PlacedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_locations_inventory_id")
                                .from(InventoryLocations::Table, InventoryLocations::InventoryId)
                                .to(Inventories::Table, Inventories::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inventory_locations_bin_id")
                                .from(InventoryLocations::Table, InventoryLocations::BinId)
                                .to(Bins::Table, Bins::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_inventory_locations_bin_id")
                        .table(InventoryLocations::Table)
                        .col(InventoryLocations::BinId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InventoryLocations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum InventoryLocations {
        Table,
        Id,
        InventoryId,
        WarehouseId,
        FloorId,
        RoomId,
        AisleId,
        ShelfId,
        BinId,
        PlacedAt,
    }

    #[derive(DeriveIden)]
    enum Inventories {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum Bins {
        Table,
        Id,
    }
}
