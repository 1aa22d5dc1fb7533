//! Database-backed allocation tests.
//!
//! These exercise the allocation transactions against a real PostgreSQL
//! instance and are ignored by default; run them with a disposable
//! database:
//!
//! ```text
//! DATABASE_URL=postgres://localhost:5432/homestash_test \
//!     cargo test -- --ignored
//! ```

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use homestash_core::error::ErrorKind;
use homestash_core::traits::gateway::InventoryGateway;
use homestash_core::types::id::UserId;
use homestash_database::repositories::{
    FurnitureRepository, ItemRepository, RoomRepository, StorageCellRepository,
};
use homestash_database::PgInventoryGateway;
use homestash_entity::item::CreateItem;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .expect("connect to test database");
    homestash_database::migration::run_migrations(&pool)
        .await
        .expect("run migrations");
    pool
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn first_cells_get_letter_a_and_sequential_numbers() {
    let pool = pool().await;
    let user = UserId::new();
    let rooms = RoomRepository::new(pool.clone());
    let furniture = FurnitureRepository::new(pool.clone());
    let cells = StorageCellRepository::new(pool.clone());

    let bedroom = rooms.create(user, "Bedroom").await.unwrap();
    assert!(bedroom.letter.is_none());

    let desk = furniture.create(user, bedroom.id, "Desk").await.unwrap();
    assert_eq!(desk.furniture_no, 1);

    let first = cells.allocate(user, bedroom.id, desk.id).await.unwrap();
    assert_eq!(first.cell_number, 1);
    assert_eq!(first.code, "A1001");
    assert_eq!(first.display_name, "Bedroom / Desk / A1001");

    let second = cells.allocate(user, bedroom.id, desk.id).await.unwrap();
    assert_eq!(second.cell_number, 2);
    assert_eq!(second.code, "A1002");

    // The letter stuck to the room.
    let bedroom = rooms.find_by_id(user, bedroom.id).await.unwrap().unwrap();
    assert_eq!(bedroom.letter.as_deref(), Some("A"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn interleaved_pairs_keep_independent_gapless_sequences() {
    let pool = pool().await;
    let user = UserId::new();
    let rooms = RoomRepository::new(pool.clone());
    let furniture = FurnitureRepository::new(pool.clone());
    let cells = StorageCellRepository::new(pool.clone());

    let room = rooms.create(user, "Garage").await.unwrap();
    let shelf = furniture.create(user, room.id, "Shelf").await.unwrap();
    let cabinet = furniture.create(user, room.id, "Cabinet").await.unwrap();

    // Interleave allocations across the two pairs.
    for round in 1..=3 {
        let a = cells.allocate(user, room.id, shelf.id).await.unwrap();
        let b = cells.allocate(user, room.id, cabinet.id).await.unwrap();
        assert_eq!(a.cell_number, round);
        assert_eq!(b.cell_number, round);
    }

    let shelf_cells = cells.list_for_pair(user, room.id, shelf.id).await.unwrap();
    let numbers: Vec<i32> = shelf_cells.iter().map(|c| c.cell_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn concurrent_allocation_produces_no_duplicates() {
    let pool = pool().await;
    let user = UserId::new();
    let rooms = RoomRepository::new(pool.clone());
    let furniture = FurnitureRepository::new(pool.clone());
    let cells = Arc::new(StorageCellRepository::new(pool.clone()));

    let room = rooms.create(user, "Attic").await.unwrap();
    let chest = furniture.create(user, room.id, "Chest").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cells = Arc::clone(&cells);
        let (room_id, furniture_id) = (room.id, chest.id);
        handles.push(tokio::spawn(async move {
            cells.allocate(user, room_id, furniture_id).await.unwrap()
        }));
    }

    let mut numbers: Vec<i32> = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap().cell_number);
    }
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=8).collect::<Vec<i32>>());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn twenty_seventh_room_exhausts_the_namespace() {
    let pool = pool().await;
    let user = UserId::new();
    let rooms = RoomRepository::new(pool.clone());
    let furniture = FurnitureRepository::new(pool.clone());
    let cells = StorageCellRepository::new(pool.clone());

    for i in 0..26 {
        let room = rooms.create(user, &format!("Room {i}")).await.unwrap();
        let piece = furniture.create(user, room.id, "Box").await.unwrap();
        cells.allocate(user, room.id, piece.id).await.unwrap();
    }

    let extra = rooms.create(user, "Room 26").await.unwrap();
    let piece = furniture.create(user, extra.id, "Box").await.unwrap();
    let err = cells.allocate(user, extra.id, piece.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExhaustedNamespace);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database via DATABASE_URL"]
async fn gateway_bind_updates_the_location_label() {
    let pool = pool().await;
    let user = UserId::new();
    let rooms = RoomRepository::new(pool.clone());
    let furniture = FurnitureRepository::new(pool.clone());
    let cells = StorageCellRepository::new(pool.clone());
    let items = ItemRepository::new(pool.clone());
    let gateway = PgInventoryGateway::new(pool.clone());

    let room = rooms.create(user, "Hall").await.unwrap();
    let rack = furniture.create(user, room.id, "Rack").await.unwrap();
    let cell = cells.allocate(user, room.id, rack.id).await.unwrap();

    // Unique enough across test runs; the real allocator is exercised
    // against the gateway fake elsewhere.
    let suffix = 10_000 + (Uuid::new_v4().as_u128() % 90_000) as u32;
    let code = format!("ITEM-20240520-{suffix}");
    let item = items
        .create(&CreateItem {
            user_id: user,
            code: code.clone(),
            name: "Umbrella".to_string(),
        })
        .await
        .unwrap();

    let resolved = gateway.resolve_item(user, &code).await.unwrap().unwrap();
    let storage = gateway.resolve_storage(user, &cell.code).await.unwrap().unwrap();
    gateway
        .bind_item_to_storage(user, resolved.id, storage.id, &storage.name)
        .await
        .unwrap();
    // Binding twice is a no-op, not an error.
    gateway
        .bind_item_to_storage(user, resolved.id, storage.id, &storage.name)
        .await
        .unwrap();

    let item = items.find_by_id(user, item.id).await.unwrap().unwrap();
    assert_eq!(item.location_label, cell.display_name);

    let linked = items.storage_cells(user, item.id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].code, cell.code);
}
