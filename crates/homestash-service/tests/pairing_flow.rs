//! Pairing flow tests against an in-memory inventory gateway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use homestash_core::error::ErrorKind;
use homestash_core::result::AppResult;
use homestash_core::traits::gateway::{InventoryGateway, TagRef};
use homestash_core::types::id::UserId;
use homestash_label::LabelPayload;
use homestash_service::pairing::{PairingService, PairingStore, ScanOutcome};
use homestash_service::RequestContext;

/// A recorded association write.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Bind {
    user_id: UserId,
    item_id: Uuid,
    storage_cell_id: Uuid,
    location_label: String,
}

/// In-memory gateway: user-scoped code tables plus a bind log.
#[derive(Default)]
struct FakeGateway {
    items: Mutex<HashMap<(UserId, String), TagRef>>,
    cells: Mutex<HashMap<(UserId, String), TagRef>>,
    binds: Mutex<Vec<Bind>>,
}

impl FakeGateway {
    fn seed_item(&self, user_id: UserId, code: &str, name: &str) -> TagRef {
        let tag = TagRef {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
        };
        self.items
            .lock()
            .unwrap()
            .insert((user_id, code.to_string()), tag.clone());
        tag
    }

    fn seed_cell(&self, user_id: UserId, code: &str, display_name: &str) -> TagRef {
        let tag = TagRef {
            id: Uuid::new_v4(),
            code: code.to_string(),
            name: display_name.to_string(),
        };
        self.cells
            .lock()
            .unwrap()
            .insert((user_id, code.to_string()), tag.clone());
        tag
    }

    fn remove_item(&self, user_id: UserId, code: &str) {
        self.items
            .lock()
            .unwrap()
            .remove(&(user_id, code.to_string()));
    }

    fn binds(&self) -> Vec<Bind> {
        self.binds.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventoryGateway for FakeGateway {
    async fn item_code_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .keys()
            .any(|(_, c)| c == code))
    }

    async fn resolve_item(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .get(&(user_id, code.to_string()))
            .cloned())
    }

    async fn resolve_storage(&self, user_id: UserId, code: &str) -> AppResult<Option<TagRef>> {
        Ok(self
            .cells
            .lock()
            .unwrap()
            .get(&(user_id, code.to_string()))
            .cloned())
    }

    async fn bind_item_to_storage(
        &self,
        user_id: UserId,
        item_id: Uuid,
        storage_cell_id: Uuid,
        location_label: &str,
    ) -> AppResult<()> {
        self.binds.lock().unwrap().push(Bind {
            user_id,
            item_id,
            storage_cell_id,
            location_label: location_label.to_string(),
        });
        Ok(())
    }
}

const ITEM_CODE: &str = "ITEM-20240520-10086";
const CELL_CODE: &str = "A3001";
const CELL_NAME: &str = "Bedroom / Desk / A3001";

struct Fixture {
    gateway: Arc<FakeGateway>,
    service: PairingService,
    ctx: RequestContext,
    item: TagRef,
    cell: TagRef,
}

fn fixture_with_ttl(ttl: Duration) -> Fixture {
    let gateway = Arc::new(FakeGateway::default());
    let ctx = RequestContext::new(UserId::new());
    let item = gateway.seed_item(ctx.user_id, ITEM_CODE, "Winter gloves");
    let cell = gateway.seed_cell(ctx.user_id, CELL_CODE, CELL_NAME);
    let store = Arc::new(PairingStore::new(ttl));
    let service = PairingService::new(gateway.clone() as Arc<dyn InventoryGateway>, store);
    Fixture {
        gateway,
        service,
        ctx,
        item,
        cell,
    }
}

fn fixture() -> Fixture {
    fixture_with_ttl(Duration::from_secs(600))
}

fn item_scan() -> LabelPayload {
    LabelPayload::item(ITEM_CODE, "Winter gloves")
}

fn cell_scan() -> LabelPayload {
    LabelPayload::storage(CELL_CODE, CELL_NAME)
}

#[tokio::test]
async fn item_then_storage_pairs() {
    let f = fixture();

    let first = f.service.scan(&f.ctx, &item_scan()).await.unwrap();
    match first {
        ScanOutcome::Waiting { pending } => {
            assert_eq!(pending.item.unwrap().code, ITEM_CODE);
            assert!(pending.storage.is_none());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let second = f.service.scan(&f.ctx, &cell_scan()).await.unwrap();
    match second {
        ScanOutcome::Paired { item, storage } => {
            assert_eq!(item.code, ITEM_CODE);
            assert_eq!(storage.code, CELL_CODE);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let binds = f.gateway.binds();
    assert_eq!(binds.len(), 1);
    assert_eq!(binds[0].item_id, f.item.id);
    assert_eq!(binds[0].storage_cell_id, f.cell.id);
    assert_eq!(binds[0].location_label, CELL_NAME);

    // Session cleared on completion.
    let status = f.service.status(&f.ctx);
    assert!(status.item.is_none() && status.storage.is_none());
}

#[tokio::test]
async fn storage_then_item_pairs_identically() {
    let f = fixture();

    assert!(matches!(
        f.service.scan(&f.ctx, &cell_scan()).await.unwrap(),
        ScanOutcome::Waiting { .. }
    ));
    assert!(matches!(
        f.service.scan(&f.ctx, &item_scan()).await.unwrap(),
        ScanOutcome::Paired { .. }
    ));

    let binds = f.gateway.binds();
    assert_eq!(binds.len(), 1);
    assert_eq!(binds[0].location_label, CELL_NAME);
}

#[tokio::test]
async fn unknown_code_leaves_session_unchanged() {
    let f = fixture();

    f.service.scan(&f.ctx, &item_scan()).await.unwrap();

    let err = f
        .service
        .scan(&f.ctx, &LabelPayload::storage("Z9999", "nowhere"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::EntityNotFound);

    // The pending item survived the failed scan…
    let status = f.service.status(&f.ctx);
    assert_eq!(status.item.unwrap().code, ITEM_CODE);

    // …and a subsequent valid scan still completes normally.
    assert!(matches!(
        f.service.scan(&f.ctx, &cell_scan()).await.unwrap(),
        ScanOutcome::Paired { .. }
    ));
    assert_eq!(f.gateway.binds().len(), 1);
}

#[tokio::test]
async fn single_scan_never_commits() {
    let f = fixture();
    f.service.scan(&f.ctx, &item_scan()).await.unwrap();
    assert!(f.gateway.binds().is_empty());
}

#[tokio::test]
async fn same_side_rescans_replace_the_pending_tag() {
    let f = fixture();
    f.gateway
        .seed_item(f.ctx.user_id, "ITEM-20240521-20001", "Scarf");

    f.service.scan(&f.ctx, &item_scan()).await.unwrap();
    f.service
        .scan(
            &f.ctx,
            &LabelPayload::item("ITEM-20240521-20001", "Scarf"),
        )
        .await
        .unwrap();

    match f.service.scan(&f.ctx, &cell_scan()).await.unwrap() {
        ScanOutcome::Paired { item, .. } => assert_eq!(item.code, "ITEM-20240521-20001"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(f.gateway.binds().len(), 1);
}

#[tokio::test]
async fn cancel_discards_pending_scans() {
    let f = fixture();

    f.service.scan(&f.ctx, &item_scan()).await.unwrap();
    f.service.cancel(&f.ctx);
    // Cancel is idempotent.
    f.service.cancel(&f.ctx);

    // The next scan starts a fresh session instead of completing.
    assert!(matches!(
        f.service.scan(&f.ctx, &cell_scan()).await.unwrap(),
        ScanOutcome::Waiting { .. }
    ));
    assert!(f.gateway.binds().is_empty());
}

#[tokio::test]
async fn scans_are_scoped_to_the_user() {
    let f = fixture();
    let stranger = RequestContext::new(UserId::new());

    let err = f.service.scan(&stranger, &item_scan()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::EntityNotFound);
}

#[tokio::test]
async fn expired_session_never_completes() {
    let f = fixture_with_ttl(Duration::ZERO);

    assert!(matches!(
        f.service.scan(&f.ctx, &item_scan()).await.unwrap(),
        ScanOutcome::Waiting { .. }
    ));
    // The item scan has already expired, so this starts over.
    assert!(matches!(
        f.service.scan(&f.ctx, &cell_scan()).await.unwrap(),
        ScanOutcome::Waiting { .. }
    ));
    assert!(f.gateway.binds().is_empty());
}

#[tokio::test]
async fn deleted_opposite_side_keeps_fresh_scan_pending() {
    let f = fixture();

    f.service.scan(&f.ctx, &item_scan()).await.unwrap();
    f.gateway.remove_item(f.ctx.user_id, ITEM_CODE);

    match f.service.scan(&f.ctx, &cell_scan()).await.unwrap() {
        ScanOutcome::Waiting { pending } => {
            assert!(pending.item.is_none());
            assert_eq!(pending.storage.unwrap().code, CELL_CODE);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(f.gateway.binds().is_empty());
}

#[tokio::test]
async fn legacy_payload_without_name_falls_back_to_stored_name() {
    let f = fixture();

    let mut legacy = item_scan();
    legacy.name = None;

    match f.service.scan(&f.ctx, &legacy).await.unwrap() {
        ScanOutcome::Waiting { pending } => {
            assert_eq!(pending.item.unwrap().name, "Winter gloves");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
