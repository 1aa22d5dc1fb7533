//! The pairing service: scan handling, completion, and cancel.

use std::sync::Arc;

use tracing::{debug, info};

use homestash_core::error::AppError;
use homestash_core::result::AppResult;
use homestash_core::traits::gateway::{InventoryGateway, TagRef};
use homestash_core::types::category::TagCategory;
use homestash_core::types::id::UserId;
use homestash_entity::pairing::{PairingSnapshot, PairingState, PendingTag, ScanTransition};
use homestash_label::payload::LabelPayload;

use crate::context::RequestContext;
use crate::pairing::store::PairingStore;

/// What a scan accomplished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// One side recorded; waiting for the other.
    Waiting {
        /// The pending side(s) after this scan.
        pending: PairingSnapshot,
    },
    /// Both sides present: the association has been written and the
    /// session cleared.
    Paired {
        /// The item side of the completed pairing.
        item: PendingTag,
        /// The storage side of the completed pairing.
        storage: PendingTag,
    },
}

/// Drives the pairing state machine over the session store and the
/// inventory gateway.
///
/// Scans resolve codes strictly within the acting user's scope; a failed
/// resolution leaves the stored session untouched so the user can simply
/// rescan.
#[derive(Clone)]
pub struct PairingService {
    gateway: Arc<dyn InventoryGateway>,
    store: Arc<PairingStore>,
}

impl PairingService {
    /// Create a pairing service.
    pub fn new(gateway: Arc<dyn InventoryGateway>, store: Arc<PairingStore>) -> Self {
        Self { gateway, store }
    }

    /// Feed one decoded label scan into the user's pairing session.
    pub async fn scan(
        &self,
        ctx: &RequestContext,
        payload: &LabelPayload,
    ) -> AppResult<ScanOutcome> {
        let resolved = self
            .resolve(ctx.user_id, payload.category, &payload.code)
            .await?
            .ok_or_else(|| {
                AppError::entity_not_found(format!(
                    "No {} with code '{}' exists for this user",
                    payload.category, payload.code
                ))
            })?;

        // Prefer the name printed on the label; older labels carry none
        // and fall back to the stored name.
        let tag = PendingTag {
            code: resolved.code.clone(),
            name: payload.name.clone().unwrap_or_else(|| resolved.name.clone()),
        };

        let (state, version) = match self.store.snapshot(ctx.user_id) {
            Some((state, version)) => (state, Some(version)),
            None => (PairingState::Empty, None),
        };

        match state.clone().apply(payload.category, tag.clone()) {
            ScanTransition::Wait(new_state) => {
                let pending = new_state.snapshot();
                self.store_or_reset(ctx.user_id, version, new_state)?;
                debug!(user_id = %ctx.user_id, code = %payload.code, "Scan recorded, waiting for the other side");
                Ok(ScanOutcome::Waiting { pending })
            }
            ScanTransition::Complete { item, storage } => {
                self.complete(ctx, payload.category, resolved, state, version, item, storage)
                    .await
            }
        }
    }

    /// Commit a completed pairing: re-resolve the earlier side, claim the
    /// session, and write the association.
    #[allow(clippy::too_many_arguments)]
    async fn complete(
        &self,
        ctx: &RequestContext,
        scanned: TagCategory,
        scanned_ref: TagRef,
        prior_state: PairingState,
        version: Option<u64>,
        item: PendingTag,
        storage: PendingTag,
    ) -> AppResult<ScanOutcome> {
        let version = version.ok_or_else(|| {
            AppError::internal("Pairing completion without a stored session")
        })?;

        // The opposite side was scanned earlier and may have been deleted
        // since. If it is gone, drop it and keep the fresh scan pending.
        let opposite = scanned.opposite();
        let opposite_code = match opposite {
            TagCategory::Item => &item.code,
            TagCategory::Storage => &storage.code,
        };
        let Some(opposite_ref) = self.resolve(ctx.user_id, opposite, opposite_code).await? else {
            let fresh_tag = match scanned {
                TagCategory::Item => item.clone(),
                TagCategory::Storage => storage.clone(),
            };
            let new_state = match PairingState::Empty.apply(scanned, fresh_tag) {
                ScanTransition::Wait(state) => state,
                // A single scan on an empty session never completes.
                ScanTransition::Complete { .. } => {
                    return Err(AppError::internal("Single scan completed a pairing"));
                }
            };
            let pending = new_state.snapshot();
            self.store_or_reset(ctx.user_id, Some(version), new_state)?;
            debug!(
                user_id = %ctx.user_id,
                code = %opposite_code,
                "Earlier scan no longer resolves; kept the fresh side pending"
            );
            return Ok(ScanOutcome::Waiting { pending });
        };

        let (item_ref, storage_ref) = match scanned {
            TagCategory::Item => (scanned_ref, opposite_ref),
            TagCategory::Storage => (opposite_ref, scanned_ref),
        };

        // Claim the session before writing, so two racing completions
        // commit at most once.
        if !self.store.claim(ctx.user_id, version) {
            self.store.clear(ctx.user_id);
            return Err(AppError::stale_session(
                "Pairing session changed underneath this scan; restart pairing",
            ));
        }

        if let Err(e) = self
            .gateway
            .bind_item_to_storage(ctx.user_id, item_ref.id, storage_ref.id, &storage_ref.name)
            .await
        {
            // The write failed after the claim; put the scans back so the
            // user can retry instead of starting over.
            self.store.restore(ctx.user_id, prior_state);
            return Err(e);
        }

        info!(
            user_id = %ctx.user_id,
            item_code = %item_ref.code,
            storage_code = %storage_ref.code,
            "Pairing completed"
        );
        Ok(ScanOutcome::Paired { item, storage })
    }

    /// Report the current session state.
    pub fn status(&self, ctx: &RequestContext) -> PairingSnapshot {
        self.store
            .snapshot(ctx.user_id)
            .map(|(state, _)| state.snapshot())
            .unwrap_or_default()
    }

    /// Clear the session. Idempotent; never fails.
    pub fn cancel(&self, ctx: &RequestContext) {
        self.store.clear(ctx.user_id);
        debug!(user_id = %ctx.user_id, "Pairing session cancelled");
    }

    async fn resolve(
        &self,
        user_id: UserId,
        category: TagCategory,
        code: &str,
    ) -> AppResult<Option<TagRef>> {
        match category {
            TagCategory::Item => self.gateway.resolve_item(user_id, code).await,
            TagCategory::Storage => self.gateway.resolve_storage(user_id, code).await,
        }
    }

    /// Store a waiting state; on a lost race, reset the session and
    /// surface `StaleSession` so the user restarts cleanly.
    fn store_or_reset(
        &self,
        user_id: UserId,
        expected: Option<u64>,
        state: PairingState,
    ) -> AppResult<()> {
        self.store.store(user_id, expected, state).map_err(|e| {
            self.store.clear(user_id);
            e
        })?;
        Ok(())
    }
}
