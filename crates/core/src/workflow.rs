//! Approval workflow: the control flow from a user action to a committed
//! approval.
//!
//! ```text
//! action -> role authority -> readiness -> state machine -> gateway -> store
//! ```
//!
//! The store is never updated optimistically. It only ever receives rows the
//! gateway has acknowledged, so a failed commit leaves it matching what was
//! last persisted. While a flag has a request in flight, further toggles of
//! the same flag are rejected with [`ApprovalError::Pending`].

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::approval::{self, ApprovalControl, ApprovalError, ApprovalField, Scope};
use crate::calendar::{CalendarRow, NewRow, RowId};
use crate::gateway::{IdentityProvider, PersistenceGateway};
use crate::roles::can_act;
use crate::store::RowStore;
use crate::summary::{summarize, ApprovalSummary};
use crate::types::CalendarId;

type PendingKey = (RowId, Scope, ApprovalField);

/// Orchestrates approval actions for one calendar session.
pub struct ApprovalWorkflow<G, I> {
    gateway: G,
    identity: I,
    store: Mutex<RowStore>,
    pending: Mutex<HashSet<PendingKey>>,
}

impl<G, I> ApprovalWorkflow<G, I>
where
    G: PersistenceGateway,
    I: IdentityProvider,
{
    pub fn new(gateway: G, identity: I) -> Self {
        Self {
            gateway,
            identity,
            store: Mutex::new(RowStore::new()),
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Replace the local rows with the calendar's rows from the gateway.
    ///
    /// Returns the number of rows loaded. On failure the store is unchanged.
    pub async fn load(&self, calendar_id: CalendarId) -> Result<usize, ApprovalError> {
        let rows = self.gateway.list_rows(calendar_id).await.map_err(|e| {
            tracing::warn!(calendar_id, error = %e, "Failed to load calendar rows");
            ApprovalError::PersistenceFailed(e.to_string())
        })?;

        let count = rows.len();
        self.lock_store().replace_all(rows);
        tracing::debug!(calendar_id, count, "Calendar rows loaded");
        Ok(count)
    }

    /// Snapshot of the rows currently held.
    pub fn rows(&self) -> Vec<CalendarRow> {
        self.lock_store().list().to_vec()
    }

    pub fn row(&self, row_id: RowId) -> Option<CalendarRow> {
        self.lock_store().get(&row_id).cloned()
    }

    /// Approval button states of a row for the current user.
    pub fn controls(&self, row_id: RowId) -> Result<Vec<ApprovalControl>, ApprovalError> {
        let row = self.row(row_id).ok_or(ApprovalError::RowNotFound(row_id))?;
        let mut controls = approval::controls(&row, self.identity.current_role());
        for control in &mut controls {
            if self.is_pending(row_id, control.scope, control.field) {
                control.actionable = false;
            }
        }
        Ok(controls)
    }

    pub fn summary(&self) -> ApprovalSummary {
        summarize(self.lock_store().list())
    }

    /// Whether a toggle of this flag is currently awaiting the gateway.
    pub fn is_pending(&self, row_id: RowId, scope: Scope, field: ApprovalField) -> bool {
        self.lock_pending().contains(&(row_id, scope, field))
    }

    /// Toggle one approval flag on behalf of the current user.
    ///
    /// Rejections from the role check or readiness check happen before any
    /// gateway call. On success the toggled flag from the gateway's copy is
    /// written to the stored row, unless the row left the store while the
    /// request was in flight.
    pub async fn toggle(
        &self,
        row_id: RowId,
        scope: Scope,
        field: ApprovalField,
    ) -> Result<CalendarRow, ApprovalError> {
        let role = self.identity.current_role();
        if !can_act(role, scope) {
            tracing::warn!(%row_id, %scope, %field, %role, "Approval denied for role");
            return Err(ApprovalError::Unauthorized { role, scope });
        }

        let row = self.row(row_id).ok_or(ApprovalError::RowNotFound(row_id))?;
        let next = approval::toggle(&row, scope, field, role).inspect_err(|e| {
            tracing::debug!(%row_id, %scope, %field, error = %e, "Approval rejected");
        })?;
        let persisted_id = row.id.persisted().ok_or(ApprovalError::Unsaved(row_id))?;

        let _pending = PendingGuard::acquire(&self.pending, (row_id, scope, field))?;
        let new_value = next.is_approved(scope, field);

        let saved = self
            .gateway
            .update_approval(row.calendar_id, persisted_id, scope, field, new_value)
            .await
            .map_err(|e| {
                tracing::warn!(
                    %row_id, %scope, %field, new_value, error = %e,
                    "Approval commit failed"
                );
                ApprovalError::PersistenceFailed(e.to_string())
            })?;

        // Only the toggled flag is taken from the response. Another toggle on
        // the same row may have resolved first with a newer snapshot.
        let mut store = self.lock_store();
        match store.get(&row_id) {
            Some(current) => {
                let merged = current.with_approval(scope, field, saved.is_approved(scope, field));
                store.upsert(merged);
            }
            None => {
                tracing::debug!(%row_id, "Row left the store while approval was in flight");
            }
        }
        drop(store);

        tracing::info!(%row_id, %scope, %field, new_value, %role, "Approval updated");
        Ok(saved)
    }

    /// Create a row on the calendar.
    ///
    /// A temporary draft is shown immediately and swapped for the persisted
    /// row once the gateway answers. On failure the draft is removed. A
    /// result for a draft that is no longer in the store is not inserted.
    pub async fn create_row(
        &self,
        calendar_id: CalendarId,
        new_row: NewRow,
    ) -> Result<CalendarRow, ApprovalError> {
        let draft = CalendarRow::draft(calendar_id, new_row.clone());
        let draft_id = draft.id;
        self.lock_store().upsert(draft);

        match self.gateway.create_row(calendar_id, &new_row).await {
            Ok(saved) => {
                if !self.lock_store().replace(&draft_id, saved.clone()) {
                    tracing::debug!(
                        calendar_id,
                        row_id = %saved.id,
                        "Draft left the store while create was in flight"
                    );
                }
                tracing::info!(calendar_id, row_id = %saved.id, "Calendar row created");
                Ok(saved)
            }
            Err(e) => {
                self.lock_store().remove(&draft_id);
                tracing::warn!(calendar_id, error = %e, "Failed to create calendar row");
                Err(ApprovalError::PersistenceFailed(e.to_string()))
            }
        }
    }

    /// Delete a row. Unsaved drafts are dropped locally; persisted rows are
    /// removed from the store only after the gateway confirms.
    pub async fn delete_row(&self, row_id: RowId) -> Result<(), ApprovalError> {
        let row = self.row(row_id).ok_or(ApprovalError::RowNotFound(row_id))?;

        let Some(persisted_id) = row.id.persisted() else {
            self.lock_store().remove(&row_id);
            return Ok(());
        };

        self.gateway
            .delete_row(row.calendar_id, persisted_id)
            .await
            .map_err(|e| {
                tracing::warn!(%row_id, error = %e, "Failed to delete calendar row");
                ApprovalError::PersistenceFailed(e.to_string())
            })?;

        self.lock_store().remove(&row_id);
        tracing::info!(%row_id, "Calendar row deleted");
        Ok(())
    }

    // ---- private helpers ----

    fn lock_store(&self) -> MutexGuard<'_, RowStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, HashSet<PendingKey>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a flag as in flight for as long as it lives.
///
/// Dropping the guard clears the mark, including when the toggle future is
/// dropped mid-request.
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<PendingKey>>,
    key: PendingKey,
}

impl<'a> PendingGuard<'a> {
    fn acquire(
        pending: &'a Mutex<HashSet<PendingKey>>,
        key: PendingKey,
    ) -> Result<Self, ApprovalError> {
        let inserted = pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);
        if !inserted {
            let (row_id, scope, field) = key;
            return Err(ApprovalError::Pending {
                row_id,
                scope,
                field,
            });
        }
        Ok(Self { pending, key })
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::calendar::ContentFields;
    use crate::gateway::{GatewayError, StaticIdentity};
    use crate::roles::Role;
    use crate::types::DbId;

    /// In-memory gateway with failure injection and an optional gate that
    /// holds `update_approval` and `create_row` calls until released.
    #[derive(Default)]
    struct FakeGateway {
        rows: Mutex<HashMap<DbId, CalendarRow>>,
        next_id: AtomicUsize,
        fail: AtomicBool,
        update_calls: AtomicUsize,
        gate: Option<Arc<tokio::sync::Mutex<()>>>,
    }

    impl FakeGateway {
        fn with_rows(rows: Vec<CalendarRow>) -> Self {
            let map = rows
                .into_iter()
                .map(|row| (row.id.persisted().unwrap(), row))
                .collect();
            Self {
                rows: Mutex::new(map),
                next_id: AtomicUsize::new(100),
                ..Default::default()
            }
        }

        fn check_failure(&self) -> Result<(), GatewayError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(GatewayError::Rejected {
                    status: 500,
                    code: "INTERNAL_ERROR".into(),
                    message: "boom".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PersistenceGateway for Arc<FakeGateway> {
        async fn update_approval(
            &self,
            _calendar_id: CalendarId,
            row_id: DbId,
            scope: Scope,
            field: ApprovalField,
            new_value: bool,
        ) -> Result<CalendarRow, GatewayError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                let _open = gate.lock().await;
            }
            self.check_failure()?;
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(&row_id).ok_or(GatewayError::Rejected {
                status: 404,
                code: "NOT_FOUND".into(),
                message: "missing".into(),
            })?;
            *row = row.with_approval(scope, field, new_value);
            Ok(row.clone())
        }

        async fn list_rows(&self, calendar_id: CalendarId) -> Result<Vec<CalendarRow>, GatewayError> {
            self.check_failure()?;
            let rows = self.rows.lock().unwrap();
            let mut rows: Vec<_> = rows
                .values()
                .filter(|r| r.calendar_id == calendar_id)
                .cloned()
                .collect();
            rows.sort_by_key(|r| r.id.persisted());
            Ok(rows)
        }

        async fn create_row(
            &self,
            calendar_id: CalendarId,
            new_row: &NewRow,
        ) -> Result<CalendarRow, GatewayError> {
            if let Some(gate) = &self.gate {
                let _open = gate.lock().await;
            }
            self.check_failure()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as DbId;
            let mut row = CalendarRow::draft(calendar_id, new_row.clone());
            row.id = RowId::Persisted(id);
            self.rows.lock().unwrap().insert(id, row.clone());
            Ok(row)
        }

        async fn delete_row(&self, _calendar_id: CalendarId, row_id: DbId) -> Result<(), GatewayError> {
            self.check_failure()?;
            self.rows.lock().unwrap().remove(&row_id);
            Ok(())
        }
    }

    fn sale_row(id: DbId, calendar_id: CalendarId) -> CalendarRow {
        let mut row = CalendarRow::draft(
            calendar_id,
            NewRow {
                scheduled_for: None,
                content_fields: ContentFields {
                    tagline: "Sale".into(),
                    caption: "Buy now".into(),
                    hashtags: "#sale".into(),
                    engagement_hooks: "Don't miss out".into(),
                    creative_caption_text: "text".into(),
                },
                creatives: vec!["creatives/sale.png".into()],
            },
        );
        row.id = RowId::Persisted(id);
        row
    }

    async fn loaded(
        gateway: Arc<FakeGateway>,
        role: Role,
    ) -> ApprovalWorkflow<Arc<FakeGateway>, StaticIdentity> {
        let workflow = ApprovalWorkflow::new(gateway, StaticIdentity(role));
        workflow.load(1).await.unwrap();
        workflow
    }

    const ROW: RowId = RowId::Persisted(1);

    #[tokio::test]
    async fn test_load_fills_store_for_calendar() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![
            sale_row(1, 1),
            sale_row(2, 1),
            sale_row(3, 2),
        ]));
        let workflow = ApprovalWorkflow::new(gateway, StaticIdentity(Role::User));

        assert_eq!(workflow.load(1).await.unwrap(), 2);
        assert_eq!(workflow.rows().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_commits_and_updates_store() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::MarketingManager).await;

        let saved = workflow
            .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
            .await
            .unwrap();

        assert!(saved.internal_status.content_approval);
        assert!(workflow.row(ROW).unwrap().internal_status.content_approval);
        assert_eq!(gateway.update_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_toggle_makes_no_gateway_call() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::ContentWriter).await;
        let before = workflow.rows();

        for scope in Scope::ALL {
            let result = workflow
                .toggle(ROW, scope, ApprovalField::ContentApproval)
                .await;
            assert_matches!(result, Err(ApprovalError::Unauthorized { .. }));
        }

        assert_eq!(workflow.rows(), before);
        assert_eq!(gateway.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_not_ready_toggle_makes_no_gateway_call() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::AccountManager).await;

        let result = workflow
            .toggle(ROW, Scope::Client, ApprovalField::CreativesApproval)
            .await;

        assert_matches!(result, Err(ApprovalError::NotReady { .. }));
        assert_eq!(gateway.update_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_store_unchanged() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::MarketingManager).await;
        gateway.fail.store(true, Ordering::SeqCst);

        let result = workflow
            .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
            .await;

        assert_matches!(result, Err(ApprovalError::PersistenceFailed(ref msg)) if msg.contains("boom"));
        assert!(!workflow.row(ROW).unwrap().internal_status.content_approval);
        assert!(!workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval));
    }

    #[tokio::test]
    async fn test_unknown_row_is_reported() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(gateway, Role::MarketingManager).await;

        let result = workflow
            .toggle(RowId::Persisted(99), Scope::Internal, ApprovalField::ContentApproval)
            .await;
        assert_matches!(result, Err(ApprovalError::RowNotFound(RowId::Persisted(99))));
    }

    #[tokio::test]
    async fn test_duplicate_toggle_rejected_while_in_flight() {
        let gate = Arc::new(tokio::sync::Mutex::new(()));
        let held = Arc::clone(&gate).lock_owned().await;
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate),
            ..FakeGateway::with_rows(vec![sale_row(1, 1)])
        });
        let workflow = Arc::new(loaded(Arc::clone(&gateway), Role::MarketingManager).await);

        let first = tokio::spawn({
            let workflow = Arc::clone(&workflow);
            async move {
                workflow
                    .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
                    .await
            }
        });
        while !workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval) {
            tokio::task::yield_now().await;
        }

        let second = workflow
            .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
            .await;
        assert_matches!(second, Err(ApprovalError::Pending { .. }));

        let controls = workflow.controls(ROW).unwrap();
        let control = controls
            .iter()
            .find(|c| c.scope == Scope::Internal && c.field == ApprovalField::ContentApproval)
            .unwrap();
        assert!(!control.actionable);
        assert!(!workflow.is_pending(ROW, Scope::Internal, ApprovalField::CreativesApproval));

        drop(held);
        let saved = first.await.unwrap().unwrap();
        assert!(saved.internal_status.content_approval);
        assert!(!workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval));
    }

    #[tokio::test]
    async fn test_cancelled_toggle_clears_pending_mark() {
        let gate = Arc::new(tokio::sync::Mutex::new(()));
        let held = Arc::clone(&gate).lock_owned().await;
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate),
            ..FakeGateway::with_rows(vec![sale_row(1, 1)])
        });
        let workflow = Arc::new(loaded(gateway, Role::MarketingManager).await);

        let task = tokio::spawn({
            let workflow = Arc::clone(&workflow);
            async move {
                workflow
                    .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
                    .await
            }
        });
        while !workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval) {
            tokio::task::yield_now().await;
        }

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert!(!workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval));
        assert!(!workflow.row(ROW).unwrap().internal_status.content_approval);
        drop(held);
    }

    #[tokio::test]
    async fn test_response_for_row_no_longer_shown_is_not_reinserted() {
        let gate = Arc::new(tokio::sync::Mutex::new(()));
        let held = Arc::clone(&gate).lock_owned().await;
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate),
            ..FakeGateway::with_rows(vec![sale_row(1, 1), sale_row(2, 2)])
        });
        let workflow = Arc::new(loaded(gateway, Role::MarketingManager).await);

        let task = tokio::spawn({
            let workflow = Arc::clone(&workflow);
            async move {
                workflow
                    .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
                    .await
            }
        });
        while !workflow.is_pending(ROW, Scope::Internal, ApprovalField::ContentApproval) {
            tokio::task::yield_now().await;
        }

        // Navigate to another calendar while the request is in flight.
        workflow.load(2).await.unwrap();
        drop(held);

        let saved = task.await.unwrap().unwrap();
        assert!(saved.internal_status.content_approval);
        assert!(workflow.row(ROW).is_none());
        assert_eq!(workflow.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_create_resolving_after_navigation_is_not_inserted() {
        let gate = Arc::new(tokio::sync::Mutex::new(()));
        let held = Arc::clone(&gate).lock_owned().await;
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate),
            ..FakeGateway::with_rows(vec![sale_row(1, 1), sale_row(2, 2)])
        });
        let workflow = Arc::new(loaded(gateway, Role::MarketingManager).await);

        let create = tokio::spawn({
            let workflow = Arc::clone(&workflow);
            async move { workflow.create_row(1, sale_row(0, 1).into_new_row()).await }
        });
        while workflow.rows().len() < 2 {
            tokio::task::yield_now().await;
        }

        workflow.load(2).await.unwrap();
        drop(held);

        let saved = create.await.unwrap().unwrap();
        assert_eq!(saved.calendar_id, 1);
        let rows = workflow.rows();
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.calendar_id == 2));
        assert!(workflow.row(saved.id).is_none());
    }

    #[tokio::test]
    async fn test_toggle_response_only_updates_toggled_flag() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::MarketingManager).await;

        workflow
            .toggle(ROW, Scope::Internal, ApprovalField::ContentApproval)
            .await
            .unwrap();

        // The server answers the next toggle with a snapshot that predates
        // the content approval.
        gateway.rows.lock().unwrap().insert(1, sale_row(1, 1));

        let saved = workflow
            .toggle(ROW, Scope::Internal, ApprovalField::CreativesApproval)
            .await
            .unwrap();
        assert!(!saved.internal_status.content_approval);

        let stored = workflow.row(ROW).unwrap();
        assert!(stored.internal_status.content_approval);
        assert!(stored.internal_status.creatives_approval);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_draft() {
        let gateway = Arc::new(FakeGateway::with_rows(Vec::new()));
        let workflow = loaded(Arc::clone(&gateway), Role::MarketingManager).await;
        gateway.fail.store(true, Ordering::SeqCst);

        let result = workflow.create_row(1, sale_row(0, 1).into_new_row()).await;
        assert_matches!(result, Err(ApprovalError::PersistenceFailed(_)));
        assert!(workflow.rows().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_on_unsaved_draft_is_rejected() {
        let gate = Arc::new(tokio::sync::Mutex::new(()));
        let held = Arc::clone(&gate).lock_owned().await;
        let gateway = Arc::new(FakeGateway {
            gate: Some(gate),
            ..FakeGateway::with_rows(Vec::new())
        });
        let workflow = Arc::new(loaded(Arc::clone(&gateway), Role::MarketingManager).await);

        let create = tokio::spawn({
            let workflow = Arc::clone(&workflow);
            async move { workflow.create_row(1, sale_row(0, 1).into_new_row()).await }
        });
        while workflow.rows().is_empty() {
            tokio::task::yield_now().await;
        }

        let draft_id = workflow.rows()[0].id;
        assert_matches!(draft_id, RowId::Temporary(_));
        let result = workflow
            .toggle(draft_id, Scope::Internal, ApprovalField::ContentApproval)
            .await;
        assert_matches!(result, Err(ApprovalError::Unsaved(id)) if id == draft_id);
        assert_eq!(gateway.update_calls.load(Ordering::SeqCst), 0);

        drop(held);
        let saved = create.await.unwrap().unwrap();
        assert_eq!(workflow.rows(), vec![saved]);
    }

    #[tokio::test]
    async fn test_create_row_swaps_draft_for_persisted_row() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1)]));
        let workflow = loaded(gateway, Role::MarketingManager).await;

        let saved = workflow
            .create_row(1, sale_row(0, 1).into_new_row())
            .await
            .unwrap();

        assert_eq!(saved.id, RowId::Persisted(100));
        let rows = workflow.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.id.persisted().is_some()));

        let toggled = workflow
            .toggle(saved.id, Scope::Internal, ApprovalField::CreativesApproval)
            .await
            .unwrap();
        assert!(toggled.internal_status.creatives_approval);
    }

    #[tokio::test]
    async fn test_delete_row_removes_after_confirmation() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1), sale_row(2, 1)]));
        let workflow = loaded(Arc::clone(&gateway), Role::User).await;

        gateway.fail.store(true, Ordering::SeqCst);
        assert_matches!(
            workflow.delete_row(ROW).await,
            Err(ApprovalError::PersistenceFailed(_))
        );
        assert!(workflow.row(ROW).is_some());

        gateway.fail.store(false, Ordering::SeqCst);
        workflow.delete_row(ROW).await.unwrap();
        assert!(workflow.row(ROW).is_none());
        assert!(!gateway.rows.lock().unwrap().contains_key(&1));
    }

    #[tokio::test]
    async fn test_full_approval_sequence_reaches_summary() {
        let gateway = Arc::new(FakeGateway::with_rows(vec![sale_row(1, 1), sale_row(2, 1)]));
        let manager = loaded(Arc::clone(&gateway), Role::MarketingManager).await;
        for field in ApprovalField::ALL {
            manager.toggle(ROW, Scope::Internal, field).await.unwrap();
        }

        let account = loaded(Arc::clone(&gateway), Role::AccountManager).await;
        for field in ApprovalField::ALL {
            account.toggle(ROW, Scope::Client, field).await.unwrap();
        }

        let summary = account.summary();
        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.fully_approved, 1);
        assert_eq!(summary.awaiting_internal, 1);
        assert_eq!(summary.awaiting_client, 0);
    }

    impl CalendarRow {
        fn into_new_row(self) -> NewRow {
            NewRow {
                scheduled_for: self.scheduled_for,
                content_fields: self.content_fields,
                creatives: self.creatives,
            }
        }
    }
}
