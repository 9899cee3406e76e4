//! Per-page list state
//!
//! A [`ListStore`] holds the last fetched collection of one entity, the page
//! state and the notices raised by failed mutations. Fetches are numbered: a
//! response carrying an older ticket than the newest one issued is dropped.

use crate::{
    error::AppError,
    filter::{self, FilterCriteria},
};

use super::{backend::Backend, resource::Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    #[default]
    Idle,
    /// First load, nothing to show yet
    Loading,
    Ready,
    /// Reload requested by the user while the list stays visible
    Refreshing,
    Mutating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Load on mount
    Initial,
    /// User-requested reload
    Refresh,
    /// Reload following a create or delete
    Reload,
}

/// Issued by [`ListStore::begin_fetch`], handed back to [`ListStore::finish_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    mode: FetchMode,
}

impl FetchTicket {
    pub fn mode(&self) -> FetchMode {
        self.mode
    }
}

/// User-visible message about a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    Failed,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

/// Interactive yes/no question asked before destructive operations
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct ListStore<R: Resource> {
    records: Vec<R>,
    state: PageState,
    criteria: FilterCriteria,
    issued: u64,
    notices: Vec<Notice>,
}

impl<R: Resource> Default for ListStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            state: PageState::Idle,
            criteria: FilterCriteria::default(),
            issued: 0,
            notices: Vec::new(),
        }
    }
}

impl<R: Resource> ListStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fetched collection, unfiltered
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.state == PageState::Refreshing
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the filter. Only the derived view changes.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Records matching the current filter, in fetched order
    pub fn filtered(&self) -> Vec<&R> {
        filter::apply(&self.records, &self.criteria)
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == *id)
    }

    pub fn begin_fetch(&mut self, mode: FetchMode) -> FetchTicket {
        self.issued += 1;
        match mode {
            FetchMode::Initial => self.state = PageState::Loading,
            FetchMode::Refresh => self.state = PageState::Refreshing,
            FetchMode::Reload => {}
        }
        FetchTicket {
            generation: self.issued,
            mode,
        }
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and the
    /// result was dropped. On error the previous collection stays in place.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<R>, AppError>) -> bool {
        if ticket.generation != self.issued {
            tracing::debug!(
                entity = R::LABEL,
                ticket = ticket.generation,
                newest = self.issued,
                "Dropping stale list response"
            );
            return false;
        }

        match result {
            Ok(records) => self.records = records,
            Err(e) => tracing::warn!(entity = R::LABEL, "Failed to load list: {}", e),
        }
        self.state = PageState::Ready;
        true
    }

    pub async fn load<B: Backend<R> + ?Sized>(&mut self, backend: &B) {
        self.fetch(backend, FetchMode::Initial).await;
    }

    pub async fn refresh<B: Backend<R> + ?Sized>(&mut self, backend: &B) {
        self.fetch(backend, FetchMode::Refresh).await;
    }

    async fn fetch<B: Backend<R> + ?Sized>(&mut self, backend: &B, mode: FetchMode) {
        let ticket = self.begin_fetch(mode);
        let result = backend.list().await;
        self.finish_fetch(ticket, result);
    }

    /// Submit a new record, then reload the whole list
    pub async fn create<B: Backend<R> + ?Sized>(&mut self, backend: &B, data: &R::Create) -> MutationOutcome {
        self.state = PageState::Mutating;
        match backend.create(data).await {
            Ok(_) => {
                self.fetch(backend, FetchMode::Reload).await;
                MutationOutcome::Applied
            }
            Err(e) => self.fail("create", e),
        }
    }

    /// Submit changed fields and patch the local record with the stored row
    pub async fn update<B: Backend<R> + ?Sized>(
        &mut self,
        backend: &B,
        id: &R::Id,
        patch: &R::Patch,
    ) -> MutationOutcome {
        self.state = PageState::Mutating;
        match backend.update(id, patch).await {
            Ok(updated) => {
                if let Some(slot) = self.records.iter_mut().find(|r| r.id() == *id) {
                    *slot = updated;
                }
                self.state = PageState::Ready;
                MutationOutcome::Applied
            }
            Err(e) => self.fail("update", e),
        }
    }

    /// Ask for confirmation, delete, then reload the whole list
    pub async fn delete<B, C>(&mut self, backend: &B, id: &R::Id, confirm: &C) -> MutationOutcome
    where
        B: Backend<R> + ?Sized,
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(&format!("Delete this {}?", R::LABEL)) {
            return MutationOutcome::Cancelled;
        }

        self.state = PageState::Mutating;
        match backend.delete(id).await {
            Ok(()) => {
                self.fetch(backend, FetchMode::Reload).await;
                MutationOutcome::Applied
            }
            Err(e) => self.fail("delete", e),
        }
    }

    fn fail(&mut self, operation: &str, error: AppError) -> MutationOutcome {
        tracing::error!(entity = R::LABEL, operation, "Mutation failed: {}", error);
        self.notices.push(Notice {
            operation: format!("{} {}", operation, R::LABEL),
            message: error.to_string(),
        });
        self.state = PageState::Ready;
        MutationOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio_test::{assert_pending, assert_ready};

    use super::*;
    use crate::{
        error::AppResult,
        models::{
            account::{AccountPatch, RegisterAccount, UpdateAccountRole, UpdateAccountStatus},
            complaint::{CreateComplaint, UpdateComplaint},
            Account, AccountRole, ApprovalStatus, Complaint, ComplaintStatus,
        },
    };
    use uuid::Uuid;

    #[derive(Default)]
    struct FakeComplaints {
        rows: Mutex<Vec<Complaint>>,
        fail_writes: bool,
        fail_reads: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    fn complaint(id: i32, title: &str, status: ComplaintStatus) -> Complaint {
        Complaint {
            id,
            title: title.to_string(),
            description: None,
            reporter: "Rina".to_string(),
            location: Some("Terminal 1".to_string()),
            status,
            documentation_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    impl FakeComplaints {
        fn seeded() -> Self {
            let fake = Self::default();
            *fake.rows.lock().unwrap() = vec![
                complaint(1, "X-ray conveyor stuck", ComplaintStatus::New),
                complaint(2, "PA system noise", ComplaintStatus::InProgress),
                complaint(3, "CCTV offline", ComplaintStatus::Done),
            ];
            fake
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend<Complaint> for FakeComplaints {
        async fn list(&self) -> AppResult<Vec<Complaint>> {
            self.calls.lock().unwrap().push("list");
            if self.fail_reads {
                return Err(AppError::Upstream("offline".to_string()));
            }
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, data: &CreateComplaint) -> AppResult<Complaint> {
            self.calls.lock().unwrap().push("create");
            if self.fail_writes {
                return Err(AppError::Upstream("write refused".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let id = rows.iter().map(|c| c.id).max().unwrap_or(0) + 1;
            let created = complaint(id, &data.title, ComplaintStatus::New);
            rows.insert(0, created.clone());
            Ok(created)
        }

        async fn update(&self, id: &i32, patch: &UpdateComplaint) -> AppResult<Complaint> {
            self.calls.lock().unwrap().push("update");
            if self.fail_writes {
                return Err(AppError::Upstream("write refused".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|c| c.id == *id)
                .ok_or_else(|| AppError::NotFound("missing".to_string()))?;
            if let Some(status) = patch.status {
                row.status = status;
            }
            Ok(row.clone())
        }

        async fn delete(&self, id: &i32) -> AppResult<()> {
            self.calls.lock().unwrap().push("delete");
            if self.fail_writes {
                return Err(AppError::Upstream("write refused".to_string()));
            }
            self.rows.lock().unwrap().retain(|c| c.id != *id);
            Ok(())
        }
    }

    fn new_complaint(title: &str) -> CreateComplaint {
        CreateComplaint {
            title: title.to_string(),
            description: None,
            reporter: "Dedi".to_string(),
            location: None,
            documentation_url: None,
        }
    }

    #[tokio::test]
    async fn test_load_replaces_collection() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        assert_eq!(store.state(), PageState::Idle);

        store.load(&backend).await;
        assert_eq!(store.state(), PageState::Ready);
        assert_eq!(store.records().len(), 3);

        backend.rows.lock().unwrap().truncate(1);
        store.refresh(&backend).await;
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_collection() {
        let mut backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        backend.fail_reads = true;
        store.refresh(&backend).await;
        assert_eq!(store.records().len(), 3);
        assert_eq!(store.state(), PageState::Ready);
        assert!(store.notices().is_empty());
    }

    #[test]
    fn test_refresh_sets_distinct_state() {
        let mut store = ListStore::<Complaint>::new();
        let first = store.begin_fetch(FetchMode::Initial);
        assert_eq!(store.state(), PageState::Loading);
        store.finish_fetch(first, Ok(vec![]));

        let ticket = store.begin_fetch(FetchMode::Refresh);
        assert!(store.is_refreshing());
        assert_eq!(ticket.mode(), FetchMode::Refresh);
        store.finish_fetch(ticket, Ok(vec![]));
        assert!(!store.is_refreshing());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut store = ListStore::<Complaint>::new();
        let older = store.begin_fetch(FetchMode::Initial);
        let newer = store.begin_fetch(FetchMode::Refresh);

        assert!(store.finish_fetch(newer, Ok(vec![complaint(2, "new", ComplaintStatus::New)])));
        assert!(!store.finish_fetch(older, Ok(vec![complaint(1, "old", ComplaintStatus::New)])));

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].id, 2);
    }

    #[tokio::test]
    async fn test_create_reloads_and_includes_new_record() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        let outcome = store.create(&backend, &new_complaint("Runway light fault")).await;
        assert_eq!(outcome, MutationOutcome::Applied);
        assert!(store.records().iter().any(|c| c.title == "Runway light fault"));
        assert_eq!(backend.calls(), vec!["list", "create", "list"]);
        assert_eq!(store.state(), PageState::Ready);
    }

    #[tokio::test]
    async fn test_delete_reloads_and_excludes_id() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        let outcome = store.delete(&backend, &2, &|_: &str| true).await;
        assert_eq!(outcome, MutationOutcome::Applied);
        assert!(store.find(&2).is_none());
        assert_eq!(store.records().len(), 2);
    }

    #[tokio::test]
    async fn test_declined_delete_issues_no_call() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        let asked = Mutex::new(String::new());
        let confirm = |prompt: &str| {
            *asked.lock().unwrap() = prompt.to_string();
            false
        };
        let outcome = store.delete(&backend, &1, &confirm).await;

        assert_eq!(outcome, MutationOutcome::Cancelled);
        assert_eq!(backend.calls(), vec!["list"]);
        assert_eq!(*asked.lock().unwrap(), "Delete this complaint?");
        assert_eq!(store.records().len(), 3);
    }

    #[tokio::test]
    async fn test_update_patches_locally_without_reload() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        let outcome = store
            .update(&backend, &1, &UpdateComplaint::status(ComplaintStatus::InProgress))
            .await;
        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(store.find(&1).unwrap().status, ComplaintStatus::InProgress);
        assert_eq!(backend.calls(), vec!["list", "update"]);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_and_raises_notice() {
        let mut backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        backend.fail_writes = true;
        let outcome = store
            .update(&backend, &1, &UpdateComplaint::status(ComplaintStatus::Done))
            .await;

        assert_eq!(outcome, MutationOutcome::Failed);
        assert_eq!(store.find(&1).unwrap().status, ComplaintStatus::New);
        assert_eq!(store.state(), PageState::Ready);

        let notices = store.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].operation, "update complaint");
        assert!(store.notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let mut backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        backend.fail_writes = true;
        let outcome = store.delete(&backend, &3, &|_: &str| true).await;
        assert_eq!(outcome, MutationOutcome::Failed);
        assert!(store.find(&3).is_some());
        assert_eq!(store.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_derives_without_touching_records() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();
        store.load(&backend).await;

        store.set_criteria(FilterCriteria::default().selector("Diproses"));
        let filtered = store.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "PA system noise");
        assert_eq!(store.records().len(), 3);

        store.set_criteria(FilterCriteria::default().query("cctv"));
        assert_eq!(store.filtered().len(), 1);
    }

    #[test]
    fn test_load_completes_in_one_poll_against_local_backend() {
        let backend = FakeComplaints::seeded();
        let mut store = ListStore::<Complaint>::new();

        {
            let mut load = tokio_test::task::spawn(store.load(&backend));
            assert_ready!(load.poll());
        }
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn test_blocked_backend_keeps_page_loading() {
        struct Stalled;

        #[async_trait]
        impl Backend<Complaint> for Stalled {
            async fn list(&self) -> AppResult<Vec<Complaint>> {
                std::future::pending().await
            }
            async fn create(&self, _: &CreateComplaint) -> AppResult<Complaint> {
                std::future::pending().await
            }
            async fn update(&self, _: &i32, _: &UpdateComplaint) -> AppResult<Complaint> {
                std::future::pending().await
            }
            async fn delete(&self, _: &i32) -> AppResult<()> {
                std::future::pending().await
            }
        }

        let mut store = ListStore::<Complaint>::new();
        let mut load = tokio_test::task::spawn(store.load(&Stalled));
        assert_pending!(load.poll());
    }

    struct FakeAccounts {
        rows: Mutex<Vec<Account>>,
        fail_writes: bool,
        paths: Mutex<Vec<String>>,
    }

    fn account(email: &str, role: AccountRole, status: ApprovalStatus) -> Account {
        Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            employee_id: None,
            name: email.split('@').next().unwrap_or_default().to_string(),
            work_unit: Some("Elban".to_string()),
            role,
            status,
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    impl FakeAccounts {
        fn with(rows: Vec<Account>) -> Self {
            Self {
                rows: Mutex::new(rows),
                fail_writes: false,
                paths: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend<Account> for FakeAccounts {
        async fn list(&self) -> AppResult<Vec<Account>> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn create(&self, _: &RegisterAccount) -> AppResult<Account> {
            Err(AppError::Validation("registration goes through /auth/register".to_string()))
        }

        async fn update(&self, id: &Uuid, patch: &AccountPatch) -> AppResult<Account> {
            self.paths.lock().unwrap().push(Account::patch_path(id, patch));
            if self.fail_writes {
                return Err(AppError::Upstream("write refused".to_string()));
            }
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|a| a.id == *id)
                .ok_or_else(|| AppError::NotFound("missing".to_string()))?;
            match patch {
                AccountPatch::Status(change) => row.status = change.status,
                AccountPatch::Role(change) => row.role = change.role,
            }
            Ok(row.clone())
        }

        async fn delete(&self, id: &Uuid) -> AppResult<()> {
            self.rows.lock().unwrap().retain(|a| a.id != *id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_account_approval_and_role_change_patch_in_place() {
        let pending = account("wati@elban.test", AccountRole::User, ApprovalStatus::Pending);
        let other = account("joko@elban.test", AccountRole::User, ApprovalStatus::Approved);
        let id = pending.id;
        let backend = FakeAccounts::with(vec![pending, other.clone()]);
        let mut store = ListStore::<Account>::new();
        store.load(&backend).await;

        let approve = AccountPatch::Status(UpdateAccountStatus { status: ApprovalStatus::Approved });
        assert_eq!(store.update(&backend, &id, &approve).await, MutationOutcome::Applied);
        let promote = AccountPatch::Role(UpdateAccountRole { role: AccountRole::Technician });
        assert_eq!(store.update(&backend, &id, &promote).await, MutationOutcome::Applied);

        let updated = store.find(&id).unwrap();
        assert_eq!(updated.status, ApprovalStatus::Approved);
        assert_eq!(updated.role, AccountRole::Technician);
        assert_eq!(store.find(&other.id).unwrap().role, AccountRole::User);
        assert_eq!(store.records()[0].id, id);
        assert_eq!(
            *backend.paths.lock().unwrap(),
            vec![
                format!("/persetujuan-akun/{}/status", id),
                format!("/persetujuan-akun/{}/role", id),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_account_update_leaves_record_unchanged() {
        let pending = account("wati@elban.test", AccountRole::User, ApprovalStatus::Pending);
        let id = pending.id;
        let mut backend = FakeAccounts::with(vec![pending]);
        let mut store = ListStore::<Account>::new();
        store.load(&backend).await;

        backend.fail_writes = true;
        let reject = AccountPatch::Status(UpdateAccountStatus { status: ApprovalStatus::Rejected });
        assert_eq!(store.update(&backend, &id, &reject).await, MutationOutcome::Failed);

        assert_eq!(store.find(&id).unwrap().status, ApprovalStatus::Pending);
        let notices = store.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].operation, "update account");
    }
}
