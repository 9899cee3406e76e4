//! Binds each entity to its API route and request bodies

use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::{
    filter::Searchable,
    models::{
        account::{AccountPatch, RegisterAccount},
        complaint::{CreateComplaint, UpdateComplaint},
        equipment::{CreateEquipment, UpdateEquipment},
        equipment_log::{CreateEquipmentLog, UpdateEquipmentLog},
        file_record::{CreateFileRecord, UpdateFileRecord},
        schedule::{CreateSchedule, UpdateSchedule},
        task::{CreateTask, UpdateTask},
        Account, Complaint, Equipment, EquipmentLog, FileRecord, Schedule, Task,
    },
    routes,
};

/// A record type listed and edited on one admin page
pub trait Resource: Searchable + Clone + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + Display + Send + Sync;
    type Create: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    /// Route of the page and of the list endpoint
    const PATH: &'static str;
    /// Human name used in prompts and notices
    const LABEL: &'static str;

    fn id(&self) -> Self::Id;

    fn create_path() -> String {
        Self::PATH.to_string()
    }

    fn patch_path(id: &Self::Id, _patch: &Self::Patch) -> String {
        format!("{}/{}", Self::PATH, id)
    }

    fn delete_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::PATH, id)
    }
}

macro_rules! resource {
    ($ty:ty, $create:ty, $patch:ty, $path:expr, $label:literal) => {
        impl Resource for $ty {
            type Id = i32;
            type Create = $create;
            type Patch = $patch;

            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;

            fn id(&self) -> i32 {
                self.id
            }
        }
    };
}

resource!(Equipment, CreateEquipment, UpdateEquipment, routes::EQUIPMENT, "equipment");
resource!(EquipmentLog, CreateEquipmentLog, UpdateEquipmentLog, routes::EQUIPMENT_LOGS, "log entry");
resource!(Task, CreateTask, UpdateTask, routes::TASKS, "task");
resource!(Schedule, CreateSchedule, UpdateSchedule, routes::SCHEDULES, "schedule");
resource!(FileRecord, CreateFileRecord, UpdateFileRecord, routes::FILES, "file");
resource!(Complaint, CreateComplaint, UpdateComplaint, routes::COMPLAINTS, "complaint");

/// Accounts are created through self-registration and changed one field at a time
impl Resource for Account {
    type Id = Uuid;
    type Create = RegisterAccount;
    type Patch = AccountPatch;

    const PATH: &'static str = routes::ACCOUNTS;
    const LABEL: &'static str = "account";

    fn id(&self) -> Uuid {
        self.id
    }

    fn create_path() -> String {
        routes::REGISTER.to_string()
    }

    fn patch_path(id: &Uuid, patch: &AccountPatch) -> String {
        match patch {
            AccountPatch::Status(_) => format!("{}/{}/status", Self::PATH, id),
            AccountPatch::Role(_) => format!("{}/{}/role", Self::PATH, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        account::{UpdateAccountRole, UpdateAccountStatus},
        AccountRole, ApprovalStatus,
    };

    #[test]
    fn test_entity_paths() {
        assert_eq!(Equipment::delete_path(&3), "/peralatan/3");
        assert_eq!(
            EquipmentLog::patch_path(&9, &UpdateEquipmentLog::default()),
            "/log-peralatan/9"
        );
        assert_eq!(Complaint::create_path(), "/pengaduan");
    }

    #[test]
    fn test_account_patch_paths_follow_field() {
        let id = Uuid::nil();
        let status = AccountPatch::Status(UpdateAccountStatus { status: ApprovalStatus::Rejected });
        let role = AccountPatch::Role(UpdateAccountRole { role: AccountRole::Technician });

        assert_eq!(
            Account::patch_path(&id, &status),
            format!("/persetujuan-akun/{}/status", id)
        );
        assert_eq!(
            Account::patch_path(&id, &role),
            format!("/persetujuan-akun/{}/role", id)
        );
        assert_eq!(Account::create_path(), "/auth/register");
    }
}
