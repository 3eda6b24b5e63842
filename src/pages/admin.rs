//! Admin console: one list-and-delete page per collection.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use serde::de::DeserializeOwned;

use super::{PageError, failed};
use crate::net::api::{AdminResource, Api};
use crate::net::types::{AdminDiagnosis, AdminUser, Review};
use crate::shell::Notice;

/// A row type listed by an admin page.
pub trait AdminRecord: DeserializeOwned + Send {
    const RESOURCE: AdminResource;
    const LOAD_FAILED: &'static str;
    const DELETE_FAILED: &'static str;

    fn id(&self) -> i64;

    /// Success toast after deleting `id`. `record` is the row as last
    /// loaded, when it is on the current list.
    fn deleted_notice(id: i64, record: Option<&Self>) -> String;
}

impl AdminRecord for AdminUser {
    const RESOURCE: AdminResource = AdminResource::Users;
    const LOAD_FAILED: &'static str = "사용자 목록을 불러오는 데 실패했습니다.";
    const DELETE_FAILED: &'static str = "사용자 삭제에 실패했습니다.";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_notice(id: i64, record: Option<&Self>) -> String {
        match record {
            Some(user) => format!("사용자 '{}'이(가) 삭제되었습니다.", user.username),
            None => format!("사용자 #{id}이(가) 삭제되었습니다."),
        }
    }
}

impl AdminRecord for Review {
    const RESOURCE: AdminResource = AdminResource::Reviews;
    const LOAD_FAILED: &'static str = "리뷰 목록을 불러오는 데 실패했습니다.";
    const DELETE_FAILED: &'static str = "리뷰 삭제에 실패했습니다.";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_notice(id: i64, _record: Option<&Self>) -> String {
        format!("리뷰 ID #{id}이(가) 삭제되었습니다.")
    }
}

impl AdminRecord for AdminDiagnosis {
    const RESOURCE: AdminResource = AdminResource::Diagnoses;
    const LOAD_FAILED: &'static str = "진단 기록 목록을 불러오는 데 실패했습니다.";
    const DELETE_FAILED: &'static str = "진단 기록 삭제에 실패했습니다.";

    fn id(&self) -> i64 {
        self.id
    }

    fn deleted_notice(id: i64, _record: Option<&Self>) -> String {
        format!("진단 기록 ID #{id}이(가) 삭제되었습니다.")
    }
}

pub type AdminUsersPage = AdminPage<AdminUser>;
pub type AdminReviewsPage = AdminPage<Review>;
pub type AdminDiagnosesPage = AdminPage<AdminDiagnosis>;

pub struct AdminPage<T> {
    api: Api,
    records: Vec<T>,
}

impl<T: AdminRecord> AdminPage<T> {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api, records: Vec::new() }
    }

    #[must_use]
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// # Errors
    ///
    /// `T::LOAD_FAILED`; the previous list is kept.
    pub async fn load(&mut self) -> Result<&[T], PageError> {
        self.records = self
            .api
            .admin_list(T::RESOURCE)
            .await
            .map_err(|e| failed("admin_load", T::LOAD_FAILED, e))?;
        Ok(&self.records)
    }

    /// Delete `id`, toast the outcome, then refetch the list.
    ///
    /// # Errors
    ///
    /// `T::DELETE_FAILED` when the delete is rejected, `T::LOAD_FAILED` when
    /// the refetch fails.
    pub async fn delete(&mut self, id: i64) -> Result<(), PageError> {
        let notifier = self.api.guard().notifier();
        if let Err(e) = self.api.admin_delete(T::RESOURCE, id).await {
            notifier.notify(Notice::error(T::DELETE_FAILED));
            return Err(failed("admin_delete", T::DELETE_FAILED, e));
        }
        let record = self.records.iter().find(|record| record.id() == id);
        notifier.notify(Notice::success(T::deleted_notice(id, record)));
        self.load().await?;
        Ok(())
    }
}
