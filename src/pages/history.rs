//! My page: the signed-in user's paginated diagnosis history.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::types::HistoryEntry;
use crate::shell::Notice;

pub const HISTORY_LOAD_FAILED: &str = "진단 기록을 불러오는 데 실패했습니다.";
pub const HISTORY_DELETED: &str = "진단 기록이 삭제되었습니다.";
pub const HISTORY_DELETE_FAILED: &str = "삭제 중 오류가 발생했습니다.";

pub struct HistoryPage {
    api: Api,
    page_size: u64,
    current_page: u64,
    total_pages: u64,
    entries: Vec<HistoryEntry>,
}

impl HistoryPage {
    /// `page_size` is sent with every fetch and used for the page count.
    #[must_use]
    pub fn new(api: Api, page_size: u64) -> Self {
        Self { api, page_size, current_page: 1, total_pages: 0, entries: Vec::new() }
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Fetch `page` (1-based) and make it current.
    ///
    /// # Errors
    ///
    /// [`HISTORY_LOAD_FAILED`]; the previous page stays displayed.
    pub async fn load(&mut self, page: u64) -> Result<&[HistoryEntry], PageError> {
        let page = page.max(1);
        let fetched = self
            .api
            .history(page, self.page_size)
            .await
            .map_err(|e| failed("load_history", HISTORY_LOAD_FAILED, e))?;
        self.current_page = page;
        self.total_pages = fetched.total_pages(self.page_size);
        self.entries = fetched.results;
        Ok(&self.entries)
    }

    /// Delete one entry, then refetch the current page. When the deletion
    /// empties the last page, the previous page is fetched instead.
    ///
    /// # Errors
    ///
    /// [`HISTORY_DELETE_FAILED`] when the delete is rejected (nothing is
    /// refetched), [`HISTORY_LOAD_FAILED`] when the refetch fails.
    pub async fn delete(&mut self, id: i64) -> Result<(), PageError> {
        let notifier = self.api.guard().notifier();
        if let Err(e) = self.api.delete_history(id).await {
            notifier.notify(Notice::error(HISTORY_DELETE_FAILED));
            return Err(failed("delete_history", HISTORY_DELETE_FAILED, e));
        }
        notifier.notify(Notice::success(HISTORY_DELETED));

        let stranded = self.entries.len() == 1 && self.current_page > 1;
        let page = if stranded { self.current_page - 1 } else { self.current_page };
        self.load(page).await?;
        Ok(())
    }
}
