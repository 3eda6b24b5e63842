#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::types::UserProfile;
use crate::shell::Notice;

pub const PROFILE_LOAD_FAILED: &str = "프로필 정보를 불러오는 데 실패했습니다.";
pub const PROFILE_UPDATED: &str = "프로필이 성공적으로 업데이트되었습니다.";
pub const PROFILE_UPDATE_FAILED: &str = "프로필 업데이트에 실패했습니다.";
pub const PASSWORD_MISMATCH: &str = "새 비밀번호가 일치하지 않습니다.";
pub const PASSWORD_CHANGED: &str = "비밀번호가 성공적으로 변경되었습니다.";
pub const PASSWORD_CHANGE_FAILED: &str = "비밀번호 변경에 실패했습니다. 현재 비밀번호를 확인해주세요.";

pub struct ProfilePage {
    api: Api,
    profile: Option<UserProfile>,
}

impl ProfilePage {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api, profile: None }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// # Errors
    ///
    /// [`PROFILE_LOAD_FAILED`].
    pub async fn load(&mut self) -> Result<&UserProfile, PageError> {
        let profile = self
            .api
            .profile()
            .await
            .map_err(|e| failed("load_profile", PROFILE_LOAD_FAILED, e))?;
        Ok(self.profile.insert(profile))
    }

    /// Save `form` and adopt whatever the backend echoes back.
    ///
    /// # Errors
    ///
    /// [`PROFILE_UPDATE_FAILED`]; the loaded profile is left as it was.
    pub async fn update(&mut self, form: &UserProfile) -> Result<&UserProfile, PageError> {
        let notifier = self.api.guard().notifier();
        match self.api.update_profile(form).await {
            Ok(saved) => {
                notifier.notify(Notice::success(PROFILE_UPDATED));
                Ok(self.profile.insert(saved))
            }
            Err(e) => {
                notifier.notify(Notice::error(PROFILE_UPDATE_FAILED));
                Err(failed("update_profile", PROFILE_UPDATE_FAILED, e))
            }
        }
    }

    /// # Errors
    ///
    /// [`PASSWORD_MISMATCH`] when `confirm` differs from `new_password`
    /// (nothing is sent), [`PASSWORD_CHANGE_FAILED`] when the backend
    /// rejects the change.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<(), PageError> {
        let notifier = self.api.guard().notifier();
        if new_password != confirm {
            notifier.notify(Notice::error(PASSWORD_MISMATCH));
            return Err(PageError::rejected(PASSWORD_MISMATCH));
        }
        if let Err(e) = self.api.change_password(old_password, new_password).await {
            notifier.notify(Notice::error(PASSWORD_CHANGE_FAILED));
            return Err(failed("change_password", PASSWORD_CHANGE_FAILED, e));
        }
        notifier.notify(Notice::success(PASSWORD_CHANGED));
        Ok(())
    }
}
