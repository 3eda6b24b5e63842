#[cfg(test)]
#[path = "diagnosis_test.rs"]
mod diagnosis_test;

use super::{PageError, failed};
use crate::net::api::Api;
use crate::net::types::{ImageUpload, PredictOutcome};

pub const NO_IMAGE: &str = "진단할 이미지를 선택해주세요.";
pub const DIAGNOSIS_FAILED: &str = "진단 중 오류가 발생했습니다. 파일을 확인하거나 다시 시도해주세요.";
pub const EXAMPLES_LOAD_FAILED: &str = "예시 이미지를 불러오는 데 실패했습니다.";

/// The image queued for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub image: ImageUpload,
    /// Example images are diagnosed but not saved to history.
    pub is_example: bool,
}

pub struct DiagnosisPage {
    api: Api,
    selection: Option<Selection>,
    outcome: Option<PredictOutcome>,
}

impl DiagnosisPage {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api, selection: None, outcome: None }
    }

    /// Choosing a new image discards the previous result.
    pub fn select(&mut self, image: ImageUpload, is_example: bool) {
        self.selection = Some(Selection { image, is_example });
        self.outcome = None;
    }

    pub fn reset(&mut self) {
        self.selection = None;
        self.outcome = None;
    }

    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&PredictOutcome> {
        self.outcome.as_ref()
    }

    /// # Errors
    ///
    /// [`NO_IMAGE`] without a selection (nothing is sent),
    /// [`DIAGNOSIS_FAILED`] when the prediction request fails.
    pub async fn submit(&mut self) -> Result<&PredictOutcome, PageError> {
        let Some(selection) = self.selection.clone() else {
            return Err(PageError::rejected(NO_IMAGE));
        };
        self.outcome = None;
        let outcome = self
            .api
            .predict(selection.image, selection.is_example)
            .await
            .map_err(|e| failed("predict", DIAGNOSIS_FAILED, e))?;
        Ok(self.outcome.insert(outcome))
    }

    /// File names of the bundled example images.
    ///
    /// # Errors
    ///
    /// [`EXAMPLES_LOAD_FAILED`].
    pub async fn examples(&self) -> Result<Vec<String>, PageError> {
        self.api
            .example_images()
            .await
            .map_err(|e| failed("example_images", EXAMPLES_LOAD_FAILED, e))
    }
}
