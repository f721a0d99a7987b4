//! Remote banner API. Three fire-once calls; no retry, no explicit timeout,
//! no cancellation. Every failure is returned to the caller as a typed error.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::error::ApiError;
use crate::types::{Banner, BannerDraft, BannersResponse, ErrorResponse, LoginRequest, LoginResponse, SessionUser};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// POST /api/users/login with the phone number and the PIN as an integer.
    /// On rejection the server's own message comes back verbatim.
    pub async fn authenticate(&self, phone: &str, pin: u32) -> Result<SessionUser, ApiError> {
        let url = format!("{}/api/users/login", self.base_url);
        tracing::info!(phone, "authenticating");

        let request = LoginRequest {
            phone: phone.to_string(),
            pin,
        };
        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let parsed: LoginResponse = serde_json::from_str(&body)?;
            tracing::info!(uid = %parsed.user.uid, "authentication successful");
            Ok(parsed.user)
        } else {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| format!("Login failed (status {})", status.as_u16()));
            tracing::error!(status = status.as_u16(), "authentication rejected");
            Err(ApiError::Auth { message })
        }
    }

    /// GET /api/banner/getbanners/{uid}. The server answers oldest-first;
    /// the list is reversed so the newest submission leads.
    pub async fn list_banners(&self, uid: &str) -> Result<Vec<Banner>, ApiError> {
        let url = format!("{}/api/banner/getbanners/{}", self.base_url, uid);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "banner list request failed");
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let parsed: BannersResponse = response.json().await?;
        tracing::info!(count = parsed.data.len(), "banners fetched");
        Ok(newest_first(parsed.data))
    }
}

fn newest_first(mut banners: Vec<Banner>) -> Vec<Banner> {
    banners.reverse();
    banners
}

/// The one write operation, behind a seam so the wizard can be exercised
/// without a server.
#[async_trait]
pub trait BannerUploader: Send + Sync {
    async fn upload_banner(&self, draft: &BannerDraft) -> Result<(), ApiError>;
}

#[async_trait]
impl BannerUploader for ApiClient {
    /// POST multipart/form-data to /api/banner/uploadbanner: the scalar form
    /// fields plus each photo as a `bannerUrls` part named `image{N}.jpg`.
    async fn upload_banner(&self, draft: &BannerDraft) -> Result<(), ApiError> {
        let url = format!("{}/api/banner/uploadbanner", self.base_url);

        let mut form = Form::new()
            .text("bannerHeight", draft.form.banner_height.clone())
            .text("bannerWidth", draft.form.banner_width.clone())
            .text("bannerType", draft.form.banner_type.clone())
            .text("bannerStatus", draft.form.banner_status.clone())
            .text("nameOfSite", draft.form.name_of_site.clone())
            .text("lat", coordinate_field(draft.latitude))
            .text("lng", coordinate_field(draft.longitude))
            .text("workerPhone", draft.form.worker_phone.clone());

        for (index, photo) in draft.photos.iter().enumerate() {
            let part = Part::bytes(photo.bytes.clone())
                .file_name(format!("image{}.jpg", index))
                .mime_str("image/jpeg")?;
            form = form.part("bannerUrls", part);
        }

        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if status.is_success() {
            tracing::info!(photos = draft.photos.len(), "banner uploaded");
            Ok(())
        } else {
            tracing::error!(status = status.as_u16(), "banner upload failed");
            Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
            })
        }
    }
}

/// A missing fix uploads as an empty field rather than a stringified null.
fn coordinate_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
