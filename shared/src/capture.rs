//! The capture wizard: collect banner info, photograph the banner, review,
//! submit. One session documents one banner; the draft lives only in memory
//! and is owned exclusively by the session.

use std::mem;

use uuid::Uuid;

use crate::api::BannerUploader;
use crate::device::{Camera, LocationProvider};
use crate::error::{CaptureError, DeviceError};
use crate::image_processing;
use crate::types::{BannerDraft, BannerForm, CapturedPhoto, GeoPoint, Rotation};

/// Photos per banner. Reaching the limit moves the session to review.
pub const PHOTO_LIMIT: usize = 4;

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CollectingInfo,
    Capturing,
    Reviewing,
    Submitting,
    Done,
}

/// Internal state. Each variant carries only the data valid in that step, so
/// e.g. a submission without a full photo set cannot be constructed.
#[derive(Debug)]
enum State {
    CollectingInfo {
        form: BannerForm,
        photos: Vec<CapturedPhoto>,
        fix: Option<GeoPoint>,
    },
    Capturing {
        form: BannerForm,
        photos: Vec<CapturedPhoto>,
        fix: Option<GeoPoint>,
    },
    Reviewing {
        form: BannerForm,
        photos: Vec<CapturedPhoto>,
        fix: Option<GeoPoint>,
    },
    Submitting,
    Done,
}

pub struct CaptureSession<C: Camera, L: LocationProvider> {
    id: Uuid,
    camera: C,
    location: L,
    state: State,
}

impl<C: Camera, L: LocationProvider> CaptureSession<C, L> {
    /// Fresh session for the given worker; the phone is pre-filled on the form.
    pub fn new(worker_phone: &str, camera: C, location: L) -> Self {
        Self {
            id: Uuid::new_v4(),
            camera,
            location,
            state: State::CollectingInfo {
                form: BannerForm::prefilled(worker_phone),
                photos: Vec::new(),
                fix: None,
            },
        }
    }

    pub fn step(&self) -> Step {
        match self.state {
            State::CollectingInfo { .. } => Step::CollectingInfo,
            State::Capturing { .. } => Step::Capturing,
            State::Reviewing { .. } => Step::Reviewing,
            State::Submitting => Step::Submitting,
            State::Done => Step::Done,
        }
    }

    pub fn form(&self) -> Option<&BannerForm> {
        match &self.state {
            State::CollectingInfo { form, .. }
            | State::Capturing { form, .. }
            | State::Reviewing { form, .. } => Some(form),
            _ => None,
        }
    }

    /// The form is editable only while info is being collected.
    pub fn form_mut(&mut self) -> Option<&mut BannerForm> {
        match &mut self.state {
            State::CollectingInfo { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        match &self.state {
            State::CollectingInfo { photos, .. }
            | State::Capturing { photos, .. }
            | State::Reviewing { photos, .. } => photos,
            _ => &[],
        }
    }

    pub fn position(&self) -> Option<GeoPoint> {
        match &self.state {
            State::CollectingInfo { fix, .. }
            | State::Capturing { fix, .. }
            | State::Reviewing { fix, .. } => *fix,
            _ => None,
        }
    }

    /// CollectingInfo → Capturing. The form is accepted as-is. Location is
    /// requested on entry; a denial or failed fix is non-fatal and the
    /// session simply carries no coordinates. A fix already in hand from an
    /// earlier visit is reused, and photos taken before a step back return
    /// with the session.
    pub async fn next(&mut self) -> Result<(), CaptureError> {
        if !matches!(self.state, State::CollectingInfo { .. }) {
            return Err(CaptureError::WrongStep);
        }
        if let State::CollectingInfo { form, photos, fix } =
            mem::replace(&mut self.state, State::Done)
        {
            let fix = match fix {
                Some(fix) => Some(fix),
                None => self.acquire_fix().await,
            };
            tracing::info!(session = %self.id, "banner info collected, capturing");
            self.state = State::Capturing { form, photos, fix };
        }
        Ok(())
    }

    async fn acquire_fix(&mut self) -> Option<GeoPoint> {
        if !self.location.request_permission().await {
            tracing::warn!(session = %self.id, "location permission denied, continuing without coordinates");
            return None;
        }
        match self.location.current_position().await {
            Ok(fix) => Some(fix),
            Err(e) => {
                tracing::warn!(session = %self.id, "position fix failed, continuing without coordinates: {}", e);
                None
            }
        }
    }

    /// Acquire one frame, apply the camera's orientation correction and
    /// append it. The fourth photo moves the session to review.
    pub async fn capture(&mut self) -> Result<(), CaptureError> {
        match &self.state {
            State::Capturing { photos, .. } => {
                if photos.len() >= PHOTO_LIMIT {
                    return Err(CaptureError::PhotoLimit);
                }
            }
            _ => return Err(CaptureError::WrongStep),
        }

        self.camera.ensure_permission().await.map_err(|e| match e {
            DeviceError::PermissionDenied => CaptureError::CameraPermissionDenied,
            other => CaptureError::Camera(other),
        })?;
        let frame = self.camera.capture().await.map_err(CaptureError::Camera)?;
        let upright = image_processing::rotate_jpeg(&frame, self.camera.orientation_correction())?;

        let full = match &mut self.state {
            State::Capturing { photos, .. } => {
                photos.push(CapturedPhoto::new(upright));
                photos.len() >= PHOTO_LIMIT
            }
            _ => false,
        };
        if full {
            if let State::Capturing { form, photos, fix } = mem::replace(&mut self.state, State::Done) {
                tracing::info!(session = %self.id, count = photos.len(), "photo limit reached, reviewing");
                self.state = State::Reviewing { form, photos, fix };
            }
        }
        Ok(())
    }

    /// Discard the photo at `index`. From review this re-enters capture,
    /// since the set is no longer complete.
    pub fn retake(&mut self, index: usize) -> Result<(), CaptureError> {
        match &mut self.state {
            State::Capturing { photos, .. } => {
                if index >= photos.len() {
                    return Err(CaptureError::PhotoIndex(index));
                }
                photos.remove(index);
                tracing::info!(session = %self.id, index, "photo discarded");
                Ok(())
            }
            State::Reviewing { photos, .. } => {
                if index >= photos.len() {
                    return Err(CaptureError::PhotoIndex(index));
                }
                if let State::Reviewing { form, mut photos, fix } =
                    mem::replace(&mut self.state, State::Done)
                {
                    photos.remove(index);
                    tracing::info!(session = %self.id, index, "photo discarded, back to capturing");
                    self.state = State::Capturing { form, photos, fix };
                }
                Ok(())
            }
            _ => Err(CaptureError::WrongStep),
        }
    }

    /// Advance the photo's rotation one quarter turn. The stored JPEG is
    /// re-encoded to match; the logical angle wraps at 360.
    pub fn rotate(&mut self, index: usize) -> Result<(), CaptureError> {
        match &mut self.state {
            State::Reviewing { photos, .. } => {
                let photo = photos
                    .get_mut(index)
                    .ok_or(CaptureError::PhotoIndex(index))?;
                let rebuilt = image_processing::rotate_jpeg(&photo.bytes, Rotation::Deg90)?;
                photo.bytes = rebuilt;
                photo.rotation = photo.rotation.advanced();
                Ok(())
            }
            _ => Err(CaptureError::WrongStep),
        }
    }

    /// Step back one screen. Nothing already captured is discarded: review
    /// returns to capture keeping every photo, and capture returns to the
    /// form with the photos and fix riding along for the next forward step.
    pub fn back(&mut self) -> Result<(), CaptureError> {
        match mem::replace(&mut self.state, State::Done) {
            State::Capturing { form, photos, fix } => {
                self.state = State::CollectingInfo { form, photos, fix };
                Ok(())
            }
            State::Reviewing { form, photos, fix } => {
                self.state = State::Capturing { form, photos, fix };
                Ok(())
            }
            other => {
                self.state = other;
                Err(CaptureError::WrongStep)
            }
        }
    }

    /// Reviewing → Submitting → Done. A failed upload logs, restores the
    /// review step with the draft untouched, and hands the error back so the
    /// user can retry; nothing is lost.
    pub async fn submit<U>(&mut self, uploader: &U) -> Result<(), CaptureError>
    where
        U: BannerUploader + ?Sized,
    {
        let (form, photos, fix) = match mem::replace(&mut self.state, State::Submitting) {
            State::Reviewing { form, photos, fix } => (form, photos, fix),
            other => {
                self.state = other;
                return Err(CaptureError::WrongStep);
            }
        };

        let draft = BannerDraft {
            form,
            latitude: fix.map(|f| f.latitude),
            longitude: fix.map(|f| f.longitude),
            photos,
        };
        tracing::info!(session = %self.id, photos = draft.photos.len(), "submitting banner");

        match uploader.upload_banner(&draft).await {
            Ok(()) => {
                tracing::info!(session = %self.id, "banner submitted");
                self.state = State::Done;
                Ok(())
            }
            Err(e) => {
                tracing::error!(session = %self.id, "upload failed, returning to review: {}", e);
                let BannerDraft { form, photos, .. } = draft;
                self.state = State::Reviewing { form, photos, fix };
                Err(CaptureError::Upload(e))
            }
        }
    }
}
