//! Seams over the device capabilities the wizard consumes. Real handset
//! bindings live in the platform shells; the implementations here serve the
//! CLI and the tests.

use std::collections::VecDeque;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::DeviceError;
use crate::types::{GeoPoint, Rotation};

/// Still-image camera.
#[async_trait]
pub trait Camera: Send {
    /// Ask the platform for camera access. A [`DeviceError::PermissionDenied`]
    /// blocks capture until the user grants it; capture resumes afterwards.
    async fn ensure_permission(&mut self) -> Result<(), DeviceError>;

    /// Acquire a single JPEG frame.
    async fn capture(&mut self) -> Result<Vec<u8>, DeviceError>;

    /// Fixed correction applied to every frame so the stored image displays
    /// upright. The angle differs per device OS family.
    fn orientation_correction(&self) -> Rotation {
        Rotation::Deg0
    }
}

/// Foreground location access plus a one-shot position fix.
#[async_trait]
pub trait LocationProvider: Send {
    async fn request_permission(&mut self) -> bool;

    async fn current_position(&mut self) -> Result<GeoPoint, DeviceError>;
}

/// Serves staged JPEG files in order, standing in for the handset camera.
pub struct FileCamera {
    queue: VecDeque<PathBuf>,
    correction: Rotation,
}

impl FileCamera {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: paths.into_iter().collect(),
            correction: Rotation::Deg0,
        }
    }

    pub fn with_correction(mut self, correction: Rotation) -> Self {
        self.correction = correction;
        self
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn ensure_permission(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    async fn capture(&mut self) -> Result<Vec<u8>, DeviceError> {
        let path = self
            .queue
            .pop_front()
            .ok_or_else(|| DeviceError::Unavailable("no staged frames left".to_string()))?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| DeviceError::Unavailable(format!("{}: {}", path.display(), e)))
    }

    fn orientation_correction(&self) -> Rotation {
        self.correction
    }
}

/// A provider with a pre-decided answer: either one fixed position, or a
/// denied permission when no fix is given.
pub struct StaticLocation {
    fix: Option<GeoPoint>,
}

impl StaticLocation {
    pub fn new(fix: Option<GeoPoint>) -> Self {
        Self { fix }
    }

    pub fn denied() -> Self {
        Self { fix: None }
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    async fn request_permission(&mut self) -> bool {
        self.fix.is_some()
    }

    async fn current_position(&mut self) -> Result<GeoPoint, DeviceError> {
        self.fix.ok_or(DeviceError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn write_jpeg(path: &std::path::Path) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([10, 20, 30])));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        std::fs::write(path, buf.into_inner()).unwrap();
    }

    #[tokio::test]
    async fn file_camera_serves_frames_in_order_then_runs_dry() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.jpg");
        let second = dir.path().join("b.jpg");
        write_jpeg(&first);
        write_jpeg(&second);

        let mut camera = FileCamera::new([first, second]);
        camera.ensure_permission().await.unwrap();
        assert!(camera.capture().await.is_ok());
        assert!(camera.capture().await.is_ok());
        assert!(matches!(
            camera.capture().await,
            Err(DeviceError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn static_location_reports_fix_or_denial() {
        let mut granted = StaticLocation::new(Some(GeoPoint {
            latitude: 18.52,
            longitude: 73.85,
        }));
        assert!(granted.request_permission().await);
        assert_eq!(granted.current_position().await.unwrap().latitude, 18.52);

        let mut denied = StaticLocation::denied();
        assert!(!denied.request_permission().await);
        assert!(matches!(
            denied.current_position().await,
            Err(DeviceError::PermissionDenied)
        ));
    }
}
