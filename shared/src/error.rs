use thiserror::Error;

/// Failures from the remote banner API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the credentials. The message is the server's own
    /// wording and is shown to the user verbatim.
    #[error("{message}")]
    Auth { message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {status}")]
    UnexpectedStatus { status: u16 },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures from a device capability (camera, location).
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Unavailable(String),
}

/// Failures inside a capture session. None of these end the session:
/// the wizard stays in (or returns to) an interactive step.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Camera access was refused. Capture stays blocked until granted.
    #[error("camera permission denied")]
    CameraPermissionDenied,

    #[error("camera failure: {0}")]
    Camera(DeviceError),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("no photo at index {0}")]
    PhotoIndex(usize),

    #[error("photo limit reached; retake a photo before capturing again")]
    PhotoLimit,

    #[error("operation is not valid in the current step")]
    WrongStep,

    #[error(transparent)]
    Upload(#[from] ApiError),
}

/// Failures of the persisted session slot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored session is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
