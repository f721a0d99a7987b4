use serde::{Deserialize, Serialize};

// ========== SESSION USER ==========
/// Authenticated field worker profile, persisted locally after login.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub uid: String,
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub aadhar_card: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub pin: u32,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUser,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

// ========== BANNER ==========
/// Server-owned record of a documented banner. Read-only on the client.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    pub name_of_site: String,
    pub dimensions: String,
    pub banner_type: String,
    pub banner_status: String,
    #[serde(default)]
    pub banner_urls: Vec<String>,
    #[serde(default)]
    pub banner_location: Option<GeoJsonPoint>,
    #[serde(default)]
    pub worker_name: Option<String>,
    pub worker_phone: String,
}

#[derive(Debug, Deserialize)]
pub struct BannersResponse {
    pub data: Vec<Banner>,
}

/// GeoJSON point as stored by the server. Coordinates are [longitude, latitude].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeoJsonPoint {
    #[serde(rename = "type")]
    pub point_type: String,
    pub coordinates: [f64; 2],
}

impl GeoJsonPoint {
    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }
}

// ========== CAPTURE ==========
/// One-shot position fix from the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Logical orientation of a captured photo, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Next quarter turn clockwise, wrapping at 360.
    pub fn advanced(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }
}

/// A captured frame: JPEG bytes plus the rotation the reviewer has applied so far.
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub bytes: Vec<u8>,
    pub rotation: Rotation,
}

impl CapturedPhoto {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            rotation: Rotation::Deg0,
        }
    }
}

/// The five-field banner form. Fields are free text and deliberately
/// accepted as-is; the worker phone is pre-filled from the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerForm {
    pub banner_height: String,
    pub banner_width: String,
    pub banner_type: String,
    pub banner_status: String,
    pub name_of_site: String,
    pub worker_phone: String,
}

impl Default for BannerForm {
    fn default() -> Self {
        Self {
            banner_height: String::new(),
            banner_width: String::new(),
            banner_type: String::new(),
            banner_status: "Active".to_string(),
            name_of_site: String::new(),
            worker_phone: String::new(),
        }
    }
}

impl BannerForm {
    pub fn prefilled(worker_phone: &str) -> Self {
        Self {
            worker_phone: worker_phone.to_string(),
            ..Self::default()
        }
    }
}

/// Everything one capture session has gathered, ready for upload.
/// In-memory only; dropped on success or abandonment.
#[derive(Debug, Clone)]
pub struct BannerDraft {
    pub form: BannerForm,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photos: Vec<CapturedPhoto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_user_maps_server_field_names() {
        let json = r#"{
            "uid": "u-1",
            "fullName": "Asha Verma",
            "phone": "9876543210",
            "aadharCard": "1234-5678-9012",
            "city": "Pune",
            "status": "active"
        }"#;
        let user: SessionUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "Asha Verma");
        assert_eq!(user.aadhar_card.as_deref(), Some("1234-5678-9012"));
        assert!(user.address.is_none());

        let back = serde_json::to_string(&user).unwrap();
        assert!(back.contains("\"fullName\""));
        assert!(back.contains("\"aadharCard\""));
    }

    #[test]
    fn banner_maps_underscore_id_and_geojson_order() {
        let json = r#"{
            "_id": "b-9",
            "date": "2024-03-01T10:00:00.000Z",
            "nameOfSite": "MG Road",
            "dimensions": "10x20",
            "bannerType": "Hoarding",
            "bannerStatus": "Active",
            "bannerUrls": ["https://cdn.example/one.jpg"],
            "bannerLocation": {"type": "Point", "coordinates": [73.8567, 18.5204]},
            "workerPhone": "9876543210"
        }"#;
        let banner: Banner = serde_json::from_str(json).unwrap();
        assert_eq!(banner.id, "b-9");
        let location = banner.banner_location.unwrap();
        assert_eq!(location.latitude(), 18.5204);
        assert_eq!(location.longitude(), 73.8567);
    }

    #[test]
    fn login_request_sends_pin_as_number() {
        let request = LoginRequest {
            phone: "1234567890".to_string(),
            pin: "0000".parse().unwrap(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"phone":"1234567890","pin":0}"#);
    }

    #[test]
    fn rotation_wraps_after_four_quarter_turns() {
        let mut rotation = Rotation::Deg0;
        for _ in 0..4 {
            rotation = rotation.advanced();
        }
        assert_eq!(rotation, Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(270), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn form_defaults_to_active_status() {
        let form = BannerForm::prefilled("9876543210");
        assert_eq!(form.banner_status, "Active");
        assert_eq!(form.worker_phone, "9876543210");
        assert!(form.name_of_site.is_empty());
    }
}
