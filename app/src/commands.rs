use anyhow::{bail, Context, Result};

use bannerfield_shared::capture::{CaptureSession, Step, PHOTO_LIMIT};
use bannerfield_shared::device::{FileCamera, StaticLocation};
use bannerfield_shared::types::{Banner, GeoPoint, Rotation, SessionUser};
use bannerfield_shared::validation::{validate_phone, validate_pin};
use bannerfield_shared::AppState;

use crate::SubmitArgs;

pub async fn login(state: &AppState, phone: &str, pin: &str) -> Result<()> {
    if let Err(message) = validate_phone(phone) {
        bail!("{message}");
    }
    if let Err(message) = validate_pin(pin) {
        bail!("{message}");
    }
    let pin: u32 = pin.parse().context("PIN is not a number")?;

    let user = state.api.authenticate(phone, pin).await?;
    state.sessions.save(&user)?;
    println!("Welcome back, {}", user.full_name);
    Ok(())
}

pub fn logout(state: &AppState) -> Result<()> {
    state.sessions.clear()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(state: &AppState) -> Result<()> {
    let Some(user) = state.sessions.load() else {
        println!("Not logged in. Run `bannerfield login` first.");
        return Ok(());
    };
    for line in profile_lines(&user) {
        println!("{line}");
    }
    Ok(())
}

pub async fn banners(state: &AppState) -> Result<()> {
    let Some(user) = state.sessions.load() else {
        println!("Not logged in. Run `bannerfield login` first.");
        return Ok(());
    };

    // A failed fetch degrades to the empty rendering, same as the handset list.
    let banners = match state.api.list_banners(&user.uid).await {
        Ok(banners) => banners,
        Err(e) => {
            tracing::error!("fetching banners failed: {}", e);
            Vec::new()
        }
    };
    for line in banner_lines(&banners) {
        println!("{line}");
    }
    Ok(())
}

pub async fn submit(state: &AppState, args: SubmitArgs) -> Result<()> {
    let Some(user) = state.sessions.load() else {
        println!("Not logged in. Run `bannerfield login` first.");
        return Ok(());
    };
    if args.photos.len() < PHOTO_LIMIT {
        bail!(
            "a banner needs {} photos, got {} staged",
            PHOTO_LIMIT,
            args.photos.len()
        );
    }
    let Some(correction) = Rotation::from_degrees(args.correction) else {
        bail!("correction must be 0, 90, 180 or 270 degrees");
    };

    let camera = FileCamera::new(args.photos).with_correction(correction);
    let fix = match (args.lat, args.lng) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    };

    let mut session = CaptureSession::new(&user.phone, camera, StaticLocation::new(fix));
    if let Some(form) = session.form_mut() {
        form.banner_height = args.height;
        form.banner_width = args.width;
        form.banner_type = args.banner_type;
        form.name_of_site = args.site;
    }

    session.next().await?;
    while session.step() == Step::Capturing {
        session.capture().await?;
    }
    session.submit(&state.api).await?;
    println!("Banner submitted.");
    Ok(())
}

fn profile_lines(user: &SessionUser) -> Vec<String> {
    let mut lines = vec![
        format!("{} ({})", user.full_name, user.status),
        format!("Phone:   {}", user.phone),
    ];
    if let Some(address) = &user.address {
        lines.push(format!("Address: {}", address));
    }
    let area: Vec<&str> = [user.city.as_deref(), user.state.as_deref(), user.pincode.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !area.is_empty() {
        lines.push(format!("         {}", area.join(", ")));
    }
    lines
}

fn banner_lines(banners: &[Banner]) -> Vec<String> {
    if banners.is_empty() {
        return vec!["No banners available".to_string()];
    }
    banners
        .iter()
        .map(|banner| {
            format!(
                "{}  {}  {}  ({} photos)",
                display_date(&banner.date),
                banner.name_of_site,
                banner.dimensions,
                banner.banner_urls.len()
            )
        })
        .collect()
}

fn display_date(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banner(date: &str, site: &str) -> Banner {
        serde_json::from_str(&format!(
            r#"{{
                "_id": "b-1",
                "date": "{date}",
                "nameOfSite": "{site}",
                "dimensions": "10x20",
                "bannerType": "Hoarding",
                "bannerStatus": "Active",
                "bannerUrls": ["https://cdn.example/one.jpg"],
                "workerPhone": "9876543210"
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn empty_list_renders_the_empty_state_not_an_error() {
        assert_eq!(banner_lines(&[]), ["No banners available"]);
    }

    #[test]
    fn banner_line_shows_date_site_and_dimensions() {
        let lines = banner_lines(&[banner("2024-03-01T10:00:00.000Z", "MG Road")]);
        assert_eq!(lines, ["01/03/2024  MG Road  10x20  (1 photos)"]);
    }

    #[test]
    fn unparsable_dates_fall_back_to_the_raw_value() {
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
