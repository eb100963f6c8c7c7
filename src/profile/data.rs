//! src/profile/data.rs
//!
//! Stored profile records and the resolved form shown in the UI.

use serde::Deserialize;

use super::address::Address;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    #[serde(default)]
    pub url: Option<String>,
}

/// Profile record as stored, using the LSP3 field names.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_image: Vec<ImageRef>,
    #[serde(default)]
    pub background_image: Vec<ImageRef>,
}

/// Display-ready profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileData {
    pub name: String,
    pub profile_image: Option<String>,
    pub background_image: Option<String>,
    pub failed: bool,
}

impl ProfileData {
    pub fn resolve(address: &Address, record: &ProfileRecord, gateway: &str) -> Self {
        let name = record
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(single_line)
            .unwrap_or_else(|| format!("UP ({}...)", address.short()));
        Self {
            name,
            profile_image: first_image(&record.profile_image, gateway),
            background_image: first_image(&record.background_image, gateway),
            failed: false,
        }
    }

    /// Placeholder shown while a lookup for `address` is in a failed state.
    pub fn failed(address: &Address) -> Self {
        Self {
            name: format!("Error ({})", address.short()),
            profile_image: None,
            background_image: None,
            failed: true,
        }
    }
}

/// Names end up in one-line replies and single-row widgets.
fn single_line(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn first_image(images: &[ImageRef], gateway: &str) -> Option<String> {
    let url = images.first()?.url.as_deref()?;
    resolve_image_url(url, gateway)
}

/// Map an image URL to something fetchable: `ipfs://` goes through the gateway,
/// http(s) and data URLs pass through, anything else is dropped. URLs with
/// control characters are dropped too.
pub fn resolve_image_url(url: &str, gateway: &str) -> Option<String> {
    if url.chars().any(char::is_control) {
        return None;
    }
    if let Some(hash) = url.strip_prefix("ipfs://") {
        let sep = if gateway.ends_with('/') { "" } else { "/" };
        return Some(format!("{gateway}{sep}{hash}"));
    }
    if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("data:") {
        return Some(url.to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const GW: &str = "https://gw.example/ipfs";

    fn addr() -> Address {
        "0x1234567890123456789012345678901234567890".parse().unwrap()
    }

    #[test]
    fn image_urls() {
        assert_eq!(
            resolve_image_url("ipfs://Qm1", GW).as_deref(),
            Some("https://gw.example/ipfs/Qm1")
        );
        assert_eq!(
            resolve_image_url("ipfs://Qm1", "https://gw/").as_deref(),
            Some("https://gw/Qm1")
        );
        assert_eq!(
            resolve_image_url("data:image/png;base64,AA", GW).as_deref(),
            Some("data:image/png;base64,AA")
        );
        assert_eq!(resolve_image_url("ftp://x", GW), None);
        assert_eq!(resolve_image_url("https://img/a.png\nOK", GW), None);
    }

    #[test]
    fn control_characters_in_names_become_spaces() {
        let record = ProfileRecord {
            name: Some("Ada\nOK active=none\t".into()),
            ..Default::default()
        };
        let data = ProfileData::resolve(&addr(), &record, GW);
        assert_eq!(data.name, "Ada OK active=none");
    }

    #[test]
    fn blank_name_falls_back_to_address() {
        let record = ProfileRecord {
            name: Some("   ".into()),
            ..Default::default()
        };
        let data = ProfileData::resolve(&addr(), &record, GW);
        assert_eq!(data.name, "UP (0x1234...)");
        assert_eq!(data.profile_image, None);
    }

    #[test]
    fn parses_lsp3_json() {
        let json = r#"{"name":" Ada ","profileImage":[{"url":"ipfs://QmA"},{"url":"ipfs://QmB"}],
                       "backgroundImage":[{"url":"https://img/bg.png"}]}"#;
        let record: ProfileRecord = serde_json::from_str(json).unwrap();
        let data = ProfileData::resolve(&addr(), &record, GW);
        assert_eq!(data.name, "Ada");
        assert_eq!(data.profile_image.as_deref(), Some("https://gw.example/ipfs/QmA"));
        assert_eq!(data.background_image.as_deref(), Some("https://img/bg.png"));
        assert_eq!(ProfileData::failed(&addr()).name, "Error (0x1234)");
    }
}
