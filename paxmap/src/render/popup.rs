//! Popup content for provider markers.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::geojson::ProviderProperties;

/// Base URL for the "search this address" link.
pub const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

/// What a provider popup shows.
///
/// A pure function of the provider's properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupContent {
    /// Provider name
    pub title: String,
    /// One `"<name> (<count>)"` line per treatment, ordered by name
    pub treatments: Vec<String>,
    /// Second address line, when the provider has one
    pub address2: Option<String>,
    /// Address used for the map search link
    pub search_address: String,
    /// Map search link for `search_address`
    pub search_url: String,
}

impl PopupContent {
    pub fn from_properties(properties: &ProviderProperties) -> Self {
        let treatments = properties
            .treatments
            .iter()
            .map(|(name, count)| format!("{} ({})", name, count))
            .collect();

        let state_zip = format!("{} {}", properties.state_code, properties.zip_code);
        let search_address = [
            properties.address1.trim(),
            properties.city.trim(),
            state_zip.trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

        let search_url = format!("{}{}", MAPS_SEARCH_URL, urlencoding::encode(&search_address));

        Self {
            title: properties.provider_name.clone(),
            treatments,
            address2: properties
                .address2
                .as_deref()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
            search_address,
            search_url,
        }
    }
}

impl fmt::Display for PopupContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.treatments {
            writeln!(f, "  {}", line)?;
        }
        if let Some(address2) = &self.address2 {
            writeln!(f, "{}", address2)?;
        }
        write!(f, "{} <{}>", self.search_address, self.search_url)
    }
}

/// When popup content is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupMode {
    /// On first [`Popup::open`]
    #[default]
    Lazy,
    /// When the marker is created
    Eager,
}

/// A marker's popup. Content is built once and then reused.
#[derive(Debug, Clone)]
pub struct Popup {
    properties: Arc<ProviderProperties>,
    content: OnceLock<PopupContent>,
}

impl Popup {
    pub fn new(properties: Arc<ProviderProperties>, mode: PopupMode) -> Self {
        let popup = Self {
            properties,
            content: OnceLock::new(),
        };
        if mode == PopupMode::Eager {
            popup.open();
        }
        popup
    }

    /// Content of the popup, building it on first call.
    pub fn open(&self) -> &PopupContent {
        self.content
            .get_or_init(|| PopupContent::from_properties(&self.properties))
    }

    /// Returns true once the content has been built.
    pub fn is_rendered(&self) -> bool {
        self.content.get().is_some()
    }

    pub fn properties(&self) -> &ProviderProperties {
        &self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pharmacy() -> ProviderProperties {
        let mut props = ProviderProperties::new("Foggy Bottom Pharmacy", 38.9, -77.05);
        props.address1 = "2140 L St Nw".into();
        props.city = "Washington".into();
        props.state_code = "DC".into();
        props.zip_code = "20037".into();
        props.treatments.insert("Paxlovid".into(), 40);
        props.treatments.insert("Lagevrio".into(), 12);
        props
    }

    #[test]
    fn test_content_fields() {
        let content = PopupContent::from_properties(&pharmacy());
        assert_eq!(content.title, "Foggy Bottom Pharmacy");
        assert_eq!(content.treatments, vec!["Lagevrio (12)", "Paxlovid (40)"]);
        assert_eq!(content.address2, None);
        assert_eq!(content.search_address, "2140 L St Nw, Washington, DC 20037");
        assert_eq!(
            content.search_url,
            "https://www.google.com/maps/search/?api=1&query=2140%20L%20St%20Nw%2C%20Washington%2C%20DC%2020037"
        );
    }

    #[test]
    fn test_address2_shown_when_present() {
        let mut props = pharmacy();
        props.address2 = Some("Suite 100".into());
        let content = PopupContent::from_properties(&props);
        assert_eq!(content.address2.as_deref(), Some("Suite 100"));
        assert!(content.to_string().contains("\nSuite 100\n"));
    }

    #[test]
    fn test_empty_address_parts_are_omitted() {
        let mut props = pharmacy();
        props.address1 = String::new();
        props.zip_code = String::new();
        let content = PopupContent::from_properties(&props);
        assert_eq!(content.search_address, "Washington, DC");
    }

    #[test]
    fn test_display() {
        let text = PopupContent::from_properties(&pharmacy()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Foggy Bottom Pharmacy");
        assert_eq!(lines[1], "  Lagevrio (12)");
        assert!(lines[3].starts_with("2140 L St Nw, Washington, DC 20037 <https://"));
    }

    #[test]
    fn test_lazy_popup_builds_once() {
        let popup = Popup::new(Arc::new(pharmacy()), PopupMode::Lazy);
        assert!(!popup.is_rendered());
        let first = popup.open() as *const PopupContent;
        assert!(popup.is_rendered());
        let second = popup.open() as *const PopupContent;
        assert_eq!(first, second);
    }

    #[test]
    fn test_eager_popup_is_prebuilt() {
        let popup = Popup::new(Arc::new(pharmacy()), PopupMode::Eager);
        assert!(popup.is_rendered());
        assert_eq!(popup.open().title, "Foggy Bottom Pharmacy");
    }
}
