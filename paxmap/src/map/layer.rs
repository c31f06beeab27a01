//! Base raster layer description.

/// Default tile URL template (OpenStreetMap standard layer).
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Default attribution for the OpenStreetMap layer.
pub const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Raster tiles drawn under the markers.
///
/// Only the addressing is modelled; imagery is fetched by whatever draws the map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseLayer {
    url_template: String,
    subdomains: Vec<String>,
    attribution: String,
}

impl BaseLayer {
    /// Create a layer from a `{s}`/`{z}`/`{x}`/`{y}` URL template.
    pub fn new(url_template: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            attribution: attribution.into(),
        }
    }

    /// The OpenStreetMap standard layer.
    pub fn openstreetmap() -> Self {
        Self::new(OSM_TILE_URL, OSM_ATTRIBUTION)
    }

    /// Replace the `{s}` subdomains (default `a`, `b`, `c`).
    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn url_template(&self) -> &str {
        &self.url_template
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    /// URL of the tile at `z/x/y`.
    ///
    /// The subdomain rotates with `(x + y) mod n` so neighbouring tiles are
    /// spread across hosts.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        let subdomain = if self.subdomains.is_empty() {
            ""
        } else {
            let i = (x as usize + y as usize) % self.subdomains.len();
            self.subdomains[i].as_str()
        };
        self.url_template
            .replace("{s}", subdomain)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

impl Default for BaseLayer {
    fn default() -> Self {
        Self::openstreetmap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_url() {
        let layer = BaseLayer::openstreetmap();
        assert_eq!(
            layer.tile_url(15, 9373, 12535),
            "https://c.tile.openstreetmap.org/15/9373/12535.png"
        );
        assert_eq!(
            layer.tile_url(0, 0, 0),
            "https://a.tile.openstreetmap.org/0/0/0.png"
        );
    }

    #[test]
    fn test_subdomain_rotation() {
        let layer = BaseLayer::openstreetmap();
        assert!(layer.tile_url(3, 1, 0).starts_with("https://b."));
        assert!(layer.tile_url(3, 1, 1).starts_with("https://c."));
        assert!(layer.tile_url(3, 2, 1).starts_with("https://a."));
    }

    #[test]
    fn test_without_subdomains() {
        let layer = BaseLayer::new("https://tiles{s}.example/{z}/{x}/{y}.png", "x")
            .with_subdomains(Vec::<String>::new());
        assert_eq!(layer.tile_url(1, 1, 0), "https://tiles.example/1/1/0.png");
    }

    #[test]
    fn test_attribution_mentions_osm() {
        assert!(BaseLayer::default()
            .attribution()
            .contains("OpenStreetMap</a> contributors"));
    }
}
