//! Static NFT catalog bundled with the app.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Sentinel key reserved for the unrevealed placeholder; never displayed.
pub const RESERVED_KEY: &str = "-1";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub image_link: String,
}

/// Display-ordered catalog with the reserved key filtered out.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, CatalogItem> = serde_json::from_str(json)?;
        let mut keyed: Vec<(String, CatalogItem)> = raw
            .into_iter()
            .filter(|(key, _)| key != RESERVED_KEY)
            .collect();
        // Numeric keys sort numerically; anything else falls to the end in
        // its map order.
        keyed.sort_by_key(|(key, _)| key.parse::<u64>().unwrap_or(u64::MAX));
        Ok(Self {
            items: keyed.into_iter().map(|(_, item)| item).collect(),
        })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "-1": { "name": "Hidden", "image_link": "https://example.com/hidden.png" },
        "10": { "name": "Ten", "image_link": "https://example.com/10.png" },
        "0": { "name": "Zero", "image_link": "https://example.com/0.png" },
        "2": { "name": "Two", "image_link": "https://example.com/2.png" }
    }"#;

    #[test]
    fn reserved_key_excluded_and_numeric_order_kept() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let names: Vec<&str> = catalog.items().iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Zero", "Two", "Ten"]);
    }

    #[test]
    fn fields_mapped() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let first = &catalog.items()[0];
        assert_eq!(first.name, "Zero");
        assert_eq!(first.image_link, "https://example.com/0.png");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Catalog::parse("{\"0\": {\"name\": \"x\"}}").is_err());
        assert!(Catalog::parse("not json").is_err());
    }

    #[test]
    fn bundled_catalog_parses() {
        let catalog = Catalog::parse(include_str!("../assets/nfts.json")).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.items().iter().all(|item| !item.name.is_empty()));
        assert!(catalog
            .items()
            .iter()
            .all(|item| item.image_link.starts_with("https://")));
    }
}
