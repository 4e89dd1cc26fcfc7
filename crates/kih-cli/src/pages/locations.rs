use kih_core::entities::Location;
use kih_core::filter::{Criteria, LocationCriteria, category_options};
use kih_core::listing::ListingView;
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use super::listing_page;

/// Map center over Pare, Kediri.
pub const MAP_CENTER: [f64; 2] = [-7.7569, 112.1830];
pub const MAP_ZOOM: u8 = 15;
const SUMMARY_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub position: [f64; 2],
    pub summary: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Serialize)]
pub struct LocationsPage {
    pub heading: &'static str,
    pub categories: Vec<String>,
    pub map: MapView,
    pub listing: ListingView<Location>,
}

/// Only locations with both coordinates get a marker.
pub fn markers(locations: &[Location]) -> Vec<Marker> {
    locations
        .iter()
        .filter_map(|location| {
            let (lat, lng) = location.coordinates()?;
            Some(Marker {
                id: location.id.clone(),
                name: location.name.clone(),
                position: [lat, lng],
                summary: summarize(&location.description),
                address: location.address.clone(),
                google_maps_link: location.google_maps_link.clone(),
            })
        })
        .collect()
}

fn summarize(description: &str) -> String {
    if description.chars().count() <= SUMMARY_CHARS {
        return description.to_string();
    }
    let mut summary: String = description.chars().take(SUMMARY_CHARS).collect();
    summary.push_str("...");
    summary
}

pub async fn page<S: DocumentStore>(
    service: &PortalService<S>,
    criteria: &LocationCriteria,
    limit: usize,
) -> LocationsPage {
    let (categories, listing) = match service.list_locations(None).await {
        Ok(locations) => (
            category_options(&locations),
            listing_page(criteria.apply(&locations), limit),
        ),
        Err(err) => (
            category_options(&[]),
            ListingView::Failed {
                message: format!("Gagal memuat lokasi: {err}"),
            },
        ),
    };

    LocationsPage {
        heading: "Lokasi Penting di Pare",
        categories,
        map: MapView {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            markers: markers(listing.items()),
        },
        listing,
    }
}

#[cfg(test)]
mod tests {
    use kih_core::enums::LocationCategory;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::test_support::service;

    fn location(name: &str, category: LocationCategory, coords: Option<(f64, f64)>) -> Location {
        Location {
            id: String::new(),
            name: name.into(),
            description: "x".repeat(200),
            address: "Jl. Anyelir".into(),
            category,
            google_maps_link: None,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            photo_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn markers_skip_missing_coordinates_and_truncate() {
        let list = vec![
            location("ATM BRI", LocationCategory::Atm, Some((-7.75, 112.18))),
            location("Warung", LocationCategory::Restaurant, None),
        ];
        let markers = markers(&list);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "ATM BRI");
        assert_eq!(markers[0].summary.chars().count(), SUMMARY_CHARS + 3);
        assert!(markers[0].summary.ends_with("..."));
    }

    #[tokio::test]
    async fn category_filter_narrows_listing_and_map() {
        let service = service().await;
        service
            .create_location(&location("ATM BRI", LocationCategory::Atm, Some((-7.75, 112.18))))
            .await
            .unwrap();
        service
            .create_location(&location("RS Amelia", LocationCategory::Hospital, Some((-7.76, 112.19))))
            .await
            .unwrap();

        let criteria = LocationCriteria::from_pairs([("category", "hospital")]);
        let page = page(&service, &criteria, 20).await;

        assert_eq!(page.categories, vec!["All", "atm", "hospital"]);
        assert_eq!(page.listing.items().len(), 1);
        assert_eq!(page.map.markers.len(), 1);
        assert_eq!(page.map.markers[0].name, "RS Amelia");
    }
}
