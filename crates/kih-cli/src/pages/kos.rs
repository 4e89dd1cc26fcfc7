use kih_core::entities::KosHomestay;
use kih_core::filter::{
    Criteria, KosCriteria, facility_options, gender_options, kos_type_options,
};
use kih_core::listing::ListingView;
use kih_db::{DocumentStore, PortalService};
use serde::Serialize;

use super::{DetailView, listing_page};

/// Price buckets offered by the filter panel.
pub const PRICE_BUCKETS: &[&str] = &["<500000", "500000-1000000", ">1000000"];

#[derive(Debug, Serialize)]
pub struct KosOptions {
    pub types: Vec<String>,
    pub genders: Vec<String>,
    pub facilities: Vec<String>,
    pub price_buckets: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct KosListPage {
    pub heading: &'static str,
    pub search_placeholder: &'static str,
    pub options: KosOptions,
    pub listing: ListingView<KosHomestay>,
}

#[derive(Debug, Serialize)]
pub struct KosDetailPage {
    pub listing: DetailView<KosHomestay>,
}

fn options_for(listings: &[KosHomestay]) -> KosOptions {
    KosOptions {
        types: kos_type_options(listings),
        genders: gender_options(listings),
        facilities: facility_options(listings),
        price_buckets: PRICE_BUCKETS,
    }
}

pub async fn list<S: DocumentStore>(
    service: &PortalService<S>,
    criteria: &KosCriteria,
    limit: usize,
) -> KosListPage {
    let (options, listing) = match service.list_kos().await {
        Ok(listings) => (
            options_for(&listings),
            listing_page(criteria.apply(&listings), limit),
        ),
        Err(err) => (
            options_for(&[]),
            ListingView::Failed {
                message: format!("Gagal memuat data kos & homestay: {err}"),
            },
        ),
    };

    KosListPage {
        heading: "Kos & Homestay di Pare",
        search_placeholder: "Cari kos/homestay (nama, deskripsi, alamat)...",
        options,
        listing,
    }
}

pub async fn detail<S: DocumentStore>(service: &PortalService<S>, id: &str) -> KosDetailPage {
    KosDetailPage {
        listing: DetailView::from_fetch(
            service.get_kos(id).await,
            "Kos/homestay tidak ditemukan.",
            "Gagal memuat data kos & homestay",
        ),
    }
}

#[cfg(test)]
mod tests {
    use kih_core::enums::{GenderPreference, KosType};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pages::test_support::service;

    fn listing(name: &str, price: f64, kind: KosType) -> KosHomestay {
        KosHomestay {
            id: String::new(),
            name: name.into(),
            address: "Tulungrejo, Pare".into(),
            description: String::new(),
            owner_contact: "0812".into(),
            price_per_month: price,
            facilities: vec!["WiFi".into()],
            photos: vec![],
            is_verified: false,
            distance_to_center: 0.5,
            kind,
            gender_preference: Some(GenderPreference::Female),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn min_price_keeps_homestay_indah() {
        let service = service().await;
        service
            .create_kos(&listing("Kos Melati", 400_000.0, KosType::Kos))
            .await
            .unwrap();
        service
            .create_kos(&listing("Homestay Indah", 900_000.0, KosType::Homestay))
            .await
            .unwrap();

        let criteria = KosCriteria::from_pairs([("minPrice", "500000")]);
        let page = list(&service, &criteria, 20).await;

        let names: Vec<_> = page.listing.items().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["Homestay Indah"]);
        assert_eq!(page.options.types, vec!["All", "homestay", "kos"]);
        assert_eq!(page.options.genders, vec!["All", "female"]);
        assert_eq!(page.options.facilities, vec!["WiFi"]);
    }

    #[tokio::test]
    async fn empty_store_is_no_results() {
        let service = service().await;
        let page = list(&service, &KosCriteria::default(), 20).await;
        assert_eq!(page.listing, ListingView::NoResults);
        assert_eq!(page.options.types, vec!["All"]);
    }

    #[tokio::test]
    async fn row_limit_never_hides_that_records_matched() {
        let service = service().await;
        for n in 0..25 {
            service
                .create_kos(&listing(&format!("Kos {n}"), 450_000.0, KosType::Kos))
                .await
                .unwrap();
        }

        let page = list(&service, &KosCriteria::default(), 20).await;
        assert_eq!(page.listing.items().len(), 20);
        assert_eq!(page.listing.total(), 25);

        let page = list(&service, &KosCriteria::default(), 0).await;
        assert!(page.listing.items().is_empty());
        assert_eq!(page.listing.total(), 25);
        assert_eq!(page.listing.status_message(), None);
        assert_ne!(page.listing, ListingView::NoResults);
    }
}
