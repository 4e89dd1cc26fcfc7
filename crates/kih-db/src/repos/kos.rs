//! Kos/homestay repository.

use kih_core::entities::KosHomestay;

use crate::document::{DocumentStore, Query};
use crate::error::DatabaseError;
use crate::helpers::to_body;
use crate::repos::{string_array, with_photo};
use crate::service::{PortalService, field_patch};
use crate::updates::kos::KosUpdate;

impl<S: DocumentStore> PortalService<S> {
    pub async fn list_kos(&self) -> Result<Vec<KosHomestay>, DatabaseError> {
        self.fetch_all(&Query::new()).await
    }

    pub async fn get_kos(&self, id: &str) -> Result<Option<KosHomestay>, DatabaseError> {
        self.fetch(id).await
    }

    pub async fn create_kos(&self, listing: &KosHomestay) -> Result<String, DatabaseError> {
        self.insert(listing).await
    }

    pub async fn update_kos(&self, id: &str, update: &KosUpdate) -> Result<(), DatabaseError> {
        self.patch::<KosHomestay>(id, to_body(update)?).await
    }

    pub async fn delete_kos(&self, id: &str) -> Result<(), DatabaseError> {
        self.remove::<KosHomestay>(id).await
    }

    pub async fn add_kos_photo(&self, id: &str, url: &str) -> Result<Vec<String>, DatabaseError> {
        let listing: KosHomestay = self.fetch_required(id).await?;
        let photos = with_photo(listing.photos, url);
        self.patch::<KosHomestay>(id, field_patch("photos", string_array(&photos)))
            .await?;
        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_service;
    use crate::updates::kos::KosUpdateBuilder;
    use kih_core::entities::KosHomestay;
    use kih_core::enums::{GenderPreference, KosType};
    use kih_core::filter::{Criteria, KosCriteria, PriceBound};
    use pretty_assertions::assert_eq;

    fn listing(name: &str, price: f64, kind: KosType) -> KosHomestay {
        KosHomestay {
            id: String::new(),
            name: name.into(),
            address: "Pare".into(),
            description: String::new(),
            owner_contact: "0812".into(),
            price_per_month: price,
            facilities: vec!["WiFi".into()],
            photos: vec![],
            is_verified: false,
            distance_to_center: 1.0,
            kind,
            gender_preference: Some(GenderPreference::Mixed),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn list_then_filter_by_min_price() {
        let svc = test_service().await;
        svc.create_kos(&listing("Kos Melati", 400_000.0, KosType::Kos))
            .await
            .unwrap();
        svc.create_kos(&listing("Homestay Indah", 900_000.0, KosType::Homestay))
            .await
            .unwrap();

        let all = svc.list_kos().await.unwrap();
        let criteria = KosCriteria {
            min_price: PriceBound::parse("500000"),
            ..KosCriteria::default()
        };
        let names: Vec<&str> = criteria
            .apply(&all)
            .into_iter()
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(names, vec!["Homestay Indah"]);
    }

    #[tokio::test]
    async fn update_can_clear_gender_preference() {
        let svc = test_service().await;
        let id = svc
            .create_kos(&listing("Kos Mawar", 600_000.0, KosType::Kos))
            .await
            .unwrap();
        let update = KosUpdateBuilder::new()
            .gender_preference(None)
            .price_per_month(650_000.0)
            .build();
        svc.update_kos(&id, &update).await.unwrap();

        let kos = svc.get_kos(&id).await.unwrap().unwrap();
        assert_eq!(kos.gender_preference, None);
        assert!((kos.price_per_month - 650_000.0).abs() < f64::EPSILON);
        assert_eq!(kos.kind, KosType::Kos);
    }
}
