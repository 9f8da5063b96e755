use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};
use wayfare_domain::normalize::{
    normalize_booking, normalize_complaint, normalize_customer, normalize_partner,
};
use wayfare_domain::{
    Booking, Complaint, Customer, DocumentSource, FieldFilter, Partner, ServiceCategory,
    SourceError,
};

/// Where each entity kind lives in the document store
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionLayout {
    /// Booking collections with the category assumed for their documents
    pub bookings: Vec<(String, Option<ServiceCategory>)>,
    pub partners: String,
    pub customers: String,
    pub complaints: String,
}

impl Default for CollectionLayout {
    fn default() -> Self {
        Self {
            bookings: vec![("bookings".to_string(), None)],
            partners: "partners".to_string(),
            customers: "customers".to_string(),
            complaints: "complaints".to_string(),
        }
    }
}

/// Normalized copy of everything the dashboards read, taken at `loaded_at`
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub bookings: Vec<Booking>,
    pub partners: Vec<Partner>,
    pub customers: Vec<Customer>,
    pub complaints: Vec<Complaint>,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn partner(&self, partner_id: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.id == partner_id)
    }
}

/// Bulk-fetches the configured collections and normalizes them
#[derive(Clone)]
pub struct SnapshotLoader {
    source: Arc<dyn DocumentSource>,
    layout: CollectionLayout,
}

impl SnapshotLoader {
    pub fn new(source: Arc<dyn DocumentSource>, layout: CollectionLayout) -> Self {
        Self { source, layout }
    }

    /// Load a full snapshot. The first failing collection aborts the load.
    pub async fn load(&self) -> Result<Snapshot, SourceError> {
        let bookings = self.load_bookings().await?;
        let partners = self.load_partners(None).await?;
        let customers = self.fetch(&self.layout.customers, None, normalize_customer).await?;
        let complaints = self.fetch(&self.layout.complaints, None, normalize_complaint).await?;

        info!(
            bookings = bookings.len(),
            partners = partners.len(),
            customers = customers.len(),
            complaints = complaints.len(),
            "Snapshot loaded"
        );

        Ok(Snapshot {
            bookings,
            partners,
            customers,
            complaints,
            loaded_at: Utc::now(),
        })
    }

    /// Every booking collection, concatenated in configuration order
    pub async fn load_bookings(&self) -> Result<Vec<Booking>, SourceError> {
        let mut bookings = Vec::new();
        for (collection, hint) in &self.layout.bookings {
            let hint = *hint;
            let docs = self
                .fetch(collection, None, |doc| normalize_booking(doc, hint))
                .await?;
            bookings.extend(docs);
        }
        Ok(bookings)
    }

    pub async fn load_partners(&self, filter: Option<&FieldFilter>) -> Result<Vec<Partner>, SourceError> {
        self.fetch(&self.layout.partners, filter, normalize_partner).await
    }

    async fn fetch<T, F>(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
        normalize: F,
    ) -> Result<Vec<T>, SourceError>
    where
        F: Fn(&wayfare_domain::Document) -> T,
    {
        let docs = self.source.fetch_all(collection, filter).await.map_err(|e| {
            error!("Failed to fetch collection {}: {}", collection, e);
            e
        })?;
        Ok(docs.iter().map(normalize).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_repo::MemoryStore;
    use serde_json::json;
    use wayfare_domain::BookingStatus;

    fn seeded() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::from_seed_value(json!({
                "carBookings": [
                    {"id": "v1", "amount": 300, "userId": "c1", "status": "confirmed"}
                ],
                "bookings": [
                    {"id": "h1", "bookingType": "hotel", "amount": "120.5", "customerId": "c2"}
                ],
                "partners": [
                    {"id": "p1", "companyName": "Alpha", "status": "approved"},
                    {"id": "p2", "companyName": "Beta", "status": "pending"}
                ],
                "customers": [{"id": "c1"}, {"id": "c2", "isActive": false}],
                "complaints": [{"id": "k1", "priority": "high"}]
            }))
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_load_normalizes_every_collection() {
        let layout = CollectionLayout {
            bookings: vec![
                ("carBookings".to_string(), Some(ServiceCategory::Vehicle)),
                ("bookings".to_string(), None),
            ],
            ..CollectionLayout::default()
        };
        let loader = SnapshotLoader::new(seeded(), layout);
        let snapshot = loader.load().await.unwrap();

        assert_eq!(snapshot.bookings.len(), 2);
        assert_eq!(snapshot.bookings[0].category, Some(ServiceCategory::Vehicle));
        assert_eq!(snapshot.bookings[0].status, BookingStatus::Confirmed);
        assert_eq!(snapshot.bookings[1].category, Some(ServiceCategory::Hotel));
        assert_eq!(snapshot.bookings[1].amount, 120.5);
        assert_eq!(snapshot.partners.len(), 2);
        assert_eq!(snapshot.partner("p2").unwrap().name, "Beta");
        assert_eq!(snapshot.customers.iter().filter(|c| c.is_active()).count(), 1);
        assert_eq!(snapshot.complaints.len(), 1);
    }

    #[tokio::test]
    async fn test_partner_filter_is_pushed_to_source() {
        let loader = SnapshotLoader::new(seeded(), CollectionLayout::default());
        let approved = loader
            .load_partners(Some(&FieldFilter::eq("status", "approved")))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, "p1");
    }

    #[tokio::test]
    async fn test_missing_collection_fails_in_strict_mode() {
        let store = Arc::new(MemoryStore::new().strict());
        let loader = SnapshotLoader::new(store, CollectionLayout::default());
        assert!(matches!(loader.load().await, Err(SourceError::UnknownCollection(_))));
    }
}
