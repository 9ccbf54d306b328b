//! Provider catalog operations: reviews, portfolios, services, packages
//!
//! Portfolios, services and packages are keyed maps (provider id to list);
//! operations on one provider never touch another's entries.

use crate::backend::Backend;
use crate::ids::next_id;
use eventide_core::error::{Error, Result};
use eventide_core::records::{
    EventPackage, PortfolioItem, Review, ServiceOffering, User, VendorCard,
};
use eventide_core::time::now_rfc3339;
use eventide_core::types::{Channel, Collection};
use serde_json::json;
use std::collections::HashMap;

impl Backend {
    // ========================================================================
    // Reviews
    // ========================================================================

    /// Leave a review for a provider as the signed-in client
    ///
    /// Recomputes the provider's marketplace rating and publishes
    /// `VENDOR_UPDATE`.
    pub fn add_review(&self, provider_id: &str, rating: u8, text: &str) -> Result<Review> {
        let author: User = self.require_session()?;
        if !(1..=5).contains(&rating) {
            return Err(Error::InvalidOperation(format!(
                "rating out of range: {rating}"
            )));
        }
        let review = Review {
            id: next_id("review"),
            provider_id: provider_id.to_string(),
            client_id: author.id,
            client_name: author.name,
            client_avatar: author.avatar,
            rating,
            text: text.to_string(),
            timestamp: now_rfc3339(),
        };
        let mut reviews: Vec<Review> = self.store.get(Collection::Reviews, Vec::new())?;
        reviews.insert(0, review.clone());
        self.store.set(Collection::Reviews, &reviews)?;
        self.refresh_card_rating(provider_id, &reviews)?;
        self.publish(Channel::Vendor, &json!({ "providerId": provider_id }));
        Ok(review)
    }

    /// Reviews for one provider, newest first
    pub fn reviews(&self, provider_id: &str) -> Result<Vec<Review>> {
        let reviews: Vec<Review> = self.store.get(Collection::Reviews, Vec::new())?;
        let mut mine: Vec<Review> = reviews
            .into_iter()
            .filter(|r| r.provider_id == provider_id)
            .collect();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(mine)
    }

    fn refresh_card_rating(&self, provider_id: &str, reviews: &[Review]) -> Result<()> {
        let mine: Vec<&Review> = reviews
            .iter()
            .filter(|r| r.provider_id == provider_id)
            .collect();
        if mine.is_empty() {
            return Ok(());
        }
        let rating =
            mine.iter().map(|r| u32::from(r.rating)).sum::<u32>() as f32 / mine.len() as f32;
        let mut cards: Vec<VendorCard> = self.store.get(Collection::Vendors, Vec::new())?;
        if let Some(card) = cards.iter_mut().find(|c| c.id == provider_id) {
            card.rating = rating;
            self.store.set(Collection::Vendors, &cards)?;
        }
        Ok(())
    }

    // ========================================================================
    // Portfolio
    // ========================================================================

    /// Prepend an item to a provider's portfolio; publishes `CLIENT_UPDATE`
    pub fn add_portfolio_item(
        &self,
        provider_id: &str,
        media_type: &str,
        media_url: &str,
        title: Option<String>,
    ) -> Result<PortfolioItem> {
        let item = PortfolioItem {
            id: next_id("portfolio"),
            album_id: "default".to_string(),
            media_type: media_type.to_string(),
            media_url: media_url.to_string(),
            title,
        };
        let mut portfolios: HashMap<String, Vec<PortfolioItem>> =
            self.store.get(Collection::Portfolios, HashMap::new())?;
        portfolios
            .entry(provider_id.to_string())
            .or_default()
            .insert(0, item.clone());
        self.store.set(Collection::Portfolios, &portfolios)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(item)
    }

    /// One provider's portfolio, newest first
    pub fn portfolio(&self, provider_id: &str) -> Result<Vec<PortfolioItem>> {
        let portfolios: HashMap<String, Vec<PortfolioItem>> =
            self.store.get(Collection::Portfolios, HashMap::new())?;
        Ok(portfolios.get(provider_id).cloned().unwrap_or_default())
    }

    /// Remove one portfolio item
    pub fn delete_portfolio_item(&self, provider_id: &str, item_id: &str) -> Result<()> {
        let mut portfolios: HashMap<String, Vec<PortfolioItem>> =
            self.store.get(Collection::Portfolios, HashMap::new())?;
        let items = portfolios
            .get_mut(provider_id)
            .ok_or_else(|| Error::not_found("portfolio", provider_id))?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        if items.len() == before {
            return Err(Error::not_found("portfolio item", item_id));
        }
        self.store.set(Collection::Portfolios, &portfolios)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(())
    }

    // ========================================================================
    // Services
    // ========================================================================

    /// One provider's services
    pub fn services(&self, provider_id: &str) -> Result<Vec<ServiceOffering>> {
        let services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        Ok(services.get(provider_id).cloned().unwrap_or_default())
    }

    /// Every service across providers, with `provider_id` filled in
    pub fn all_services(&self) -> Result<Vec<ServiceOffering>> {
        let services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        let mut flat = Vec::new();
        for (provider_id, offerings) in services {
            for mut service in offerings {
                service.provider_id = Some(provider_id.clone());
                flat.push(service);
            }
        }
        flat.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(flat)
    }

    /// Add a service to a provider's listing; publishes `CLIENT_UPDATE`
    pub fn add_service(
        &self,
        provider_id: &str,
        title: &str,
        price: &str,
        description: &str,
    ) -> Result<ServiceOffering> {
        let service = ServiceOffering {
            id: next_id("service"),
            title: title.to_string(),
            price: price.to_string(),
            description: description.to_string(),
            provider_id: None,
        };
        let mut services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        services
            .entry(provider_id.to_string())
            .or_default()
            .push(service.clone());
        self.store.set(Collection::Services, &services)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(service)
    }

    /// Replace one of a provider's services
    pub fn update_service(&self, provider_id: &str, service: ServiceOffering) -> Result<()> {
        let mut services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        let mine = services
            .get_mut(provider_id)
            .ok_or_else(|| Error::not_found("service", service.id.clone()))?;
        let slot = mine
            .iter_mut()
            .find(|s| s.id == service.id)
            .ok_or_else(|| Error::not_found("service", service.id.clone()))?;
        *slot = service;
        self.store.set(Collection::Services, &services)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(())
    }

    /// Remove one of a provider's services
    pub fn delete_service(&self, provider_id: &str, service_id: &str) -> Result<()> {
        let mut services: HashMap<String, Vec<ServiceOffering>> =
            self.store.get(Collection::Services, HashMap::new())?;
        let mine = services
            .get_mut(provider_id)
            .ok_or_else(|| Error::not_found("service", service_id))?;
        let before = mine.len();
        mine.retain(|s| s.id != service_id);
        if mine.len() == before {
            return Err(Error::not_found("service", service_id));
        }
        self.store.set(Collection::Services, &services)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(())
    }

    // ========================================================================
    // Packages
    // ========================================================================

    /// One provider's packages
    pub fn packages(&self, provider_id: &str) -> Result<Vec<EventPackage>> {
        let packages: HashMap<String, Vec<EventPackage>> =
            self.store.get(Collection::Packages, HashMap::new())?;
        Ok(packages.get(provider_id).cloned().unwrap_or_default())
    }

    /// Add a package to a provider's listing; publishes `CLIENT_UPDATE`
    pub fn add_package(&self, provider_id: &str, package: EventPackage) -> Result<EventPackage> {
        let package = EventPackage {
            id: if package.id.is_empty() {
                next_id("package")
            } else {
                package.id
            },
            ..package
        };
        let mut packages: HashMap<String, Vec<EventPackage>> =
            self.store.get(Collection::Packages, HashMap::new())?;
        packages
            .entry(provider_id.to_string())
            .or_default()
            .push(package.clone());
        self.store.set(Collection::Packages, &packages)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(package)
    }

    /// Remove one of a provider's packages
    pub fn delete_package(&self, provider_id: &str, package_id: &str) -> Result<()> {
        let mut packages: HashMap<String, Vec<EventPackage>> =
            self.store.get(Collection::Packages, HashMap::new())?;
        let mine = packages
            .get_mut(provider_id)
            .ok_or_else(|| Error::not_found("package", package_id))?;
        let before = mine.len();
        mine.retain(|p| p.id != package_id);
        if mine.len() == before {
            return Err(Error::not_found("package", package_id));
        }
        self.store.set(Collection::Packages, &packages)?;
        self.publish(Channel::Client, &json!({ "providerId": provider_id }));
        Ok(())
    }
}
