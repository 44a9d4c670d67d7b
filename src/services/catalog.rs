//! Feed catalog service (units, categories, items)

use crate::{
    error::AppResult,
    models::feed::{CreateFeedItem, FeedCategory, FeedItem, FeedUnit, UpdateFeedItem},
    repository::Repository,
    services::validate_payload,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_units(&self) -> AppResult<Vec<FeedUnit>> {
        self.repository.feeds.list_units().await
    }

    pub async fn list_feed_categories(&self) -> AppResult<Vec<FeedCategory>> {
        self.repository.feeds.list_feed_categories().await
    }

    pub async fn list_feed_items(&self) -> AppResult<Vec<FeedItem>> {
        self.repository.feeds.list_items().await
    }

    pub async fn get_feed_item(&self, id: i32) -> AppResult<FeedItem> {
        self.repository.feeds.get_item(id).await
    }

    /// Create a feed item; every referenced entity must exist before the
    /// write
    pub async fn create_feed_item(&self, data: &CreateFeedItem) -> AppResult<FeedItem> {
        validate_payload(data)?;
        self.repository.feeds.get_unit(data.unit_id).await?;
        self.repository
            .feeds
            .get_feed_category(data.feed_category_id)
            .await?;
        self.repository
            .animals
            .get_category(data.animal_category_id)
            .await?;
        self.repository.feeds.create_item(data).await
    }

    /// Update a feed item, resolving any newly referenced entities first
    pub async fn update_feed_item(&self, id: i32, data: &UpdateFeedItem) -> AppResult<FeedItem> {
        validate_payload(data)?;
        if let Some(unit_id) = data.unit_id {
            self.repository.feeds.get_unit(unit_id).await?;
        }
        if let Some(category_id) = data.feed_category_id {
            self.repository.feeds.get_feed_category(category_id).await?;
        }
        if let Some(category_id) = data.animal_category_id {
            self.repository.animals.get_category(category_id).await?;
        }
        self.repository.feeds.update_item(id, data).await
    }
}
