// Portal API endpoint functions.
// Typed methods for fetching broker portal data; these are the fetch
// functions screens bind to cached queries.

use crate::error::Result;

use super::client::PortalClient;
use super::types::{
    AssuranceMontant, CmsContent, Document, Formation, ListResponse, Notification, Partner,
};

impl PortalClient {
    /// Get the partner (insurer) catalog.
    pub async fn get_partners(&self) -> Result<Vec<Partner>> {
        let response = self.get("/partners").await?;
        let partners: Vec<Partner> = response.json().await?;
        Ok(partners)
    }

    /// Get guarantee amounts for all insurance products.
    pub async fn get_assurance_montants(&self) -> Result<Vec<AssuranceMontant>> {
        let response = self.get("/assurances/montants").await?;
        let montants: Vec<AssuranceMontant> = response.json().await?;
        Ok(montants)
    }

    /// Get a CMS content block by page slug.
    pub async fn get_cms_content(&self, cle: &str) -> Result<CmsContent> {
        let response = self.get(&format!("/cms/{}", cle)).await?;
        let content: CmsContent = response.json().await?;
        Ok(content)
    }

    /// Get a page of the document library.
    pub async fn get_documents(&self, page: u32, per_page: u32) -> Result<(Vec<Document>, u64)> {
        let params = [
            ("page", &page.to_string()),
            ("per_page", &per_page.to_string()),
        ];
        let response = self.get_with_params("/documents", &params).await?;
        let wrapper: ListResponse<Document> = response.json().await?;
        Ok((wrapper.items, wrapper.total_count))
    }

    /// Get the authenticated broker's training records.
    pub async fn get_formations(&self) -> Result<Vec<Formation>> {
        let response = self.get("/formations").await?;
        let formations: Vec<Formation> = response.json().await?;
        Ok(formations)
    }

    /// Get a page of the authenticated broker's notifications.
    pub async fn get_notifications(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<(Vec<Notification>, u64)> {
        let params = [
            ("page", &page.to_string()),
            ("per_page", &per_page.to_string()),
        ];
        let response = self.get_with_params("/notifications", &params).await?;
        let wrapper: ListResponse<Notification> = response.json().await?;
        Ok((wrapper.items, wrapper.total_count))
    }
}
