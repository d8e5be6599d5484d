// Cache key namespace convention.
// Screens must share these constants so cache entries are reused
// instead of refetched per consumer.

/// Partner (insurer) catalog.
pub const PARTNERS: &str = "partners";

/// Guarantee amounts per insurance product.
pub const ASSURANCE_MONTANTS: &str = "assurances_montants";

/// Home page CMS content.
pub const CMS_ACCUEIL: &str = "cms_accueil";

/// Document library, first page.
pub const DOCUMENTS: &str = "documents";

/// Training catalog.
pub const FORMATIONS: &str = "formations";

/// Key for a broker's notification list.
pub fn notifications_for(user_id: u64) -> String {
    format!("notifications_{user_id}")
}

/// Key for an arbitrary CMS page slug.
pub fn cms_page(slug: &str) -> String {
    format!("cms_{slug}")
}
