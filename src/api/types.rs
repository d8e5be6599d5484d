// Portal API response types.
// Defines structs for deserializing broker portal REST API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Insurance partner shown in the partner catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    pub id: u64,
    pub nom: String,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub actif: bool,
}

/// Guarantee amount tier for an insurance product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssuranceMontant {
    pub id: u64,
    pub produit: String,
    pub montant: f64,
    pub devise: String,
}

/// CMS content block keyed by page slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CmsContent {
    pub cle: String,
    pub contenu: String,
    pub updated_at: DateTime<Utc>,
}

/// Document in the broker document library.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: u64,
    pub titre: String,
    pub categorie: Option<String>,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Validation status of a training record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationStatut {
    EnAttente,
    Validee,
    Refusee,
    #[serde(other)]
    Unknown,
}

/// Training session record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Formation {
    pub id: u64,
    pub titre: String,
    pub date: DateTime<Utc>,
    pub duree_heures: Option<f64>,
    pub statut: FormationStatut,
}

/// Notification for a broker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub titre: String,
    pub message: String,
    #[serde(default)]
    pub lu: bool,
    pub created_at: DateTime<Utc>,
}

/// Paginated list response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub total_count: u64,
    #[serde(alias = "documents", alias = "notifications", alias = "formations")]
    pub items: Vec<T>,
}
