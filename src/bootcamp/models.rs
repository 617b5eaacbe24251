use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use utoipa::ToSchema;

/// Difficulty level of a bootcamp.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => write!(f, "Beginner"),
            Level::Intermediate => write!(f, "Intermediate"),
            Level::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Body of `POST /api/generate-bootcamp`.
///
/// Every field is optional at the deserialization layer so that missing keys
/// reach the handler's own presence check instead of failing in the extractor.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateBootcampRequest {
    #[schema(example = "Web Development Bootcamp")]
    pub name: Option<String>,
    #[schema(example = 8)]
    pub duration: Option<u32>,
    pub level: Option<Level>,
    #[schema(example = "Learn full-stack web development from scratch")]
    pub description: Option<String>,
    #[schema(example = "Focus on React and REST APIs")]
    pub additional_context: Option<String>,
}

/// Identity block attached to every generated document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Identitas {
    #[schema(example = "Web Development Bootcamp")]
    pub nama: String,
    #[schema(example = "BC-1754550000000")]
    pub kode: String,
    #[schema(example = 8)]
    pub durasi: u32,
    #[schema(example = "Online")]
    pub mode: String,
    pub level: Level,
    #[schema(example = 25)]
    pub kapasitas: u32,
}

const DEFAULT_MODE: &str = "Online";
const DEFAULT_KAPASITAS: u32 = 25;

impl Identitas {
    /// Build the identity block for a freshly generated bootcamp. The code is
    /// derived from the current time; delivery mode and capacity are defaults.
    pub fn new(nama: impl Into<String>, durasi: u32, level: Level) -> Self {
        Self {
            nama: nama.into(),
            kode: format!("BC-{}", Utc::now().timestamp_millis()),
            durasi,
            mode: DEFAULT_MODE.to_string(),
            level,
            kapasitas: DEFAULT_KAPASITAS,
        }
    }
}

/// A curriculum document as returned by the generate endpoint.
///
/// The generator output is open-ended, so everything beyond the identity
/// block and bookkeeping fields is kept in a flattened map.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct BootcampDocument {
    #[schema(example = "boot-1754550000000")]
    pub id: String,
    pub identitas: Identitas,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub content: Map<String, Value>,
    #[serde(rename = "createdAt")]
    #[schema(example = "2026-08-07T14:30:00+00:00")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    #[schema(example = "2026-08-07T14:30:00+00:00")]
    pub updated_at: String,
}

impl BootcampDocument {
    /// Wrap generator output with identity metadata, an id and timestamps.
    pub fn assemble(content: Map<String, Value>, identitas: Identitas) -> Self {
        let now = Utc::now();
        Self {
            id: format!("boot-{}", now.timestamp_millis()),
            identitas,
            content,
            created_at: now.to_rfc3339(),
            updated_at: now.to_rfc3339(),
        }
    }
}

/// Success envelope of the generate endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    pub data: BootcampDocument,
}

impl GenerateResponse {
    pub fn new(data: BootcampDocument) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
