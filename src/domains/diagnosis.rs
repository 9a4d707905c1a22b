use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{KisanAiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DiagnosisResult {
    pub disease: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    pub severity: Severity,
    pub description: String,
    pub treatment: Vec<String>,
}

struct CatalogEntry {
    disease: &'static str,
    confidence: f64,
    severity: Severity,
    description: &'static str,
    treatment: &'static [&'static str],
}

const CATALOG: [CatalogEntry; 3] = [
    CatalogEntry {
        disease: "Leaf Rust",
        confidence: 92.5,
        severity: Severity::Medium,
        description: "Leaf rust is a fungal disease that affects wheat and other cereal crops. It appears as orange-brown pustules on leaves and can reduce crop yield significantly if left untreated.",
        treatment: &[
            "Apply fungicide containing propiconazole or tebuconazole",
            "Ensure proper spacing between plants for better air circulation",
            "Remove and destroy infected plant debris",
            "Consider rust-resistant varieties for future planting",
        ],
    },
    CatalogEntry {
        disease: "Powdery Mildew",
        confidence: 88.7,
        severity: Severity::Low,
        description: "Powdery mildew is a fungal disease that appears as white powdery spots on leaves and stems. It thrives in humid conditions with moderate temperatures and can affect a wide range of crops.",
        treatment: &[
            "Apply sulfur-based fungicide or neem oil spray",
            "Improve air circulation around plants",
            "Avoid overhead watering to keep foliage dry",
            "Remove and destroy severely infected plant parts",
        ],
    },
    CatalogEntry {
        disease: "Bacterial Leaf Blight",
        confidence: 95.2,
        severity: Severity::High,
        description: "Bacterial leaf blight is a serious disease affecting rice crops. It causes water-soaked lesions that turn yellow to white as they mature, and can lead to significant yield losses.",
        treatment: &[
            "Use copper-based bactericides as a preventive measure",
            "Practice crop rotation with non-host crops",
            "Use disease-free seeds and resistant varieties",
            "Avoid excessive nitrogen fertilization",
            "Maintain proper field drainage",
        ],
    },
];

impl From<&CatalogEntry> for DiagnosisResult {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            disease: entry.disease.to_string(),
            confidence: entry.confidence,
            severity: entry.severity,
            description: entry.description.to_string(),
            treatment: entry.treatment.iter().map(|s| s.to_string()).collect(),
        }
    }
}

pub fn catalog_len() -> usize {
    CATALOG.len()
}

/// The catalog entry at `index`, wrapping out-of-range indices.
pub fn catalog_entry(index: usize) -> DiagnosisResult {
    DiagnosisResult::from(&CATALOG[index % CATALOG.len()])
}

pub fn catalog() -> Vec<DiagnosisResult> {
    CATALOG.iter().map(DiagnosisResult::from).collect()
}

/// An uploaded crop photo. Only ever rendered back as a preview.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Returns `None` when `mime` is not an image type.
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return None;
        }
        Some(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let Some(mime) = image_mime_for(path) else {
            tracing::warn!(path = %path.to_string_lossy(), "not an image file, ignoring");
            return Ok(None);
        };
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            KisanAiError::Storage(format!("failed to read {}: {e}", path.to_string_lossy()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn image_mime_for(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .iter()
        .find(|mime| mime.type_() == mime_guess::mime::IMAGE)
        .map(|mime| mime.essence_str().to_string())
}
