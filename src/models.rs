use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// `{ "data": ... }` wrapper used by every resource endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Which side of the text the about image sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Image on the left
    #[default]
    Kiri,
    /// Image on the right
    Kanan,
}

impl Layout {
    pub fn as_str(&self) -> &str {
        match self {
            Layout::Kiri => "kiri",
            Layout::Kanan => "kanan",
        }
    }

    pub fn describe(&self) -> &str {
        match self {
            Layout::Kiri => "image left",
            Layout::Kanan => "image right",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kiri" | "left" => Ok(Layout::Kiri),
            "kanan" | "right" => Ok(Layout::Kanan),
            other => Err(format!("Unsupported layout: {}. Supported layouts: kiri, kanan", other)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// About page section
#[derive(Debug, Clone, Deserialize)]
pub struct AboutRecord {
    pub id: u64,
    #[serde(default)]
    pub judul: String,
    #[serde(default)]
    pub deskripsi: String,
    /// Raw layout value; see [`AboutRecord::layout`]
    #[serde(default)]
    pub layout: Option<String>,
    /// Image file name, relative to the image base URL
    #[serde(default)]
    pub gambar: Option<String>,
}

impl AboutRecord {
    /// Layout, falling back to [`Layout::Kiri`] when missing or unknown
    pub fn layout(&self) -> Layout {
        self.layout
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Recipe as shown on the guest detail page
#[derive(Debug, Clone, Deserialize)]
pub struct Resep {
    #[serde(default)]
    pub id: Option<u64>,
    pub judul: String,
    /// Cooking time, e.g. "45 menit"
    #[serde(default, deserialize_with = "string_or_number")]
    pub waktu: String,
    /// Servings, e.g. "4 orang"
    #[serde(default, deserialize_with = "string_or_number")]
    pub porsi: String,
    /// Ingredients as an HTML fragment
    #[serde(default)]
    pub bahan: String,
    /// Steps as an HTML fragment
    #[serde(default)]
    pub cara_membuat: String,
    #[serde(default)]
    pub gambar: Option<String>,
}

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login reply. The token arrives as `token` or, from some backends, as
/// `access_token`; `token` wins when both are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawLoginResponse")]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawLoginResponse {
    token: Option<String>,
    access_token: Option<String>,
    #[serde(default)]
    user: Option<serde_json::Value>,
}

impl TryFrom<RawLoginResponse> for LoginResponse {
    type Error = String;

    fn try_from(raw: RawLoginResponse) -> Result<Self, Self::Error> {
        let token = raw
            .token
            .or(raw.access_token)
            .ok_or_else(|| "login response has no token".to_string())?;
        Ok(LoginResponse { token, user: raw.user })
    }
}

/// Full URL of an uploaded image
pub fn image_url(image_base_url: &str, gambar: &str) -> String {
    format!("{}{}", image_base_url, gambar)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}
