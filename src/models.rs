//! Wire types for the ashram management API.
//!
//! Field names and `_id` renames match the backend's JSON exactly; optional
//! fields carry serde defaults so a sparse server response still
//! deserializes.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::sync::ListRecord;

/// Room availability state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "occupied" => Ok(RoomStatus::Occupied),
            "maintenance" => Ok(RoomStatus::Maintenance),
            other => Err(format!("unknown room status '{other}'")),
        }
    }
}

/// A bookable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// URLs of already-uploaded images.
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub max_guests: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub status: RoomStatus,
}

impl ListRecord for Room {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn matches_status(&self, status: &str) -> bool {
        self.status.as_str() == status
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomStats {
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub occupied_rooms: u32,
    pub maintenance_rooms: u32,
}

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked-in",
            BookingStatus::CheckedOut => "checked-out",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Human form with the hyphen dropped, as the booking cards render it.
    pub fn label(&self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "checked-in" => Ok(BookingStatus::CheckedIn),
            "checked-out" => Ok(BookingStatus::CheckedOut),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{other}'")),
        }
    }
}

/// Embedded room reference on a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
}

/// A guest booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub guest_phone: String,
    #[serde(default)]
    pub guests: u32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub total_price: f64,
    pub status: BookingStatus,
    #[serde(default)]
    pub room: Option<RoomRef>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ListRecord for Booking {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.guest_name.to_lowercase().contains(needle)
            || self.guest_email.to_lowercase().contains(needle)
            || self
                .room
                .as_ref()
                .is_some_and(|room| room.name.to_lowercase().contains(needle))
            || self.id.to_lowercase().contains(needle)
    }

    fn matches_status(&self, status: &str) -> bool {
        self.status.as_str() == status
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingStats {
    pub total_bookings: u32,
    pub pending_bookings: u32,
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminRole {
    #[default]
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super-admin",
        }
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "super-admin" => Ok(AdminRole::SuperAdmin),
            other => Err(format!("unknown admin role '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    Active,
    #[default]
    Pending,
    Inactive,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Pending => "pending",
            AdminStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for AdminStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AdminStatus::Active),
            "pending" => Ok(AdminStatus::Pending),
            "inactive" => Ok(AdminStatus::Inactive),
            other => Err(format!("unknown admin status '{other}'")),
        }
    }
}

/// A dashboard operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default)]
    pub status: AdminStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListRecord for AdminUser {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }

    fn matches_status(&self, status: &str) -> bool {
        self.status.as_str() == status
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminStats {
    pub total_admins: u32,
}

/// Payload for inviting a new admin (single or bulk).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub status: AdminStatus,
}

/// A donation category offered to visitors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationCategory {
    #[serde(rename = "_id")]
    pub id: String,
    /// Devanagari title shown first on the public site.
    pub title: String,
    pub english_title: String,
    #[serde(default)]
    pub description: String,
    /// Suggested amounts in rupees, ascending.
    #[serde(default)]
    pub suggested: Vec<u64>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ListRecord for DonationCategory {
    fn id(&self) -> &str {
        &self.id
    }

    fn matches_query(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.english_title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    fn matches_status(&self, status: &str) -> bool {
        match status {
            "active" => self.is_active,
            "inactive" => !self.is_active,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationStats {
    pub total_donations: u32,
    pub active_donations: u32,
    pub inactive_donations: u32,
    pub total_suggested_amounts: u32,
    pub total_possible_combinations: u32,
}

/// Body for create/update of a donation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationPayload {
    pub title: String,
    pub english_title: String,
    pub description: String,
    pub suggested: Vec<u64>,
    pub icon: String,
    pub color: String,
}

/// A newly attached image awaiting upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Multipart body for create/update of a room: text fields plus one binary
/// part per newly attached image. Already-uploaded images stay server-side.
#[derive(Debug, Clone)]
pub struct RoomPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discount: f64,
    pub beds: u32,
    pub max_guests: u32,
    pub amenities: Vec<String>,
    pub status: RoomStatus,
    pub images: Vec<ImageFile>,
}

/// Admin profile returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<AdminRole>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// Overview numbers composed from the per-resource stats endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardStats {
    pub total_rooms: u32,
    pub available_rooms: u32,
    pub total_bookings: u32,
    pub pending_bookings: u32,
    pub total_admins: u32,
    pub revenue: f64,
}

/// Pull the row array out of a list response.
///
/// Endpoints disagree on the envelope (`{rooms: [...]}` vs `{data: [...]}`),
/// so both shapes are accepted: the resource key wins, `data` is the
/// fallback, and a missing field means an empty list. A bare array is taken
/// as-is.
pub fn extract_list<T: DeserializeOwned>(
    body: serde_json::Value,
    resource: &str,
) -> Result<Vec<T>, serde_json::Error> {
    let rows = match body {
        serde_json::Value::Object(mut map) => map
            .remove(resource)
            .or_else(|| map.remove("data"))
            .unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
        other => other,
    };
    serde_json::from_value(rows)
}
