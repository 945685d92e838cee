//! HTTP client for the ashram management API.
//!
//! [`AdminApi`] is the seam the pages are written against; [`HttpApi`] is
//! the reqwest implementation. Credentials are handed to the constructor
//! explicitly; nothing in here reads ambient storage.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::Error;
use crate::models::{
    AdminStats, AdminStatus, AdminUser, Booking, BookingStats, BookingStatus, DonationCategory,
    DonationPayload, DonationStats, LoginResponse, NewAdmin, Room, RoomPayload, RoomStats,
    extract_list,
};

const LOGIN_FALLBACK: &str = "An error occurred during login";

/// Bearer token attached to every authenticated request.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Everything the dashboard pages need from the backend.
#[allow(async_fn_in_trait)]
pub trait AdminApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error>;

    async fn list_rooms(&self) -> Result<Vec<Room>, Error>;
    async fn room_stats(&self) -> Result<RoomStats, Error>;
    async fn create_room(&self, payload: &RoomPayload) -> Result<(), Error>;
    async fn update_room(&self, id: &str, payload: &RoomPayload) -> Result<(), Error>;
    async fn delete_room(&self, id: &str) -> Result<(), Error>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, Error>;
    async fn booking_stats(&self) -> Result<BookingStats, Error>;
    async fn set_booking_status(&self, id: &str, status: BookingStatus) -> Result<(), Error>;

    async fn list_admins(&self) -> Result<Vec<AdminUser>, Error>;
    async fn admin_stats(&self) -> Result<AdminStats, Error>;
    async fn invite_admin(&self, admin: &NewAdmin) -> Result<(), Error>;
    async fn invite_admins_bulk(&self, admins: &[NewAdmin]) -> Result<(), Error>;
    async fn set_admin_status(&self, id: &str, status: AdminStatus) -> Result<(), Error>;

    async fn list_donations(&self) -> Result<Vec<DonationCategory>, Error>;
    async fn donation_stats(&self) -> Result<DonationStats, Error>;
    async fn create_donation(&self, payload: &DonationPayload) -> Result<(), Error>;
    async fn update_donation(&self, id: &str, payload: &DonationPayload) -> Result<(), Error>;
    async fn delete_donation(&self, id: &str) -> Result<(), Error>;
    async fn toggle_donation_status(&self, id: &str) -> Result<(), Error>;
}

/// reqwest-backed [`AdminApi`] implementation.
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl HttpApi {
    pub fn new(config: &ApiConfig, credentials: Option<Credentials>) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.bearer_auth(credentials.token()),
            None => request,
        }
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<Vec<T>, Error> {
        tracing::debug!(path, "GET list");
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|err| Error::load(resource, err))?
            .error_for_status()
            .map_err(|err| Error::load(resource, err))?;
        let body: Value = response
            .json()
            .await
            .map_err(|err| Error::load(resource, err))?;
        extract_list(body, resource).map_err(|err| Error::load(resource, err))
    }

    async fn fetch_stats<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<T, Error> {
        tracing::debug!(path, "GET stats");
        self.authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|err| Error::load(resource, err))?
            .error_for_status()
            .map_err(|err| Error::load(resource, err))?
            .json()
            .await
            .map_err(|err| Error::load(resource, err))
    }

    /// Run a mutation request and surface the server's `message` field on
    /// rejection.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(), Error> {
        let response = self.authorize(request).send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });
        Err(Error::Rejected { status, message })
    }

    fn room_form(payload: &RoomPayload) -> Result<Form, Error> {
        let mut form = Form::new()
            .text("name", payload.name.clone())
            .text("description", payload.description.clone())
            .text("price", payload.price.to_string())
            .text("discount", payload.discount.to_string())
            .text("beds", payload.beds.to_string())
            .text("maxGuests", payload.max_guests.to_string())
            .text("status", payload.status.as_str());
        for amenity in &payload.amenities {
            form = form.text("amenities", amenity.clone());
        }
        for image in &payload.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }
        Ok(form)
    }
}

impl AdminApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, Error> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "login transport failure");
                Error::Auth(LOGIN_FALLBACK.to_string())
            })?;

        if !response.status().is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| LOGIN_FALLBACK.to_string());
            return Err(Error::Auth(message));
        }

        response.json().await.map_err(|err| {
            tracing::debug!(error = %err, "login decode failure");
            Error::Auth(LOGIN_FALLBACK.to_string())
        })
    }

    async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        self.fetch_list("/rooms", "rooms").await
    }

    async fn room_stats(&self) -> Result<RoomStats, Error> {
        self.fetch_stats("/rooms/stats", "room stats").await
    }

    async fn create_room(&self, payload: &RoomPayload) -> Result<(), Error> {
        let form = Self::room_form(payload)?;
        self.send(self.http.post(self.url("/rooms")).multipart(form))
            .await
    }

    async fn update_room(&self, id: &str, payload: &RoomPayload) -> Result<(), Error> {
        let form = Self::room_form(payload)?;
        self.send(
            self.http
                .put(self.url(&format!("/rooms/{id}")))
                .multipart(form),
        )
        .await
    }

    async fn delete_room(&self, id: &str) -> Result<(), Error> {
        self.send(self.http.delete(self.url(&format!("/rooms/{id}"))))
            .await
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        self.fetch_list("/bookings", "bookings").await
    }

    async fn booking_stats(&self) -> Result<BookingStats, Error> {
        self.fetch_stats("/bookings/stats", "booking stats").await
    }

    async fn set_booking_status(&self, id: &str, status: BookingStatus) -> Result<(), Error> {
        let body = serde_json::json!({ "status": status });
        self.send(
            self.http
                .put(self.url(&format!("/bookings/{id}/status")))
                .json(&body),
        )
        .await
    }

    async fn list_admins(&self) -> Result<Vec<AdminUser>, Error> {
        self.fetch_list("/admins", "admins").await
    }

    async fn admin_stats(&self) -> Result<AdminStats, Error> {
        self.fetch_stats("/admins/stats", "admin stats").await
    }

    async fn invite_admin(&self, admin: &NewAdmin) -> Result<(), Error> {
        self.send(self.http.post(self.url("/admins")).json(admin))
            .await
    }

    async fn invite_admins_bulk(&self, admins: &[NewAdmin]) -> Result<(), Error> {
        let body = serde_json::json!({ "admins": admins });
        self.send(self.http.post(self.url("/admins/bulk")).json(&body))
            .await
    }

    async fn set_admin_status(&self, id: &str, status: AdminStatus) -> Result<(), Error> {
        let body = serde_json::json!({ "status": status });
        self.send(
            self.http
                .put(self.url(&format!("/admins/{id}/status")))
                .json(&body),
        )
        .await
    }

    async fn list_donations(&self) -> Result<Vec<DonationCategory>, Error> {
        self.fetch_list("/donations", "donations").await
    }

    async fn donation_stats(&self) -> Result<DonationStats, Error> {
        self.fetch_stats("/donations/stats", "donation stats").await
    }

    async fn create_donation(&self, payload: &DonationPayload) -> Result<(), Error> {
        self.send(self.http.post(self.url("/donations")).json(payload))
            .await
    }

    async fn update_donation(&self, id: &str, payload: &DonationPayload) -> Result<(), Error> {
        self.send(
            self.http
                .put(self.url(&format!("/donations/{id}")))
                .json(payload),
        )
        .await
    }

    async fn delete_donation(&self, id: &str) -> Result<(), Error> {
        self.send(self.http.delete(self.url(&format!("/donations/{id}"))))
            .await
    }

    async fn toggle_donation_status(&self, id: &str) -> Result<(), Error> {
        self.send(self.http.patch(self.url(&format!("/donations/{id}/status"))))
            .await
    }
}
