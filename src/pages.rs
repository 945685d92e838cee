//! Page controllers: one per dashboard screen.
//!
//! Each page owns its synchronizer, its dialog, and its notification
//! queue, and routes every mutation through [`dispatch`]: success notice,
//! then a full reload of the canonical collection (plus a stats refresh
//! where the resource has one). Nothing is patched locally: the list a
//! caller sees always reflects server-confirmed state.

use std::future::Future;

use crate::api::AdminApi;
use crate::error::Error;
use crate::forms::{AdminInviteDraft, Dialog, DonationDraft, RoomDraft};
use crate::models::{
    AdminStatus, AdminUser, Booking, BookingStatus, DashboardStats, DonationCategory,
    DonationStats, ImageFile, NewAdmin, Room, RoomStats,
};
use crate::notify::Notifications;
use crate::reports;
use crate::sync::Synchronizer;

/// Run one mutation: success notice on Ok; on Err a notice preferring the
/// server's message over the resource-specific fallback, with the error
/// re-raised so the dialog layer can stay open.
async fn dispatch<T>(
    notices: &mut Notifications,
    success: &str,
    fallback: &str,
    op: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    match op.await {
        Ok(value) => {
            notices.success(success);
            Ok(value)
        }
        Err(err) => {
            notices.error(err.user_message(fallback));
            Err(err)
        }
    }
}

pub struct RoomsPage {
    pub list: Synchronizer<Room>,
    pub stats: RoomStats,
    pub dialog: Dialog<RoomDraft>,
    pub notices: Notifications,
}

impl Default for RoomsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomsPage {
    pub fn new() -> Self {
        Self {
            list: Synchronizer::new(),
            stats: RoomStats::default(),
            dialog: Dialog::Closed,
            notices: Notifications::new(),
        }
    }

    /// First load: the list plus the stats strip.
    pub async fn load<A: AdminApi>(&mut self, api: &A) {
        self.reload(api).await;
        self.refresh_stats(api).await;
    }

    pub async fn reload<A: AdminApi>(&mut self, api: &A) {
        let ticket = self.list.begin_load();
        match api.list_rooms().await {
            Ok(rows) => {
                if self.list.finish_load(ticket, rows) {
                    tracing::debug!(count = self.list.records().len(), "rooms reloaded");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "room reload failed");
                self.list.fail_load(ticket);
                self.notices.error("Failed to load rooms");
            }
        }
    }

    /// The stats strip is decorative; a failed refresh only logs.
    pub async fn refresh_stats<A: AdminApi>(&mut self, api: &A) {
        match api.room_stats().await {
            Ok(stats) => self.stats = stats,
            Err(err) => tracing::warn!(error = %err, "room stats refresh failed"),
        }
    }

    pub fn open_add(&mut self) {
        self.dialog.open(RoomDraft::default());
    }

    pub fn open_edit(&mut self, room: &Room) {
        self.dialog.open(RoomDraft::from_room(room));
    }

    /// Attach image files to the open draft. A batch that would exceed the
    /// image limit is rejected whole, with a warning notice.
    pub fn attach_images(&mut self, files: Vec<ImageFile>) {
        let Some(draft) = self.dialog.draft_mut() else {
            return;
        };
        if let Err(err) = draft.add_images(files) {
            self.notices.warning(err.to_string());
        }
    }

    /// Submit the open dialog: create for a fresh draft, update when the
    /// draft was seeded from an existing room. Validation failures and
    /// rejected mutations leave the dialog open with the draft intact.
    pub async fn submit<A: AdminApi>(&mut self, api: &A) -> Result<(), Error> {
        let Some(draft) = self.dialog.begin_submit() else {
            return Ok(());
        };
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.notices.error(err.to_string());
                self.dialog.fail_submit();
                return Err(err);
            }
        };
        let result = match &draft.editing {
            Some(id) => {
                dispatch(
                    &mut self.notices,
                    "Room updated successfully",
                    "Failed to update room",
                    api.update_room(id, &payload),
                )
                .await
            }
            None => {
                dispatch(
                    &mut self.notices,
                    "Room created successfully",
                    "Failed to create room",
                    api.create_room(&payload),
                )
                .await
            }
        };
        match result {
            Ok(()) => {
                self.dialog.finish_submit();
                self.reload(api).await;
                self.refresh_stats(api).await;
                Ok(())
            }
            Err(err) => {
                self.dialog.fail_submit();
                Err(err)
            }
        }
    }

    pub async fn delete<A: AdminApi>(&mut self, api: &A, id: &str) -> Result<(), Error> {
        dispatch(
            &mut self.notices,
            "Room deleted successfully",
            "Failed to delete room",
            api.delete_room(id),
        )
        .await?;
        self.reload(api).await;
        self.refresh_stats(api).await;
        Ok(())
    }
}

pub struct BookingsPage {
    pub list: Synchronizer<Booking>,
    pub notices: Notifications,
}

impl Default for BookingsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingsPage {
    pub fn new() -> Self {
        Self {
            list: Synchronizer::new(),
            notices: Notifications::new(),
        }
    }

    pub async fn reload<A: AdminApi>(&mut self, api: &A) {
        let ticket = self.list.begin_load();
        match api.list_bookings().await {
            Ok(rows) => {
                self.list.finish_load(ticket, rows);
            }
            Err(err) => {
                tracing::warn!(error = %err, "booking reload failed");
                self.list.fail_load(ticket);
                self.notices.error("Failed to load bookings");
            }
        }
    }

    pub async fn set_status<A: AdminApi>(
        &mut self,
        api: &A,
        id: &str,
        status: BookingStatus,
    ) -> Result<(), Error> {
        dispatch(
            &mut self.notices,
            "Booking status updated successfully",
            "Failed to update booking status",
            api.set_booking_status(id, status),
        )
        .await?;
        self.reload(api).await;
        Ok(())
    }

    pub fn receipt(&self, booking: &Booking) -> String {
        reports::booking_receipt(booking)
    }
}

pub struct AdminsPage {
    pub list: Synchronizer<AdminUser>,
    pub dialog: Dialog<AdminInviteDraft>,
    pub notices: Notifications,
}

impl Default for AdminsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminsPage {
    pub fn new() -> Self {
        Self {
            list: Synchronizer::new(),
            dialog: Dialog::Closed,
            notices: Notifications::new(),
        }
    }

    pub async fn reload<A: AdminApi>(&mut self, api: &A) {
        let ticket = self.list.begin_load();
        match api.list_admins().await {
            Ok(rows) => {
                self.list.finish_load(ticket, rows);
            }
            Err(err) => {
                tracing::warn!(error = %err, "admin reload failed");
                self.list.fail_load(ticket);
                self.notices.error("Failed to load admins");
            }
        }
    }

    pub fn open_invite(&mut self) {
        self.dialog.open(AdminInviteDraft::default());
    }

    /// Submit the single-invite dialog.
    pub async fn submit_invite<A: AdminApi>(&mut self, api: &A) -> Result<(), Error> {
        let Some(draft) = self.dialog.begin_submit() else {
            return Ok(());
        };
        let admin = match draft.to_payload() {
            Ok(admin) => admin,
            Err(err) => {
                self.notices.error(err.to_string());
                self.dialog.fail_submit();
                return Err(err);
            }
        };
        match self.invite(api, vec![admin]).await {
            Ok(()) => {
                self.dialog.finish_submit();
                Ok(())
            }
            Err(err) => {
                self.dialog.fail_submit();
                Err(err)
            }
        }
    }

    /// One invite goes to the single endpoint, several to the bulk one.
    pub async fn invite<A: AdminApi>(
        &mut self,
        api: &A,
        admins: Vec<NewAdmin>,
    ) -> Result<(), Error> {
        if admins.is_empty() {
            return Ok(());
        }
        if admins.len() == 1 {
            dispatch(
                &mut self.notices,
                "Admin invited successfully",
                "Failed to invite admin",
                api.invite_admin(&admins[0]),
            )
            .await?;
        } else {
            dispatch(
                &mut self.notices,
                "Admins invited successfully",
                "Failed to invite admins",
                api.invite_admins_bulk(&admins),
            )
            .await?;
        }
        self.reload(api).await;
        Ok(())
    }

    pub async fn set_status<A: AdminApi>(
        &mut self,
        api: &A,
        id: &str,
        status: AdminStatus,
    ) -> Result<(), Error> {
        dispatch(
            &mut self.notices,
            "Admin status updated successfully",
            "Failed to update admin status",
            api.set_admin_status(id, status),
        )
        .await?;
        self.reload(api).await;
        Ok(())
    }
}

pub struct DonationsPage {
    pub list: Synchronizer<DonationCategory>,
    pub stats: DonationStats,
    pub dialog: Dialog<DonationDraft>,
    pub notices: Notifications,
}

impl Default for DonationsPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationsPage {
    pub fn new() -> Self {
        Self {
            list: Synchronizer::new(),
            stats: DonationStats::default(),
            dialog: Dialog::Closed,
            notices: Notifications::new(),
        }
    }

    pub async fn load<A: AdminApi>(&mut self, api: &A) {
        self.reload(api).await;
        self.refresh_stats(api).await;
    }

    pub async fn reload<A: AdminApi>(&mut self, api: &A) {
        let ticket = self.list.begin_load();
        match api.list_donations().await {
            Ok(rows) => {
                self.list.finish_load(ticket, rows);
            }
            Err(err) => {
                tracing::warn!(error = %err, "donation reload failed");
                self.list.fail_load(ticket);
                self.notices.error("Failed to load donations");
            }
        }
    }

    pub async fn refresh_stats<A: AdminApi>(&mut self, api: &A) {
        match api.donation_stats().await {
            Ok(stats) => self.stats = stats,
            Err(err) => tracing::warn!(error = %err, "donation stats refresh failed"),
        }
    }

    pub fn open_add(&mut self) {
        self.dialog.open(DonationDraft::default());
    }

    pub fn open_edit(&mut self, category: &DonationCategory) {
        self.dialog.open(DonationDraft::from_category(category));
    }

    pub async fn submit<A: AdminApi>(&mut self, api: &A) -> Result<(), Error> {
        let Some(draft) = self.dialog.begin_submit() else {
            return Ok(());
        };
        let payload = match draft.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.notices.error(err.to_string());
                self.dialog.fail_submit();
                return Err(err);
            }
        };
        let result = match &draft.editing {
            Some(id) => {
                dispatch(
                    &mut self.notices,
                    "Donation category updated successfully",
                    "Failed to update donation category",
                    api.update_donation(id, &payload),
                )
                .await
            }
            None => {
                dispatch(
                    &mut self.notices,
                    "Donation category created successfully",
                    "Failed to create donation category",
                    api.create_donation(&payload),
                )
                .await
            }
        };
        match result {
            Ok(()) => {
                self.dialog.finish_submit();
                self.reload(api).await;
                self.refresh_stats(api).await;
                Ok(())
            }
            Err(err) => {
                self.dialog.fail_submit();
                Err(err)
            }
        }
    }

    pub async fn delete<A: AdminApi>(&mut self, api: &A, id: &str) -> Result<(), Error> {
        dispatch(
            &mut self.notices,
            "Donation category deleted successfully",
            "Failed to delete donation category",
            api.delete_donation(id),
        )
        .await?;
        self.reload(api).await;
        self.refresh_stats(api).await;
        Ok(())
    }

    pub async fn toggle_status<A: AdminApi>(&mut self, api: &A, id: &str) -> Result<(), Error> {
        dispatch(
            &mut self.notices,
            "Donation status updated successfully",
            "Failed to update donation status",
            api.toggle_donation_status(id),
        )
        .await?;
        self.reload(api).await;
        self.refresh_stats(api).await;
        Ok(())
    }

    /// CSV of the currently visible (filtered) categories.
    pub fn export_csv(&self) -> String {
        reports::donations_overview_csv(self.list.view())
    }
}

/// Home-screen overview: room, booking, and admin stats fetched in turn.
pub async fn load_dashboard<A: AdminApi>(api: &A) -> Result<DashboardStats, Error> {
    let rooms = api.room_stats().await?;
    let bookings = api.booking_stats().await?;
    let admins = api.admin_stats().await?;
    Ok(DashboardStats {
        total_rooms: rooms.total_rooms,
        available_rooms: rooms.available_rooms,
        total_bookings: bookings.total_bookings,
        pending_bookings: bookings.pending_bookings,
        total_admins: admins.total_admins,
        revenue: bookings.revenue,
    })
}
