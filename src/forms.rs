//! Draft state for the create/edit dialogs.
//!
//! A draft is a working copy of a record's editable fields. It is created
//! when a dialog opens (empty for "add", seeded for "edit"), validated
//! before any network call, and discarded only on close or successful
//! submission. A failed submission hands the draft back untouched.

use crate::error::Error;
use crate::models::{
    AdminRole, AdminStatus, DonationCategory, DonationPayload, ImageFile, NewAdmin, Room,
    RoomPayload, RoomStatus,
};

pub const DEFAULT_MAX_IMAGES: usize = 5;
pub const DEFAULT_SUGGESTED: [u64; 3] = [1000, 5000, 10000];
pub const DEFAULT_ICON: &str = "heart";
pub const DEFAULT_COLOR: &str = "from-amber-500 to-orange-600";

/// Dialog lifecycle: Closed -> Open(draft) -> Submitting(draft) -> Closed.
///
/// A failed submission transitions back to Open with the draft intact so
/// the user can correct and retry.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dialog<D> {
    #[default]
    Closed,
    Open(D),
    Submitting(D),
}

impl<D: Clone> Dialog<D> {
    pub fn open(&mut self, draft: D) {
        *self = Dialog::Open(draft);
    }

    pub fn close(&mut self) {
        *self = Dialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    pub fn draft(&self) -> Option<&D> {
        match self {
            Dialog::Open(draft) | Dialog::Submitting(draft) => Some(draft),
            Dialog::Closed => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match self {
            Dialog::Open(draft) | Dialog::Submitting(draft) => Some(draft),
            Dialog::Closed => None,
        }
    }

    /// Move an open dialog into Submitting and hand out the draft.
    /// Returns None when no dialog is open.
    pub fn begin_submit(&mut self) -> Option<D> {
        match std::mem::replace(self, Dialog::Closed) {
            Dialog::Open(draft) | Dialog::Submitting(draft) => {
                *self = Dialog::Submitting(draft.clone());
                Some(draft)
            }
            Dialog::Closed => None,
        }
    }

    /// Submission failed: reopen with the draft intact.
    pub fn fail_submit(&mut self) {
        if let Dialog::Submitting(draft) = std::mem::replace(self, Dialog::Closed) {
            *self = Dialog::Open(draft);
        }
    }

    /// Submission succeeded: discard the draft.
    pub fn finish_submit(&mut self) {
        *self = Dialog::Closed;
    }
}

/// Working copy of a room's editable fields, including not-yet-uploaded
/// image attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    /// Set when editing an existing room.
    pub editing: Option<String>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discount: f64,
    pub beds: u32,
    pub max_guests: u32,
    pub amenities: Vec<String>,
    pub status: RoomStatus,
    /// URLs already stored server-side (edit only).
    pub existing_images: Vec<String>,
    /// Files attached in this dialog, pending upload.
    pub new_images: Vec<ImageFile>,
    pub max_images: usize,
}

impl Default for RoomDraft {
    fn default() -> Self {
        Self {
            editing: None,
            name: String::new(),
            description: String::new(),
            price: 0.0,
            discount: 0.0,
            beds: 1,
            max_guests: 1,
            amenities: Vec::new(),
            status: RoomStatus::Available,
            existing_images: Vec::new(),
            new_images: Vec::new(),
            max_images: DEFAULT_MAX_IMAGES,
        }
    }
}

impl RoomDraft {
    pub fn from_room(room: &Room) -> Self {
        Self {
            editing: Some(room.id.clone()),
            name: room.name.clone(),
            description: room.description.clone(),
            price: room.price,
            discount: room.discount,
            beds: room.beds.max(1),
            max_guests: room.max_guests.max(1),
            amenities: room.amenities.clone(),
            status: room.status,
            existing_images: room.images.clone(),
            new_images: Vec::new(),
            max_images: DEFAULT_MAX_IMAGES,
        }
    }

    pub fn image_count(&self) -> usize {
        self.existing_images.len() + self.new_images.len()
    }

    /// Attach a batch of image files. A batch that would push the total
    /// past `max_images` is rejected in full, not truncated.
    pub fn add_images(&mut self, files: Vec<ImageFile>) -> Result<(), Error> {
        if self.image_count() + files.len() > self.max_images {
            return Err(Error::Validation(format!(
                "Maximum {} images allowed",
                self.max_images
            )));
        }
        self.new_images.extend(files);
        Ok(())
    }

    /// Drop a pending attachment by position within the new files.
    pub fn remove_new_image(&mut self, index: usize) {
        if index < self.new_images.len() {
            self.new_images.remove(index);
        }
    }

    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }

    /// Validate and convert into the multipart payload.
    pub fn to_payload(&self) -> Result<RoomPayload, Error> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        Ok(RoomPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            discount: self.discount,
            beds: self.beds,
            max_guests: self.max_guests,
            amenities: self.amenities.clone(),
            status: self.status,
            images: self.new_images.clone(),
        })
    }
}

/// Working copy of a donation category, including the amount being typed
/// but not yet added to the suggested list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationDraft {
    pub editing: Option<String>,
    pub title: String,
    pub english_title: String,
    pub description: String,
    /// Always kept sorted ascending.
    pub suggested: Vec<u64>,
    pub icon: String,
    pub color: String,
    /// Raw text of the amount input, committed via [`commit_pending_amount`].
    ///
    /// [`commit_pending_amount`]: DonationDraft::commit_pending_amount
    pub pending_amount: String,
}

impl Default for DonationDraft {
    fn default() -> Self {
        Self {
            editing: None,
            title: String::new(),
            english_title: String::new(),
            description: String::new(),
            suggested: DEFAULT_SUGGESTED.to_vec(),
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            pending_amount: String::new(),
        }
    }
}

impl DonationDraft {
    pub fn from_category(category: &DonationCategory) -> Self {
        let mut suggested = category.suggested.clone();
        suggested.sort_unstable();
        Self {
            editing: Some(category.id.clone()),
            title: category.title.clone(),
            english_title: category.english_title.clone(),
            description: category.description.clone(),
            suggested,
            icon: category.icon.clone(),
            color: category.color.clone(),
            pending_amount: String::new(),
        }
    }

    /// Insert a suggested amount, keeping the list sorted ascending.
    /// Duplicates and zero are rejected without touching the list.
    pub fn add_amount(&mut self, amount: u64) -> Result<(), Error> {
        if amount == 0 {
            return Err(Error::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }
        if self.suggested.contains(&amount) {
            return Err(Error::Validation("Amount already exists".to_string()));
        }
        self.suggested.push(amount);
        self.suggested.sort_unstable();
        Ok(())
    }

    /// Parse and add the typed amount, clearing the input on success.
    pub fn commit_pending_amount(&mut self) -> Result<(), Error> {
        let amount: u64 = self
            .pending_amount
            .trim()
            .parse()
            .map_err(|_| Error::Validation("Enter a valid amount".to_string()))?;
        self.add_amount(amount)?;
        self.pending_amount.clear();
        Ok(())
    }

    pub fn remove_amount(&mut self, amount: u64) {
        self.suggested.retain(|a| *a != amount);
    }

    pub fn to_payload(&self) -> Result<DonationPayload, Error> {
        if self.title.trim().is_empty()
            || self.english_title.trim().is_empty()
            || self.description.trim().is_empty()
        {
            return Err(Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if self.suggested.is_empty() {
            return Err(Error::Validation(
                "Please add at least one suggested amount".to_string(),
            ));
        }
        Ok(DonationPayload {
            title: self.title.trim().to_string(),
            english_title: self.english_title.trim().to_string(),
            description: self.description.trim().to_string(),
            suggested: self.suggested.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        })
    }
}

/// Single-invite form for a new admin. Invited accounts always start out
/// pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminInviteDraft {
    pub name: String,
    pub email: String,
    pub role: AdminRole,
}

impl AdminInviteDraft {
    pub fn to_payload(&self) -> Result<NewAdmin, Error> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(Error::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if !self.email.contains('@') {
            return Err(Error::Validation("Enter a valid email address".to_string()));
        }
        Ok(NewAdmin {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            status: AdminStatus::Pending,
        })
    }
}

/// Parse a bulk-invite textarea: one address per line, lines without an
/// `@` are skipped, the display name is taken from the local part, and
/// everyone comes in as a pending admin.
pub fn parse_bulk_invites(text: &str) -> Vec<NewAdmin> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains('@'))
        .map(|email| NewAdmin {
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
            role: AdminRole::Admin,
            status: AdminStatus::Pending,
        })
        .collect()
}
