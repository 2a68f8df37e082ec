//! Listing creation workflow.
//!
//! `Idle → Uploading (only with an image) → Inserting → Done`, with `Failed`
//! reachable from every working state. The steps run strictly in order because
//! the insert needs the resolved image URL. Nothing is retried and nothing is
//! compensated: an insert failure after a successful upload leaves the asset
//! behind and reports its name in `CreateListingError::Insert`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::common::{ListingId, StoreError, UploadError, ValidationError};
use crate::domains::listings::data::{ImageUpload, ListingFields};
use crate::domains::listings::models::Listing;
use crate::kernel::ServerDeps;

/// Step of the workflow an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPhase {
    Validating,
    Uploading,
    Inserting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationState {
    Idle,
    Uploading,
    Inserting,
    Done(ListingId),
    Failed(CreationPhase),
}

#[derive(Error, Debug)]
pub enum CreateListingError {
    #[error("Invalid listing: {0}")]
    Validation(#[from] ValidationError),

    #[error("Image upload failed: {0}")]
    Upload(#[from] UploadError),

    #[error("Listing insert failed: {error}")]
    Insert {
        #[source]
        error: StoreError,
        /// Stored name of an image uploaded for this listing that no listing references
        orphaned_asset: Option<String>,
    },
}

impl CreateListingError {
    pub fn phase(&self) -> CreationPhase {
        match self {
            CreateListingError::Validation(_) => CreationPhase::Validating,
            CreateListingError::Upload(_) => CreationPhase::Uploading,
            CreateListingError::Insert { .. } => CreationPhase::Inserting,
        }
    }
}

/// Asset name for an uploaded image: upload time in unix millis plus the
/// original extension. Not collision-proof; a clash surfaces as
/// `UploadError::Conflict`.
pub fn asset_name(original_file_name: &str, now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let extension = original_file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));
    match extension {
        Some(ext) => format!("{}.{}", millis, ext.to_ascii_lowercase()),
        None => millis.to_string(),
    }
}

/// One run of the creation workflow. Each run starts from `Idle`; failed runs
/// are not resumed.
pub struct ListingCreation<'a> {
    deps: &'a ServerDeps,
    state: CreationState,
    history: Vec<CreationState>,
}

impl<'a> ListingCreation<'a> {
    pub fn new(deps: &'a ServerDeps) -> Self {
        Self {
            deps,
            state: CreationState::Idle,
            history: vec![CreationState::Idle],
        }
    }

    pub fn state(&self) -> &CreationState {
        &self.state
    }

    /// Every state visited by the last run, starting with `Idle`
    pub fn history(&self) -> &[CreationState] {
        &self.history
    }

    fn transition(&mut self, next: CreationState) {
        tracing::debug!(from = ?self.state, to = ?next, "Listing creation transition");
        self.history.push(next.clone());
        self.state = next;
    }

    fn fail(&mut self, error: CreateListingError) -> CreateListingError {
        warn!(phase = ?error.phase(), error = %error, "Listing creation failed");
        self.transition(CreationState::Failed(error.phase()));
        error
    }

    pub async fn run(
        &mut self,
        fields: &ListingFields,
        image: Option<ImageUpload>,
    ) -> Result<Listing, CreateListingError> {
        let deps = self.deps;
        self.state = CreationState::Idle;
        self.history = vec![CreationState::Idle];

        let mut listing = match fields.validate() {
            Ok(listing) => listing,
            Err(e) => return Err(self.fail(e.into())),
        };

        let mut uploaded = None;
        if let Some(image) = image {
            self.transition(CreationState::Uploading);
            let name = asset_name(&image.file_name, Utc::now());
            let result = deps
                .assets
                .upload(image.bytes, &name, image.content_type.as_deref())
                .await;
            match result {
                Ok(stored) => {
                    listing.image_url = Some(deps.assets.public_url(&stored));
                    uploaded = Some(stored);
                }
                Err(e) => return Err(self.fail(e.into())),
            }
        }

        self.transition(CreationState::Inserting);
        let result = deps.listings.insert(&listing).await;
        match result {
            Ok(created) => {
                info!(
                    listing_id = %created.id,
                    category = %created.category,
                    has_image = created.image_url.is_some(),
                    "Listing created"
                );
                self.transition(CreationState::Done(created.id));
                Ok(created)
            }
            Err(error) => Err(self.fail(CreateListingError::Insert {
                error,
                orphaned_asset: uploaded,
            })),
        }
    }
}

/// Create a listing, uploading its image first when one is supplied.
pub async fn create_listing(
    fields: &ListingFields,
    image: Option<ImageUpload>,
    deps: &ServerDeps,
) -> Result<Listing, CreateListingError> {
    ListingCreation::new(deps).run(fields, image).await
}
