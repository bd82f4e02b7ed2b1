//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentUser;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, OriginalUri, Path, State};
use axum::http::{Method, Uri};
use kernel::error::app_error::AppError;
use kernel::id::ListingId;
use platform::flash::{Flash, IncomingFlash};
use platform::redirect::Redirect;
use platform::view::View;

use crate::application::config::ListingConfig;
use crate::application::{
    AUTHENTICATED, Authorization, CreateListingInput, CreateListingUseCase, DeleteListingUseCase,
    EditListingOutput, GuardContext, ListListingsUseCase, OWNER_ONLY, OwnershipGuard,
    Requirement, ShowListingUseCase, UpdateListingInput, UpdateListingUseCase, authorize,
};
use crate::domain::entity::listing_details::ListingDetails;
use crate::domain::ports::{Geocoder, ImageUploader};
use crate::domain::repository::ListingRepository;
use crate::error::{FormError, INDEX, ListingError, ListingResult};
use crate::presentation::dto::{EditFormView, IndexView, ListingSubmission, NewFormView};

pub struct ListingAppState<R, G, U> {
    pub repo: Arc<R>,
    pub geocoder: Arc<G>,
    pub uploader: Arc<U>,
    pub config: Arc<ListingConfig>,
}

impl<R, G, U> Clone for ListingAppState<R, G, U> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            geocoder: self.geocoder.clone(),
            uploader: self.uploader.clone(),
            config: self.config.clone(),
        }
    }
}

const NEW_FORM: &str = "/listings/new";

/// Malformed ids are reported like unknown ones
fn parse_id(raw: &str) -> ListingResult<ListingId> {
    raw.parse().map_err(|_| ListingError::NotFound)
}

fn edit_form_path(id: &ListingId) -> String {
    format!("/listings/{id}/edit")
}

async fn guard<R>(
    repo: &Arc<R>,
    chain: &[Requirement],
    method: &Method,
    uri: &Uri,
    current: &CurrentUser,
    listing_id: Option<&ListingId>,
) -> ListingResult<Authorization>
where
    R: ListingRepository + Send + Sync + 'static,
{
    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |pq| pq.as_str());
    let ctx = GuardContext {
        method,
        path_and_query,
        user: current.user(),
        listing_id,
    };
    authorize(&OwnershipGuard::new(repo.clone()), chain, &ctx).await
}

fn chain_mismatch() -> ListingError {
    AppError::internal("Guard chain did not establish the expected authorization").into()
}

// ============================================================================
// Browse
// ============================================================================

/// GET /listings
pub async fn index<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    flash: IncomingFlash,
) -> ListingResult<View<IndexView>>
where
    R: ListingRepository + Send + Sync + 'static,
{
    let listings = ListListingsUseCase::new(state.repo.clone()).execute().await?;

    Ok(View::new("listings/index", IndexView { listings })
        .with_flash(flash)
        .with_current_user(current.view_user()))
}

/// GET /listings/{id}
pub async fn show<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    flash: IncomingFlash,
    Path(id): Path<String>,
) -> ListingResult<View<ListingDetails>>
where
    R: ListingRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let details = ShowListingUseCase::new(state.repo.clone()).execute(&id).await?;

    Ok(View::new("listings/show", details)
        .with_flash(flash)
        .with_current_user(current.view_user()))
}

// ============================================================================
// Create
// ============================================================================

/// GET /listings/new
pub async fn new_form<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    flash: IncomingFlash,
    method: Method,
    OriginalUri(uri): OriginalUri,
) -> ListingResult<View<NewFormView>>
where
    R: ListingRepository + Send + Sync + 'static,
{
    guard(&state.repo, AUTHENTICATED, &method, &uri, &current, None).await?;

    Ok(View::new("listings/new", NewFormView { action: INDEX })
        .with_flash(flash)
        .with_current_user(current.view_user()))
}

/// POST /listings
pub async fn create<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    method: Method,
    OriginalUri(uri): OriginalUri,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, FormError>
where
    R: ListingRepository + Send + Sync + 'static,
    G: Geocoder + Send + Sync + 'static,
    U: ImageUploader + Send + Sync + 'static,
{
    async {
        let authorization =
            guard(&state.repo, AUTHENTICATED, &method, &uri, &current, None).await?;
        let Authorization::Authenticated(owner) = authorization else {
            return Err(chain_mismatch());
        };

        let submission = ListingSubmission::read(multipart).await?;
        CreateListingUseCase::new(
            state.repo.clone(),
            state.geocoder.clone(),
            state.uploader.clone(),
        )
        .execute(
            &owner,
            CreateListingInput {
                fields: submission.fields,
                image: submission.image,
            },
        )
        .await?;

        Ok(Redirect::to(INDEX).with_flash(Flash::success("New Listing Created")))
    }
    .await
    .map_err(|e: ListingError| e.at_form(NEW_FORM))
}

// ============================================================================
// Edit / Update
// ============================================================================

/// GET /listings/{id}/edit
pub async fn edit_form<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    flash: IncomingFlash,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ListingResult<View<EditFormView>>
where
    R: ListingRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let authorization = guard(&state.repo, OWNER_ONLY, &method, &uri, &current, Some(&id)).await?;
    let Authorization::Owner { listing, .. } = authorization else {
        return Err(chain_mismatch());
    };

    let view = EditFormView::from(EditListingOutput::from(listing));
    Ok(View::new("listings/edit", view)
        .with_flash(flash)
        .with_current_user(current.view_user()))
}

/// PUT /listings/{id}
pub async fn update<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, FormError>
where
    R: ListingRepository + Send + Sync + 'static,
    G: Geocoder + Send + Sync + 'static,
    U: ImageUploader + Send + Sync + 'static,
{
    let id = parse_id(&id).map_err(|e| e.at_form(INDEX))?;
    let form = edit_form_path(&id);

    async {
        let authorization =
            guard(&state.repo, OWNER_ONLY, &method, &uri, &current, Some(&id)).await?;
        let Authorization::Owner { listing, .. } = authorization else {
            return Err(chain_mismatch());
        };

        let submission = ListingSubmission::read(multipart).await?;
        let listing = UpdateListingUseCase::new(
            state.repo.clone(),
            state.geocoder.clone(),
            state.uploader.clone(),
        )
        .execute(
            listing,
            UpdateListingInput {
                fields: submission.fields,
                image: submission.image,
            },
        )
        .await?;

        Ok(Redirect::to(format!("/listings/{}", listing.id))
            .with_flash(Flash::success("Updated successfully!!")))
    }
    .await
    .map_err(|e: ListingError| e.at_form(form))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /listings/{id}
pub async fn delete<R, G, U>(
    State(state): State<ListingAppState<R, G, U>>,
    current: CurrentUser,
    method: Method,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> ListingResult<Redirect>
where
    R: ListingRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    guard(&state.repo, OWNER_ONLY, &method, &uri, &current, Some(&id)).await?;

    DeleteListingUseCase::new(state.repo.clone())
        .execute(&id)
        .await?;

    Ok(Redirect::to(INDEX).with_flash(Flash::error("Listing Deleted!")))
}
