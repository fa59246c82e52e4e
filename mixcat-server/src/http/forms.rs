//! Multipart form decoding for category and drink mutations
//!
//! The structured drink sub-fields (`details`, `ingredients`,
//! `flavorProfile`) travel as independently JSON-encoded form fields and
//! are deserialized here, once, into typed models. Any single decode
//! failure rejects the whole request before a handler touches storage -
//! there is no partial persistence.

use axum::body::Bytes;
use axum::extract::multipart::Multipart;
use uuid::Uuid;

use crate::assets::MAX_IMAGE_BYTES;
use crate::models::{
    ingredients_from_json, CategoryName, DrinkDetails, DrinkName, FlavorProfile, NewDrink,
    ValidationError,
};

/// A single uploaded image payload.
#[derive(Debug)]
pub struct UploadedImage {
    pub bytes: Bytes,
    pub filename: Option<String>,
}

/// Decoded `POST/PUT /categories` form.
#[derive(Debug)]
pub struct CategoryForm {
    pub name: CategoryName,
    pub image: Option<UploadedImage>,
}

/// Decoded `POST/PUT /drinks` form.
#[derive(Debug)]
pub struct DrinkForm {
    pub drink: NewDrink,
    pub image: Option<UploadedImage>,
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ValidationError {
    ValidationError::Malformed {
        field: "form",
        detail: e.to_string(),
    }
}

async fn read_image(
    field: axum::extract::multipart::Field<'_>,
) -> Result<Option<UploadedImage>, ValidationError> {
    let filename = field.file_name().map(str::to_owned);
    let bytes = field.bytes().await.map_err(multipart_error)?;

    // A file input submitted without a selection arrives as an empty part
    if bytes.is_empty() {
        return Ok(None);
    }

    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge {
            field: "image",
            max_bytes: MAX_IMAGE_BYTES,
        });
    }

    Ok(Some(UploadedImage { bytes, filename }))
}

impl CategoryForm {
    /// Decode the multipart body. Unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ValidationError> {
        let mut name: Option<String> = None;
        let mut image: Option<UploadedImage> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some("name") => {
                    name = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("image") => {
                    image = read_image(field).await?;
                }
                _ => {}
            }
        }

        let name = CategoryName::new(name.as_deref().unwrap_or_default())?;
        Ok(Self { name, image })
    }
}

impl DrinkForm {
    /// Decode the multipart body.
    ///
    /// Required fields: `name`, `details`, `ingredients`, `flavorProfile`
    /// (legacy clients send the flavor profile as `recepies`; both names
    /// are accepted). `category` and `image` are optional.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ValidationError> {
        let mut name: Option<String> = None;
        let mut category: Option<String> = None;
        let mut details: Option<String> = None;
        let mut ingredients: Option<String> = None;
        let mut flavor: Option<String> = None;
        let mut image: Option<UploadedImage> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some("name") => {
                    name = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("category") => {
                    category = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("details") => {
                    details = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("ingredients") => {
                    ingredients = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("flavorProfile") | Some("recepies") => {
                    flavor = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("image") => {
                    image = read_image(field).await?;
                }
                _ => {}
            }
        }

        let name = DrinkName::new(name.as_deref().unwrap_or_default())?;

        let category_id = match category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Uuid::parse_str(raw).map_err(|_| {
                ValidationError::InvalidFormat {
                    field: "category",
                    reason: "invalid UUID format",
                }
            })?),
        };

        let details = DrinkDetails::from_json(
            details
                .as_deref()
                .ok_or(ValidationError::Empty { field: "details" })?,
        )?;

        let ingredients = ingredients_from_json(
            ingredients
                .as_deref()
                .ok_or(ValidationError::Empty { field: "ingredients" })?,
        )?;

        let flavor = FlavorProfile::from_json(
            flavor
                .as_deref()
                .ok_or(ValidationError::Empty { field: "flavorProfile" })?,
        )?;

        Ok(Self {
            drink: NewDrink {
                name,
                category_id,
                details,
                flavor,
                ingredients,
            },
            image,
        })
    }
}
