//! Prompt construction for the look advisor.
//!
//! The model gets one text part (house rules followed by the customer's
//! request) and, when the customer uploaded a photo, the photo itself.

use super::providers::ContentPart;
use crate::models::LookRequest;

/// House rules for the barber persona. Output must render as plain text.
pub const SYSTEM_INSTRUCTION: &str = "\
Du är en expertbarberare på Kartago Barbershop.
Ditt mål: Ge korta, kärnfulla råd.
Regler:
1. Inga rubriker, inga fetstiltecken (**), inga markdown-symboler (##).
2. Max 2 korta stycken totalt.
3. Fokusera direkt på \"Vad\" och \"Varför\". Inget fluff.
4. Tonläge: Professionell, maskulin, direkt.";

pub const PHOTO_MIME_TYPE: &str = "image/jpeg";

const SUGGESTION_REQUEST: &str = "Ge 1-2 konkreta, korta frisyrförslag på Svenska.";
const UNKNOWN_FACE_SHAPE: &str = "ej angiven";

/// The customer-specific half of the prompt.
pub fn user_prompt(request: &LookRequest) -> String {
    if request.image().is_some() {
        format!(
            "Analysera denna bild. Kunden gillar stilen: \"{}\". {}",
            request.style_vibe, SUGGESTION_REQUEST
        )
    } else {
        let face_shape = request
            .face_shape
            .as_deref()
            .filter(|shape| !shape.is_empty())
            .unwrap_or(UNKNOWN_FACE_SHAPE);
        format!(
            "Ansiktsform: {}. Stil: {}. {}",
            face_shape, request.style_vibe, SUGGESTION_REQUEST
        )
    }
}

/// Ordered parts for the upstream request.
pub fn build_parts(request: &LookRequest) -> Vec<ContentPart> {
    let mut parts = vec![ContentPart::text(format!(
        "{}\n{}",
        SYSTEM_INSTRUCTION,
        user_prompt(request)
    ))];

    if let Some(image) = request.image() {
        parts.push(ContentPart::inline_data(PHOTO_MIME_TYPE, image));
    }

    parts
}
