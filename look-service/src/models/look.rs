use serde::Deserialize;

/// Decoded body of an analyze-look request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookRequest {
    /// Base64-encoded JPEG, passed upstream untouched.
    #[serde(default)]
    pub image_base64: Option<String>,

    pub style_vibe: String,

    #[serde(default)]
    pub face_shape: Option<String>,
}

impl LookRequest {
    /// The photo, if one was actually supplied. Empty strings count as absent.
    pub fn image(&self) -> Option<&str> {
        self.image_base64.as_deref().filter(|data| !data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_fields() {
        let request: LookRequest = serde_json::from_str(
            r#"{"imageBase64":"/9j/4AAQ","styleVibe":"classic","faceShape":"round"}"#,
        )
        .unwrap();

        assert_eq!(request.image(), Some("/9j/4AAQ"));
        assert_eq!(request.style_vibe, "classic");
        assert_eq!(request.face_shape.as_deref(), Some("round"));
    }

    #[test]
    fn optional_fields_may_be_omitted_or_null() {
        let request: LookRequest =
            serde_json::from_str(r#"{"styleVibe":"fade","imageBase64":null}"#).unwrap();

        assert!(request.image().is_none());
        assert!(request.face_shape.is_none());
    }

    #[test]
    fn empty_image_is_treated_as_absent() {
        let request: LookRequest =
            serde_json::from_str(r#"{"styleVibe":"fade","imageBase64":""}"#).unwrap();

        assert!(request.image().is_none());
    }

    #[test]
    fn style_vibe_is_required() {
        let result = serde_json::from_str::<LookRequest>(r#"{"faceShape":"oval"}"#);
        assert!(result.is_err());
    }
}
