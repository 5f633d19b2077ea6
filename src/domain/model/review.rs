use super::required;
use crate::domain::error::RecordResult;
use crate::storage::{EntityId, StoredEntity};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// Incoming review attributes.
///
/// `stars` is any JSON number and is stored as sent, integer or fractional.
///
/// On create `user_id`, `business_id` and `stars` are required. On update only
/// `stars` is required and `user_id`/`business_id` are ignored: a review never
/// moves to another user or business.
#[derive(Deserialize, Debug, Default, Clone, ToSchema)]
pub struct ReviewPayload {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub business_id: Option<i64>,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub stars: Option<Number>,
    #[serde(default)]
    pub review_text: Option<String>,
}

impl ReviewPayload {
    pub fn validate_create(self) -> RecordResult<ReviewFields> {
        Ok(ReviewFields {
            user_id: required(self.user_id)?,
            business_id: required(self.business_id)?,
            stars: required(self.stars)?,
            review_text: self.review_text,
        })
    }

    pub fn validate_update(self) -> RecordResult<ReviewUpdate> {
        Ok(ReviewUpdate {
            stars: required(self.stars)?,
            review_text: self.review_text,
        })
    }
}

/// Stored review attributes. `review_text` is left out of the stored entity
/// entirely when it was never supplied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewFields {
    pub user_id: i64,
    pub business_id: i64,
    pub stars: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

/// Partial update of a review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub stars: Number,
    pub review_text: Option<String>,
}

impl ReviewUpdate {
    /// `stars` is always overwritten; `review_text` only when supplied.
    pub fn apply(self, fields: &mut ReviewFields) {
        fields.stars = self.stars;
        if let Some(text) = self.review_text {
            fields.review_text = Some(text);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub business_id: i64,
    #[schema(value_type = f64)]
    pub stars: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

impl Review {
    pub fn new(id: EntityId, fields: ReviewFields) -> Self {
        Self {
            id,
            user_id: fields.user_id,
            business_id: fields.business_id,
            stars: fields.stars,
            review_text: fields.review_text,
        }
    }

    pub fn from_stored(entity: StoredEntity) -> RecordResult<Self> {
        let fields: ReviewFields = super::from_properties(entity.properties)?;
        Ok(Self::new(entity.id, fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::RecordError;
    use crate::domain::model::to_properties;
    use serde_json::json;

    #[test]
    fn create_requires_user_business_and_stars() {
        for body in [
            json!({"business_id": 1, "stars": 5}),
            json!({"user_id": 9, "stars": 5}),
            json!({"user_id": 9, "business_id": 1}),
        ] {
            let payload: ReviewPayload = serde_json::from_value(body).unwrap();
            assert!(matches!(
                payload.validate_create(),
                Err(RecordError::MissingAttributes)
            ));
        }
    }

    #[test]
    fn update_requires_only_stars() {
        let payload: ReviewPayload = serde_json::from_value(json!({"stars": 2})).unwrap();
        let update = payload.validate_update().unwrap();
        assert_eq!(update.stars, Number::from(2));
        assert_eq!(update.review_text, None);

        let payload: ReviewPayload =
            serde_json::from_value(json!({"review_text": "meh"})).unwrap();
        assert!(matches!(
            payload.validate_update(),
            Err(RecordError::MissingAttributes)
        ));
    }

    #[test]
    fn apply_keeps_text_when_omitted() {
        let mut fields = ReviewFields {
            user_id: 9,
            business_id: 1,
            stars: Number::from(5),
            review_text: Some("great".to_string()),
        };
        ReviewUpdate {
            stars: Number::from(4),
            review_text: None,
        }
        .apply(&mut fields);
        assert_eq!(fields.stars, Number::from(4));
        assert_eq!(fields.review_text.as_deref(), Some("great"));

        ReviewUpdate {
            stars: Number::from(3),
            review_text: Some("fine".to_string()),
        }
        .apply(&mut fields);
        assert_eq!(fields.review_text.as_deref(), Some("fine"));
    }

    #[test]
    fn absent_text_is_not_stored_or_rendered() {
        let fields = ReviewFields {
            user_id: 9,
            business_id: 1,
            stars: Number::from(5),
            review_text: None,
        };
        let properties = to_properties(&fields).unwrap();
        assert!(!properties.contains_key("review_text"));

        let review = Review::from_stored(StoredEntity { id: 3, properties }).unwrap();
        let rendered = serde_json::to_value(&review).unwrap();
        assert_eq!(
            rendered,
            json!({"id": 3, "user_id": 9, "business_id": 1, "stars": 5})
        );
    }

    #[test]
    fn empty_text_is_distinct_from_absent() {
        let payload: ReviewPayload = serde_json::from_value(
            json!({"user_id": 9, "business_id": 1, "stars": 5, "review_text": ""}),
        )
        .unwrap();
        let fields = payload.validate_create().unwrap();
        assert_eq!(fields.review_text.as_deref(), Some(""));
    }

    #[test]
    fn fractional_stars_are_kept_as_sent() {
        let payload: ReviewPayload =
            serde_json::from_value(json!({"user_id": 9, "business_id": 1, "stars": 4.5}))
                .unwrap();
        let fields = payload.validate_create().unwrap();
        assert_eq!(fields.stars.as_f64(), Some(4.5));

        let properties = to_properties(&fields).unwrap();
        let review = Review::from_stored(StoredEntity { id: 3, properties }).unwrap();
        assert_eq!(serde_json::to_value(&review).unwrap()["stars"], json!(4.5));

        let update: ReviewPayload = serde_json::from_value(json!({"stars": 2.5})).unwrap();
        let mut fields = fields;
        update.validate_update().unwrap().apply(&mut fields);
        assert_eq!(fields.stars.as_f64(), Some(2.5));
    }

    #[test]
    fn non_numeric_stars_do_not_deserialize() {
        let result = serde_json::from_value::<ReviewPayload>(json!({"stars": "five"}));
        assert!(result.is_err());
    }
}
