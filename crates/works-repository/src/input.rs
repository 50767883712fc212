//! Create and patch payloads
//!
//! Both payloads are explicit allow-lists. Keys outside them, `id` included,
//! are dropped during deserialization and never reach the stored record.
//!
//! A create body that is not a JSON object carries no fields and fails
//! validation on `title`. A patch body must be a JSON object.

use crate::error::RepositoryError;
use crate::lenient::Fields;
use serde::{Deserialize, Deserializer, Serialize};
use works_store::{Work, WorkId};

/// Required fields, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "client", "description", "category", "status"];

/// Payload for creating a work
///
/// Deserialized fields that are `null`, `false`, `0` or `""` count as
/// absent; other scalars are coerced to strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWork {
    /// Project title (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Client name (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Description (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Status (required)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// End date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Awards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    /// Image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for NewWork {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::any(deserializer)?;
        Ok(Self {
            title: fields.truthy("title")?,
            client: fields.truthy("client")?,
            description: fields.truthy("description")?,
            category: fields.truthy("category")?,
            status: fields.truthy("status")?,
            budget: fields.truthy("budget")?,
            start_date: fields.truthy("startDate")?,
            end_date: fields.truthy("endDate")?,
            location: fields.truthy("location")?,
            awards: fields.truthy("awards")?,
            images: fields.list("images")?,
        })
    }
}

/// Validated create payload awaiting an id
#[derive(Debug, Clone)]
pub struct WorkDraft(Work);

impl WorkDraft {
    /// Assign the id and produce the record
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: WorkId) -> Work {
        self.0.id = id;
        self.0
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl NewWork {
    /// Create payload with the required fields
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        client: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            client: Some(client.into()),
            description: Some(description.into()),
            category: Some(category.into()),
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// With budget
    #[must_use]
    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    /// With start and end dates
    #[must_use]
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// With location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// With awards
    #[must_use]
    pub fn with_awards(mut self, awards: impl Into<String>) -> Self {
        self.awards = Some(awards.into());
        self
    }

    /// With image URLs
    #[must_use]
    pub fn with_images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }

    /// First required field that is absent or empty
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        let values = [
            &self.title,
            &self.client,
            &self.description,
            &self.category,
            &self.status,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .find(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(field, _)| *field)
    }

    /// Validate and convert into a draft
    ///
    /// Empty optional strings become absent; `images` defaults to empty.
    ///
    /// # Errors
    /// `RepositoryError::Validation` naming the first missing required field
    pub fn validate(self) -> Result<WorkDraft, RepositoryError> {
        if let Some(field) = self.missing_field() {
            return Err(RepositoryError::validation(field));
        }

        Ok(WorkDraft(Work {
            id: WorkId(0),
            title: self.title.unwrap_or_default(),
            client: self.client.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            budget: non_empty(self.budget),
            start_date: non_empty(self.start_date),
            end_date: non_empty(self.end_date),
            location: non_empty(self.location),
            awards: non_empty(self.awards),
            images: self.images.unwrap_or_default(),
        }))
    }
}

/// Partial update of a work
///
/// For each field, absent means "keep". A supplied required field must be
/// non-empty. A supplied optional field set to `null` or `""` is cleared.
/// `images` replaces the list only when an array is supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPatch {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    /// Client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Option<String>>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// Category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    /// Status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
    /// Budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Option<String>>,
    /// Start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<String>>,
    /// End date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<String>>,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    /// Awards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awards: Option<Option<String>>,
    /// Image URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl<'de> Deserialize<'de> for WorkPatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Fields::object(deserializer)?;
        Ok(Self {
            title: fields.patch("title")?,
            client: fields.patch("client")?,
            description: fields.patch("description")?,
            category: fields.patch("category")?,
            status: fields.patch("status")?,
            budget: fields.patch("budget")?,
            start_date: fields.patch("startDate")?,
            end_date: fields.patch("endDate")?,
            location: fields.patch("location")?,
            awards: fields.patch("awards")?,
            images: fields.list("images")?,
        })
    }
}

impl WorkPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    #[must_use]
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(Some(value.into()));
        self
    }

    /// Set client
    #[must_use]
    pub fn client(mut self, value: impl Into<String>) -> Self {
        self.client = Some(Some(value.into()));
        self
    }

    /// Set status
    #[must_use]
    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(Some(value.into()));
        self
    }

    /// Set category
    #[must_use]
    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = Some(Some(value.into()));
        self
    }

    /// Set awards; `None` clears them
    #[must_use]
    pub fn awards(mut self, value: Option<&str>) -> Self {
        self.awards = Some(value.map(str::to_string));
        self
    }

    /// Set end date; `None` clears it
    #[must_use]
    pub fn end_date(mut self, value: Option<&str>) -> Self {
        self.end_date = Some(value.map(str::to_string));
        self
    }

    /// Replace images
    #[must_use]
    pub fn images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }

    /// First supplied required field that is null or empty
    #[must_use]
    pub fn invalid_field(&self) -> Option<&'static str> {
        let values = [
            &self.title,
            &self.client,
            &self.description,
            &self.category,
            &self.status,
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .find(|(_, value)| matches!(value, Some(v) if v.as_deref().map_or(true, str::is_empty)))
            .map(|(field, _)| *field)
    }

    /// Check the patch can be applied without emptying a required field
    ///
    /// # Errors
    /// `RepositoryError::Validation` naming the first offending field
    pub fn validate(&self) -> Result<(), RepositoryError> {
        match self.invalid_field() {
            Some(field) => Err(RepositoryError::validation(field)),
            None => Ok(()),
        }
    }

    /// Merge supplied fields over `work`; `work.id` is never touched
    ///
    /// Callers validate first; a required field supplied empty is skipped here.
    pub fn apply_to(self, work: &mut Work) {
        fn required(target: &mut String, value: Option<Option<String>>) {
            if let Some(Some(v)) = value {
                if !v.is_empty() {
                    *target = v;
                }
            }
        }
        fn optional(target: &mut Option<String>, value: Option<Option<String>>) {
            if let Some(v) = value {
                *target = non_empty(v);
            }
        }

        required(&mut work.title, self.title);
        required(&mut work.client, self.client);
        required(&mut work.description, self.description);
        required(&mut work.category, self.category);
        required(&mut work.status, self.status);
        optional(&mut work.budget, self.budget);
        optional(&mut work.start_date, self.start_date);
        optional(&mut work.end_date, self.end_date);
        optional(&mut work.location, self.location);
        optional(&mut work.awards, self.awards);
        if let Some(images) = self.images {
            work.images = images;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored() -> Work {
        Work::new(WorkId(5), "Title", "Client", "Desc", "Commercial", "Completed")
            .with_dates(Some("2024-01-15"), Some("2024-02-28"))
            .with_images(["/a.png", "/b.png"])
    }

    #[test]
    fn missing_field_checks_in_fixed_order() {
        let input = NewWork {
            status: Some("E".into()),
            client: Some(String::new()),
            ..NewWork::default()
        };
        assert_eq!(input.missing_field(), Some("title"));

        let input = NewWork::new("A", "", "", "D", "E");
        assert_eq!(input.missing_field(), Some("client"));

        let input = NewWork::new("A", "B", "C", "D", "");
        assert_eq!(input.missing_field(), Some("status"));

        assert_eq!(NewWork::new("A", "B", "C", "D", "E").missing_field(), None);
    }

    #[test]
    fn validate_drops_empty_optionals_and_defaults_images() {
        let draft = NewWork::new("A", "B", "C", "D", "E")
            .with_budget("")
            .with_location("Remote")
            .validate()
            .unwrap();
        let work = draft.with_id(WorkId(3));

        assert_eq!(work.id, WorkId(3));
        assert_eq!(work.budget, None);
        assert_eq!(work.location.as_deref(), Some("Remote"));
        assert!(work.images.is_empty());
    }

    #[test]
    fn new_work_body_ignores_id_and_unknown_keys() {
        let input: NewWork = serde_json::from_str(
            r#"{"id": 99, "title": "A", "client": "B", "description": "C",
                "category": "D", "status": "E", "budget": 1000, "secret": "x"}"#,
        )
        .unwrap();
        assert_eq!(input.budget.as_deref(), Some("1000"));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn falsy_required_values_count_as_missing() {
        for title in ["false", "0", "0.0", "null"] {
            let body = format!(
                r#"{{"title": {title}, "client": "B", "description": "C",
                    "category": "D", "status": "E"}}"#
            );
            let input: NewWork = serde_json::from_str(&body).unwrap();
            assert_eq!(input.title, None, "{title}");
            assert!(matches!(
                input.validate(),
                Err(RepositoryError::Validation { field: "title" })
            ));
        }

        let input: NewWork = serde_json::from_str(
            r#"{"title": true, "client": 7, "description": "C",
                "category": "D", "status": "E", "budget": 0}"#,
        )
        .unwrap();
        let work = input.validate().unwrap().with_id(WorkId(1));
        assert_eq!((work.title.as_str(), work.client.as_str()), ("true", "7"));
        assert_eq!(work.budget, None);
    }

    #[test]
    fn non_object_create_body_has_no_fields() {
        for body in [r#"["A", "B", "C", "D", "E"]"#, "\"title\"", "null", "42"] {
            let input: NewWork = serde_json::from_str(body).unwrap();
            assert_eq!(input, NewWork::default(), "{body}");
            assert!(matches!(
                input.validate(),
                Err(RepositoryError::Validation { field: "title" })
            ));
        }
    }

    #[test]
    fn patch_body_must_be_an_object() {
        assert!(serde_json::from_str::<WorkPatch>(r#"["A", "B"]"#).is_err());
        assert!(serde_json::from_str::<WorkPatch>("null").is_err());
        assert!(serde_json::from_str::<WorkPatch>("{}").is_ok());
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let mut work = stored();
        WorkPatch::new().status("In Production").apply_to(&mut work);

        assert_eq!(work.status, "In Production");
        assert_eq!(work.title, "Title");
        assert_eq!(work.images, vec!["/a.png".to_string(), "/b.png".to_string()]);
        assert_eq!(work.end_date.as_deref(), Some("2024-02-28"));
    }

    #[test]
    fn patch_clears_optional_with_null_or_empty() {
        let mut work = stored();
        let patch: WorkPatch =
            serde_json::from_str(r#"{"endDate": null, "startDate": ""}"#).unwrap();
        patch.apply_to(&mut work);

        assert_eq!(work.end_date, None);
        assert_eq!(work.start_date, None);
    }

    #[test]
    fn patch_body_id_is_dropped() {
        let mut work = stored();
        let patch: WorkPatch = serde_json::from_str(r#"{"id": 1, "title": "New"}"#).unwrap();
        patch.apply_to(&mut work);

        assert_eq!(work.id, WorkId(5));
        assert_eq!(work.title, "New");
    }

    #[test]
    fn patch_images_only_replace_when_array() {
        let mut work = stored();
        let patch: WorkPatch = serde_json::from_str(r#"{"images": "nope"}"#).unwrap();
        patch.apply_to(&mut work);
        assert_eq!(work.images.len(), 2);

        WorkPatch::new().images(["/c.png"]).apply_to(&mut work);
        assert_eq!(work.images, vec!["/c.png".to_string()]);
    }

    #[test]
    fn patch_rejects_emptied_required_field() {
        let patch: WorkPatch = serde_json::from_str(r#"{"client": ""}"#).unwrap();
        assert_eq!(patch.invalid_field(), Some("client"));

        let patch: WorkPatch = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert!(matches!(
            patch.validate(),
            Err(RepositoryError::Validation { field: "status" })
        ));

        assert!(WorkPatch::new().title("ok").validate().is_ok());
    }

    #[test]
    fn patch_serializes_cleared_field_as_null() {
        let patch = WorkPatch::new().awards(None).title("T");
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "T", "awards": null}));
    }
}
