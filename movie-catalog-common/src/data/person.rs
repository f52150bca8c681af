use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

use crate::{
    error::{CatalogError, CatalogResult},
    validation::{schemas, FormValues},
};

/// Gender of a person, serialized as the single letter code the backend stores
#[derive(
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
    AsRefStr,
    PartialEq,
    Eq,
    Debug,
    Copy,
    Clone,
)]
pub enum Gender {
    /// Male
    M,
    /// Female
    F,
    /// Others
    O,
}

impl Gender {
    /// Text shown to the user for the option
    pub const fn label(&self) -> &'static str {
        match self {
            Self::M => "Male",
            Self::F => "Female",
            Self::O => "Others",
        }
    }
}

/// Actor or producer as returned by the backend. Both entities share the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name. Not unique
    pub name: String,
    /// Absent for records created before gender was collected
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Date of birth as the raw timestamp text of the backend
    #[serde(rename = "dob", default)]
    pub date_of_birth: Option<String>,
    /// Free text biography, may be empty
    #[serde(default)]
    pub bio: String,
}

/// Person listed in the cast of a movie
pub type Actor = Person;
/// Person credited as the producer of a movie
pub type Producer = Person;

/// Body sent to create an actor or a producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonRequest {
    /// Trimmed name
    pub name: String,
    /// Selected gender
    pub gender: Gender,
    /// Date of birth, sent as `YYYY-MM-DD`
    pub dob: NaiveDate,
    /// Trimmed biography
    pub bio: String,
}

impl TryFrom<&FormValues> for PersonRequest {
    type Error = CatalogError;

    fn try_from(values: &FormValues) -> CatalogResult<Self> {
        let gender_text = values.text(schemas::GENDER).trim();
        let gender = gender_text
            .parse::<Gender>()
            .map_err(|_| CatalogError::UnknownGender(gender_text.to_owned()))?;
        let dob_text = values.text(schemas::DOB);
        let dob = NaiveDate::parse_from_str(dob_text.trim(), "%Y-%m-%d").map_err(|_| {
            CatalogError::InvalidField {
                field: schemas::DOB,
                value: dob_text.to_owned(),
            }
        })?;
        Ok(Self {
            name: values.text(schemas::NAME).trim().to_owned(),
            gender,
            dob,
            bio: values.text(schemas::BIO).trim().to_owned(),
        })
    }
}

/// Dependent entities that can be created from within the movie form
#[derive(IntoStaticStr, AsRefStr, PartialEq, Eq, Debug, Copy, Clone)]
pub enum EntityKind {
    /// Cast member, several per movie
    Actor,
    /// Producer, exactly one per movie
    Producer,
}

impl EntityKind {
    /// Name of the kind as shown in headings and logs
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Banner shown after the backend accepted a new person of this kind
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Actor => "Actor added successfully",
            Self::Producer => "Producer added successfully",
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use rstest::rstest;

    use super::{EntityKind, Gender, Person, PersonRequest};
    use crate::{
        error::CatalogError,
        validation::{schemas, FormValues},
    };

    fn values(gender: &str, dob: &str) -> FormValues {
        FormValues::new()
            .with(schemas::NAME, " Tom Hardy ")
            .with(schemas::GENDER, gender)
            .with(schemas::DOB, dob)
            .with(schemas::BIO, "English actor")
    }

    #[test]
    fn person_request_should_serialize_backend_shape() {
        let request = PersonRequest::try_from(&values("M", "1977-09-15")).unwrap();

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "Tom Hardy",
                "gender": "M",
                "dob": "1977-09-15",
                "bio": "English actor",
            })
        );
    }

    #[rstest]
    #[case("X", "1977-09-15")]
    #[case("F", "15/09/1977")]
    fn person_request_should_reject_unconvertible_values(#[case] gender: &str, #[case] dob: &str) {
        let result = PersonRequest::try_from(&values(gender, dob));

        assert!(matches!(
            result,
            Err(CatalogError::UnknownGender(_) | CatalogError::InvalidField { .. })
        ));
    }

    #[test]
    fn person_should_deserialize_with_missing_optional_fields() {
        let person: Person = serde_json::from_str(r#"{"_id":"a1","name":"Emily Blunt"}"#).unwrap();

        assert_eq!(person.id, "a1");
        assert_eq!(person.gender, None);
        assert_eq!(person.date_of_birth, None);
    }

    #[test]
    fn person_should_deserialize_backend_record() {
        let body = r#"{"_id":"a1","name":"Emily Blunt","gender":"F","dob":"1983-02-23T00:00:00.000Z","bio":"Actress"}"#;

        let person: Person = serde_json::from_str(body).unwrap();

        assert_eq!(person.gender, Some(Gender::F));
        assert_eq!(
            NaiveDate::from_ymd_opt(1983, 2, 23).map(|d| d.to_string()),
            person.date_of_birth.map(|d| d.chars().take(10).collect())
        );
    }

    #[test]
    fn entity_kind_should_describe_itself() {
        assert_eq!(EntityKind::Actor.label(), "Actor");
        assert_eq!(EntityKind::Producer.success_message(), "Producer added successfully");
    }
}
