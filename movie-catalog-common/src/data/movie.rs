use serde::{de, ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    data::person::{Actor, Producer},
    error::{CatalogError, CatalogResult},
    validation::{schemas, FormValues},
};

/// Movie as returned by the backend, with its actors and producer embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Backend identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Title, also used as the image alt text
    pub name: String,
    /// Four digit year, stored by some backends as text
    #[serde(deserialize_with = "year_number_or_text")]
    pub year_of_release: u16,
    /// Short synopsis
    pub plot: String,
    /// Absolute URL of the poster image
    pub poster: String,
    /// Cast embedded as full records
    #[serde(default)]
    pub actors: Vec<Actor>,
    /// Producer embedded as a full record, absent for legacy entries
    #[serde(default)]
    pub producer: Option<Producer>,
}

impl Movie {
    /// Ids of the embedded actors in cast order
    pub fn actor_ids(&self) -> Vec<String> {
        self.actors.iter().map(|actor| actor.id.clone()).collect()
    }

    /// Initial form values for editing this movie. Embedded actors and producer are replaced by
    /// their ids.
    pub fn form_values(&self) -> FormValues {
        FormValues::new()
            .with(schemas::NAME, self.name.as_str())
            .with(schemas::YEAR_OF_RELEASE, self.year_of_release.to_string())
            .with(schemas::PLOT, self.plot.as_str())
            .with(schemas::POSTER, self.poster.as_str())
            .with(schemas::ACTORS, self.actor_ids())
            .with(
                schemas::PRODUCER,
                self.producer
                    .as_ref()
                    .map(|producer| producer.id.clone())
                    .unwrap_or_default(),
            )
    }

    /// Comma separated names of the cast, as shown on the listing card
    pub fn actor_names(&self) -> String {
        self.actors
            .iter()
            .map(|actor| actor.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Name of the producer, empty when there is none
    pub fn producer_name(&self) -> &str {
        self.producer
            .as_ref()
            .map(|producer| producer.name.as_str())
            .unwrap_or_default()
    }
}

/// Body sent to create or edit a movie. The backend expects the actor ids as a JSON encoded
/// string rather than an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieRequest {
    /// Trimmed title
    pub name: String,
    /// Validated four digit year
    pub year_of_release: u16,
    /// Trimmed synopsis
    pub plot: String,
    /// Trimmed poster URL
    pub poster: String,
    /// Ids of the cast
    #[serde(serialize_with = "json_encoded")]
    pub actors: Vec<String>,
    /// Id of the producer
    pub producer: String,
}

impl TryFrom<&FormValues> for MovieRequest {
    type Error = CatalogError;

    fn try_from(values: &FormValues) -> CatalogResult<Self> {
        let year_text = values.text(schemas::YEAR_OF_RELEASE).trim();
        // same number parsing as the validation rules so `2010.0` is accepted by both
        let year_of_release = year_text
            .parse::<f64>()
            .ok()
            .filter(|year| year.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(year))
            .map(|year| year as u16)
            .ok_or_else(|| CatalogError::InvalidField {
                field: schemas::YEAR_OF_RELEASE,
                value: year_text.to_owned(),
            })?;
        Ok(Self {
            name: values.text(schemas::NAME).trim().to_owned(),
            year_of_release,
            plot: values.text(schemas::PLOT).trim().to_owned(),
            poster: values.text(schemas::POSTER).trim().to_owned(),
            actors: values.list(schemas::ACTORS).to_vec(),
            producer: values.text(schemas::PRODUCER).to_owned(),
        })
    }
}

/// Year as stored by the backend, either a JSON number or the raw text of the form
#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    /// `2010`
    Number(u16),
    /// `"2010"`
    Text(String),
}

/// Accept the year as a JSON number or as numeric text
fn year_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    match YearRepr::deserialize(deserializer)? {
        YearRepr::Number(year) => Ok(year),
        YearRepr::Text(text) => text
            .trim()
            .parse::<u16>()
            .map_err(|_| de::Error::custom(format!("invalid year of release `{text}`"))),
    }
}

/// Serialize `ids` as a string holding their JSON array
fn json_encoded<S: Serializer>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    let encoded = serde_json::to_string(ids).map_err(S::Error::custom)?;
    serializer.serialize_str(&encoded)
}
